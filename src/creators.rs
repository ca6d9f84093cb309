// Creator directory cache.
// Fetches the creator list, orders it by popularity and optionally persists it.

use tracing::debug;

use crate::api::{Creator, ResourceClient};
use crate::error::Result;
use crate::store::{CREATOR_CACHE_FILE, LocalStore};

/// Order creators by favorite count, most favorited first.
///
/// The sort is stable: creators with equal counts keep the order the
/// server returned them in.
pub fn sort_by_favorites(creators: &mut [Creator]) {
    creators.sort_by(|a, b| b.favorited.cmp(&a.favorited));
}

/// Fetch the creator directory and return it sorted by favorite count.
/// Nothing is persisted.
pub async fn build_creator_cache(client: &ResourceClient) -> Result<Vec<Creator>> {
    let mut creators = client.creators_list().await?;
    sort_by_favorites(&mut creators);
    debug!(count = creators.len(), "built creator cache");
    Ok(creators)
}

/// Stores snapshots of the creator directory.
///
/// Nothing here refreshes on its own; a snapshot is only as fresh as the
/// last call to [`refresh`](Self::refresh).
#[derive(Debug, Clone)]
pub struct CreatorCacheService {
    store: LocalStore,
}

impl CreatorCacheService {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Fetch, sort and persist the creator directory.
    pub async fn refresh(&self, client: &ResourceClient) -> Result<Vec<Creator>> {
        let creators = build_creator_cache(client).await?;
        self.persist(&creators)?;
        Ok(creators)
    }

    pub fn persist(&self, creators: &[Creator]) -> Result<()> {
        self.store.write(CREATOR_CACHE_FILE, creators)
    }

    /// The last persisted snapshot, or `None` if none was ever saved.
    pub fn load(&self) -> Result<Option<Vec<Creator>>> {
        self.store.load(CREATOR_CACHE_FILE)
    }
}
