// kcnotif core library.
// Client for the Kemono/Coomer content API plus a local creator cache and settings store.

pub mod api;
pub mod config;
pub mod creators;
pub mod error;
pub mod settings;
pub mod store;

pub use api::{
    ApiRequest, CalendarDate, Creator, ImportRequest, PaginationCursor, PeriodFilter, Reply,
    ResourceClient, ResponseKind, ReviewStatus, ServiceIdentifier,
};
pub use config::{ClientConfig, Deployment};
pub use creators::{CreatorCacheService, build_creator_cache, sort_by_favorites};
pub use error::{ErrorKind, KcError, Result};
pub use settings::{SettingsDocument, SettingsService};
pub use store::LocalStore;
