// Content API endpoint functions.
// Thin named bindings over ResourceClient::call for each remote operation.

use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::error::Result;

use super::client::{ApiRequest, ResourceClient};
use super::types::{
    CalendarDate, Creator, ImportRequest, PaginationCursor, PeriodFilter, ReviewStatus,
    ServiceIdentifier,
};

/// Segments for `{service}/user/{creator_id}/...`.
fn creator_path(service: ServiceIdentifier, creator_id: &str, tail: &[&str]) -> Vec<String> {
    let mut segments = vec![
        service.as_str().to_string(),
        "user".to_string(),
        creator_id.to_string(),
    ];
    segments.extend(tail.iter().map(|s| s.to_string()));
    segments
}

/// Segments for `{service}/user/{creator_id}/post/{post_id}/...`.
fn post_path(
    service: ServiceIdentifier,
    creator_id: &str,
    post_id: &str,
    tail: &[&str],
) -> Vec<String> {
    let mut segments = creator_path(service, creator_id, &["post", post_id]);
    segments.extend(tail.iter().map(|s| s.to_string()));
    segments
}

impl ResourceClient {
    // ---- Creators ----

    /// Get the full creator directory.
    pub async fn creators_list(&self) -> Result<Vec<Creator>> {
        self.call_json(ApiRequest::get(["creators.txt"])).await
    }

    /// Get a page of a creator's posts, optionally filtered by `query`.
    pub async fn creator_posts(
        &self,
        service: ServiceIdentifier,
        creator_id: &str,
        query: &str,
        offset: PaginationCursor,
    ) -> Result<Value> {
        let request = ApiRequest::get(creator_path(service, creator_id, &[]))
            .query("q", query)
            .query("o", offset);
        self.call_json(request).await
    }

    /// Get a creator's announcements.
    pub async fn creator_announcements(
        &self,
        service: ServiceIdentifier,
        creator_id: &str,
    ) -> Result<Value> {
        let request = ApiRequest::get(creator_path(service, creator_id, &["announcements"]));
        self.call_json(request).await
    }

    /// Fancards only exist for fanbox creators.
    pub async fn creator_fancards(&self, creator_id: &str) -> Result<Value> {
        let request =
            ApiRequest::get(creator_path(ServiceIdentifier::Fanbox, creator_id, &["fancards"]));
        self.call_json(request).await
    }

    /// Get a creator's profile.
    pub async fn creator_profile(
        &self,
        service: ServiceIdentifier,
        creator_id: &str,
    ) -> Result<Value> {
        let request = ApiRequest::get(creator_path(service, creator_id, &["profile"]));
        self.call_json(request).await
    }

    /// Get accounts linked to a creator.
    pub async fn creator_links(
        &self,
        service: ServiceIdentifier,
        creator_id: &str,
    ) -> Result<Value> {
        let request = ApiRequest::get(creator_path(service, creator_id, &["links"]));
        self.call_json(request).await
    }

    /// Get the tags used on a creator's posts.
    pub async fn creator_tags(
        &self,
        service: ServiceIdentifier,
        creator_id: &str,
    ) -> Result<Value> {
        let request = ApiRequest::get(creator_path(service, creator_id, &["tags"]));
        self.call_json(request).await
    }

    /// Get the form data for a new link request.
    pub async fn new_link_form(
        &self,
        service: ServiceIdentifier,
        creator_id: &str,
    ) -> Result<Value> {
        let request = ApiRequest::get(creator_path(service, creator_id, &["links", "new"]));
        self.call_json(request).await
    }

    /// Submit a new link request for a creator.
    pub async fn add_link(&self, service: ServiceIdentifier, creator_id: &str) -> Result<Value> {
        let request = ApiRequest::post(creator_path(service, creator_id, &["links", "new"]));
        self.call_json(request).await
    }

    /// Get a page of a creator's file shares.
    pub async fn creator_shares(
        &self,
        service: ServiceIdentifier,
        creator_id: &str,
        offset: PaginationCursor,
    ) -> Result<Value> {
        let request = ApiRequest::get(creator_path(service, creator_id, &["shares"]))
            .query("o", offset);
        self.call_json(request).await
    }

    /// Get a creator's approved direct messages.
    pub async fn creator_dms(&self, service: ServiceIdentifier, creator_id: &str) -> Result<Value> {
        let request = ApiRequest::get(creator_path(service, creator_id, &["dms"]));
        self.call_json(request).await
    }

    /// Get a random creator.
    pub async fn random_artist(&self) -> Result<Value> {
        self.call_json(ApiRequest::get(["artists", "random"])).await
    }

    // ---- Posts ----

    /// Search all posts by free text and tags.
    pub async fn search_posts(
        &self,
        query: &str,
        tags: &[&str],
        offset: PaginationCursor,
    ) -> Result<Value> {
        let request = ApiRequest::get(["posts"])
            .query("q", query)
            .query("o", offset)
            .query_list("tag", tags);
        self.call_json(request).await
    }

    /// Get a single post of a creator.
    pub async fn creator_post(
        &self,
        service: ServiceIdentifier,
        creator_id: &str,
        post_id: &str,
    ) -> Result<Value> {
        let request = ApiRequest::get(post_path(service, creator_id, post_id, &[]));
        self.call_json(request).await
    }

    /// List the stored revisions of a post.
    pub async fn creator_post_revisions(
        &self,
        service: ServiceIdentifier,
        creator_id: &str,
        post_id: &str,
    ) -> Result<Value> {
        let request = ApiRequest::get(post_path(service, creator_id, post_id, &["revisions"]));
        self.call_json(request).await
    }

    /// Get one revision of a post.
    pub async fn creator_post_revision(
        &self,
        service: ServiceIdentifier,
        creator_id: &str,
        post_id: &str,
        revision_id: &str,
    ) -> Result<Value> {
        let tail = ["revision", revision_id];
        let request = ApiRequest::get(post_path(service, creator_id, post_id, &tail));
        self.call_json(request).await
    }

    /// Get the comments on a post.
    pub async fn post_comments(
        &self,
        service: ServiceIdentifier,
        creator_id: &str,
        post_id: &str,
    ) -> Result<Value> {
        let request = ApiRequest::get(post_path(service, creator_id, post_id, &["comments"]));
        self.call_json(request).await
    }

    /// Flag a post for reimport.
    pub async fn flag_post(
        &self,
        service: ServiceIdentifier,
        creator_id: &str,
        post_id: &str,
    ) -> Result<StatusCode> {
        let request = ApiRequest::post(post_path(service, creator_id, post_id, &["flag"]));
        self.call_status(request).await
    }

    /// Check whether a post is flagged. The server answers with the status
    /// code alone.
    pub async fn check_flag(
        &self,
        service: ServiceIdentifier,
        creator_id: &str,
        post_id: &str,
    ) -> Result<StatusCode> {
        let request = ApiRequest::get(post_path(service, creator_id, post_id, &["flag"]));
        self.call_status(request).await
    }

    /// Look up a post by service and id without knowing its creator.
    pub async fn post(&self, service: ServiceIdentifier, post_id: &str) -> Result<Value> {
        let request = ApiRequest::get([service.as_str(), "post", post_id]);
        self.call_json(request).await
    }

    /// Get a random post.
    pub async fn random_post(&self) -> Result<Value> {
        self.call_json(ApiRequest::get(["posts", "random"])).await
    }

    /// Get the most popular posts of a period ending at `date`.
    pub async fn popular_posts(
        &self,
        date: CalendarDate,
        period: PeriodFilter,
        offset: PaginationCursor,
    ) -> Result<Value> {
        let request = ApiRequest::get(["posts", "popular"])
            .query("date", date)
            .query("period", period.as_str())
            .query("o", offset);
        self.call_json(request).await
    }

    /// List all post tags.
    pub async fn post_tags(&self) -> Result<Value> {
        self.call_json(ApiRequest::get(["posts", "tags"])).await
    }

    // ---- Files ----

    /// Find posts containing a file with the given hash.
    pub async fn search_file_hash(&self, file_hash: &str) -> Result<Value> {
        let request = ApiRequest::get(["search_hash", file_hash]);
        self.call_json(request).await
    }

    /// Resolve an archive file by its hash.
    pub async fn archive_file(&self, file_hash: &str) -> Result<Value> {
        let request = ApiRequest::get(["posts", "archives", file_hash]);
        self.call_json(request).await
    }

    // ---- Discord ----

    /// Get a page of messages from a Discord channel.
    pub async fn discord_channel(
        &self,
        channel_id: &str,
        offset: PaginationCursor,
    ) -> Result<Value> {
        let request = ApiRequest::get(["discord", "channel", channel_id])
            .query("o", offset);
        self.call_json(request).await
    }

    /// List the channels of a Discord server.
    pub async fn discord_lookup(&self, server_id: &str) -> Result<Value> {
        let request = ApiRequest::get(["discord", "channel", "lookup", server_id]);
        self.call_json(request).await
    }

    // ---- Favorites ----

    /// List the account's favorites.
    pub async fn favorites(&self) -> Result<Value> {
        let request = ApiRequest::get(["account", "favourites"]);
        self.call_json(request).await
    }

    /// Add a post to the account's favorites.
    pub async fn favorite_post(
        &self,
        service: ServiceIdentifier,
        creator_id: &str,
        post_id: &str,
    ) -> Result<StatusCode> {
        let segments = ["favorites", "post", service.as_str(), creator_id, post_id];
        self.call_status(ApiRequest::post(segments)).await
    }

    /// Remove a post from the account's favorites.
    pub async fn unfavorite_post(
        &self,
        service: ServiceIdentifier,
        creator_id: &str,
        post_id: &str,
    ) -> Result<StatusCode> {
        let segments = ["favorites", "post", service.as_str(), creator_id, post_id];
        self.call_status(ApiRequest::delete(segments)).await
    }

    /// Add a creator to the account's favorites.
    pub async fn favorite_creator(
        &self,
        service: ServiceIdentifier,
        creator_id: &str,
    ) -> Result<StatusCode> {
        let segments = ["favorites", "creator", service.as_str(), creator_id];
        self.call_status(ApiRequest::post(segments)).await
    }

    /// Remove a creator from the account's favorites.
    pub async fn unfavorite_creator(
        &self,
        service: ServiceIdentifier,
        creator_id: &str,
    ) -> Result<StatusCode> {
        let segments = ["favorites", "creator", service.as_str(), creator_id];
        self.call_status(ApiRequest::delete(segments)).await
    }

    // ---- Authentication and account ----

    /// Register an account. `favorites` is uploaded as-is.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
        favorites: Value,
    ) -> Result<StatusCode> {
        let request = ApiRequest::post(["authentication", "register"]).json_body(json!({
            "username": username,
            "password": password,
            "confirm_password": confirm_password,
            "favorites_json": favorites,
        }));
        self.call_status(request).await
    }

    /// Log in with a username and password.
    pub async fn login(&self, username: &str, password: &str) -> Result<Value> {
        let request = ApiRequest::post(["authentication", "login"])
            .json_body(json!({ "username": username, "password": password }));
        self.call_json(request).await
    }

    /// End the current session.
    pub async fn logout(&self) -> Result<StatusCode> {
        let request = ApiRequest::post(["authentication", "logout"]);
        self.call_status(request).await
    }

    /// Get the logged-in account.
    pub async fn account(&self) -> Result<Value> {
        self.call_json(ApiRequest::get(["account"])).await
    }

    /// Change the account password.
    pub async fn change_password(
        &self,
        current: &str,
        new: &str,
        confirmation: &str,
    ) -> Result<StatusCode> {
        let request = ApiRequest::post(["account", "change_password"]).json_body(json!({
            "current-password": current,
            "new-password": new,
            "new-password-confirmation": confirmation,
        }));
        self.call_status(request).await
    }

    /// Get the account's notifications.
    pub async fn notifications(&self) -> Result<Value> {
        let request = ApiRequest::get(["account", "notifications"]);
        self.call_json(request).await
    }

    /// List the account's stored import keys.
    pub async fn keys(&self) -> Result<Value> {
        self.call_json(ApiRequest::get(["account", "keys"])).await
    }

    /// Revoke the account's import keys.
    pub async fn revoke_keys(&self) -> Result<Value> {
        let request = ApiRequest::post(["account", "keys"])
            .json_body(json!({ "revoke": [1] }));
        self.call_json(request).await
    }

    /// Get the account's post uploads.
    pub async fn upload_posts(&self) -> Result<Value> {
        let request = ApiRequest::get(["account", "posts", "upload"]);
        self.call_json(request).await
    }

    /// List imported direct messages awaiting review.
    pub async fn review_dms(&self, status: ReviewStatus) -> Result<Value> {
        let request = ApiRequest::get(["account", "review_dms"])
            .query("status", status.as_str());
        self.call_json(request).await
    }

    /// Approve reviewed direct messages by hash.
    pub async fn approve_dms(
        &self,
        approved_hashes: &[&str],
        delete_ignored: bool,
    ) -> Result<Value> {
        let request = ApiRequest::post(["account", "review_dms"]).json_body(json!({
            "approved_hashes": approved_hashes,
            "delete_ignored": delete_ignored,
        }));
        self.call_json(request).await
    }

    // ---- Shares and DMs ----

    /// Get a page of all file shares.
    pub async fn shares(&self, offset: PaginationCursor) -> Result<Value> {
        let request = ApiRequest::get(["shares"]).query("o", offset);
        self.call_json(request).await
    }

    /// Get a single file share.
    pub async fn share(&self, share_id: &str) -> Result<Value> {
        self.call_json(ApiRequest::get(["share", share_id])).await
    }

    /// Search all approved direct messages.
    pub async fn dms(&self, query: &str, offset: PaginationCursor) -> Result<Value> {
        let request = ApiRequest::get(["dms"])
            .query("q", query)
            .query("o", offset);
        self.call_json(request).await
    }

    /// Whether the account has direct messages awaiting review.
    pub async fn has_pending_dms(&self) -> Result<bool> {
        self.call_json(ApiRequest::get(["has_pending_dms"])).await
    }

    // ---- Misc ----

    /// Server build identifier, returned as plain text.
    pub async fn app_version(&self) -> Result<String> {
        self.call_text(ApiRequest::get(["app_version"])).await
    }

    /// Submit an import job.
    pub async fn submit_import(&self, import: &ImportRequest) -> Result<Value> {
        let body = serde_json::to_value(import)?;
        let request = ApiRequest::post(["importer", "submit"]).json_body(body);
        self.call_json(request).await
    }
}
