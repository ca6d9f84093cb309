use std::time::Duration;

use httpmock::prelude::*;
use kcnotif::{
    ClientConfig, CreatorCacheService, ErrorKind, LocalStore, ResourceClient, ServiceIdentifier,
    SettingsService, build_creator_cache,
};
use serde_json::json;
use tempfile::TempDir;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn test_startup_workflow() {
    init_logging();
    let temp_dir = TempDir::new().unwrap();
    let store = LocalStore::new(temp_dir.path().join("data"));

    // First run: nothing on disk yet.
    let settings = SettingsService::new(store.clone());
    let current = settings.ensure_timer(600).unwrap();
    assert_eq!(current.timer_interval(), Some(Duration::from_secs(600)));

    let server = MockServer::start_async().await;
    let creators_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/creators.txt")
                .header("cookie", "session=token");
            then.status(200).json_body(json!([
                {"favorited": 10, "id": "1", "name": "one", "service": "patreon"},
                {"favorited": 250, "id": "2", "name": "two", "service": "fanbox"},
                {"favorited": 10, "id": "3", "name": "three", "service": "onlyfans"}
            ]));
        })
        .await;

    let config = ClientConfig::new(format!("{}/api/v1", server.base_url()))
        .with_session("token")
        .with_timeout(Some(Duration::from_secs(5)));
    let client = ResourceClient::new(config).unwrap();

    let cache = CreatorCacheService::new(store.clone());
    let creators = cache.refresh(&client).await.unwrap();
    creators_mock.assert_async().await;

    let names: Vec<_> = creators.iter().filter_map(|c| c.name()).collect();
    assert_eq!(names, ["two", "one", "three"]);
    assert_eq!(creators[2].service(), Some(ServiceIdentifier::OnlyFans));

    // Second run: the stored interval and snapshot are reused as-is.
    let settings = SettingsService::new(store.clone());
    assert_eq!(settings.ensure_timer(30).unwrap().timer(), Some(600));
    assert_eq!(cache.load().unwrap(), Some(creators));
}

#[tokio::test]
async fn test_failures_are_distinguishable() {
    init_logging();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/creators.txt");
            then.status(429).body("slow down");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/account");
            then.status(200).body("{\"truncated\":");
        })
        .await;

    let client =
        ResourceClient::with_base_url(&format!("{}/api/v1", server.base_url())).unwrap();

    let err = build_creator_cache(&client).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RemoteStatus);
    assert_eq!(err.status().map(|s| s.as_u16()), Some(429));

    let err = client.account().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);

    let temp_dir = TempDir::new().unwrap();
    let store = LocalStore::new(temp_dir.path());
    std::fs::write(store.path_for("saved_data"), "not json").unwrap();
    let err = SettingsService::new(store).ensure_timer(60).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptStore);
}
