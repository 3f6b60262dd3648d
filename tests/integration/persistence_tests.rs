//! Cache persistence across client instances

use wiremock::MockServer;

use labstock_client::{ConfigBuilder, InventoryClient, PermissionKey, Verb};

use crate::common::mount_permission;

/// Decisions written by one client session are visible to the next one
/// opened on the same cache file, so a page reload costs no round trips.
#[tokio::test]
async fn decisions_survive_a_client_restart() {
    let server = MockServer::start().await;
    mount_permission(&server, "GET", "products", "-2", 200, 1).await;
    mount_permission(&server, "POST", "products", "", 403, 1).await;

    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("permissions.json");

    let config = ConfigBuilder::new(&server.uri())
        .cache_path(&cache_path)
        .build();

    let browse = PermissionKey::collection("products", Verb::Get);
    let create = PermissionKey::creation("products");

    {
        let client = InventoryClient::new(config.clone()).unwrap();
        assert!(client.check(&browse).await.is_granted());
        assert!(!client.check(&create).await.is_granted());
    }

    // Second instance: both answers come from the file, the expect(1)
    // counters above verify no further requests were made.
    let client = InventoryClient::new(config).unwrap();
    assert!(client.check(&browse).await.is_granted());
    assert!(!client.check(&create).await.is_granted());
    assert_eq!(client.cache().len(), 2);
}

#[tokio::test]
async fn clearing_a_persistent_cache_empties_the_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let cache_path = dir.path().join("permissions.json");

    let config = ConfigBuilder::new(&server.uri())
        .cache_path(&cache_path)
        .build();

    {
        let client = InventoryClient::new(config.clone()).unwrap();
        client
            .cache()
            .set(&PermissionKey::collection("products", Verb::Get), true);
        client.cache().clear();
    }

    let client = InventoryClient::new(config).unwrap();
    assert!(client.cache().is_empty());
}
