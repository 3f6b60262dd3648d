//! Gate check flows against a mock backend

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use labstock_client::{CheckOutcome, ConfigBuilder, InventoryClient, PermissionKey, Verb};

use crate::common::{client_for, mount_permission};

/// A list view loads with three gated controls: browse products, create a
/// product, browse entities. The backend grants the first and third and
/// denies the second; each control costs exactly one round trip.
#[tokio::test]
async fn list_view_load_resolves_each_control_once() {
    let server = MockServer::start().await;
    mount_permission(&server, "GET", "products", "-2", 200, 1).await;
    mount_permission(&server, "POST", "products", "", 403, 1).await;
    mount_permission(&server, "GET", "entities", "-2", 200, 1).await;

    let client = client_for(&server);
    let keys = [
        PermissionKey::collection("products", Verb::Get),
        PermissionKey::creation("products"),
        PermissionKey::collection("entities", Verb::Get),
    ];

    let outcomes = client.gate().check_many(&keys).await;

    assert_eq!(
        outcomes,
        vec![
            CheckOutcome::Granted,
            CheckOutcome::Denied,
            CheckOutcome::Granted
        ]
    );
    assert_eq!(client.cache().get(&keys[0]), Some(true));
    assert_eq!(client.cache().get(&keys[1]), Some(false));
    assert_eq!(client.cache().get(&keys[2]), Some(true));
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn cached_grant_never_reissues_the_request() {
    let server = MockServer::start().await;
    mount_permission(&server, "GET", "products", "-2", 200, 1).await;

    let client = client_for(&server);
    let key = PermissionKey::collection("products", Verb::Get);

    for _ in 0..4 {
        assert!(client.check(&key).await.is_granted());
    }
    // expect(1) is verified when the server drops.
}

#[tokio::test]
async fn cached_denial_never_reissues_the_request() {
    let server = MockServer::start().await;
    mount_permission(&server, "DELETE", "storages", "12", 403, 1).await;

    let client = client_for(&server);
    let key = PermissionKey::new("storages", "12", Verb::Delete);

    assert_eq!(client.check(&key).await, CheckOutcome::Denied);
    assert_eq!(client.check(&key).await, CheckOutcome::Denied);
    assert_eq!(client.cache().get(&key), Some(false));
}

/// A backend that answers slower than the client timeout is a transport
/// failure: denied for this render pass, nothing cached, retried next time.
#[tokio::test]
async fn timeout_is_denied_without_a_cache_write() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/f/products/-2"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .expect(2)
        .mount(&server)
        .await;

    let client =
        InventoryClient::new(ConfigBuilder::new(&server.uri()).timeout(1).build()).unwrap();
    let key = PermissionKey::collection("products", Verb::Get);

    assert_eq!(client.check(&key).await, CheckOutcome::Denied);
    assert_eq!(client.cache().get(&key), None);

    // Retried instead of remembered as a denial.
    assert_eq!(client.check(&key).await, CheckOutcome::Denied);
}

#[tokio::test]
async fn server_error_is_denied_without_a_cache_write() {
    let server = MockServer::start().await;
    mount_permission(&server, "GET", "borrowings", "-2", 500, 1).await;

    let client = client_for(&server);
    let key = PermissionKey::collection("borrowings", Verb::Get);

    assert_eq!(client.check(&key).await, CheckOutcome::Denied);
    assert_eq!(client.cache().get(&key), None);
}

#[tokio::test]
async fn session_expiry_fires_the_redirect_hook_once() {
    let server = MockServer::start().await;
    mount_permission(&server, "PUT", "people", "3", 401, 1).await;

    let redirects = Arc::new(AtomicUsize::new(0));
    let counter = redirects.clone();
    let client = client_for(&server).with_session_expired_hook(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let key = PermissionKey::new("people", "3", Verb::Put);
    assert_eq!(client.check(&key).await, CheckOutcome::Denied);

    assert_eq!(client.cache().get(&key), None);
    assert_eq!(redirects.load(Ordering::SeqCst), 1);
}
