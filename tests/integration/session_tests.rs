//! Session operations

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use labstock_client::{ClientError, PermissionKey, Verb};

use crate::common::client_for;

#[tokio::test]
async fn login_returns_the_token_and_clears_the_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get-token"))
        .and(body_string_contains("person_email=admin%40example.org"))
        .respond_with(ResponseTemplate::new(200).set_body_string("tok-123"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .cache()
        .set(&PermissionKey::collection("products", Verb::Get), true);

    let token = client.login("admin@example.org", "secret").await.unwrap();

    assert_eq!(token, "tok-123");
    assert!(client.cache().is_empty());
}

#[tokio::test]
async fn rejected_login_keeps_the_cache() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/get-token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let key = PermissionKey::collection("products", Verb::Get);
    client.cache().set(&key, true);

    let result = client.login("admin@example.org", "wrong").await;
    assert!(matches!(result, Err(ClientError::Auth(_))));
    assert_eq!(client.cache().get(&key), Some(true));
}

#[tokio::test]
async fn logout_clears_the_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/delete-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .cache()
        .set(&PermissionKey::collection("products", Verb::Get), true);

    client.logout().await.unwrap();
    assert!(client.cache().is_empty());
}

#[tokio::test]
async fn logout_clears_the_cache_even_when_the_backend_is_gone() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    client
        .cache()
        .set(&PermissionKey::collection("products", Verb::Get), true);
    drop(server);

    client.logout().await.unwrap();
    assert!(client.cache().is_empty());
}
