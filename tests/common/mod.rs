//! Shared test infrastructure

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use labstock_client::{ConfigBuilder, InventoryClient};

/// Client pointed at a mock server, with an in-memory cache.
pub fn client_for(server: &MockServer) -> InventoryClient {
    InventoryClient::new(ConfigBuilder::new(&server.uri()).build()).unwrap()
}

/// Mount a permission-check responder for `(resource, id, verb)` answering
/// `status`, and require it to be hit exactly `hits` times.
pub async fn mount_permission(
    server: &MockServer,
    verb: &str,
    resource: &str,
    id: &str,
    status: u16,
    hits: u64,
) {
    Mock::given(method(verb))
        .and(path(format!("/f/{}/{}", resource, id)))
        .respond_with(ResponseTemplate::new(status))
        .expect(hits)
        .mount(server)
        .await;
}

/// Mount a mutation responder answering `status` with an empty JSON body.
pub async fn mount_mutation(server: &MockServer, verb: &str, route: &str, status: u16) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_string("{}"))
        .mount(server)
        .await;
}
