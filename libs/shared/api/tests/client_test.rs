use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_api::{ApiClient, SessionStore};
use shared_models::{ApiError, AuthTokens};
use shared_utils::test_utils::{MockBackendResponses, TestConfig};

fn client_for(server: &MockServer, session: SessionStore) -> ApiClient {
    let config = TestConfig::for_server(server.uri()).to_app_config();
    ApiClient::new(&config, session).unwrap()
}

#[tokio::test]
async fn get_unwraps_the_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/specialties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockBackendResponses::envelope(json!([{ "id": 1 }])),
        ))
        .mount(&server)
        .await;

    let client = client_for(&server, SessionStore::in_memory());
    let data: Vec<serde_json::Value> = client.get("/specialties", &[]).await.unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], 1);
}

#[tokio::test]
async fn bearer_token_is_attached_when_signed_in() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockBackendResponses::envelope(json!([])),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionStore::in_memory();
    session.set(AuthTokens::bearer("secret-token")).await;
    let client = client_for(&server, session);
    let _: Vec<serde_json::Value> = client.get("/bookings", &[]).await.unwrap();
}

#[tokio::test]
async fn rejected_envelope_surfaces_the_server_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockBackendResponses::error_envelope("slot already exists"),
        ))
        .mount(&server)
        .await;

    let client = client_for(&server, SessionStore::in_memory());
    let result: Result<serde_json::Value, ApiError> =
        client.post("/appointments", &json!({})).await;
    assert_matches!(result, Err(ApiError::ServerRejected(msg)) if msg == "slot already exists");
}

#[tokio::test]
async fn unauthorized_clears_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            MockBackendResponses::error_envelope("token expired"),
        ))
        .mount(&server)
        .await;

    let session = SessionStore::in_memory();
    session.set(AuthTokens::bearer("stale")).await;
    let client = client_for(&server, session.clone());

    let result: Result<Vec<serde_json::Value>, ApiError> = client.get("/bookings", &[]).await;
    assert_matches!(result, Err(ApiError::AuthExpired));
    assert!(!session.is_authenticated().await);
}

#[tokio::test]
async fn missing_resource_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(
            MockBackendResponses::error_envelope("booking not found"),
        ))
        .mount(&server)
        .await;

    let client = client_for(&server, SessionStore::in_memory());
    let result: Result<serde_json::Value, ApiError> = client.get("/bookings/99", &[]).await;
    assert_matches!(result, Err(ApiError::NotFound(msg)) if msg == "booking not found");
}

#[tokio::test]
async fn plain_text_error_bodies_still_carry_a_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let client = client_for(&server, SessionStore::in_memory());
    let result: Result<serde_json::Value, ApiError> = client.get("/appointments", &[]).await;
    assert_matches!(result, Err(ApiError::ServerRejected(msg)) if msg == "internal error");
}

#[tokio::test]
async fn delete_accepts_an_envelope_without_data() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/appointments/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let client = client_for(&server, SessionStore::in_memory());
    assert_matches!(client.delete("/appointments/5").await, Ok(()));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // `MockServer::start()` hands out a pooled server whose listener outlives
    // the handle, so the port would keep answering after `drop`. A dedicated
    // builder-made server really shuts down when dropped.
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let config = TestConfig::for_server(uri).to_app_config();
    let client = ApiClient::new(&config, SessionStore::in_memory()).unwrap();
    let result: Result<serde_json::Value, ApiError> = client.get("/specialties", &[]).await;
    assert_matches!(result, Err(ApiError::Transport(_)));
}
