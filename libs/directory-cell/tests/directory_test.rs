use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use directory_cell::{DirectoryError, DirectoryService};
use shared_api::{ApiClient, SessionStore};
use shared_models::{ApiError, Listing};
use shared_utils::test_utils::{MockBackendResponses, TestConfig};

fn service_for(server: &MockServer) -> DirectoryService {
    let config = TestConfig::for_server(server.uri()).to_app_config();
    DirectoryService::new(ApiClient::new(&config, SessionStore::in_memory()).unwrap())
}

#[tokio::test]
async fn bare_array_listing_is_the_plain_variant() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/specialties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockBackendResponses::envelope(json!([
                MockBackendResponses::specialty(1, "Nội tổng quát"),
                MockBackendResponses::specialty(2, "Tai mũi họng"),
            ])),
        ))
        .mount(&server)
        .await;

    let listing = service_for(&server).list_specialties(None, None, None).await.unwrap();
    assert_matches!(&listing, Listing::Plain(_));
    assert_eq!(listing.items().len(), 2);
    assert_eq!(listing.items()[0].name, "Nội tổng quát");
    assert!(listing.pagination().is_none());
}

#[tokio::test]
async fn paginated_listing_keeps_its_pagination() {
    let server = MockServer::start().await;
    let body = MockBackendResponses::paginated(
        &[MockBackendResponses::specialty(1, "Nội tổng quát")],
        21,
        2,
        10,
    );
    Mock::given(method("GET"))
        .and(path("/specialties"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockBackendResponses::envelope(body)),
        )
        .mount(&server)
        .await;

    let listing =
        service_for(&server).list_specialties(None, Some(2), Some(10)).await.unwrap();
    assert_matches!(&listing, Listing::Paginated { .. });
    let pagination = listing.pagination().unwrap();
    assert_eq!(pagination.total, 21);
    assert_eq!(pagination.total_pages, 3);
}

#[tokio::test]
async fn doctor_listing_filters_by_specialty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doctors"))
        .and(query_param("specialtyId", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockBackendResponses::envelope(json!([
                MockBackendResponses::doctor(7, "Nguyễn Văn An", 3),
            ])),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let listing =
        service_for(&server).list_doctors(Some(3), None, None, None).await.unwrap();
    assert_eq!(listing.items().len(), 1);
    assert_eq!(listing.items()[0].specialty_id, 3);
    assert_eq!(listing.items()[0].display_name(), "BS.CKI Nguyễn Văn An");
}

#[tokio::test]
async fn get_doctor_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doctors/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockBackendResponses::envelope(MockBackendResponses::doctor(7, "Trần Thị Bích", 1)),
        ))
        .mount(&server)
        .await;

    let doctor = service_for(&server).get_doctor(7).await.unwrap();
    assert_eq!(doctor.id, 7);
    assert_eq!(doctor.full_name, "Trần Thị Bích");
}

#[tokio::test]
async fn read_failures_propagate_to_the_caller() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/specialties"))
        .respond_with(ResponseTemplate::new(500).set_body_json(
            MockBackendResponses::error_envelope("database unavailable"),
        ))
        .mount(&server)
        .await;

    let result = service_for(&server).list_specialties(None, None, None).await;
    assert_matches!(
        result,
        Err(DirectoryError::Api(ApiError::ServerRejected(msg))) if msg == "database unavailable"
    );
}
