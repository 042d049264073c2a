//! End-to-end tests for listing and saving customers.
//!
//! Each test runs [`CustomerService`] over the real HTTP client against a
//! local mock server standing in for the shop's Admin API.

use customer_sync::config::{ACCESS_TOKEN_ENV, API_HOST_ENV, REQUEST_TIMEOUT_ENV, SHOP_DOMAIN_ENV};
use customer_sync::{
    AccessToken, ConfigError, CustomerError, CustomerId, CustomerService, CustomerSubmission,
    HostUrl, ShopDomain, ShopifyConfig, SubmitOutcome,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GRAPHQL_PATH: &str = "/admin/api/2024-07/graphql.json";

fn create_service(server: &MockServer) -> CustomerService {
    let config = ShopifyConfig::builder()
        .shop(ShopDomain::new("test-shop").unwrap())
        .access_token(AccessToken::new("shpat_test").unwrap())
        .api_host(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    CustomerService::new(&config)
}

fn customer(id: u32, first: &str, last: &str, email: &str) -> Value {
    json!({
        "id": format!("gid://shopify/Customer/{id}"),
        "firstName": first,
        "lastName": last,
        "email": email
    })
}

fn saved(mutation: &str, customer: Value) -> ResponseTemplate {
    let mut data = serde_json::Map::new();
    data.insert(
        mutation.to_string(),
        json!({ "customer": customer, "userErrors": [] }),
    );
    ResponseTemplate::new(200).set_body_json(json!({ "data": data }))
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_list_customers_flattens_edges_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("X-Shopify-Access-Token", "shpat_test"))
        .and(body_partial_json(json!({ "variables": { "first": 10 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "customers": {
                    "edges": [
                        { "node": customer(2, "Grace", "Hopper", "grace@example.com") },
                        { "node": customer(1, "Ada", "Lovelace", "ada@example.com") }
                    ]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let customers = create_service(&server).list_customers().await.unwrap();

    let names: Vec<_> = customers.iter().map(|c| c.display_name()).collect();
    assert_eq!(names, ["Grace Hopper", "Ada Lovelace"]);
    assert_eq!(customers[0].id.as_str(), "gid://shopify/Customer/2");
}

#[tokio::test]
async fn test_list_customers_on_empty_shop() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "customers": { "edges": [] } } })),
        )
        .mount(&server)
        .await;

    let customers = create_service(&server).list_customers().await.unwrap();

    assert!(customers.is_empty());
}

#[tokio::test]
async fn test_list_customers_with_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = create_service(&server).list_customers().await;

    assert!(matches!(
        result,
        Err(CustomerError::MalformedResponse { .. })
    ));
}

#[tokio::test]
async fn test_list_customers_with_rejected_token_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "errors": "[API] Invalid API key or access token" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let error = create_service(&server).list_customers().await.unwrap_err();

    assert!(matches!(error, CustomerError::Transport(_)));
    assert!(error.user_errors().is_none());
}

#[tokio::test]
async fn test_list_customers_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "customers": { "edges": [] } } }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut vars = HashMap::new();
    vars.insert(SHOP_DOMAIN_ENV.to_string(), "test-shop".to_string());
    vars.insert(ACCESS_TOKEN_ENV.to_string(), "shpat_test".to_string());
    vars.insert(API_HOST_ENV.to_string(), server.uri());
    vars.insert(REQUEST_TIMEOUT_ENV.to_string(), "0.1".to_string());
    let service = CustomerService::from_source(&vars).unwrap();

    let error = service.list_customers().await.unwrap_err();

    assert!(matches!(error, CustomerError::Timeout { .. }));
}

// ============================================================================
// Saving
// ============================================================================

#[tokio::test]
async fn test_submit_without_id_creates_tagged_customer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({
            "variables": {
                "input": {
                    "firstName": "Ada",
                    "lastName": "Lovelace",
                    "email": "ada@example.com",
                    "tags": ["42"]
                }
            }
        })))
        .respond_with(saved(
            "customerCreate",
            customer(1, "Ada", "Lovelace", "ada@example.com"),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let created = create_service(&server)
        .submit_customer(CustomerSubmission::new("Ada", "Lovelace", "ada@example.com"))
        .await
        .unwrap();

    assert_eq!(created.id.as_str(), "gid://shopify/Customer/1");
}

#[tokio::test]
async fn test_submit_with_id_updates_that_customer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": { "input": { "id": "gid://shopify/Customer/5", "lastName": "King" } }
        })))
        .respond_with(saved(
            "customerUpdate",
            customer(5, "Ada", "King", "ada@example.com"),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let id = CustomerId::parse("gid://shopify/Customer/5").unwrap();
    let updated = create_service(&server)
        .submit_customer(
            CustomerSubmission::new("Ada", "King", "ada@example.com").with_customer_id(id.clone()),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, id);
    assert_eq!(updated.last_name.as_deref(), Some("King"));

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body["variables"]["input"].get("tags").is_none());
    assert!(body["query"].as_str().unwrap().contains("customerUpdate"));
}

#[tokio::test]
async fn test_saved_outcome_is_the_bare_customer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(saved(
            "customerCreate",
            customer(3, "Grace", "Hopper", "grace@example.com"),
        ))
        .mount(&server)
        .await;

    let result = create_service(&server)
        .submit_customer(CustomerSubmission::new("Grace", "Hopper", "grace@example.com"))
        .await;

    assert_eq!(
        serde_json::to_value(SubmitOutcome::from(result)).unwrap(),
        customer(3, "Grace", "Hopper", "grace@example.com")
    );
}

#[tokio::test]
async fn test_submit_surfaces_user_errors_as_outcome() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "customerCreate": {
                    "customer": null,
                    "userErrors": [
                        { "field": ["email"], "message": "Email has already been taken" }
                    ]
                }
            }
        })))
        .mount(&server)
        .await;

    let result = create_service(&server)
        .submit_customer(CustomerSubmission::new("Ada", "Lovelace", "ada@example.com"))
        .await;

    assert_eq!(
        serde_json::to_value(SubmitOutcome::from(result)).unwrap(),
        json!({ "error": "Email has already been taken", "field": "email" })
    );
}

#[tokio::test]
async fn test_create_then_edit_then_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "input": { "tags": ["42"] } } })))
        .respond_with(saved(
            "customerCreate",
            customer(9, "Ada", "Lovelace", "ada@example.com"),
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "variables": { "input": { "id": "gid://shopify/Customer/9" } }
        })))
        .respond_with(saved(
            "customerUpdate",
            customer(9, "Ada", "King", "ada@example.com"),
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "first": 10 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "customers": {
                    "edges": [{ "node": customer(9, "Ada", "King", "ada@example.com") }]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = create_service(&server);

    let created = service
        .submit_customer(CustomerSubmission::new("Ada", "Lovelace", "ada@example.com"))
        .await
        .unwrap();
    let mut edit = created.to_submission();
    edit.last_name = "King".to_string();
    let updated = service.submit_customer(edit).await.unwrap();
    let listed = service.list_customers().await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(listed, vec![updated]);
}

// ============================================================================
// Fail-fast
// ============================================================================

#[tokio::test]
async fn test_missing_token_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut vars = HashMap::new();
    vars.insert(SHOP_DOMAIN_ENV.to_string(), "test-shop".to_string());
    vars.insert(API_HOST_ENV.to_string(), server.uri());

    let result = CustomerService::from_source(&vars);

    assert!(matches!(
        result,
        Err(CustomerError::Configuration(
            ConfigError::MissingEnvironmentVariable {
                name: ACCESS_TOKEN_ENV
            }
        ))
    ));
}

#[tokio::test]
async fn test_missing_field_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = create_service(&server)
        .submit_customer(CustomerSubmission::new("Ada", "Lovelace", ""))
        .await;

    assert!(matches!(
        result,
        Err(CustomerError::MissingField { field: "email" })
    ));
}

#[tokio::test]
async fn test_blank_field_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = create_service(&server)
        .submit_customer(CustomerSubmission::new("Ada", "   ", "ada@example.com"))
        .await;

    assert!(matches!(
        result,
        Err(CustomerError::MissingField { field: "lastName" })
    ));
}
