//! Integration tests using wiremock to simulate the Mailchimp API.

use http::Method;
use mailchimp::{ApiError, Batch, Client, Error, Operation};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a client whose endpoint points at the mock server.
///
/// The `/3.0` segment mirrors the fixed version segment of the real derived
/// endpoint, so tests also cover verbatim base+path concatenation.
fn test_client(mock_server: &MockServer, api_key: &str) -> Client {
    Client::builder()
        .api_key(api_key)
        .base_url(format!("{}/3.0", mock_server.uri()))
        .unwrap()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_successful_get_returns_decoded_value() {
    let mock_server = MockServer::start().await;

    let response_data = json!({
        "lists": [{"id": "4ca5becb8d", "name": "Newsletter"}],
        "total_items": 1
    });

    Mock::given(method("GET"))
        .and(path("/3.0/lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response_data))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, "abc-us1");

    let value = client.get("/lists").await.unwrap();
    assert_eq!(value, response_data);
}

#[tokio::test]
async fn test_basic_auth_uses_full_key_as_password() {
    let mock_server = MockServer::start().await;

    // base64(":abc-us1") with the empty username before the colon.
    Mock::given(method("GET"))
        .and(path("/3.0/ping"))
        .and(header("Authorization", "Basic OmFiYy11czE="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"health_status": "ok"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, "abc-us1");

    let value = client.get("/ping").await.unwrap();
    assert_eq!(value["health_status"], json!("ok"));
}

#[tokio::test]
async fn test_2xx_scalar_body_decodes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3.0/count"))
        .respond_with(ResponseTemplate::new(200).set_body_string("42"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, "abc-us1");

    let value = client.get("/count").await.unwrap();
    assert_eq!(value, json!(42));
}

#[tokio::test]
async fn test_api_error_rendering_is_exact() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3.0/lists/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "type": "t",
            "title": "T",
            "status": 404,
            "detail": "d"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, "abc-us1");

    let result = client.get("/lists/nope").await;

    match result {
        Err(Error::Api(api_error)) => {
            assert_eq!(api_error.to_string(), "Error 404 T (d)");
            assert_eq!(api_error.status, 404);
            assert_eq!(api_error.kind, "t");
        }
        _ => panic!("Expected Error::Api, got {:?}", result),
    }
}

#[tokio::test]
async fn test_non_2xx_with_empty_body_degrades_to_zero_valued_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3.0/lists"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, "abc-us1");

    let result = client.get("/lists").await;

    match result {
        Err(Error::Api(api_error)) => {
            assert_eq!(api_error, ApiError::default());
            assert_eq!(api_error.to_string(), "Error 0  ()");
        }
        _ => panic!("Expected Error::Api, got {:?}", result),
    }
}

#[tokio::test]
async fn test_non_2xx_with_invalid_body_degrades_to_zero_valued_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3.0/lists"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>nope</html>"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, "abc-us1");

    let result = client.get("/lists").await;

    match result {
        Err(Error::Api(api_error)) => {
            assert_eq!(api_error, ApiError::default());
        }
        _ => panic!("Expected Error::Api, got {:?}", result),
    }
}

#[tokio::test]
async fn test_deserialization_error_on_invalid_2xx_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3.0/lists"))
        .respond_with(ResponseTemplate::new(200).set_body_string("invalid json"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, "abc-us1");

    let result = client.get("/lists").await;

    match result {
        Err(Error::Deserialization {
            raw_response,
            status,
            ..
        }) => {
            assert_eq!(status.as_u16(), 200);
            assert_eq!(raw_response, "invalid json");
        }
        _ => panic!("Expected Error::Deserialization, got {:?}", result),
    }
}

#[tokio::test]
async fn test_transport_error_on_unreachable_host() {
    let client = Client::builder()
        .api_key("abc-us1")
        .base_url("http://127.0.0.1:1/3.0")
        .unwrap()
        .build()
        .unwrap();

    let result = client.get("/lists").await;

    match result {
        Err(Error::Transport(_)) => {}
        _ => panic!("Expected Error::Transport, got {:?}", result),
    }
}

#[tokio::test]
async fn test_subscribe_posts_member_body() {
    let mock_server = MockServer::start().await;

    let member = json!({
        "id": "852aaa9532cb36adfb5e9fef7a4206a9",
        "email_address": "a@x.com",
        "status": "subscribed"
    });

    Mock::given(method("POST"))
        .and(path("/3.0/lists/L/members/"))
        .and(body_json(json!({
            "email_address": "a@x.com",
            "status": "subscribed"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&member))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, "abc-us1");

    let value = client.subscribe("a@x.com", "L").await.unwrap();
    assert_eq!(value["status"], json!("subscribed"));
}

#[tokio::test]
async fn test_batch_end_to_end() {
    let mock_server = MockServer::start().await;

    let operations = vec![Operation::new(
        Method::POST,
        "/lists/L/members/",
        Some(json!({"email_address": "a@x.com", "status": "subscribed"})),
    )];

    // The envelope carries the operations array JSON-encoded as a string.
    let expected_envelope = json!({
        "operations": serde_json::to_string(&operations).unwrap()
    });

    Mock::given(method("POST"))
        .and(path("/3.0/batches"))
        .and(body_json(&expected_envelope))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "b1", "status": "pending"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, "abc-us1");

    let mut batch = Batch::new();
    for operation in operations {
        batch.add_operation(operation);
    }

    let handle = client.submit_batch(&batch).await.unwrap();
    assert_eq!(handle.id, "b1");
    assert_eq!(handle.status, "pending");
}

#[tokio::test]
async fn test_batch_submission_propagates_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/3.0/batches"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "type": "t",
            "title": "Forbidden",
            "status": 403,
            "detail": "batch webhooks disabled"
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, "abc-us1");

    let mut batch = Batch::new();
    batch.add_operation(Operation::new(Method::GET, "/lists", None));

    let result = client.submit_batch(&batch).await;

    match result {
        Err(Error::Api(api_error)) => {
            assert_eq!(
                api_error.to_string(),
                "Error 403 Forbidden (batch webhooks disabled)"
            );
        }
        _ => panic!("Expected Error::Api, got {:?}", result),
    }
}

#[tokio::test]
async fn test_concurrent_executes_do_not_interfere() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3.0/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"which": "a"})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/3.0/b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"which": "b"})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, "abc-us1");

    let mut handles = Vec::new();
    for i in 0..16 {
        let client = client.clone();
        let which = if i % 2 == 0 { "a" } else { "b" };
        handles.push(tokio::spawn(async move {
            let value = client.get(&format!("/{which}")).await.unwrap();
            assert_eq!(value["which"], Value::String(which.to_string()));
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }
}

#[tokio::test]
async fn test_serialization_failure_performs_no_io() {
    let mock_server = MockServer::start().await;

    // No mocks mounted: any request reaching the server would 404 and show up
    // as an Api error instead of the expected Serialization error.
    let client = test_client(&mock_server, "abc-us1");

    let mut bad_keys = std::collections::HashMap::new();
    bad_keys.insert(vec![1u8], "non-string keys cannot serialize to JSON maps");

    let result = client.post("/lists", &bad_keys).await;

    match result {
        Err(Error::Serialization(_)) => {}
        _ => panic!("Expected Error::Serialization, got {:?}", result),
    }
}
