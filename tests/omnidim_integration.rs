//! Integration tests for the OmniDimension client
//!
//! These tests drive the real reqwest transport against a local wiremock
//! server, so no API key or network access is needed.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test omnidim_integration
//! ```

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use omnidim_interview::omnidim::{CallConfig, DifficultyLevel, OmniDimClient, OmniDimError};

const KEY: &str = "abcd1234";

fn client_for(server: &MockServer) -> OmniDimClient {
    OmniDimClient::new(KEY).with_base_url(format!("{}/v1", server.uri()))
}

// ============================================================================
// Success paths
// ============================================================================

mod success_tests {
    use super::*;

    #[tokio::test]
    async fn list_agents_returns_body_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/agents"))
            .and(header("authorization", "Bearer abcd1234"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"agents": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let agents: Value = client.list_interview_agents().await.unwrap();
        assert_eq!(agents, json!({"agents": []}));
    }

    #[tokio::test]
    async fn dispatch_posts_call_context() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/call/dispatch"))
            .and(header("authorization", "Bearer abcd1234"))
            .and(body_partial_json(json!({
                "agent_id": 12,
                "to_number": "+15550100",
                "call_context": {
                    "job_role": "Data Scientist",
                    "difficulty_level": "beginner",
                    "interview_type": "mixed"
                }
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "requestId": 5})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let config = CallConfig::new("Data Scientist", DifficultyLevel::Beginner);
        let response: Value = client
            .dispatch_interview_call(12, "+15550100", &config, None)
            .await
            .unwrap();
        assert_eq!(response["requestId"], json!(5));

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let ctx = &body["call_context"];
        assert!(ctx.get("candidate_name").is_none());
        assert!(ctx.get("target_company").is_none());
        assert!(ctx["session_id"]
            .as_str()
            .unwrap()
            .starts_with("interview_"));
    }

    #[tokio::test]
    async fn call_logs_query_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/call/logs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"call_log_data": []})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let _: Value = client.get_interview_call_logs(1, 10, None).await.unwrap();
        let _: Value = client.get_interview_call_logs(3, 20, Some(7)).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].url.query(), Some("page=1&page_size=10"));
        assert_eq!(
            requests[1].url.query(),
            Some("page=3&page_size=20&agent_id=7")
        );
    }

    #[tokio::test]
    async fn get_call_log_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/call/logs/981"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 981})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let log: Value = client.get_call_log("981").await.unwrap();
        assert_eq!(log, json!({"id": 981}));
    }

    #[tokio::test]
    async fn agent_filter_matches_query_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/call/logs"))
            .and(query_param("agent_id", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"filtered": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let logs: Value = client.get_interview_call_logs(1, 10, Some(7)).await.unwrap();
        assert_eq!(logs, json!({"filtered": true}));
    }
}

// ============================================================================
// Error paths
// ============================================================================

mod error_tests {
    use super::*;

    #[tokio::test]
    async fn not_found_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.get_call_log::<Value>("missing").await.unwrap_err();
        assert_eq!(
            err,
            OmniDimError::Http {
                status: 404,
                message: "not found".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn unauthorized_without_message_uses_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.list_interview_agents::<Value>().await.unwrap_err();
        assert_eq!(
            err,
            OmniDimError::Http {
                status: 401,
                message: "Unauthorized".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn missing_key_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let client = OmniDimClient::new("").with_base_url(server.uri());
        let err = client.list_interview_agents::<Value>().await.unwrap_err();
        assert_eq!(err, OmniDimError::MissingApiKey);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn connection_refused_is_transport_error() {
        // Nothing listens on port 1
        let client = OmniDimClient::new(KEY).with_base_url("http://127.0.0.1:1/v1");
        let err = client.list_interview_agents::<Value>().await.unwrap_err();
        assert!(
            matches!(err, OmniDimError::Transport(_)),
            "Expected Transport, got: {:?}",
            err
        );
    }
}
