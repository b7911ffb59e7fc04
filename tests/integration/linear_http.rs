/// Tests for the Linear GraphQL client against a mock HTTP server
use linear_mcp_server::tools::get_tickets;
use linear_mcp_server::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn connector_for(server: &MockServer) -> HttpConnector {
    let config = ServerConfig::new(&format!("{}/graphql", server.uri()), 5).unwrap();
    HttpConnector::new(&config).unwrap()
}

fn args(value: Value) -> HashMap<String, Value> {
    serde_json::from_value(value).unwrap()
}

fn viewer_body(nodes: Value) -> Value {
    json!({
        "data": {
            "viewer": {
                "id": "user-1",
                "name": "Ada",
                "assignedIssues": {"nodes": nodes}
            }
        }
    })
}

#[cfg(test)]
mod linear_http_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_sends_key_and_filter() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("authorization", "lin_api_test"))
            .and(body_partial_json(json!({
                "variables": {
                    "first": 5,
                    "filter": {"state": {"type": {"nin": ["completed", "canceled"]}}}
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(viewer_body(json!([
                {
                    "identifier": "ENG-1",
                    "title": "Fix login",
                    "url": "https://linear.app/acme/issue/ENG-1",
                    "dueDate": "2024-05-01",
                    "priorityLabel": "Urgent",
                    "state": {"name": "In Progress"}
                },
                {
                    "identifier": "ENG-2",
                    "title": "Write docs",
                    "url": "https://linear.app/acme/issue/ENG-2",
                    "dueDate": null,
                    "priorityLabel": "No priority",
                    "state": {"name": "Todo"}
                }
            ]))))
            .expect(1)
            .mount(&server)
            .await;

        let connector = connector_for(&server).await;
        let text = get_tickets(
            &connector,
            &args(json!({"apiKey": "lin_api_test", "status": "active", "limit": 5})),
        )
        .await
        .unwrap();

        assert_eq!(
            text,
            "ENG-1: Fix login\n  Status: In Progress\n  Priority: Urgent\n  Due: 2024-05-01\n  URL: https://linear.app/acme/issue/ENG-1\n\n\
             ENG-2: Write docs\n  Status: Todo\n  Priority: No priority\n  Due: No due date\n  URL: https://linear.app/acme/issue/ENG-2"
        );
    }

    #[tokio::test]
    async fn test_no_filter_sends_null() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_partial_json(json!({"variables": {"first": 10, "filter": null}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(viewer_body(json!([]))))
            .expect(1)
            .mount(&server)
            .await;

        let connector = connector_for(&server).await;
        let text = get_tickets(&connector, &args(json!({"apiKey": "k"}))).await.unwrap();

        assert_eq!(text, "No tickets found matching the criteria.");
    }

    #[tokio::test]
    async fn test_graphql_errors_become_internal_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errors": [{"message": "Authentication required, not authenticated"}]
            })))
            .mount(&server)
            .await;

        let connector = connector_for(&server).await;
        let err = get_tickets(&connector, &args(json!({"apiKey": "bad"})))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::Internal(_)));
        assert_eq!(
            err.to_string(),
            "Failed to fetch Linear tickets: Authentication required, not authenticated"
        );
    }

    #[tokio::test]
    async fn test_http_status_without_graphql_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let connector = connector_for(&server).await;
        let err = get_tickets(&connector, &args(json!({"apiKey": "k"})))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to fetch Linear tickets: Linear API returned HTTP 503: upstream unavailable"
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_internal_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"me": {}}})))
            .mount(&server)
            .await;

        let connector = connector_for(&server).await;
        let err = get_tickets(&connector, &args(json!({"apiKey": "k"})))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::Internal(_)));
        assert!(err
            .to_string()
            .starts_with("Failed to fetch Linear tickets: Invalid response from Linear"));
    }

    #[tokio::test]
    async fn test_invalid_params_never_reach_linear() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(viewer_body(json!([]))))
            .expect(0)
            .mount(&server)
            .await;

        let connector = connector_for(&server).await;
        for bag in [json!({}), json!({"apiKey": "k", "limit": 51}), json!({"apiKey": "k", "limit": 0})] {
            let err = get_tickets(&connector, &args(bag)).await.unwrap_err();
            assert!(matches!(err, ToolError::InvalidParams(_)));
        }
    }

    #[test]
    fn test_key_with_control_characters_is_rejected() {
        let connector = HttpConnector::new(&ServerConfig::default()).unwrap();
        assert!(matches!(
            connector.connect("bad\nkey"),
            Err(LinearError::InvalidApiKey)
        ));
    }
}
