/// Handler-level tests for the get-linear-tickets tool
use linear_mcp_server::tools::{get_tickets, NO_TICKETS_MESSAGE};
use linear_mcp_server::*;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::common::{sample_ticket, FakeConnector};

fn args(value: Value) -> HashMap<String, Value> {
    serde_json::from_value(value).unwrap()
}

#[cfg(test)]
mod get_tickets_unit_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_api_key_never_connects() {
        let connector = FakeConnector::returning(vec![sample_ticket("ENG-1", None)]);

        for bag in [json!({}), json!({"apiKey": ""}), json!({"status": "active", "limit": 5})] {
            let err = get_tickets(&connector, &args(bag)).await.unwrap_err();
            assert!(matches!(err, ToolError::InvalidParams(_)));
            assert_eq!(err.to_string(), "API key is required");
            assert_eq!(err.code(), -32602);
        }

        assert_eq!(connector.connect_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_result_message() {
        let connector = FakeConnector::returning(vec![]);

        let text = get_tickets(&connector, &args(json!({"apiKey": "test-key"})))
            .await
            .unwrap();

        assert_eq!(text, NO_TICKETS_MESSAGE);
        assert_eq!(text, "No tickets found matching the criteria.");
    }

    #[tokio::test]
    async fn test_upstream_error_is_wrapped() {
        let connector = FakeConnector::failing("Unexpected API error");

        let err = get_tickets(&connector, &args(json!({"apiKey": "test-key"})))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::Internal(_)));
        assert_eq!(err.code(), -32603);
        assert_eq!(
            err.to_string(),
            "Failed to fetch Linear tickets: Unexpected API error"
        );
    }

    #[tokio::test]
    async fn test_filter_is_passed_through() {
        let connector = FakeConnector::returning(vec![]);

        get_tickets(
            &connector,
            &args(json!({"apiKey": "lin_api_abc", "status": "active", "limit": 5})),
        )
        .await
        .unwrap();

        assert_eq!(connector.keys(), vec!["lin_api_abc".to_string()]);
        let filters = connector.filters();
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].status, Some(TicketStatus::Active));
        assert_eq!(filters[0].first.get(), 5);
    }

    #[tokio::test]
    async fn test_defaults_when_optionals_absent() {
        let connector = FakeConnector::returning(vec![]);

        get_tickets(&connector, &args(json!({"apiKey": "k"}))).await.unwrap();

        let filters = connector.filters();
        assert_eq!(filters[0].status, None);
        assert_eq!(filters[0].first.get(), 10);
    }

    #[tokio::test]
    async fn test_limit_boundaries() {
        for (limit, accepted) in [(1, true), (50, true), (0, false), (51, false)] {
            let connector = FakeConnector::returning(vec![]);
            let result = get_tickets(&connector, &args(json!({"apiKey": "k", "limit": limit}))).await;

            assert_eq!(result.is_ok(), accepted, "limit {}", limit);
            if !accepted {
                assert!(matches!(result, Err(ToolError::InvalidParams(_))));
                assert_eq!(connector.connect_count(), 0);
            }
        }
    }

    #[tokio::test]
    async fn test_invalid_status_rejected_before_connect() {
        let connector = FakeConnector::returning(vec![]);

        let err = get_tickets(&connector, &args(json!({"apiKey": "k", "status": "open"})))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::InvalidParams(_)));
        assert_eq!(connector.connect_count(), 0);
    }

    #[tokio::test]
    async fn test_listing_keeps_upstream_order_and_is_repeatable() {
        let connector = FakeConnector::returning(vec![
            sample_ticket("ENG-3", Some("2024-07-01")),
            sample_ticket("ENG-1", None),
        ]);
        let bag = args(json!({"apiKey": "k", "status": "completed"}));

        let first = get_tickets(&connector, &bag).await.unwrap();
        let second = get_tickets(&connector, &bag).await.unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("ENG-3: Work on ENG-3"));
        assert!(first.contains("Due: 2024-07-01"));
        assert!(first.contains("ENG-1: Work on ENG-1\n  Status: Todo\n  Priority: Medium\n  Due: No due date"));
        assert!(first.find("ENG-3").unwrap() < first.find("ENG-1").unwrap());
    }
}
