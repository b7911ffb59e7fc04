/// GraphQL client for the Linear API
///
/// One query does both halves of the lookup: it resolves the viewer from the
/// API key and lists that viewer's assigned issues.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};
use url::Url;

use crate::config::ServerConfig;
use crate::domain::{Ticket, TicketStatus};
use crate::linear::{IssueFilter, LinearApi, LinearConnector, LinearError};

const ASSIGNED_ISSUES_QUERY: &str = r#"
query AssignedIssues($first: Int!, $filter: IssueFilter) {
  viewer {
    id
    name
    assignedIssues(first: $first, filter: $filter) {
      nodes {
        identifier
        title
        url
        dueDate
        priorityLabel
        state { name }
      }
    }
  }
}
"#;

/// Longest slice of an error body we carry into an error message
const MAX_ERROR_BODY: usize = 200;

/// Connector that hands out HTTP clients for the configured endpoint
///
/// The underlying `reqwest::Client` is an immutable connection pool; each
/// call to [`LinearConnector::connect`] gets its own [`LinearClient`] bound
/// to the caller's key.
#[derive(Debug, Clone)]
pub struct HttpConnector {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpConnector {
    pub fn new(config: &ServerConfig) -> Result<Self, LinearError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("linear-mcp-server/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.api_url.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl LinearConnector for HttpConnector {
    fn connect(&self, api_key: &str) -> Result<Box<dyn LinearApi>, LinearError> {
        let mut auth = HeaderValue::from_str(api_key).map_err(|_| LinearError::InvalidApiKey)?;
        auth.set_sensitive(true);

        Ok(Box::new(LinearClient {
            http: self.http.clone(),
            endpoint: self.endpoint.clone(),
            auth,
        }))
    }
}

/// Linear client scoped to a single API key
pub struct LinearClient {
    http: reqwest::Client,
    endpoint: Url,
    auth: HeaderValue,
}

#[async_trait]
impl LinearApi for LinearClient {
    async fn assigned_issues(&self, filter: &IssueFilter) -> Result<Vec<Ticket>, LinearError> {
        let body = json!({
            "query": ASSIGNED_ISSUES_QUERY,
            "variables": {
                "first": filter.first.get(),
                "filter": state_filter(filter.status),
            },
        });

        debug!(
            "Querying Linear assigned issues (status: {:?}, first: {})",
            filter.status, filter.first
        );

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, self.auth.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        // Linear reports auth and validation failures as GraphQL errors, often
        // with a 4xx status, so look for those before falling back to the status.
        let parsed: Option<GraphQlResponse<ViewerData>> = serde_json::from_str(&text).ok();

        if let Some(message) = parsed.as_ref().and_then(|r| r.error_message()) {
            warn!("Linear API returned errors: {}", message);
            return Err(LinearError::Api { message });
        }

        if !status.is_success() {
            return Err(LinearError::Status {
                status: status.as_u16(),
                body: truncate(&text),
            });
        }

        let data = parsed
            .and_then(|r| r.data)
            .ok_or_else(|| LinearError::Decode(format!("unexpected body: {}", truncate(&text))))?;

        debug!(
            "Linear viewer {} ({}) has {} matching issues",
            data.viewer.name,
            data.viewer.id,
            data.viewer.assigned_issues.nodes.len()
        );

        data.viewer
            .assigned_issues
            .nodes
            .into_iter()
            .map(IssueNode::into_ticket)
            .collect()
    }
}

/// Linear `IssueFilter` for a status bucket
///
/// Linear workflow states have a fixed set of types: triage, backlog,
/// unstarted, started, completed and canceled. "active" is anything not yet
/// closed.
pub fn state_filter(status: Option<TicketStatus>) -> Value {
    match status {
        None => Value::Null,
        Some(TicketStatus::Active) => json!({
            "state": { "type": { "nin": ["completed", "canceled"] } }
        }),
        Some(TicketStatus::Completed) => json!({
            "state": { "type": { "eq": "completed" } }
        }),
        Some(TicketStatus::Canceled) => json!({
            "state": { "type": { "eq": "canceled" } }
        }),
    }
}

fn truncate(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY {
        return trimmed.to_string();
    }
    let mut short: String = trimmed.chars().take(MAX_ERROR_BODY).collect();
    short.push_str("...");
    short
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

impl<T> GraphQlResponse<T> {
    fn error_message(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(
            self.errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ViewerData {
    viewer: Viewer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Viewer {
    id: String,
    name: String,
    assigned_issues: IssueConnection,
}

#[derive(Debug, Deserialize)]
struct IssueConnection {
    nodes: Vec<IssueNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueNode {
    identifier: String,
    title: String,
    url: String,
    due_date: Option<String>,
    priority_label: String,
    state: Option<StateNode>,
}

#[derive(Debug, Deserialize)]
struct StateNode {
    name: String,
}

impl IssueNode {
    fn into_ticket(self) -> Result<Ticket, LinearError> {
        let due_date = match self.due_date {
            Some(raw) => Some(NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|e| {
                LinearError::Decode(format!(
                    "bad due date '{}' on {}: {}",
                    raw, self.identifier, e
                ))
            })?),
            None => None,
        };

        Ok(Ticket {
            identifier: self.identifier,
            title: self.title,
            status: self
                .state
                .map(|s| s.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            priority: self.priority_label,
            due_date,
            url: self.url,
        })
    }
}
