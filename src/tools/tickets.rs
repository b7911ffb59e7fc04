/// Tool for listing the authenticated user's Linear tickets
///
/// This module implements the get-linear-tickets MCP tool.

use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::domain::{Ticket, TicketLimit, TicketQuery, TicketStatus};
use crate::linear::{IssueFilter, LinearConnector};
use crate::tools::ToolError;

/// Name the tool is registered under
pub const GET_TICKETS_TOOL: &str = "get-linear-tickets";

/// Text returned when Linear has nothing matching the query
pub const NO_TICKETS_MESSAGE: &str = "No tickets found matching the criteria.";

/// JSON schema advertised for the tool's arguments
///
/// The bounds here are the same constants [`TicketQuery`] enforces.
pub fn get_tickets_input_schema() -> Value {
    let statuses: Vec<&str> = TicketStatus::ALL.iter().map(|s| s.as_str()).collect();

    json!({
        "type": "object",
        "properties": {
            "apiKey": {
                "type": "string",
                "description": "Linear API key for authentication"
            },
            "status": {
                "type": "string",
                "description": "Optional status to filter tickets (e.g. 'active', 'completed')",
                "enum": statuses
            },
            "limit": {
                "type": "number",
                "description": format!("Maximum number of tickets to return (default: {})", TicketLimit::DEFAULT),
                "minimum": TicketLimit::MIN,
                "maximum": TicketLimit::MAX
            }
        },
        "required": ["apiKey"]
    })
}

/// Fetch and format the caller's tickets
///
/// Arguments are validated before the connector is touched, so a bad
/// request never builds a Linear client.
pub async fn get_tickets<C: LinearConnector + ?Sized>(
    connector: &C,
    args: &HashMap<String, Value>,
) -> Result<String, ToolError> {
    let query = TicketQuery::from_arguments(args)?;
    debug!("Validated ticket query: {:?}", query);

    let client = connector.connect(&query.api_key)?;
    let tickets = client.assigned_issues(&IssueFilter::from(&query)).await?;

    info!("Fetched {} tickets from Linear", tickets.len());
    Ok(format_tickets(&tickets))
}

/// Render tickets as one text block, in the order given
pub fn format_tickets(tickets: &[Ticket]) -> String {
    if tickets.is_empty() {
        return NO_TICKETS_MESSAGE.to_string();
    }

    tickets
        .iter()
        .map(format_ticket)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_ticket(ticket: &Ticket) -> String {
    format!(
        "{}: {}\n  Status: {}\n  Priority: {}\n  Due: {}\n  URL: {}",
        ticket.identifier,
        ticket.title,
        ticket.status,
        ticket.priority,
        ticket.due_date_display(),
        ticket.url
    )
}
