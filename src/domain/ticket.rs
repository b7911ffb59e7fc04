/// Ticket entity as read from Linear
///
/// Tickets are owned by Linear; this server only ever reads them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single issue assigned to the authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Human-facing key, e.g. `ENG-123`
    pub identifier: String,
    pub title: String,
    /// Workflow state name, e.g. "In Progress"
    pub status: String,
    /// Priority label, e.g. "Urgent" or "No priority"
    pub priority: String,
    pub due_date: Option<NaiveDate>,
    pub url: String,
}

impl Ticket {
    /// Placeholder shown when a ticket has no due date
    pub const NO_DUE_DATE: &'static str = "No due date";

    /// Due date for display
    pub fn due_date_display(&self) -> String {
        match self.due_date {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => Self::NO_DUE_DATE.to_string(),
        }
    }
}
