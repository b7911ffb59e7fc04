/// Linear API access
///
/// The ticket tool talks to Linear only through the traits in this module,
/// so tests can swap the real GraphQL client for a fake one.

pub mod client;

pub use client::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Ticket, TicketLimit, TicketQuery, TicketStatus};

/// Errors that can occur while talking to Linear
///
/// The `Display` text of each variant is what ends up after the
/// "Failed to fetch Linear tickets: " prefix, so it carries the upstream
/// message as-is where there is one.
#[derive(Error, Debug)]
pub enum LinearError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { message: String },

    #[error("Linear API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from Linear: {0}")]
    Decode(String),

    #[error("Invalid API key format")]
    InvalidApiKey,
}

/// Filter and page bound for an assigned-issues lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueFilter {
    pub status: Option<TicketStatus>,
    pub first: TicketLimit,
}

impl From<&TicketQuery> for IssueFilter {
    fn from(query: &TicketQuery) -> Self {
        Self {
            status: query.status,
            first: query.limit,
        }
    }
}

/// Read access to the authenticated user's Linear issues
#[async_trait]
pub trait LinearApi: Send + Sync {
    /// Issues assigned to the viewer, in the order Linear returns them
    async fn assigned_issues(&self, filter: &IssueFilter) -> Result<Vec<Ticket>, LinearError>;
}

/// Builds a [`LinearApi`] scoped to one API key
///
/// Called once per tool invocation, and only after the input is valid.
pub trait LinearConnector: Send + Sync {
    fn connect(&self, api_key: &str) -> Result<Box<dyn LinearApi>, LinearError>;
}
