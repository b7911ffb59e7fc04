/// Domain module containing the ticket query and ticket types
///
/// This module defines what a valid request for tickets looks like and what
/// a ticket is. Nothing in here talks to the network.

pub mod query;
pub mod ticket;
pub mod types;

// Re-export public types for easy access
pub use query::*;
pub use ticket::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur while validating tool input
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("API key is required")]
    MissingApiKey,

    #[error("{0}")]
    InvalidStatus(String),

    #[error("{0}")]
    InvalidLimit(String),
}
