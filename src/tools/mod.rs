/// MCP tools exposed by the server
///
/// Each tool validates its own arguments and returns either text for the
/// client or a [`ToolError`] that the MCP layer turns into a JSON-RPC error.

pub mod tickets;

pub use tickets::*;

use thiserror::Error;

use crate::domain::DomainError;
use crate::linear::LinearError;

/// Errors a tool call can end in
#[derive(Error, Debug)]
pub enum ToolError {
    /// Input was missing or malformed; nothing was sent to Linear
    #[error("{0}")]
    InvalidParams(String),

    /// Linear could not be reached or rejected the request
    #[error("Failed to fetch Linear tickets: {0}")]
    Internal(String),
}

impl ToolError {
    /// JSON-RPC error code for this failure
    pub fn code(&self) -> i32 {
        use crate::mcp::protocol::error_codes;

        match self {
            ToolError::InvalidParams(_) => error_codes::INVALID_PARAMS,
            ToolError::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }
}

impl From<DomainError> for ToolError {
    fn from(error: DomainError) -> Self {
        ToolError::InvalidParams(error.to_string())
    }
}

impl From<LinearError> for ToolError {
    fn from(error: LinearError) -> Self {
        ToolError::Internal(error.to_string())
    }
}
