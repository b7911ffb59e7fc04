/// Public library interface for the Linear tickets MCP server
///
/// This module exports the server, the ticket tool and the Linear client so
/// they can be used by the binary and by tests.

use std::sync::Arc;
use thiserror::Error;

pub mod config;
pub mod domain;
pub mod linear;
pub mod mcp;
pub mod tools;

// Re-export public modules and types
pub use config::{ConfigError, ServerConfig};
pub use domain::*;
pub use linear::{HttpConnector, IssueFilter, LinearApi, LinearConnector, LinearError};
pub use tools::ToolError;

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Linear client error: {0}")]
    Linear(#[from] LinearError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main server that exposes Linear tickets over MCP
///
/// Holds no per-user state: every tool call builds its own Linear client from
/// the API key it was given.
pub struct LinearMcpServer {
    connector: Arc<dyn LinearConnector>,
}

impl LinearMcpServer {
    /// Create a server that talks to the Linear endpoint in `config`
    pub fn new(config: &ServerConfig) -> Result<Self, ServerError> {
        tracing::info!("Initializing Linear MCP server against {}", config.api_url);

        let connector = HttpConnector::new(config)?;
        Ok(Self::with_connector(Arc::new(connector)))
    }

    /// Create a server around any connector (useful for testing)
    pub fn with_connector(connector: Arc<dyn LinearConnector>) -> Self {
        Self { connector }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin is closed or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await
    }

    /// The connector used to build per-request Linear clients
    pub fn connector(&self) -> &dyn LinearConnector {
        self.connector.as_ref()
    }
}
