/// Main entry point for the Linear MCP server
///
/// This file sets up logging, parses command line arguments, and starts the MCP server.
/// The server listens for JSON-RPC requests over stdin/stdout following the MCP protocol.

use clap::Parser;
use tracing::info;

use linear_mcp_server::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use linear_mcp_server::{LinearMcpServer, ServerConfig};

/// Command line arguments for the Linear MCP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Linear GraphQL endpoint
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// HTTP timeout for each Linear request, in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("linear_mcp_server={}", log_level))
        .with_writer(std::io::stderr) // stdout carries the protocol
        .init();

    let config = ServerConfig::new(&args.api_url, args.timeout)?;
    let server = LinearMcpServer::new(&config)?;

    eprintln!("Linear MCP Server running on stdio");
    server.run().await?;

    info!("Linear MCP server shutdown complete");
    Ok(())
}
