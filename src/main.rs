//! Nutrition Meter
//!
//! An MCP server for logging food and tracking daily macros.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use nutrition_meter::build_info;
use nutrition_meter::mcp::MeterService;
use nutrition_meter::session::MeterSession;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr so stdout stays free for MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutrition_meter=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let service = MeterService::new(MeterSession::new());

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;

    tracing::info!("Nutrition Meter ready");
    server.waiting().await?;

    Ok(())
}
