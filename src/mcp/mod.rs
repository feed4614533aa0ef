//! MCP module
//!
//! Stdio MCP server wrapping a meter session.

mod server;

pub use server::MeterService;
