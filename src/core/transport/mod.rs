//! Transport layer for the catalog server.
//!
//! - **STDIO**: Standard input/output MCP session - feature: `stdio`
//! - **HTTP**: JSON-RPC over POST, the REST API and the browser UI - feature: `http`
//!
//! Both transports drive the same `McpServer` and therefore the same catalog.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub mod rest;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
