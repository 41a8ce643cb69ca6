//! Domains module containing business logic organized by bounded contexts.
//!
//! - **catalog**: products, the SQLite store and the sales query engine
//! - **tools**: MCP tools exposing catalog operations to clients
//! - **resources**: read-only MCP resources describing the catalog

pub mod catalog;
pub mod resources;
pub mod tools;
