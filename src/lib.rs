//! MCP server for MIP user memory.
//!
//! Exposes `~/.mip/memory.json` as the `mip://memory` resource plus the
//! `mip_get_context`, `mip_get_preference` and `mip_update_preference` tools
//! over JSON-RPC 2.0 stdio transport, so any MCP-aware host can read and
//! update persisted user context.

pub mod config;
pub mod handlers;
pub mod memory;
pub mod protocol;
pub mod server;

pub mod schema;
