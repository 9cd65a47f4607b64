//! Adapters for the explorer backend process and host prompts.

/// Typed command boundary to the explorer backend.
pub mod gateway;
pub mod prompt;
/// Stdio JSON-RPC client for the explorer backend process.
pub mod rpc;
/// Newline-delimited JSON framing shared by the RPC client.
pub mod transport;
