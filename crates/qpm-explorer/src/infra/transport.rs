//! NDJSON framing helpers for the stdio JSON-RPC backend connection.
//!
//! These helpers are protocol-agnostic: they operate on raw JSON values and
//! async stdio handles without knowing any command names.

use std::time::Duration;

use serde_json::{Value, json};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::domain::error::{BackendError, DEFAULT_BACKEND_ERROR_CODE, TransportError};

/// How long a backend gets to exit after its stdin is closed.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Builds one JSON-RPC 2.0 request frame.
pub fn request_frame(request_id: &str, method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": request_id,
        "method": method,
        "params": params,
    })
}

/// Writes one JSON payload as a newline-delimited line to `writer`.
///
/// # Errors
/// Returns [`TransportError::Io`] when the write or flush fails.
pub async fn write_json_line<W>(writer: &mut W, payload: &Value) -> Result<(), TransportError>
where
    W: AsyncWrite + Unpin,
{
    let mut line = payload.to_string();
    line.push('\n');

    writer
        .write_all(line.as_bytes())
        .await
        .map_err(|error| TransportError::Io(format!("failed writing to backend stdin: {error}")))?;
    writer
        .flush()
        .await
        .map_err(|error| TransportError::Io(format!("failed flushing backend stdin: {error}")))
}

/// Returns the string `id` carried by a response frame.
///
/// Integer ids are not produced by this client, so they never match.
pub fn response_id(response_value: &Value) -> Option<&str> {
    response_value.get("id").and_then(Value::as_str)
}

/// Extracts a backend rejection from a JSON-RPC error response.
///
/// Accepts both `{"error": {"code": .., "message": ..}}` and the bare
/// `{"error": "message"}` shape. A missing code maps to
/// [`DEFAULT_BACKEND_ERROR_CODE`].
pub fn backend_error(response_value: &Value) -> Option<BackendError> {
    let error = response_value.get("error")?;
    if error.is_null() {
        return None;
    }

    if let Some(message) = error.as_str() {
        return Some(BackendError::new(message));
    }

    let message = error
        .get("message")
        .and_then(Value::as_str)
        .map_or_else(|| error.to_string(), ToString::to_string);
    let code = error
        .get("code")
        .and_then(Value::as_i64)
        .unwrap_or(DEFAULT_BACKEND_ERROR_CODE);

    Some(BackendError { code, message })
}

/// Gracefully shuts down a child process by closing stdin, waiting briefly,
/// then killing it if it has not exited.
pub async fn shutdown_child(child: &mut tokio::process::Child) {
    drop(child.stdin.take());

    if tokio::time::timeout(SHUTDOWN_GRACE, child.wait())
        .await
        .is_err()
    {
        let _ = child.kill().await;
        let _ = child.wait().await;
    }
}
