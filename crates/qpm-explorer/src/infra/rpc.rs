//! Stdio JSON-RPC implementation of [`BackendGateway`].
//!
//! The backend runs as a child process. Each gateway call queues its NDJSON
//! frame before returning, and a single writer task drains the queue into
//! stdin, so the backend sees requests in call order. One reader task routes
//! response frames from stdout back to the waiting caller by request id, so
//! any number of calls can be in flight at once.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWrite, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::domain::error::TransportError;
use crate::domain::view::{ExplorerView, Favorite, SystemPath};
use crate::infra::gateway::{BackendGateway, GatewayError, GatewayFuture, command};
use crate::infra::transport;

type ResponseSender = oneshot::Sender<Result<Value, GatewayError>>;
type ResponseReceiver = oneshot::Receiver<Result<Value, GatewayError>>;

/// Program and arguments used to launch the backend.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BackendCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Shared connection state used by the gateway and its reader and writer
/// tasks.
struct Connection {
    next_request_id: AtomicU64,
    pending: Mutex<PendingRequests>,
    request_timeout: Duration,
}

#[derive(Default)]
struct PendingRequests {
    closed: bool,
    /// Queue drained by the writer task; `None` once the connection closed.
    frame_tx: Option<mpsc::UnboundedSender<Value>>,
    waiters: HashMap<String, ResponseSender>,
}

/// Request whose frame is queued and whose response is still outstanding.
struct QueuedRequest {
    request_id: String,
    response_rx: ResponseReceiver,
}

impl Connection {
    fn new(frame_tx: Option<mpsc::UnboundedSender<Value>>, request_timeout: Duration) -> Self {
        Self {
            next_request_id: AtomicU64::new(1),
            pending: Mutex::new(PendingRequests {
                closed: false,
                frame_tx,
                waiters: HashMap::new(),
            }),
            request_timeout,
        }
    }

    fn lock_pending(&self) -> MutexGuard<'_, PendingRequests> {
        self.pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Registers a waiter and queues the request frame.
    ///
    /// Ids are taken and frames queued under one lock, so the backend reads
    /// requests in the order this method is called, whatever order the
    /// callers later await their responses in.
    fn enqueue(
        &self,
        method: &'static str,
        params: Value,
    ) -> Result<QueuedRequest, GatewayError> {
        let mut guard = self.lock_pending();
        let pending = &mut *guard;
        if pending.closed {
            return Err(TransportError::Unavailable("backend has exited".to_string()).into());
        }
        let Some(frame_tx) = pending.frame_tx.as_ref() else {
            return Err(stdin_closed());
        };

        let request_id = self
            .next_request_id
            .fetch_add(1, Ordering::Relaxed)
            .to_string();
        let frame = transport::request_frame(&request_id, method, params);
        if frame_tx.send(frame).is_err() {
            return Err(stdin_closed());
        }

        let (response_tx, response_rx) = oneshot::channel();
        pending.waiters.insert(request_id.clone(), response_tx);
        debug!(method, %request_id, "queued backend request");

        Ok(QueuedRequest {
            request_id,
            response_rx,
        })
    }

    /// Waits for the response to a queued request.
    async fn wait(
        &self,
        method: &'static str,
        request: QueuedRequest,
    ) -> Result<Value, GatewayError> {
        let QueuedRequest {
            request_id,
            response_rx,
        } = request;

        match tokio::time::timeout(self.request_timeout, response_rx).await {
            Ok(Ok(response)) => response,
            Ok(Err(_)) => Err(TransportError::Unavailable(format!(
                "backend exited before answering `{method}`"
            ))
            .into()),
            Err(_) => {
                self.lock_pending().waiters.remove(&request_id);
                warn!(method, %request_id, "backend request timed out");

                Err(TransportError::TimedOut {
                    command: method,
                    seconds: self.request_timeout.as_secs(),
                }
                .into())
            }
        }
    }

    /// Queues `method` now and returns a future resolving to its decoded
    /// result.
    fn request<T>(
        self: &Arc<Self>,
        method: &'static str,
        params: Value,
    ) -> GatewayFuture<Result<T, GatewayError>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let queued = self.enqueue(method, params);
        let connection = Arc::clone(self);

        Box::pin(async move {
            let result = connection.wait(method, queued?).await?;

            decode(method, result)
        })
    }

    /// Queues `method` now and returns a future resolving once the backend
    /// acknowledges it.
    fn acknowledge(
        self: &Arc<Self>,
        method: &'static str,
        params: Value,
    ) -> GatewayFuture<Result<(), GatewayError>> {
        let queued = self.enqueue(method, params);
        let connection = Arc::clone(self);

        Box::pin(async move {
            connection.wait(method, queued?).await?;

            Ok(())
        })
    }

    /// Routes one stdout line to its waiter. Unknown or unparsable lines are
    /// skipped.
    fn route_line(&self, line: &str) {
        let Ok(response_value) = serde_json::from_str::<Value>(line) else {
            debug!(line, "skipping non-JSON backend output");

            return;
        };
        let Some(request_id) = transport::response_id(&response_value) else {
            return;
        };
        let Some(waiter) = self.lock_pending().waiters.remove(request_id) else {
            debug!(request_id, "dropping response without a waiter");

            return;
        };

        let response = match transport::backend_error(&response_value) {
            Some(error) => Err(error.into()),
            None => Ok(response_value.get("result").cloned().unwrap_or(Value::Null)),
        };
        let _ = waiter.send(response);
    }

    /// Fails every outstanding call, rejects new ones and stops the writer.
    fn close(&self, reason: &str) {
        let waiters = {
            let mut pending = self.lock_pending();
            pending.closed = true;
            pending.frame_tx = None;

            std::mem::take(&mut pending.waiters)
        };

        for (_, waiter) in waiters {
            let _ = waiter.send(Err(TransportError::Unavailable(reason.to_string()).into()));
        }
    }
}

/// Writes queued frames to the backend one at a time, in queue order.
///
/// Ends when the queue is closed or a write fails; a failed write closes the
/// connection. Dropping `writer` afterwards closes the backend's stdin.
async fn write_frames<W>(
    mut writer: W,
    mut frame_rx: mpsc::UnboundedReceiver<Value>,
    connection: Weak<Connection>,
) where
    W: AsyncWrite + Unpin,
{
    while let Some(frame) = frame_rx.recv().await {
        if let Err(error) = transport::write_json_line(&mut writer, &frame).await {
            warn!(%error, "failed writing to backend stdin");
            if let Some(connection) = connection.upgrade() {
                connection.close("backend stopped reading requests");
            }

            break;
        }
    }
}

/// Backend gateway speaking NDJSON JSON-RPC over a child process's stdio.
pub struct RpcGateway {
    child: tokio::sync::Mutex<Child>,
    connection: Arc<Connection>,
}

impl RpcGateway {
    /// Launches the backend and starts its request writer and response
    /// reader.
    ///
    /// # Errors
    /// Returns [`TransportError::Unavailable`] when the process cannot be
    /// spawned or its stdio cannot be captured.
    pub fn spawn(
        backend: &BackendCommand,
        request_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let mut child = Command::new(&backend.program)
            .args(&backend.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|error| {
                TransportError::Unavailable(format!(
                    "failed to start `{}`: {error}",
                    backend.program.display()
                ))
            })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            TransportError::Unavailable("backend stdin was not captured".to_string())
        })?;
        let stdout = child.stdout.take().ok_or_else(|| {
            TransportError::Unavailable("backend stdout was not captured".to_string())
        })?;
        let (frame_tx, frame_rx) = mpsc::unbounded_channel();
        let connection = Arc::new(Connection::new(Some(frame_tx), request_timeout));

        tokio::spawn(write_frames(stdin, frame_rx, Arc::downgrade(&connection)));

        let reader_connection = Arc::clone(&connection);
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => reader_connection.route_line(&line),
                    Ok(None) => break,
                    Err(error) => {
                        warn!(%error, "failed reading backend stdout");

                        break;
                    }
                }
            }

            reader_connection.close("backend closed its output");
        });

        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    warn!(target: "qpm_explorer::backend", "{line}");
                }
            });
        }

        Ok(Self {
            child: tokio::sync::Mutex::new(child),
            connection,
        })
    }

    /// Stops the request writer, which closes the backend's stdin, and waits
    /// briefly for the backend to exit.
    pub async fn shutdown(&self) {
        self.connection.close("explorer is shutting down");
        transport::shutdown_child(&mut *self.child.lock().await).await;
    }

    fn request<T>(
        &self,
        method: &'static str,
        params: Value,
    ) -> GatewayFuture<Result<T, GatewayError>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.connection.request(method, params)
    }

    fn acknowledge(
        &self,
        method: &'static str,
        params: Value,
    ) -> GatewayFuture<Result<(), GatewayError>> {
        self.connection.acknowledge(method, params)
    }
}

fn stdin_closed() -> GatewayError {
    TransportError::Unavailable("backend stdin is closed".to_string()).into()
}

fn decode<T: DeserializeOwned>(method: &'static str, result: Value) -> Result<T, GatewayError> {
    serde_json::from_value(result).map_err(|error| {
        TransportError::Malformed {
            command: method,
            reason: error.to_string(),
        }
        .into()
    })
}

impl BackendGateway for RpcGateway {
    fn get_current_view(&self) -> GatewayFuture<Result<ExplorerView, GatewayError>> {
        self.request(command::GET_CURRENT_VIEW, json!({}))
    }

    fn open_folder(&self, name: String) -> GatewayFuture<Result<ExplorerView, GatewayError>> {
        self.request(command::OPEN_FOLDER, json!({ "name": name }))
    }

    fn go_back(&self) -> GatewayFuture<Result<ExplorerView, GatewayError>> {
        self.request(command::GO_BACK, json!({}))
    }

    fn delete_item(&self, name: String) -> GatewayFuture<Result<ExplorerView, GatewayError>> {
        self.request(command::DELETE_ITEM, json!({ "name": name }))
    }

    fn create_folder(&self, name: String) -> GatewayFuture<Result<ExplorerView, GatewayError>> {
        self.request(command::CREATE_FOLDER, json!({ "name": name }))
    }

    fn create_file(&self, name: String) -> GatewayFuture<Result<ExplorerView, GatewayError>> {
        self.request(command::CREATE_FILE, json!({ "name": name }))
    }

    fn rename_item(
        &self,
        old_name: String,
        new_name: String,
    ) -> GatewayFuture<Result<ExplorerView, GatewayError>> {
        self.request(
            command::RENAME_ITEM,
            json!({ "oldName": old_name, "newName": new_name }),
        )
    }

    fn search_files(&self, query: String) -> GatewayFuture<Result<ExplorerView, GatewayError>> {
        self.request(command::SEARCH_FILES, json!({ "query": query }))
    }

    fn get_system_paths(&self) -> GatewayFuture<Result<Vec<SystemPath>, GatewayError>> {
        self.request(command::GET_SYSTEM_PATHS, json!({}))
    }

    fn get_all_favorites(&self) -> GatewayFuture<Result<Vec<Favorite>, GatewayError>> {
        self.request(command::GET_ALL_FAVORITES, json!({}))
    }

    fn add_favorite(
        &self,
        path: String,
        label: String,
        icon: String,
    ) -> GatewayFuture<Result<(), GatewayError>> {
        self.acknowledge(
            command::ADD_FAVORITE,
            json!({ "path": path, "label": label, "icon": icon }),
        )
    }

    fn remove_favorite(&self, id: i64) -> GatewayFuture<Result<(), GatewayError>> {
        self.acknowledge(command::REMOVE_FAVORITE, json!({ "id": id }))
    }
}
