use std::io;
use std::sync::{Arc, Mutex};

use clap::Parser;
use qpm_explorer::app::App;
use qpm_explorer::config::{Cli, open_log_file};
use qpm_explorer::infra::gateway::BackendGateway;
use qpm_explorer::infra::rpc::RpcGateway;
use tracing::info;

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = Cli::parse()
        .resolve()
        .map_err(|error| io::Error::other(format!("Error: {error}")))?;

    let log_file = open_log_file(&config.log_file).map_err(io::Error::other)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_max_level(config.log_level)
        .try_init()
        .map_err(io::Error::other)?;
    info!(backend = %config.backend.program.display(), "starting explorer");

    let gateway = Arc::new(
        RpcGateway::spawn(&config.backend, config.request_timeout).map_err(io::Error::other)?,
    );
    let backend: Arc<dyn BackendGateway> = gateway.clone();
    let mut app = App::new(backend);

    let result = qpm_explorer::runtime::run(&mut app).await;
    gateway.shutdown().await;
    info!("explorer stopped");

    result
}
