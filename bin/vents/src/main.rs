use std::sync::Arc;

use airtouch::StubController;
use cover::StateWriter;
use vents::{setup_entry, unload_entry, Config, ErasedError};

use log::{error, info};
use tokio::signal::unix::{signal, SignalKind};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<(), ErasedError> {
    pretty_env_logger::init_timed();

    info!("vents version {VERSION}");

    let config = Config::from_env()?;
    info!("using airtouch at {}", config.host);

    let controller = Arc::new(StubController::new(config.groups));
    let (writer, mut states) = StateWriter::channel();

    let entry = setup_entry(controller, config.scan_interval, writer).await?;
    info!("set up {} vents", entry.vents.len());

    let coordinator = entry.coordinator.clone();
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = coordinator.run() => {},
        _ = async {
            while let Some(state) = states.recv().await {
                match serde_json::to_string(&state) {
                    Ok(payload) => info!("state {payload}"),
                    Err(err) => error!("Error serializing state: {err}"),
                }
            }
        } => {},
        _ = sigterm.recv() => { info!("got SIGTERM, exiting...") },
    };

    unload_entry(entry);

    Ok(())
}
