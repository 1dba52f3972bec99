// Demari Bets terminal client entry point.
//
// Startup sequence:
// 1. Initialize tracing (append to logs/demari-bets.log, not the terminal)
// 2. Load config
// 3. Build the backend client
// 4. Create mpsc channels and the application state
// 5. Spawn the app logic task
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context};
use demari_app::api::{BetsApi, HttpBetsApi};
use demari_app::app;
use demari_core::config;
use demari_tui::tui;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_path = init_tracing(&std::env::current_dir()?.join("logs"))?;
    info!("Demari Bets starting up, logging to {}", log_path.display());

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: backend={}, acknowledgement={}s, strict duplicates={}",
        config.api.base_url, config.session.acknowledgement_secs, config.validation.strict_duplicates
    );

    let client = HttpBetsApi::from_config(&config.api).context("failed to build backend client")?;
    info!("Backend client ready at {}", client.base_url());
    let api: Arc<dyn BetsApi> = Arc::new(client);

    let (api_tx, api_rx) = mpsc::channel(64);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let app_state = app::AppState::new(&config, api, api_tx);

    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(api_rx, cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // Blocks until the user confirms quit or presses Ctrl+C.
    if let Err(e) = tui::run(ui_rx, cmd_tx, config.validation.duplicate_check()).await {
        error!("TUI error: {}", e);
    }

    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Demari Bets shut down cleanly");
    Ok(())
}

/// Directives used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "demari_tui=info,demari_app=info,demari_core=info,warn";

/// Send tracing output to `demari-bets.log` under `log_dir`, appending across
/// runs. The terminal belongs to the TUI, so nothing is written to stderr.
fn init_tracing(log_dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;
    let log_path = log_dir.join("demari-bets.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open {}", log_path.display()))?;

    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid RUST_LOG directives {directives:?}"))?,
        Err(_) => EnvFilter::new(DEFAULT_LOG_FILTER),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(log_path)
}
