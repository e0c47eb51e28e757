// GafferOS terminal client entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the input assembler, pre-loading a squad CSV if configured
// 4. Build the analysis client
// 5. Create mpsc channels and the application state
// 6. Spawn the app logic task
// 7. Run the TUI until the user quits
// 8. Cleanup on exit

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use gaffer_api::{AnalysisClient, AnalysisService};
use gaffer_core::assembler::InputAssembler;
use gaffer_tui::{app, config, squad_import, tui};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("GafferOS client starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: api={}, max_players={}",
        config.api.base_url, config.squad.max_players
    );

    let mut assembler = InputAssembler::new(config.squad.max_players);
    if let Some(path) = &config.squad.import_path {
        match squad_import::load_squad(Path::new(path)) {
            Ok(players) => assembler.replace_squad(players),
            Err(e) => warn!("Squad import skipped: {}", e),
        }
    }

    let client: Arc<dyn AnalysisService> = Arc::new(AnalysisClient::new(&config.api.base_url));

    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);
    let (outcome_tx, outcome_rx) = mpsc::channel(16);

    let app_state = app::AppState::new(assembler, client, outcome_tx);
    if config.api.check_health {
        app_state.spawn_health_check();
    }

    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, outcome_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    info!("Application ready");

    if let Err(e) = tui::run(ui_rx, cmd_tx, config.pitch.geometry()).await {
        error!("TUI error: {}", e);
    }

    // cmd_tx is gone with the TUI, so the app loop winds down on its own.
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("GafferOS client shut down cleanly");
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("gaffer.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("gaffer_tui=info,gaffer_core=info,gaffer_api=info,warn")
        }))
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
