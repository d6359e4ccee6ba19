//! Application entry point — text-to-video client.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 1 worker).
//! 4. Build the HTTP generation client from config.
//! 5. Create the shared UI state and the orchestrator command channel.
//! 6. Spawn the orchestrator on the tokio runtime.
//! 7. Run [`eframe::run_native`] — blocks the main thread until the window
//!    is closed.

use std::sync::Arc;

use eframe::egui;
use tokio::sync::mpsc;
use text_to_video::{
    app::TextToVideoApp,
    client::{GenerationClient, HttpGenerationClient},
    config::AppConfig,
    orchestrator::{new_shared_state, Orchestrator, OrchestratorCommand},
};

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let (width, height) = config.ui.window_size;
    let mut vp = egui::ViewportBuilder::default()
        .with_title("Text zu Video")
        .with_inner_size([width, height])
        .with_min_inner_size([420.0, 480.0]);

    if config.ui.always_on_top {
        vp = vp.with_always_on_top();
    }

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("text-to-video starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    if AppConfig::is_first_run() {
        if let Err(e) = config.save() {
            log::warn!("Could not write default config: {e}");
        }
    }
    log::info!("generation service at {}", config.service.base_url);

    // 3. Tokio runtime (one worker — requests are processed one at a time)
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    // 4. Generation client
    let client: Arc<dyn GenerationClient> =
        Arc::new(HttpGenerationClient::from_config(&config.service));

    // 5. Shared state + channel
    let state = new_shared_state(config.defaults.animation);
    let orchestrator = Orchestrator::new(state, client);
    let (command_tx, command_rx) = mpsc::channel::<OrchestratorCommand>(8);

    // 6. Orchestrator task
    rt.spawn(orchestrator.clone().run(command_rx));

    // 7. egui window (blocks until closed)
    let app = TextToVideoApp::new(orchestrator, command_tx, config.clone());
    let options = native_options(&config);

    eframe::run_native(
        "Text zu Video",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
