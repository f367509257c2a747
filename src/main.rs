//! Tomatime - a state-managed Pomodoro timer daemon
//!
//! This is the main entry point for the tomatime application.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use tomatime::{
    api::{create_router, ServerState},
    config::Config,
    engine::TimerEngine,
    publish::SurfaceFanout,
    surfaces::{
        MainDisplay, NotificationPanel, OverlayBall, MAIN_SURFACE, NOTIFICATION_SURFACE,
        OVERLAY_SURFACE,
    },
    tasks::surface_publisher_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("tomatime={},tower_http=info", config.log_level()))
        .init();

    info!("Starting tomatime daemon v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, focus={}min",
        config.host, config.port, config.focus
    );

    // Create the timer engine
    let engine = Arc::new(TimerEngine::new(config.focus_duration_ms()));

    // Register the presentation surfaces and start the publisher task
    let mut fanout = SurfaceFanout::new();
    fanout.register(MAIN_SURFACE, Arc::new(MainDisplay));
    fanout.register(OVERLAY_SURFACE, Arc::new(OverlayBall));
    fanout.register(NOTIFICATION_SURFACE, Arc::new(NotificationPanel));

    let events = engine.subscribe();
    tokio::spawn(async move {
        surface_publisher_task(events, fanout).await;
    });

    // Create HTTP router with all endpoints
    let state = Arc::new(ServerState::new(engine, config.host.clone(), config.port));
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /toggle              - Start or pause the countdown");
    info!("  POST /reset               - Reset the current phase");
    info!("  POST /phase/:phase        - Switch phase (focus|short-break|long-break)");
    info!("  POST /focus-duration      - Set the focus duration");
    info!("  POST /overlay/click       - Overlay ball tap");
    info!("  POST /notification/toggle - Notification pause/continue action");
    info!("  POST /notification/stop   - Notification stop action");
    info!("  GET  /status              - Current timer status");
    info!("  GET  /health              - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
