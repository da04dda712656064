use anyhow::Context;
use lexguard_api::config::Settings;
use lexguard_api::middleware::init_logging;
use lexguard_api::routes::{self, AppState};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

// Panic hook so panics outside request handling still reach the logs
fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let message = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_default();
        error!(location = %location, "panic: {}", message);
    }));
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().context("Failed to load settings")?;

    init_logging(&settings).context("Failed to initialize logging")?;
    setup_panic_hook();

    info!(
        app = %settings.app_name,
        env = %settings.env,
        debug = settings.debug,
        "Application starting..."
    );

    let addr = format!("{}:{}", settings.host, settings.port);
    let app_state = AppState::from_settings(settings)
        .await
        .context("Failed to initialize OpenSearch client")?;
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind listener on {}", addr))?;
    info!("Server listening on {}", addr);
    info!("Health check available at http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

// Resolves on SIGINT (Ctrl+C) or SIGTERM (container stop)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("SIGINT received, shutting down gracefully"),
        _ = terminate => info!("SIGTERM received, shutting down gracefully"),
    }
}
