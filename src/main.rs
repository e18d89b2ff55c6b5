use std::process::ExitCode;

use tracing::{error, info};

use postboard::{open_store, Config, WebServer};

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let mut config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    if let Err(e) = config.apply_env_overrides().and_then(|_| config.validate()) {
        eprintln!("Invalid configuration: {e}");
        return ExitCode::FAILURE;
    }

    // Initialize logging
    if let Err(e) = postboard::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        postboard::logging::init_console_only(&config.logging.level);
    }

    info!("Postboard starting");

    // A store that cannot be opened is fatal.
    let store = match open_store(&config.database).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open post store: {e}");
            return ExitCode::FAILURE;
        }
    };

    let server = match WebServer::new(&config, store) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to create web server: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.run_until(shutdown_signal()).await {
        error!("Web server error: {e}");
        return ExitCode::FAILURE;
    }

    info!("Postboard stopped");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
