//! Countdown Overlay - an interactive countdown timer composited over a video
//!
//! This is the main entry point: commands are read from stdin, one per line,
//! and every response is written to stdout as a single JSON line.

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};

use countdown_overlay::{
    api::{handle_command, ApiResponse, Command, Response},
    config::Config,
    state::{AppState, Session, SessionEvent},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level; stdout is reserved for responses
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_overlay={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting countdown-overlay v{}", env!("CARGO_PKG_VERSION"));
    let container = config.container_size().map_err(anyhow::Error::msg)?;
    info!(
        "Configuration: duration={}s, container={}x{}, hide_delay={}ms",
        config.duration, container.width, container.height, config.hide_delay_ms
    );

    // Create application state
    let state = AppState::new(Session::new(config.duration, container), config.hide_delay());

    if let Some(url) = config.url.as_deref() {
        print_response(&handle_command(&state, Command::Url(url.to_string())));
    }

    // Echo session events to the log
    let mut events = state.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                SessionEvent::Completed => info!("Countdown finished"),
                SessionEvent::Tick { remaining_seconds } => debug!("Tick: {}s remaining", remaining_seconds),
                other => debug!("Session event: {:?}", other),
            }
        }
    });

    info!("Reading commands from stdin");
    info!("  url <link> | duration <secs> | play | pause | toggle | reset");
    info!("  font-size <px> | font <family> | opacity <pct> | position <x%> <y%>");
    info!("  down <x> <y> | move <x> <y> | up | container <w> <h> | measure <w> <h>");
    info!("  embed-error | fullscreen | key <name> | status | fonts | health | quit");

    tokio::select! {
        result = command_loop(Arc::clone(&state)) => {
            if let Err(e) = result {
                error!("Command loop error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = state.teardown() {
        warn!("Teardown failed: {}", e);
    }
    info!("Shutdown complete");
    Ok(())
}

/// Read stdin until EOF or `quit`
async fn command_loop(state: Arc<AppState>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match Command::parse(&line) {
            Ok(Command::Quit) => {
                print_response(&handle_command(&state, Command::Quit));
                break;
            }
            Ok(command) => print_response(&handle_command(&state, command)),
            Err(e) => {
                warn!("Rejected input {:?}: {}", line, e);
                print_response(&Response::Api(ApiResponse::error(e)));
            }
        }
    }

    debug!("Command loop finished");
    Ok(())
}

fn print_response(response: &Response) {
    match response.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => error!("{}", e),
    }
}
