//! Fasting Ticker
//!
//! Runs the fasting window engine against a fast record on a one second
//! tick and logs every state, the way the timer view consumes it.
//!
//! ## Inputs
//!
//! - `ticker.fast_file`: JSON fast record as returned by the API
//! - `profile`: optional body profile for the daily calorie target

use anyhow::Result;
use fasting_tracker_core::{format_duration, TimerState};
use fasting_tracker_ticker::{config, energy, Ticker};
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting fasting ticker"
    );

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return Err(e.into());
    }

    let daily = energy::daily_target(&config);
    info!(
        goal = daily.goal.as_str(),
        maintenance = ?daily.maintenance,
        target = daily.target,
        unit = %daily.unit,
        source = ?daily.source,
        "Daily energy target"
    );

    let fast = config.load_fast()?;
    if fast.is_none() {
        info!("No active fast configured");
    }

    // Sender stays alive for the whole run; dropping it ends the loop
    let (_fast_tx, fast_rx) = watch::channel(fast);

    let ticker = Ticker::new(config.interval());
    let outcome = ticker.run(fast_rx, log_state, shutdown_signal()).await;

    info!(?outcome, "Ticker stopped");
    Ok(())
}

/// Log one timer state
fn log_state(state: &TimerState) {
    let remaining = state
        .remaining_ms
        .map(format_duration)
        .unwrap_or_else(|| "--:--:--".to_string());

    info!(
        elapsed = %format_duration(state.elapsed_ms),
        remaining = %remaining,
        progress = ?state.progress,
        over_target = state.is_over_target,
        phase = %state.phase_label,
        "Timer"
    );
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "fasting_ticker=info,fasting_tracker_ticker=info".into()
        } else {
            "fasting_ticker=debug,fasting_tracker_ticker=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, stopping");
        }
        _ = terminate => {
            info!("Received SIGTERM, stopping");
        }
    }
}
