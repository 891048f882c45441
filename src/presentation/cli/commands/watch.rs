use std::time::Duration;

use crate::application::services::monitor::{CycleOutcome, MonitorService};

/// Run the poll loop at the configured interval.
///
/// The first poll happens immediately; after that the loop ticks every
/// `interval_secs` seconds, skipping ticks it missed while a slow probe
/// was in flight. The loop runs until it receives SIGINT (Ctrl+C) via
/// [`tokio::signal::ctrl_c()`], at which point it exits cleanly; the
/// journal flushes every write, so nothing is lost on shutdown.
///
/// Probe failures are reported and the loop continues.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for fatal cycle errors.
pub async fn run_watch(
    service: &mut MonitorService<'_>,
    interval_secs: u64,
) -> anyhow::Result<()> {
    tracing::info!("Watch loop started (interval: {interval_secs}s)");
    // A zero-length period would panic tokio's interval timer.
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let result = service.run_once().await;
                match result.outcome {
                    CycleOutcome::ProbeFailed(reason) => {
                        tracing::error!("Poll failed: {reason}");
                    }
                    CycleOutcome::Initial(addr) => {
                        tracing::info!("External IP is {addr}");
                    }
                    CycleOutcome::Unchanged(addr) => {
                        tracing::debug!("External IP still {addr}");
                    }
                    CycleOutcome::Changed { from, to } => {
                        tracing::info!("External IP changed: {from} \u{2192} {to}");
                    }
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received, exiting");
                println!("\nCTRL-C detected. Exiting");
                break;
            }
        }
    }
    Ok(())
}
