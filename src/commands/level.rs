//! `level` subcommands: one-shot reading and the live gauge

use super::AppContext;
use crate::cli::LevelCmd;
use crate::level::{LevelAnimation, LevelBand, LevelClient, LevelPoller, LevelState, PENDING_COLOR};
use crate::Result;
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

const GAUGE_CELLS: usize = 20;
const FRAME: Duration = Duration::from_millis(100);

/// A single reading with its band
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelReport {
    pub level: f64,
    pub band: LevelBand,
    pub color: &'static str,
    pub status: &'static str,
}

impl LevelReport {
    pub fn new(level: f64) -> Self {
        let band = LevelBand::classify(level);
        Self {
            level,
            band,
            color: band.color(),
            status: band.status_text(),
        }
    }
}

pub async fn handle_level(ctx: &AppContext, cmd: LevelCmd) -> Result<()> {
    let client = LevelClient::with_timeout(&ctx.config.level_url, ctx.config.request_timeout)?;

    match cmd {
        LevelCmd::Once => {
            let report = LevelReport::new(client.fetch_level().await?);
            ctx.emit(&report, |r| format!("{:.0}%  {}", r.level, r.status))
        }
        LevelCmd::Watch { ticks } => watch(ctx, client, ticks).await,
    }
}

/// Poll until interrupted (or until `ticks` fresh readings), redrawing the
/// gauge as it eases toward each reading.
async fn watch(ctx: &AppContext, client: LevelClient, ticks: Option<u32>) -> Result<()> {
    let poller = Arc::new(LevelPoller::new(client, ctx.config.poll_interval));
    let handle = poller.start();
    let mut rx = handle.subscribe();
    let mut animation = LevelAnimation::default();
    let mut frames = tokio::time::interval(FRAME);
    let mut seen = 0u32;
    let mut last_update = None;

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                animation.set_target(state.level, Instant::now());

                if state.last_update.is_some() && state.last_update != last_update {
                    last_update = state.last_update;
                    seen += 1;
                }
                if ctx.as_json {
                    println!("{}", serde_json::to_string(&state)?);
                }
                if ticks.is_some_and(|limit| seen >= limit) {
                    break;
                }
            }
            _ = frames.tick(), if !ctx.as_json => {
                let state = rx.borrow().clone();
                print!("\r{}", render_gauge(animation.value_at(Instant::now()), &state));
                std::io::stdout().flush()?;
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted");
                break;
            }
        }
    }

    if !ctx.as_json {
        let state = handle.poller().state();
        println!("\r{}", render_gauge(state.level.unwrap_or(0.0), &state));
    }
    handle.stop();
    Ok(())
}

/// One-line gauge: bar, percentage and status.
pub fn render_gauge(width: f64, state: &LevelState) -> String {
    let filled = ((width.clamp(0.0, 100.0) / 100.0) * GAUGE_CELLS as f64).round() as usize;
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(GAUGE_CELLS - filled));

    let (label, color, status) = match state.level {
        Some(level) => {
            let band = LevelBand::classify(level);
            (format!("{level:.0}%"), band.color(), band.status_text())
        }
        None if state.loading => ("--%".to_string(), PENDING_COLOR, "Loading..."),
        None => ("--%".to_string(), PENDING_COLOR, "No reading"),
    };

    let mut line = format!("[{bar}] {label:>4} {status} ({color})");
    if state.refreshing {
        line.push_str(" ↻");
    }
    if let Some(error) = &state.error {
        line.push_str(&format!("  ⚠ {error}"));
    }
    line
}
