//! One-second countdown tick

use std::{sync::Weak, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::state::AppState;

use super::ScheduledTask;

/// Tick cadence of the countdown
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Spawn the tick loop for one run of the countdown.
///
/// The first tick fires one full interval after the call. The loop exits
/// when the state is gone, the run was superseded (`generation` is stale), or
/// the countdown stopped running.
pub fn spawn_countdown(state: Weak<AppState>, generation: u64) -> ScheduledTask {
    let start = Instant::now() + TICK_INTERVAL;
    let handle = tokio::spawn(async move {
        debug!("Countdown task {} armed", generation);
        let mut interval = interval_at(start, TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let Some(state) = state.upgrade() else {
                debug!("Session gone, countdown task {} exiting", generation);
                break;
            };
            if !state.scheduled_tick(generation) {
                info!("Countdown task {} finished", generation);
                break;
            }
        }
    });
    ScheduledTask::new("countdown", handle)
}
