//! Fullscreen chrome auto-hide

use std::{sync::Weak, time::Duration};
use tokio::time::sleep;
use tracing::debug;

use crate::state::AppState;

use super::ScheduledTask;

/// Hide the exit chrome after `delay` unless a newer show superseded `generation`
pub fn spawn_chrome_hide(state: Weak<AppState>, delay: Duration, generation: u64) -> ScheduledTask {
    let handle = tokio::spawn(async move {
        sleep(delay).await;
        match state.upgrade() {
            Some(state) => {
                state.hide_chrome(generation);
            }
            None => debug!("Session gone before chrome hide {}", generation),
        }
    });
    ScheduledTask::new("chrome-hide", handle)
}
