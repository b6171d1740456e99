//! Background tasks module
//!
//! Scheduled callbacks that run alongside the session: the one-second
//! countdown tick and the fullscreen chrome auto-hide. Each is owned through a
//! [`ScheduledTask`] handle so clearing it is a synchronous abort.

pub mod chrome_hide;
pub mod countdown;

use tokio::task::JoinHandle;
use tracing::debug;

// Re-export main functions
pub use chrome_hide::spawn_chrome_hide;
pub use countdown::spawn_countdown;

/// Handle to a spawned callback; aborts the task when cancelled or dropped
#[derive(Debug)]
pub struct ScheduledTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    pub fn new(name: &'static str, handle: JoinHandle<()>) -> Self {
        Self { name, handle }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Abort the task; it will not fire again
    pub fn cancel(self) {
        // Drop does the abort
        debug!("Cancelling scheduled task {}", self.name);
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
