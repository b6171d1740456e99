//! Shared application state: the session behind a lock, its scheduled tasks
//! and the notification channels

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, Weak,
    },
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

use crate::{
    tasks::{spawn_chrome_hide, spawn_countdown, ScheduledTask},
    utils::format_uptime,
};

use super::{
    session::{Session, Snapshot},
    timer_state::TickOutcome,
};

/// Notifications for anything watching the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A command changed the session
    Action { action: String },
    Tick { remaining_seconds: u32 },
    Completed,
    ChromeHidden,
}

/// What an update did to the countdown run
enum CountdownChange {
    Unchanged,
    Start(u64),
    Stop,
}

/// What an update did to the fullscreen chrome
enum ChromeChange {
    Unchanged,
    Arm(u64),
    Clear,
}

/// Application state shared between the command loop and the scheduled tasks
#[derive(Debug)]
pub struct AppState {
    /// Handle to ourselves for the tasks we spawn
    me: Weak<AppState>,
    session: Mutex<Session>,
    /// Fullscreen chrome auto-hide delay
    pub hide_delay: Duration,
    /// Process metadata
    pub start_time: Instant,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel for session notifications
    pub event_tx: broadcast::Sender<SessionEvent>,
    /// Channel carrying the latest snapshot
    pub snapshot_tx: watch::Sender<Snapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<Snapshot>,
    countdown_task: Mutex<Option<ScheduledTask>>,
    chrome_task: Mutex<Option<ScheduledTask>>,
    /// Identifies the current countdown run; ticks from older runs are ignored
    countdown_generation: AtomicU64,
}

impl AppState {
    /// Wrap a session in a shared handle
    pub fn new(session: Session, hide_delay: Duration) -> Arc<Self> {
        let (event_tx, _) = broadcast::channel(100);
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());

        Arc::new_cyclic(|me| Self {
            me: me.clone(),
            session: Mutex::new(session),
            hide_delay,
            start_time: Instant::now(),
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            event_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            countdown_task: Mutex::new(None),
            chrome_task: Mutex::new(None),
            countdown_generation: AtomicU64::new(0),
        })
    }

    fn lock_session(&self) -> Result<MutexGuard<'_, Session>, String> {
        self.session
            .lock()
            .map_err(|e| format!("Failed to lock session: {}", e))
    }

    /// Apply one operation to the session and publish the result.
    ///
    /// Countdown and chrome callbacks are re-armed or cleared here, in the
    /// same step as the transition that requires it: a stopped countdown's
    /// run is invalidated before the session lock is released.
    pub fn update_session<F, R>(&self, action: &str, updater: F) -> Result<(R, Snapshot), String>
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut session = self.lock_session()?;

        let was_running = session.timer().is_running();
        let chrome_generation = session.fullscreen().generation();

        let result = updater(&mut *session);

        let countdown = match (was_running, session.timer().is_running()) {
            (false, true) => CountdownChange::Start(self.next_countdown_generation()),
            (true, false) => {
                self.next_countdown_generation();
                CountdownChange::Stop
            }
            _ => CountdownChange::Unchanged,
        };
        let chrome = {
            let fullscreen = session.fullscreen();
            if fullscreen.generation() == chrome_generation {
                ChromeChange::Unchanged
            } else if fullscreen.is_active() && fullscreen.chrome_visible() {
                ChromeChange::Arm(fullscreen.generation())
            } else {
                ChromeChange::Clear
            }
        };
        let snapshot = session.snapshot();
        drop(session); // Release the lock before touching the task slots

        self.apply_countdown_change(countdown);
        self.apply_chrome_change(chrome);
        self.record_action(action);
        self.publish(&snapshot);
        self.notify(SessionEvent::Action {
            action: action.to_string(),
        });

        Ok((result, snapshot))
    }

    /// Read from the session without changing it
    pub fn read_session<F, R>(&self, reader: F) -> Result<R, String>
    where
        F: FnOnce(&Session) -> R,
    {
        let session = self.lock_session()?;
        Ok(reader(&session))
    }

    /// Get the current snapshot
    pub fn get_snapshot(&self) -> Result<Snapshot, String> {
        self.read_session(Session::snapshot)
    }

    /// Called by the countdown task once per second.
    ///
    /// Returns whether the task should keep ticking.
    pub fn scheduled_tick(&self, generation: u64) -> bool {
        let mut session = match self.lock_session() {
            Ok(session) => session,
            Err(e) => {
                error!("Countdown tick dropped: {}", e);
                return false;
            }
        };

        // Checked under the session lock so a pause or reset always wins
        if generation != self.countdown_generation.load(Ordering::SeqCst) {
            debug!("Ignoring tick from superseded countdown run {}", generation);
            return false;
        }

        let outcome = session.tick();
        let snapshot = session.snapshot();
        drop(session);

        match outcome {
            TickOutcome::Ignored => false,
            TickOutcome::Counted { remaining_seconds } => {
                self.publish(&snapshot);
                self.notify(SessionEvent::Tick { remaining_seconds });
                true
            }
            TickOutcome::Completed => {
                self.record_action("complete");
                self.publish(&snapshot);
                self.notify(SessionEvent::Tick {
                    remaining_seconds: 0,
                });
                self.notify(SessionEvent::Completed);
                false
            }
        }
    }

    /// Called by the chrome hide task once its delay elapsed
    pub fn hide_chrome(&self, generation: u64) -> bool {
        let mut session = match self.lock_session() {
            Ok(session) => session,
            Err(e) => {
                error!("Chrome hide dropped: {}", e);
                return false;
            }
        };
        if !session.hide_chrome(generation) {
            return false;
        }
        let snapshot = session.snapshot();
        drop(session);

        self.publish(&snapshot);
        self.notify(SessionEvent::ChromeHidden);
        true
    }

    /// End the session: drop the gesture, stop the countdown and clear every callback
    pub fn teardown(&self) -> Result<(), String> {
        self.update_session("teardown", Session::teardown)?;
        self.next_countdown_generation();
        let countdown = self.take_task(&self.countdown_task);
        let chrome = self.take_task(&self.chrome_task);
        for task in countdown.into_iter().chain(chrome) {
            task.cancel();
        }
        info!("Session torn down");
        Ok(())
    }

    /// Whether a countdown callback is currently scheduled
    pub fn countdown_scheduled(&self) -> bool {
        Self::is_scheduled(&self.countdown_task)
    }

    /// Whether a chrome hide callback is currently scheduled
    pub fn chrome_hide_scheduled(&self) -> bool {
        Self::is_scheduled(&self.chrome_task)
    }

    /// Calculate uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    pub fn watch_snapshot(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    fn next_countdown_generation(&self) -> u64 {
        self.countdown_generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn apply_countdown_change(&self, change: CountdownChange) {
        match change {
            CountdownChange::Unchanged => {}
            CountdownChange::Start(generation) => {
                let task = spawn_countdown(self.me.clone(), generation);
                self.replace_task(&self.countdown_task, Some(task));
            }
            CountdownChange::Stop => self.replace_task(&self.countdown_task, None),
        }
    }

    fn apply_chrome_change(&self, change: ChromeChange) {
        match change {
            ChromeChange::Unchanged => {}
            ChromeChange::Arm(generation) => {
                let task = spawn_chrome_hide(self.me.clone(), self.hide_delay, generation);
                self.replace_task(&self.chrome_task, Some(task));
            }
            ChromeChange::Clear => self.replace_task(&self.chrome_task, None),
        }
    }

    /// Swap the task in a slot; the previous one is aborted
    fn replace_task(&self, slot: &Mutex<Option<ScheduledTask>>, task: Option<ScheduledTask>) {
        match slot.lock() {
            Ok(mut slot) => {
                if let Some(previous) = std::mem::replace(&mut *slot, task) {
                    previous.cancel();
                }
            }
            Err(e) => error!("Failed to lock task slot: {}", e),
        }
    }

    fn take_task(&self, slot: &Mutex<Option<ScheduledTask>>) -> Option<ScheduledTask> {
        match slot.lock() {
            Ok(mut slot) => slot.take(),
            Err(e) => {
                error!("Failed to lock task slot: {}", e);
                None
            }
        }
    }

    fn is_scheduled(slot: &Mutex<Option<ScheduledTask>>) -> bool {
        slot.lock()
            .map(|slot| slot.as_ref().is_some_and(|task| !task.is_finished()))
            .unwrap_or(false)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    fn publish(&self, snapshot: &Snapshot) {
        self.snapshot_tx.send_replace(snapshot.clone());
    }

    fn notify(&self, event: SessionEvent) {
        // No subscribers is the normal case outside the binary
        if self.event_tx.receiver_count() == 0 {
            return;
        }
        if let Err(e) = self.event_tx.send(event) {
            warn!("Failed to send session event: {}", e);
        }
    }
}
