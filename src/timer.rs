//! Cancellable tick service behind the elapsed-time readout.

use log::debug;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Granularity of the stop-flag poll inside the tick thread. Keeps `stop`
/// from blocking for a full tick interval while the thread sleeps.
const CANCEL_POLL: Duration = Duration::from_millis(20);

/// Repeating tick counter backed by a background thread.
///
/// The thread increments a shared seconds counter once per interval until
/// stopped. Stopping is explicit (`stop`, also run on drop) and joins the
/// thread, so once `stop` returns no further tick can land. Each game gets
/// its own `TickTimer`: the old one is stopped and replaced wholesale on a
/// new game start, so a stale tick can never reach the new game's counter.
#[derive(Debug)]
pub struct TickTimer {
    seconds: Arc<AtomicU64>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TickTimer {
    /// Starts a timer ticking once per second.
    pub fn start() -> Self {
        Self::with_interval(Duration::from_secs(1))
    }

    /// Starts a timer with a custom tick interval. Tests use millisecond
    /// intervals to keep themselves fast.
    pub fn with_interval(interval: Duration) -> Self {
        let seconds = Arc::new(AtomicU64::new(0));
        let running = Arc::new(AtomicBool::new(true));
        let thread_seconds = Arc::clone(&seconds);
        let thread_running = Arc::clone(&running);
        let handle = thread::spawn(move || {
            let poll = CANCEL_POLL.min(interval);
            'ticking: loop {
                let mut slept = Duration::ZERO;
                while slept < interval {
                    if !thread_running.load(Ordering::Relaxed) {
                        break 'ticking;
                    }
                    let step = poll.min(interval - slept);
                    thread::sleep(step);
                    slept += step;
                }
                if !thread_running.load(Ordering::Relaxed) {
                    break;
                }
                thread_seconds.fetch_add(1, Ordering::Relaxed);
            }
        });
        debug!("tick timer started ({}ms interval)", interval.as_millis());
        Self {
            seconds,
            running,
            handle: Some(handle),
        }
    }

    /// Whole seconds elapsed since the timer started.
    pub fn seconds(&self) -> u64 {
        self.seconds.load(Ordering::Relaxed)
    }

    /// Returns true while the tick thread is alive.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Stops the tick thread and waits for it to exit. Idempotent.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            debug!("tick timer stopped at {}s", self.seconds());
        }
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_timer_ticks_and_freezes_on_stop() {
        let mut timer = TickTimer::with_interval(Duration::from_millis(10));
        thread::sleep(Duration::from_millis(120));
        let ticked = timer.seconds();
        assert!(ticked >= 3, "expected a few ticks, saw {}", ticked);

        timer.stop();
        let frozen = timer.seconds();
        thread::sleep(Duration::from_millis(60));
        assert_eq!(timer.seconds(), frozen);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut timer = TickTimer::with_interval(Duration::from_millis(10));
        timer.stop();
        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.seconds(), timer.seconds());
    }

    #[test]
    fn test_new_game_timer_starts_from_zero() {
        // Restarting a game replaces the timer wholesale; the old one is
        // cancelled and its ticks cannot reach the new counter.
        let mut old = TickTimer::with_interval(Duration::from_millis(10));
        thread::sleep(Duration::from_millis(80));
        old.stop();
        let old_final = old.seconds();
        assert!(old_final >= 1);

        let fresh = TickTimer::with_interval(Duration::from_millis(10));
        assert_eq!(fresh.seconds(), 0);
        thread::sleep(Duration::from_millis(50));
        assert_eq!(old.seconds(), old_final);
        assert!(fresh.seconds() >= 1);
    }
}
