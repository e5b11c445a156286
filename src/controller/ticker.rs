use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use log::{debug, trace};

/// Repeating progress timer backed by a background thread
///
/// At most one tick thread is alive per ticker. Starting a new one cancels
/// the previous thread first, so repeated start calls never accumulate
/// threads.
pub struct ProgressTicker {
    /// Running flag of the currently active tick thread, if any
    running: Option<Arc<AtomicBool>>,

    /// Tick period
    period: Duration,
}

impl ProgressTicker {
    /// Create a new ticker with the given period
    pub fn new(period: Duration) -> Self {
        Self {
            running: None,
            period,
        }
    }

    /// Start the ticker, cancelling any previously running one
    ///
    /// The `tick` callback runs once per period and returns `false` when the
    /// ticker should stop itself (end of media).
    pub fn start<F>(&mut self, tick: F)
    where
        F: Fn() -> bool + Send + 'static,
    {
        self.stop();

        debug!("Starting progress ticker with period {:?}", self.period);
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let period = self.period;

        // The thread is detached; it observes the flag once per period and
        // exits at most one period after a stop request.
        thread::spawn(move || {
            while flag.load(Ordering::SeqCst) {
                thread::sleep(period);
                if !flag.load(Ordering::SeqCst) {
                    break;
                }
                trace!("Progress tick");
                if !tick() {
                    debug!("Progress ticker stopped by tick callback");
                    flag.store(false, Ordering::SeqCst);
                }
            }
        });

        self.running = Some(running);
    }

    /// Stop the ticker if it is running
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            if running.load(Ordering::SeqCst) {
                debug!("Stopping progress ticker");
            }
            running.store(false, Ordering::SeqCst);
        }
    }

    /// Whether a tick thread is currently active
    pub fn is_active(&self) -> bool {
        self.running
            .as_ref()
            .map(|r| r.load(Ordering::SeqCst))
            .unwrap_or(false)
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_ticker_runs_and_stops() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut ticker = ProgressTicker::new(Duration::from_millis(5));

        let c = Arc::clone(&counter);
        ticker.start(move || {
            c.fetch_add(1, Ordering::SeqCst);
            true
        });
        assert!(ticker.is_active());

        thread::sleep(Duration::from_millis(100));
        assert!(counter.load(Ordering::SeqCst) >= 1);

        ticker.stop();
        assert!(!ticker.is_active());
        let after_stop = counter.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));
        // At most one tick can slip in between the stop request and the
        // thread observing the flag
        assert!(counter.load(Ordering::SeqCst) <= after_stop + 1);
    }

    #[test]
    fn test_restart_cancels_previous_thread() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut ticker = ProgressTicker::new(Duration::from_millis(5));

        let c = Arc::clone(&first);
        ticker.start(move || {
            c.fetch_add(1, Ordering::SeqCst);
            true
        });

        let c = Arc::clone(&second);
        ticker.start(move || {
            c.fetch_add(1, Ordering::SeqCst);
            true
        });

        thread::sleep(Duration::from_millis(50));
        let first_count = first.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(50));

        // The first thread must have stopped incrementing after the restart
        assert!(first.load(Ordering::SeqCst) <= first_count + 1);
        assert!(second.load(Ordering::SeqCst) >= 1);

        ticker.stop();
    }

    #[test]
    fn test_tick_callback_can_stop_ticker() {
        let mut ticker = ProgressTicker::new(Duration::from_millis(5));
        ticker.start(|| false);

        thread::sleep(Duration::from_millis(50));
        assert!(!ticker.is_active());
    }
}
