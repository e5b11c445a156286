use std::time::Duration;
use std::thread;
use log::{debug, info, warn};

/// Bounded fixed-interval retry mechanism
///
/// Used for the SDK availability probe: a fixed number of attempts with a
/// constant delay between them, after which the operation fails
/// permanently.
pub struct RetryHandler {
    /// Current attempt number (0-based)
    attempt: usize,
    /// Maximum number of attempts before giving up
    max_attempts: usize,
    /// Delay between attempts
    interval: Duration,
}

impl RetryHandler {
    /// Create a new retry handler
    pub fn new(max_attempts: usize, interval: Duration) -> Self {
        Self {
            attempt: 0,
            max_attempts,
            interval,
        }
    }

    /// Get the current attempt number (0-based)
    pub fn attempt(&self) -> usize {
        self.attempt
    }

    /// Check if another attempt may be made
    pub fn should_retry(&self) -> bool {
        self.attempt < self.max_attempts
    }

    /// Wait for the retry interval and advance the attempt counter
    pub fn wait(&mut self) {
        debug!(
            "Retry attempt {}: waiting {:?} before next attempt",
            self.attempt + 1,
            self.interval
        );
        thread::sleep(self.interval);
        self.attempt += 1;
    }

    /// Reset the retry counter
    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    /// Execute a closure with retry logic
    ///
    /// # Arguments
    /// * `operation` - The operation to retry
    /// * `operation_name` - Name for logging purposes
    ///
    /// # Returns
    /// * `Some(T)` if the operation succeeded
    /// * `None` if all attempts were exhausted
    pub fn execute_with_retry<T, F>(&mut self, mut operation: F, operation_name: &str) -> Option<T>
    where
        F: FnMut() -> Option<T>,
    {
        loop {
            debug!("Attempting {} (attempt {})", operation_name, self.attempt + 1);
            if let Some(result) = operation() {
                info!("{} succeeded on attempt {}", operation_name, self.attempt + 1);
                return Some(result);
            }

            if !self.should_retry() {
                warn!(
                    "{} failed after {} attempts, giving up",
                    operation_name,
                    self.attempt + 1
                );
                return None;
            }

            self.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_retry_until_max_attempts() {
        let mut retry = RetryHandler::new(3, Duration::from_millis(1));

        assert!(retry.should_retry()); // attempt 0
        retry.attempt = 2;
        assert!(retry.should_retry()); // attempt 2
        retry.attempt = 3;
        assert!(!retry.should_retry()); // attempt 3, no more retries
    }

    #[test]
    fn test_execute_with_retry_succeeds_eventually() {
        let mut retry = RetryHandler::new(5, Duration::from_millis(1));
        let mut calls = 0;
        let result = retry.execute_with_retry(
            || {
                calls += 1;
                if calls == 3 { Some(calls) } else { None }
            },
            "test operation",
        );
        assert_eq!(result, Some(3));
    }

    #[test]
    fn test_execute_with_retry_gives_up() {
        let mut retry = RetryHandler::new(2, Duration::from_millis(1));
        let mut calls = 0;
        let result: Option<()> = retry.execute_with_retry(
            || {
                calls += 1;
                None
            },
            "test operation",
        );
        assert_eq!(result, None);
        // One initial attempt plus two retries
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_reset() {
        let mut retry = RetryHandler::new(5, Duration::from_millis(1));
        retry.attempt = 4;
        retry.reset();
        assert_eq!(retry.attempt(), 0);
    }
}
