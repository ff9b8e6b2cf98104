use std::fmt::Display;
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

/// Errors that know whether another attempt makes sense
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

/// Repeats an operation while it fails with retryable errors
///
/// One retry is allowed per configured pause; an empty pause list means a
/// single attempt.
#[derive(Debug, Clone)]
pub struct RetryHandler {
    pauses: Vec<Duration>,
    retries_done: usize,
}

impl RetryHandler {
    /// Allow `max_retries` retries with the same pause before each
    pub fn fixed(max_retries: usize, pause: Duration) -> Self {
        Self::with_intervals(vec![pause; max_retries])
    }

    /// Allow one retry per pause, waiting that pause before it
    pub fn with_intervals(pauses: Vec<Duration>) -> Self {
        Self {
            pauses,
            retries_done: 0,
        }
    }

    pub fn max_retries(&self) -> usize {
        self.pauses.len()
    }

    /// Retries performed by the last `execute_with_retry` call
    pub fn retries_done(&self) -> usize {
        self.retries_done
    }

    fn next_pause(&self) -> Option<Duration> {
        self.pauses.get(self.retries_done).copied()
    }

    /// Run `operation` until it succeeds, fails for good, or the retries run out
    ///
    /// Errors that are not retryable come back after the first attempt.
    pub fn execute_with_retry<T, E, F>(&mut self, mut operation: F, operation_name: &str) -> Result<T, E>
    where
        E: Retryable + Display,
        F: FnMut() -> Result<T, E>,
    {
        self.retries_done = 0;
        loop {
            let error = match operation() {
                Ok(value) => {
                    if self.retries_done > 0 {
                        info!("{} succeeded after {} retries", operation_name, self.retries_done);
                    }
                    return Ok(value);
                }
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => e,
            };

            let Some(pause) = self.next_pause() else {
                if self.max_retries() > 0 {
                    warn!("Giving up on {} after {} attempts: {}", operation_name, self.retries_done + 1, error);
                }
                return Err(error);
            };
            debug!("{} failed ({}), retrying in {:?}", operation_name, error, pause);
            thread::sleep(pause);
            self.retries_done += 1;
        }
    }
}
