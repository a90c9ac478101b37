use std::future::Future;
use std::time::Duration;

const SERVICE_UNAVAILABLE: u16 = 503;

/// Why a single upstream attempt failed.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum AttemptError {
    /// Timeout, DNS failure, refused connection and similar transport errors.
    #[error("connection failed: {0}")]
    Connection(String),
    /// Any other transport failure: bad URL, redirect loop, unreadable body.
    #[error("request failed: {0}")]
    Request(String),
    #[error("upstream responded with HTTP {status}")]
    Status { status: u16, body: String },
}

impl AttemptError {
    pub fn is_transient(&self) -> bool {
        match self {
            AttemptError::Connection(_) => true,
            AttemptError::Request(_) => false,
            AttemptError::Status { status, .. } => *status == SERVICE_UNAVAILABLE,
        }
    }
}

/// Default predicate: retry connection failures and 503s, nothing else.
pub fn retry_transient(error: &AttemptError, _attempt: u32) -> bool {
    error.is_transient()
}

/// Fixed-delay retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts made after the first one.
    pub max_retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Runs `op` until it succeeds, the cap is reached, or `should_retry`
    /// declines. `op` and `should_retry` both receive the 1-based attempt
    /// number. The last error is returned when giving up.
    pub async fn run<T, E, Op, Fut, P>(&self, mut op: Op, should_retry: P) -> Result<T, E>
    where
        Op: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E, u32) -> bool,
    {
        let total = self.total_attempts();
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < total && should_retry(&e, attempt) => {
                    tokio::time::sleep(self.delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(1))
    }
}
