//! Bounded retry around one detail-page visit
//!
//! A failed visit is assumed to mean renderer-level state corruption, not
//! just a network blip, so the operation passed in here must acquire a
//! fresh rendering session on every call and release it on every exit
//! path. The loop is explicit; there is no recursion and no unbounded
//! attempt count.

use crate::CardexError;
use std::future::Future;

/// How a retried visit ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T> {
    /// A record was produced and persisted
    Success(T),
    /// The page was reachable but its content failed the validity gate.
    /// Not a transient condition; never retried.
    Invalid,
    /// Every attempt errored; the record is given up for this run
    Exhausted,
}

/// Runs `op` up to `max_attempts` times
///
/// `op` receives the 1-based attempt number. An `Err` schedules another
/// attempt; `Ok(None)` means extraction-invalid and short-circuits;
/// `Ok(Some(v))` is success. Nothing escapes this function: exhaustion is
/// logged and returned as an outcome, not an error.
pub async fn with_retries<T, F, Fut>(what: &str, max_attempts: u32, mut op: F) -> RetryOutcome<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Option<T>, CardexError>>,
{
    for attempt in 1..=max_attempts {
        match op(attempt).await {
            Ok(Some(value)) => return RetryOutcome::Success(value),
            Ok(None) => return RetryOutcome::Invalid,
            Err(e) => {
                tracing::warn!(
                    "attempt {}/{} failed for {}: {}",
                    attempt,
                    max_attempts,
                    what,
                    e
                );
            }
        }
    }

    tracing::error!("giving up on {} after {} attempts", what, max_attempts);
    RetryOutcome::Exhausted
}
