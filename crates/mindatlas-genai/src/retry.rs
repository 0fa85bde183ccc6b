//! Exponential-backoff retry for transport-level failures.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

pub(crate) const MAX_ATTEMPTS: u32 = 3;
pub(crate) const INITIAL_BACKOFF: Duration = Duration::from_secs(2);

/// Run `op` up to `max_attempts` times, sleeping `initial`, `2*initial`, ...
/// between attempts. Only errors accepted by `is_transient` are retried;
/// anything else (and the final transient failure) is returned as-is.
pub(crate) async fn with_backoff<T, E, F, Fut>(
    max_attempts: u32,
    initial: Duration,
    is_transient: impl Fn(&E) -> bool,
    mut op: F,
) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut backoff = initial;
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts && is_transient(&e) => {
                warn!(attempt, "transient failure, retrying in {:?}: {}", backoff, e);
                tokio::time::sleep(backoff).await;
                backoff *= 2;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
