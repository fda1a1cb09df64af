use std::fmt::Display;
use std::future::Future;

use crate::error::Result;

/// Awaits an optional sub-fetch, degrading any failure to `T::default()`.
///
/// A `NotFound` is an expected absence (no README, empty repository) and is
/// only logged at debug level; anything else is a warning.
pub async fn best_effort<T, F, D>(what: D, fetch: F) -> T
where
    T: Default,
    F: Future<Output = Result<T>>,
    D: Display,
{
    match fetch.await {
        Ok(value) => value,
        Err(e) if e.is_not_found() => {
            tracing::debug!("{} not available: {}", what, e);
            T::default()
        }
        Err(e) => {
            tracing::warn!("Failed to fetch {}: {}", what, e);
            T::default()
        }
    }
}
