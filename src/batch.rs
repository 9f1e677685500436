//! Parallel batch processing over independent scans.

use rayon::prelude::*;

use crate::error::Result;

/// Applies a fallible per-scan operation to every item in parallel.
///
/// Results come back in input order. A failure on one item never aborts
/// the rest; each failure is reported through `tracing` and returned in
/// place so the driver can decide to skip or abort.
pub fn process_batch<T, U, F>(items: &[T], op: F) -> Vec<Result<U>>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> Result<U> + Sync,
{
    items
        .par_iter()
        .map(|item| {
            let outcome = op(item);
            if let Err(err) = &outcome {
                tracing::warn!(%err, "scan failed, continuing batch");
            }
            outcome
        })
        .collect()
}
