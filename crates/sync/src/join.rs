//! Aggregation join: enrich each row of a primary collection with one
//! secondary lookup.
//!
//! All lookups run concurrently and the join waits for every one of them.
//! The output has exactly one entry per input, in input order. A single
//! failed lookup fails the whole join; no partial output is produced.

use std::fmt::Display;
use std::future::Future;

use futures::future;

#[derive(Debug, thiserror::Error)]
pub enum JoinError {
    #[error("{failed} of {total} lookups failed")]
    Aggregate { failed: usize, total: usize },
}

/// Pair every item of `primary` with the result of `lookup(item)`.
///
/// Empty input returns immediately without calling `lookup`.
pub async fn enrich<P, S, E, F, Fut>(primary: Vec<P>, lookup: F) -> Result<Vec<(P, S)>, JoinError>
where
    F: Fn(&P) -> Fut,
    Fut: Future<Output = Result<S, E>>,
    E: Display,
{
    if primary.is_empty() {
        return Ok(Vec::new());
    }

    let total = primary.len();
    let results = future::join_all(primary.iter().map(&lookup)).await;

    let mut secondary = Vec::with_capacity(total);
    let mut failed = 0;
    for result in results {
        match result {
            Ok(value) => secondary.push(value),
            Err(e) => {
                failed += 1;
                tracing::debug!(error = %e, "Join lookup failed");
            }
        }
    }

    if failed > 0 {
        tracing::warn!(failed, total, "Aggregation join failed");
        return Err(JoinError::Aggregate { failed, total });
    }

    Ok(primary.into_iter().zip(secondary).collect())
}
