//! Bounded fan-out/fan-in execution.
//!
//! All items are turned into futures up front and awaited together; a
//! counting semaphore caps how many are past the acquire point at once, so
//! at most `concurrency` synthesis calls are ever in flight. One item's
//! failure never cancels the rest.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// Aggregate outcome of a pool run. Successes and failures carry the index
/// of the item they belong to so callers can map them back.
#[derive(Debug, Clone)]
pub struct PoolResult<T> {
    pub successes: Vec<(usize, T)>,
    pub failures: Vec<(usize, PoolError)>,
    pub execution_time: Duration,
    pub total_processed: usize,
}

impl<T> PoolResult<T> {
    pub fn new() -> Self {
        Self {
            successes: Vec::new(),
            failures: Vec::new(),
            execution_time: Duration::ZERO,
            total_processed: 0,
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}

impl<T> Default for PoolResult<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-item failure, reduced to a message. There is no within-run retry;
/// re-running the tool with the on-disk cache intact is the retry path.
#[derive(Debug, Clone)]
pub struct PoolError {
    pub message: String,
    pub index: usize,
}

impl PoolError {
    pub fn new(msg: impl Into<String>, idx: usize) -> Self {
        Self {
            message: msg.into(),
            index: idx,
        }
    }
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item {}: {}", self.index, self.message)
    }
}

impl std::error::Error for PoolError {}

/// Runs a batch of items through an async closure with bounded concurrency.
pub struct BoundedPool {
    concurrency: usize,
}

impl BoundedPool {
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub async fn run<T, R, E, F, Fut>(&self, items: Vec<T>, per_item: F) -> PoolResult<R>
    where
        F: Fn(T) -> Fut,
        Fut: std::future::Future<Output = std::result::Result<R, E>>,
        E: std::fmt::Display,
    {
        let start = Instant::now();
        let total = items.len();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let per_item = &per_item;

        let tasks = items.into_iter().enumerate().map(|(i, item)| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                // Never closed within this function, so acquire cannot fail.
                let _permit = semaphore.acquire().await.expect("semaphore closed");
                (i, per_item(item).await)
            }
        });
        let settled = futures::future::join_all(tasks).await;

        let mut result = PoolResult::new();
        for (i, outcome) in settled {
            match outcome {
                Ok(r) => result.successes.push((i, r)),
                Err(e) => result.failures.push((i, PoolError::new(e.to_string(), i))),
            }
        }
        result.successes.sort_by_key(|(i, _)| *i);
        result.failures.sort_by_key(|(i, _)| *i);
        result.execution_time = start.elapsed();
        result.total_processed = total;
        result
    }
}
