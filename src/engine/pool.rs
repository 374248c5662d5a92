use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use super::group::{BatchReport, TaskGroup};
use crate::error::{GeneticError, Result};

/// A fixed-size pool of worker threads.
///
/// Work is submitted inside a [`WorkerPool::scope`], which runs on the calling thread:
/// the caller never takes a worker slot while it waits, and tasks may borrow anything
/// that outlives the scope.
#[derive(Debug)]
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    threads: usize,
}

impl WorkerPool {
    /// Starts a pool of `threads` workers.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Configuration`] if `threads` is zero or the threads
    /// cannot be spawned.
    pub fn new(threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(GeneticError::Configuration(
                "Worker pool needs at least one thread".to_string(),
            ));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("genswarm-worker-{}", i))
            .build()
            .map_err(|e| {
                GeneticError::Configuration(format!("Failed to start worker pool: {}", e))
            })?;

        debug!(threads, "worker pool started");
        Ok(Self { pool, threads })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Opens a task scope. Every task submitted through it has finished when this
    /// returns.
    pub fn scope<'scope, OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce(&TaskScope<'_, 'scope>) -> R,
    {
        let capacity = self.threads;
        self.pool
            .in_place_scope(|inner| op(&TaskScope { inner, capacity }))
    }

    /// Submits every task under one group and waits for the group to drain.
    pub fn run_batch<'scope, I, F>(&self, tasks: I) -> Result<BatchReport>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce() -> Result<()> + Send + 'scope,
    {
        self.scope(|scope| {
            let mut group = scope.group();
            for task in tasks {
                scope.submit(&mut group, task);
            }
            scope.wait_for_group(group)
        })
    }
}

/// Handle for submitting tasks within a [`WorkerPool::scope`].
pub struct TaskScope<'s, 'scope> {
    inner: &'s rayon::Scope<'scope>,
    capacity: usize,
}

impl<'s, 'scope> TaskScope<'s, 'scope> {
    /// Creates an empty task group.
    ///
    /// The group's completion channel holds one message per worker. When several groups
    /// are filled in one scope, a group with more tasks than that must be waited on
    /// before work queued behind it can be relied on to finish.
    pub fn group(&self) -> TaskGroup<'_> {
        TaskGroup::new(self.capacity)
    }

    /// Queues `task` for execution on the pool and returns its sequence number.
    ///
    /// Returns immediately. The task's error, or its panic, is recorded in `group`
    /// and never reaches the worker thread.
    pub fn submit<F>(&self, group: &mut TaskGroup<'_>, task: F) -> usize
    where
        F: FnOnce() -> Result<()> + Send + 'scope,
    {
        let handle = group.register();
        let sequence = handle.sequence();

        self.inner.spawn(move |_| {
            let outcome = match panic::catch_unwind(AssertUnwindSafe(task)) {
                Ok(Ok(())) => Ok(()),
                Ok(Err(err)) => Err(err.to_string()),
                Err(payload) => Err(panic_message(payload.as_ref())),
            };
            handle.complete(outcome);
        });

        sequence
    }

    /// Blocks until every task of `group` has finished. See [`TaskGroup::wait`].
    pub fn wait_for_group(&self, group: TaskGroup<'_>) -> Result<BatchReport> {
        group.wait()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("task panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("task panicked: {}", message)
    } else {
        "task panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_zero_threads_is_rejected() {
        assert!(matches!(
            WorkerPool::new(0),
            Err(GeneticError::Configuration(_))
        ));
    }

    #[test]
    fn test_empty_group_returns_immediately() {
        let pool = WorkerPool::new(2).unwrap();
        let report = pool.scope(|scope| {
            let group = scope.group();
            scope.wait_for_group(group)
        });

        assert_eq!(report.unwrap().completed, 0);
    }

    #[test]
    fn test_sequence_numbers_follow_submission_order() {
        let pool = WorkerPool::new(2).unwrap();
        let sequences = pool.scope(|scope| {
            let mut group = scope.group();
            let mut sequences = Vec::new();
            for _ in 0..4 {
                sequences.push(scope.submit(&mut group, || Ok(())));
            }
            scope.wait_for_group(group).unwrap();
            sequences
        });

        assert_eq!(sequences, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_panic_is_contained() {
        let pool = WorkerPool::new(1).unwrap();
        let count = AtomicUsize::new(0);
        let counter = &count;

        let result = pool.scope(|scope| {
            let mut group = scope.group();
            scope.submit(&mut group, || panic!("bad individual"));
            for _ in 0..3 {
                scope.submit(&mut group, move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                });
            }
            scope.wait_for_group(group)
        });

        match result {
            Err(GeneticError::Evaluation { failures }) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].sequence, 0);
                assert!(failures[0].message.contains("bad individual"));
            }
            _ => panic!("Expected Evaluation error"),
        }
        assert_eq!(counter.load(Ordering::SeqCst), 3);

        // The single worker survived the panic.
        assert!(pool.run_batch(vec![|| -> Result<()> { Ok(()) }]).is_ok());
    }

    #[test]
    fn test_panic_message_variants() {
        assert_eq!(panic_message(&"static"), "task panicked: static");
        assert_eq!(
            panic_message(&String::from("owned")),
            "task panicked: owned"
        );
        assert_eq!(panic_message(&42_u8), "task panicked");
    }
}
