use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{GeneticError, Result, TaskFailure};

/// The result of one finished task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub sequence: usize,
    pub outcome: std::result::Result<(), String>,
}

/// Summary of a task group that drained without failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub completed: usize,
}

enum Message {
    Finished(Completion),
    /// A task finished while the group believed nothing was outstanding.
    CounterUnderflow(usize),
}

/// Completion barrier for one batch of tasks.
///
/// Every submitted task reports into the group's bounded channel exactly once, whether
/// it succeeded, returned an error, or panicked. [`TaskGroup::wait`] consumes exactly as
/// many messages as tasks were submitted. A group is tied to the
/// [`TaskScope`](super::TaskScope) that created it and cannot outlive it, so it is always
/// drained while its tasks can still run.
pub struct TaskGroup<'s> {
    sender: SyncSender<Message>,
    receiver: Receiver<Message>,
    submitted: usize,
    outstanding: Arc<AtomicUsize>,
    _scope: PhantomData<&'s ()>,
}

impl<'s> TaskGroup<'s> {
    pub(super) fn new(capacity: usize) -> Self {
        let (sender, receiver) = sync_channel(capacity.max(1));
        Self {
            sender,
            receiver,
            submitted: 0,
            outstanding: Arc::new(AtomicUsize::new(0)),
            _scope: PhantomData,
        }
    }

    /// Number of tasks submitted so far.
    pub fn submitted(&self) -> usize {
        self.submitted
    }

    /// Number of submitted tasks that have not finished yet.
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    pub(super) fn register(&mut self) -> CompletionHandle {
        let sequence = self.submitted;
        self.submitted += 1;
        self.outstanding.fetch_add(1, Ordering::AcqRel);

        CompletionHandle {
            sequence,
            sender: self.sender.clone(),
            outstanding: Arc::clone(&self.outstanding),
        }
    }

    /// Blocks until every submitted task has finished.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Evaluation`] listing every failed task, ordered by
    /// sequence number. The error is only returned once the whole group has drained.
    ///
    /// # Panics
    ///
    /// Panics if the group's bookkeeping is inconsistent, which can only be caused by a
    /// bug in the engine.
    pub fn wait(self) -> Result<BatchReport> {
        let TaskGroup {
            sender,
            receiver,
            submitted,
            outstanding,
            ..
        } = self;
        // Only the task handles keep the channel open from here on.
        drop(sender);

        let mut failures = Vec::new();
        for received in 0..submitted {
            match receiver.recv() {
                Ok(Message::Finished(completion)) => {
                    if let Err(message) = completion.outcome {
                        warn!(sequence = completion.sequence, %message, "task failed");
                        failures.push(TaskFailure {
                            sequence: completion.sequence,
                            message,
                        });
                    }
                }
                Ok(Message::CounterUnderflow(sequence)) => {
                    panic!("task group counter went negative when task #{sequence} finished")
                }
                Err(_) => panic!(
                    "task group channel closed after {received} of {submitted} completions"
                ),
            }
        }

        let remaining = outstanding.load(Ordering::Acquire);
        assert_eq!(
            remaining, 0,
            "task group drained with {remaining} tasks still outstanding"
        );

        debug!(submitted, failed = failures.len(), "task group drained");

        if failures.is_empty() {
            Ok(BatchReport {
                completed: submitted,
            })
        } else {
            failures.sort_by_key(|f| f.sequence);
            Err(GeneticError::Evaluation { failures })
        }
    }
}

/// Reports one task's completion back to its group.
pub(super) struct CompletionHandle {
    sequence: usize,
    sender: SyncSender<Message>,
    outstanding: Arc<AtomicUsize>,
}

impl CompletionHandle {
    pub(super) fn sequence(&self) -> usize {
        self.sequence
    }

    pub(super) fn complete(self, outcome: std::result::Result<(), String>) {
        let previous = self.outstanding.fetch_sub(1, Ordering::AcqRel);
        let message = if previous == 0 {
            Message::CounterUnderflow(self.sequence)
        } else {
            Message::Finished(Completion {
                sequence: self.sequence,
                outcome,
            })
        };
        // The receiver only goes away once the waiter has everything it asked for.
        let _ = self.sender.send(message);
    }
}
