//! Deferred actions.
//!
//! The controller never sleeps: it hands one-shot actions to a [`Scheduler`]
//! and is told when they are due. [`ManualScheduler`] runs on a virtual clock
//! for deterministic use; `TokioScheduler` (feature `async`) uses real timers.

use std::time::Duration;

/// Identifier of a scheduled task. Strictly increasing per scheduler,
/// starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Empty the `#form-success` text.
    ClearSuccessMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub action: DeferredAction,
}

/// Accepts fire-and-forget actions. There is no cancellation; a task that is
/// never delivered (host gone) is simply lost.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, action: DeferredAction) -> TaskId;
}

#[derive(Debug, Default)]
struct TaskIds {
    last: u64,
}

impl TaskIds {
    fn next(&mut self) -> TaskId {
        self.last += 1;
        TaskId(self.last)
    }
}

/// Virtual-clock scheduler. Time only moves through [`ManualScheduler::advance`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    ids: TaskIds,
    now: Duration,
    pending: Vec<(Duration, ScheduledTask)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Moves the clock forward and returns the tasks that came due, ordered by
    /// due time and then by id.
    pub fn advance(&mut self, by: Duration) -> Vec<ScheduledTask> {
        self.now += by;
        let now = self.now;
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|(at, _)| *at <= now);
        self.pending = rest;
        due.sort_by_key(|(at, task)| (*at, task.id));
        due.into_iter().map(|(_, task)| task).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, action: DeferredAction) -> TaskId {
        let id = self.ids.next();
        self.pending
            .push((self.now + delay, ScheduledTask { id, action }));
        id
    }
}

#[cfg(feature = "async")]
pub use tokio_scheduler::TokioScheduler;

#[cfg(feature = "async")]
mod tokio_scheduler {
    use super::*;
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    /// Timer-backed scheduler. Each task sleeps on its own tokio task and is
    /// delivered through the channel returned by [`TokioScheduler::new`].
    ///
    /// `schedule` must be called from within a tokio runtime.
    #[derive(Debug)]
    pub struct TokioScheduler {
        ids: TaskIds,
        tx: mpsc::UnboundedSender<ScheduledTask>,
        token: CancellationToken,
    }

    impl TokioScheduler {
        pub fn new() -> (Self, mpsc::UnboundedReceiver<ScheduledTask>) {
            let (tx, rx) = mpsc::unbounded_channel();
            let scheduler = Self {
                ids: TaskIds::default(),
                tx,
                token: CancellationToken::new(),
            };
            (scheduler, rx)
        }

        /// Drops every timer that has not fired yet. Later schedules are
        /// dropped immediately.
        pub fn shutdown(&self) {
            #[cfg(feature = "tracing")]
            tracing::debug!("scheduler shut down, pending timers dropped");
            self.token.cancel();
        }

        pub fn is_shut_down(&self) -> bool {
            self.token.is_cancelled()
        }
    }

    impl Scheduler for TokioScheduler {
        fn schedule(&mut self, delay: Duration, action: DeferredAction) -> TaskId {
            let id = self.ids.next();
            let task = ScheduledTask { id, action };
            let tx = self.tx.clone();
            let token = self.token.clone();

            tokio::spawn(async move {
                tokio::select! {
                    _ = token.cancelled() => {}
                    _ = tokio::time::sleep(delay) => {
                        if let Err(e) = tx.send(task) {
                            #[cfg(feature = "tracing")]
                            tracing::warn!("Failed to deliver scheduled task {:?}: {}", e.0.id, e);
                        }
                    }
                }
            });

            id
        }
    }

}
