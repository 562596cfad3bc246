//! Single-task event loop for the `async` feature.
//!
//! UI events and fired timers are handled one at a time, each handler running
//! to completion before the next message is read.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::controller::{EventOutcome, FormController, FormEvent};
use crate::scheduler::{ScheduledTask, TokioScheduler};

pub struct EventLoop {
    controller: FormController<TokioScheduler>,
    timers: mpsc::UnboundedReceiver<ScheduledTask>,
    shutdown: CancellationToken,
    outcomes: Option<mpsc::UnboundedSender<EventOutcome>>,
}

impl EventLoop {
    /// `timers` is the receiver returned alongside the controller's
    /// [`TokioScheduler`]. Cancelling `shutdown` stops the loop (the page went
    /// away).
    pub fn new(
        controller: FormController<TokioScheduler>,
        timers: mpsc::UnboundedReceiver<ScheduledTask>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            controller,
            timers,
            shutdown,
            outcomes: None,
        }
    }

    /// Forwards the outcome of every handled event to `tx`.
    pub fn with_outcomes(mut self, tx: mpsc::UnboundedSender<EventOutcome>) -> Self {
        self.outcomes = Some(tx);
        self
    }

    /// Runs until `events` closes or shutdown is requested, then returns the
    /// controller. Timers still pending at that point never fire.
    pub async fn run(mut self, mut events: mpsc::Receiver<FormEvent>) -> FormController<TokioScheduler> {
        loop {
            tokio::select! {
                biased;

                _ = self.shutdown.cancelled() => {
                    #[cfg(feature = "tracing")]
                    tracing::info!("event loop shutdown requested");
                    break;
                }
                Some(task) = self.timers.recv() => {
                    self.controller.fire(task);
                }
                event = events.recv() => {
                    let Some(event) = event else {
                        break;
                    };
                    let outcome = self.controller.handle(event);
                    let delivered = match &self.outcomes {
                        Some(tx) => tx.send(outcome).is_ok(),
                        None => true,
                    };
                    if !delivered {
                        #[cfg(feature = "tracing")]
                        tracing::warn!("outcome receiver dropped, no longer reporting");
                        self.outcomes = None;
                    }
                }
            }
        }

        self.controller.shutdown_scheduler();
        self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{PageOptions, signup_form};
    use crate::rules::RuleTable;
    use std::time::Duration;

    fn spawn_loop() -> (
        mpsc::Sender<FormEvent>,
        mpsc::UnboundedReceiver<EventOutcome>,
        CancellationToken,
        tokio::task::JoinHandle<FormController<TokioScheduler>>,
    ) {
        let doc = signup_form(&RuleTable::standard(), PageOptions::default()).unwrap();
        let (scheduler, timers) = TokioScheduler::new();
        let controller = FormController::with_defaults(doc, scheduler).unwrap();
        let shutdown = CancellationToken::new();
        let (events_tx, events_rx) = mpsc::channel(16);
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        let event_loop = EventLoop::new(controller, timers, shutdown.clone()).with_outcomes(outcome_tx);
        let handle = tokio::spawn(event_loop.run(events_rx));
        (events_tx, outcome_rx, shutdown, handle)
    }

    fn input(field: &str, value: &str) -> FormEvent {
        FormEvent::Input {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_reports_outcomes_in_order() {
        let (tx, mut outcomes, _shutdown, handle) = spawn_loop();

        tx.send(FormEvent::Blur("name".to_string())).await.unwrap();
        tx.send(FormEvent::Focus("nickname".to_string())).await.unwrap();
        tx.send(FormEvent::Submit).await.unwrap();

        assert_eq!(outcomes.recv().await, Some(EventOutcome::Handled));
        assert_eq!(outcomes.recv().await, Some(EventOutcome::Ignored));
        match outcomes.recv().await {
            Some(EventOutcome::Submitted(outcome)) => {
                assert!(outcome.default_prevented);
                assert_eq!(outcome.violations.len(), 5);
            }
            other => panic!("Expected submit outcome, got {:?}", other),
        }

        drop(tx);
        let controller = handle.await.unwrap();
        assert_eq!(controller.error_text("name"), Some("Name is required."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_message_cleared_after_delay() {
        let (tx, mut outcomes, _shutdown, handle) = spawn_loop();

        for event in [
            input("name", "Grace Hopper"),
            input("email", "grace@navy.mil"),
            input("password", "Cobol1959!"),
            input("phone number", "+1 (555) 010-9999"),
            input("address", "Arlington"),
            FormEvent::Submit,
        ] {
            tx.send(event).await.unwrap();
        }
        for _ in 0..6 {
            outcomes.recv().await.unwrap();
        }

        tokio::time::sleep(Duration::from_millis(3001)).await;
        drop(tx);

        let controller = handle.await.unwrap();
        assert_eq!(controller.success_text(), "");
        assert!(controller.scheduler().is_shut_down());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_drops_pending_clear() {
        let (tx, mut outcomes, shutdown, handle) = spawn_loop();

        for event in [
            input("name", "Grace Hopper"),
            input("email", "grace@navy.mil"),
            input("password", "Cobol1959!"),
            input("phone number", "5550109999"),
            input("address", "Arlington"),
            FormEvent::Submit,
        ] {
            tx.send(event).await.unwrap();
        }
        for _ in 0..6 {
            outcomes.recv().await.unwrap();
        }

        shutdown.cancel();
        let controller = handle.await.unwrap();
        assert_eq!(controller.success_text(), "Form submitted successfully!");
        assert!(controller.scheduler().is_shut_down());
    }
}
