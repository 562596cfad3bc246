//! Signup form validation library
//!
//! This library attaches field rules to a form, gives live feedback while the
//! user types, and shows a password strength indicator.
//!
//! # Features
//!
//! - `async` (default): Enables the tokio event loop and timer-backed scheduler
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `FORM_SUCCESS_CLEAR_MS`: How long the success message stays visible
//!   (default: `3000`)
//!
//! # Example
//!
//! ```rust
//! use form_guard::{
//!     FormController, FormEvent, ManualScheduler, PageOptions, RuleTable, signup_form,
//! };
//! use std::time::Duration;
//!
//! let page = signup_form(&RuleTable::standard(), PageOptions::default())
//!     .expect("Failed to build page");
//! let mut form = FormController::with_defaults(page, ManualScheduler::new())
//!     .expect("Page is missing form elements");
//!
//! form.handle(FormEvent::Input {
//!     field: "password".into(),
//!     value: "Abc123".into(),
//! });
//! assert_eq!(form.strength_text(), "Strength: Medium");
//!
//! let outcome = form.on_submit();
//! assert!(outcome.default_prevented);
//! assert_eq!(form.error_text("name"), Some("Name is required."));
//!
//! form.advance(Duration::from_secs(3));
//! ```

// Internal modules
mod config;
mod controller;
mod dom;
mod page;
mod predicates;
mod rules;
mod scheduler;
mod strength;
mod widgets;

#[cfg(feature = "async")]
mod event_loop;

// Public API
pub use config::{ConfigError, FormConfig};
pub use controller::{
    EventOutcome, FormController, FormEvent, INVALID_CLASS, SetupError, SubmitOutcome,
};
pub use dom::{Document, DomError, NodeId};
pub use page::{FORM_SUCCESS_ID, PageOptions, signup_form};
pub use predicates::Predicate;
pub use rules::{RuleTable, RuleViolation, ValidationRule, slug};
pub use scheduler::{DeferredAction, ManualScheduler, ScheduledTask, Scheduler, TaskId};
pub use strength::{MAX_SCORE, StrengthLabel, StrengthResult, evaluate_strength, strength_score};
pub use widgets::StrengthWidgets;

#[cfg(feature = "async")]
pub use event_loop::EventLoop;

#[cfg(feature = "async")]
pub use scheduler::TokioScheduler;
