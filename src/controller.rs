//! Form controller - wires the rule table and strength indicator to the page.

use secrecy::SecretString;
use std::time::Duration;
use thiserror::Error;

use crate::config::FormConfig;
use crate::dom::{Document, DomError, NodeId};
use crate::page::FORM_SUCCESS_ID;
use crate::rules::{RuleTable, RuleViolation, ValidationRule};
use crate::scheduler::{DeferredAction, ManualScheduler, ScheduledTask, Scheduler, TaskId};
use crate::strength::evaluate_strength;
use crate::widgets::StrengthWidgets;

pub const INVALID_CLASS: &str = "invalid";
pub const EMAIL_FIELD: &str = "email";
pub const PASSWORD_FIELD: &str = "password";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SetupError {
    #[error("required element #{0} not found in document")]
    MissingElement(String),
    #[error("no <form> element found in document")]
    MissingForm,
    #[error("failed to attach strength indicator: {0}")]
    Dom(#[from] DomError),
}

/// A user interaction, already dispatched to a field by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Focus(String),
    Blur(String),
    /// The field's value changed to `value`.
    Input { field: String, value: String },
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Handled,
    /// No listener for this field.
    Ignored,
    Submitted(SubmitOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Native submission is always suppressed.
    pub default_prevented: bool,
    /// Failing rules, in table order.
    pub violations: Vec<RuleViolation>,
    /// The success-message clear, when the submit was accepted.
    pub scheduled: Option<TaskId>,
}

impl SubmitOutcome {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct FieldBinding {
    input: NodeId,
    error: NodeId,
}

#[derive(Debug)]
pub struct FormController<S> {
    doc: Document,
    rules: RuleTable,
    bindings: Vec<FieldBinding>,
    form: NodeId,
    success: NodeId,
    widgets: StrengthWidgets,
    config: FormConfig,
    scheduler: S,
}

fn require(doc: &Document, id: &str) -> Result<NodeId, SetupError> {
    doc.get_element_by_id(id)
        .ok_or_else(|| SetupError::MissingElement(id.to_string()))
}

impl<S: Scheduler> FormController<S> {
    /// Resolves every element the rules and indicator need and attaches the
    /// strength indicator.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if an input, its `{slug}-error` node,
    /// `#form-success`, `#password-error` or the `form` is missing.
    pub fn new(
        mut doc: Document,
        rules: RuleTable,
        config: FormConfig,
        scheduler: S,
    ) -> Result<Self, SetupError> {
        let bindings = rules
            .iter()
            .map(|rule| {
                Ok(FieldBinding {
                    input: require(&doc, rule.field_id())?,
                    error: require(&doc, &rule.error_id())?,
                })
            })
            .collect::<Result<Vec<_>, SetupError>>()?;
        let form = doc.first_by_tag("form").ok_or(SetupError::MissingForm)?;
        let success = require(&doc, FORM_SUCCESS_ID)?;
        let password_error = require(&doc, "password-error")?;
        let widgets = StrengthWidgets::ensure(&mut doc, password_error)?;

        #[cfg(feature = "tracing")]
        tracing::info!("form controller ready: {} rules bound", bindings.len());

        Ok(Self {
            doc,
            rules,
            bindings,
            form,
            success,
            widgets,
            config,
            scheduler,
        })
    }

    /// Standard rules and default configuration.
    pub fn with_defaults(doc: Document, scheduler: S) -> Result<Self, SetupError> {
        Self::new(doc, RuleTable::standard(), FormConfig::default(), scheduler)
    }

    pub fn handle(&mut self, event: FormEvent) -> EventOutcome {
        match event {
            FormEvent::Focus(field) => self.on_focus(&field),
            FormEvent::Blur(field) => self.on_blur(&field),
            FormEvent::Input { field, value } => self.on_input(&field, &value),
            FormEvent::Submit => EventOutcome::Submitted(self.on_submit()),
        }
    }

    /// Hides the field's error while it is being edited, valid or not.
    pub fn on_focus(&mut self, field: &str) -> EventOutcome {
        let Some((_, binding)) = self.lookup(field) else {
            return self.ignored(field);
        };
        self.mark_valid(binding);
        EventOutcome::Handled
    }

    pub fn on_blur(&mut self, field: &str) -> EventOutcome {
        let Some((rule, binding)) = self.lookup(field) else {
            return self.ignored(field);
        };
        let result = rule.check(self.doc.value(binding.input));
        self.apply(binding, result);
        EventOutcome::Handled
    }

    /// Stores the new value, then runs the live feedback for email and
    /// password. Other fields only update on blur or submit.
    pub fn on_input(&mut self, field: &str, value: &str) -> EventOutcome {
        let Some((rule, binding)) = self.lookup(field) else {
            return self.ignored(field);
        };
        self.doc.set_value(binding.input, value);

        match field {
            EMAIL_FIELD => {
                if value.is_empty() {
                    self.mark_valid(binding);
                } else {
                    let result = rule.check(value);
                    self.apply(binding, result);
                }
            }
            PASSWORD_FIELD => {
                let password = SecretString::new(value.to_string().into());
                let strength = evaluate_strength(&password);
                self.widgets.render(&mut self.doc, strength.as_ref());
            }
            _ => {}
        }
        EventOutcome::Handled
    }

    /// Re-checks every rule. Native submission is always prevented.
    pub fn on_submit(&mut self) -> SubmitOutcome {
        let results: Vec<_> = self
            .rules
            .iter()
            .zip(self.bindings.iter().copied())
            .map(|(rule, binding)| (binding, rule.check(self.doc.value(binding.input))))
            .collect();

        let mut violations = Vec::new();
        for (binding, result) in results {
            if let Err(violation) = &result {
                violations.push(violation.clone());
            }
            self.apply(binding, result);
        }

        if !violations.is_empty() {
            self.doc.set_text(self.success, "");

            #[cfg(feature = "tracing")]
            tracing::debug!("submit rejected: {} invalid fields", violations.len());

            return SubmitOutcome {
                default_prevented: true,
                violations,
                scheduled: None,
            };
        }

        self.doc.set_text(self.success, &self.config.success_message);
        self.doc.reset_form(self.form);
        self.widgets.clear(&mut self.doc);
        let id = self.scheduler.schedule(
            self.config.success_clear_delay,
            DeferredAction::ClearSuccessMessage,
        );

        #[cfg(feature = "tracing")]
        tracing::info!("submit accepted, success message clear scheduled as {:?}", id);

        SubmitOutcome {
            default_prevented: true,
            violations,
            scheduled: Some(id),
        }
    }

    /// Runs a deferred action that has come due.
    pub fn fire(&mut self, task: ScheduledTask) {
        #[cfg(feature = "tracing")]
        tracing::debug!("running scheduled task {:?}", task.id);

        match task.action {
            DeferredAction::ClearSuccessMessage => self.doc.set_text(self.success, ""),
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn widgets(&self) -> &StrengthWidgets {
        &self.widgets
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.lookup(field).map(|(_, b)| self.doc.value(b.input))
    }

    pub fn error_text(&self, field: &str) -> Option<&str> {
        self.lookup(field).map(|(_, b)| self.doc.text(b.error))
    }

    pub fn is_marked_invalid(&self, field: &str) -> bool {
        self.lookup(field)
            .is_some_and(|(_, b)| self.doc.has_class(b.input, INVALID_CLASS))
    }

    pub fn success_text(&self) -> &str {
        self.doc.text(self.success)
    }

    pub fn strength_text(&self) -> &str {
        self.doc.text(self.widgets.text())
    }

    fn lookup(&self, field: &str) -> Option<(ValidationRule, FieldBinding)> {
        self.rules
            .iter()
            .zip(self.bindings.iter().copied())
            .find(|(rule, _)| rule.field_id() == field)
            .map(|(rule, binding)| (*rule, binding))
    }

    fn apply(&mut self, binding: FieldBinding, result: Result<(), RuleViolation>) {
        match result {
            Ok(()) => self.mark_valid(binding),
            Err(violation) => {
                self.doc.set_text(binding.error, violation.message);
                self.doc.add_class(binding.input, INVALID_CLASS);
            }
        }
    }

    fn mark_valid(&mut self, binding: FieldBinding) {
        self.doc.set_text(binding.error, "");
        self.doc.remove_class(binding.input, INVALID_CLASS);
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn ignored(&self, field: &str) -> EventOutcome {
        #[cfg(feature = "tracing")]
        tracing::warn!("no listener for field {:?}", field);
        EventOutcome::Ignored
    }
}

impl FormController<ManualScheduler> {
    /// Advances the virtual clock and fires whatever came due. Returns the
    /// number of tasks run.
    pub fn advance(&mut self, by: Duration) -> usize {
        let due = self.scheduler.advance(by);
        let count = due.len();
        for task in due {
            self.fire(task);
        }
        count
    }
}

#[cfg(feature = "async")]
impl FormController<crate::scheduler::TokioScheduler> {
    pub(crate) fn shutdown_scheduler(&self) {
        self.scheduler.shutdown();
    }
}
