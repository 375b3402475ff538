//! Observable form store.

use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use formwork::Observers;
use log::{debug, warn};

use crate::field::Field;
use crate::model::{Change, FormState, SubmissionState};
use crate::schema::SignupSchema;

/// The single source of truth for one form mount.
///
/// Cheap to clone (shared interior) so it can cross the submit `await`.
/// Every leaf mutation emits one [`Change`] to all subscribers, inline and
/// in mutation order, before the mutating call returns. Subscribers must
/// not call back into the store.
///
/// # Example
///
/// ```
/// use signup_form::{Field, FormStore, signup_schema};
///
/// let store = FormStore::new(signup_schema());
/// store.subscribe(|change| println!("{change:?}"));
/// store.update_field(Field::Email, "support@hexlet.io");
/// ```
#[derive(Clone)]
pub struct FormStore {
    state: Arc<RwLock<FormState>>,
    observers: Arc<Mutex<Observers<Change>>>,
    schema: Arc<SignupSchema>,
}

impl FormStore {
    /// Create a store with pristine state.
    pub fn new(schema: SignupSchema) -> Self {
        Self {
            state: Arc::new(RwLock::new(FormState::default())),
            observers: Arc::new(Mutex::new(Observers::new())),
            schema: Arc::new(schema),
        }
    }

    /// Register a change observer. Observers fire in registration order.
    pub fn subscribe(&self, callback: impl FnMut(&Change) + Send + 'static) {
        self.observers_lock().subscribe(callback);
    }

    /// Set a field's value and run the full update pipeline: mark touched,
    /// clear then recompute the field's error, revalidate the password
    /// confirmation on password edits, refresh validity, and drop a failed
    /// submission back to `Filling`.
    ///
    /// Violations never surface as errors to the caller; they land in the
    /// state's error map.
    pub fn update_field(&self, field: Field, value: &str) {
        if self.submission().is_terminal() {
            debug!("ignoring edit of {field}: form already submitted");
            return;
        }

        self.write_value(field, value);
        self.mark_touched(field);
        self.clear_error(field);
        self.apply_validation(field);
        if field == Field::Password {
            self.revalidate_confirmation();
        }
        self.leave_error_state();
        self.refresh_validity();
    }

    /// Advance the submission lifecycle.
    ///
    /// Transitions outside the state machine (anything out of `Sent`,
    /// skipping `Sending`, ...) are ignored with a warning.
    pub fn update_submission(&self, next: SubmissionState) {
        let applied = {
            let mut state = self.state_write();
            if transition_allowed(&state.submission, &next) {
                Some(std::mem::replace(&mut state.submission, next.clone()))
            } else {
                None
            }
        };

        match applied {
            Some(previous) => {
                debug!("submission: {previous:?} -> {next:?}");
                self.emit(Change::Submission {
                    state: next,
                    previous,
                });
            }
            None => warn!("ignoring submission transition to {next:?}"),
        }
    }

    /// Current value of a field.
    pub fn value(&self, field: Field) -> String {
        self.state_read().fields.get(field).clone()
    }

    /// Current error of a field, if any.
    pub fn error(&self, field: Field) -> Option<String> {
        self.state_read().errors.get(field).clone()
    }

    /// Whether the field has received an input or blur interaction.
    pub fn touched(&self, field: Field) -> bool {
        *self.state_read().touched.get(field)
    }

    /// Whether every field is non-empty and error-free.
    pub fn is_valid(&self) -> bool {
        self.state_read().is_valid
    }

    /// Where the submission lifecycle stands.
    pub fn submission(&self) -> SubmissionState {
        self.state_read().submission.clone()
    }

    /// A cloned snapshot of the full state.
    pub fn snapshot(&self) -> FormState {
        self.state_read().clone()
    }

    // -------------------------------------------------------------------------
    // Update pipeline steps. Each one mutates a single leaf, releases the
    // lock, then emits -- observers see every mutation already applied when
    // their notification for it arrives.
    // -------------------------------------------------------------------------

    fn write_value(&self, field: Field, value: &str) {
        let previous = {
            let mut state = self.state_write();
            let slot = state.fields.get_mut(field);
            if slot == value {
                return;
            }
            std::mem::replace(slot, value.to_string())
        };
        self.emit(Change::Field {
            field,
            value: value.to_string(),
            previous,
        });
    }

    fn mark_touched(&self, field: Field) {
        {
            let mut state = self.state_write();
            let slot = state.touched.get_mut(field);
            if *slot {
                return;
            }
            *slot = true;
        }
        self.emit(Change::Touched { field });
    }

    fn clear_error(&self, field: Field) {
        let previous = self.state_write().errors.get_mut(field).take();
        if let Some(previous) = previous {
            self.emit(Change::Error {
                field,
                message: None,
                previous: Some(previous),
            });
        }
    }

    fn set_error(&self, field: Field, message: String) {
        let previous = {
            let mut state = self.state_write();
            let slot = state.errors.get_mut(field);
            if slot.as_deref() == Some(message.as_str()) {
                return;
            }
            std::mem::replace(slot, Some(message.clone()))
        };
        self.emit(Change::Error {
            field,
            message: Some(message),
            previous,
        });
    }

    fn apply_validation(&self, field: Field) {
        let head = {
            let state = self.state_read();
            self.schema.first_violation(field, &state.fields)
        };
        if let Some(message) = head {
            self.set_error(field, message);
        }
    }

    /// Cross-field dependency: a password edit re-judges the confirmation,
    /// but only once the user has engaged with the confirmation field.
    fn revalidate_confirmation(&self) {
        let (engaged, head) = {
            let state = self.state_read();
            let confirmation = state.fields.get(Field::PasswordConfirmation);
            let engaged =
                *state.touched.get(Field::PasswordConfirmation) || !confirmation.is_empty();
            let head = engaged
                .then(|| {
                    self.schema
                        .first_violation(Field::PasswordConfirmation, &state.fields)
                })
                .flatten();
            (engaged, head)
        };

        if !engaged {
            return;
        }
        match head {
            Some(message) => self.set_error(Field::PasswordConfirmation, message),
            None => self.clear_error(Field::PasswordConfirmation),
        }
    }

    /// `Error -> Filling` happens implicitly on the next edit.
    fn leave_error_state(&self) {
        let previous = {
            let mut state = self.state_write();
            if matches!(state.submission, SubmissionState::Error(_)) {
                Some(std::mem::replace(
                    &mut state.submission,
                    SubmissionState::Filling,
                ))
            } else {
                None
            }
        };
        if let Some(previous) = previous {
            self.emit(Change::Submission {
                state: SubmissionState::Filling,
                previous,
            });
        }
    }

    fn refresh_validity(&self) {
        let flipped = {
            let mut state = self.state_write();
            let next = state.compute_validity();
            if next == state.is_valid {
                None
            } else {
                state.is_valid = next;
                Some(next)
            }
        };
        if let Some(is_valid) = flipped {
            self.emit(Change::Validity { is_valid });
        }
    }

    fn emit(&self, change: Change) {
        self.observers_lock().emit(&change);
    }

    fn state_read(&self) -> RwLockReadGuard<'_, FormState> {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn state_write(&self) -> RwLockWriteGuard<'_, FormState> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn observers_lock(&self) -> MutexGuard<'_, Observers<Change>> {
        self.observers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// The submission state machine. `Sent` is terminal.
fn transition_allowed(current: &SubmissionState, next: &SubmissionState) -> bool {
    use SubmissionState::*;
    matches!(
        (current, next),
        (Filling, Sending)
            | (Error(_), Sending)
            | (Error(_), Filling)
            | (Sending, Sent)
            | (Sending, Error(_))
    )
}
