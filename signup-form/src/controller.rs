//! Event wiring between the view boundary and the store.

use log::{debug, warn};
use signup_client::{NewUser, UserGateway};

use crate::field::Field;
use crate::model::SubmissionState;
use crate::store::FormStore;

/// Page-level message for any submission failure. The underlying cause goes
/// to the log, not the user.
pub const NETWORK_ERROR: &str = "Network Problems. Try again.";

/// What the view boundary produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The user typed into a field. Carries the raw input value.
    Input { field: Field, value: String },
    /// Focus left a field.
    Blur { field: Field },
    /// The submit control was activated.
    Submit,
}

/// Routes view events into the store and drives submission through the
/// gateway. The only suspension point is the gateway call itself.
pub struct Controller<G> {
    store: FormStore,
    gateway: G,
}

impl<G: UserGateway> Controller<G> {
    /// Wire a store to a gateway.
    pub fn new(store: FormStore, gateway: G) -> Self {
        Self { store, gateway }
    }

    /// The store this controller mutates.
    pub fn store(&self) -> &FormStore {
        &self.store
    }

    /// Dispatch one view event.
    pub async fn handle(&self, event: FormEvent) {
        match event {
            FormEvent::Input { field, value } => self.handle_input(field, &value),
            FormEvent::Blur { field } => self.handle_blur(field),
            FormEvent::Submit => self.handle_submit().await,
        }
    }

    /// Input values are trimmed before they enter the store.
    pub fn handle_input(&self, field: Field, raw: &str) {
        self.store.update_field(field, raw.trim());
    }

    /// Blur marks the field as touched and re-runs its validation against
    /// the value it already holds.
    pub fn handle_blur(&self, field: Field) {
        let value = self.store.value(field);
        self.store.update_field(field, &value);
    }

    /// Submit the form.
    ///
    /// A no-op unless the form is valid and no submission is in flight or
    /// already accepted -- the disabled submit control is the UI boundary,
    /// this is the programmatic one. On completion the outcome funnels back
    /// into the store; rendering onto a torn-down view is the renderer's
    /// problem, not ours.
    pub async fn handle_submit(&self) {
        if !self.can_submit() {
            debug!("submit ignored: invalid or already submitted");
            return;
        }

        self.store.update_submission(SubmissionState::Sending);
        let user = self.payload();

        match self.gateway.create_user(&user).await {
            Ok(()) => {
                debug!("signup accepted for {}", user.email);
                self.store.update_submission(SubmissionState::Sent);
            }
            Err(err) => {
                warn!("signup request failed: {err}");
                self.store
                    .update_submission(SubmissionState::Error(NETWORK_ERROR.to_string()));
            }
        }
    }

    fn can_submit(&self) -> bool {
        self.store.is_valid()
            && matches!(
                self.store.submission(),
                SubmissionState::Filling | SubmissionState::Error(_)
            )
    }

    /// The wire payload. The password confirmation stays on the form.
    fn payload(&self) -> NewUser {
        NewUser::new(
            self.store.value(Field::Name),
            self.store.value(Field::Email),
            self.store.value(Field::Password),
        )
    }
}
