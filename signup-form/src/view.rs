//! View capability trait and the change renderer.

use log::trace;

use crate::field::Field;
use crate::model::{Change, SubmissionState};
use crate::store::FormStore;

/// Terminal message shown when the signup completes.
pub const USER_CREATED: &str = "User Created";

/// The surface the renderer needs from the host view tree.
///
/// Implementations map these calls onto real widgets or DOM nodes; tests use
/// a recording fake. Error operations are idempotent: applying the same
/// state twice must not duplicate error elements.
pub trait FormView {
    /// Write a field's literal value into its input element.
    fn set_input_value(&mut self, field: Field, value: &str);

    /// Ensure exactly one error element adjacent to the field shows
    /// `message`, and that the field carries the invalid marker.
    fn set_field_error(&mut self, field: Field, message: &str);

    /// Remove the field's error element and invalid marker, if present.
    fn clear_field_error(&mut self, field: Field);

    /// Toggle the submit control.
    fn set_submit_enabled(&mut self, enabled: bool);

    /// Replace the container content with a terminal message and detach the
    /// form from further interaction.
    fn show_terminal_message(&mut self, message: &str);

    /// Show a page-level submission failure. The form stays interactive.
    fn show_submission_error(&mut self, message: &str);

    /// False once the view has been torn down or went terminal.
    fn is_attached(&self) -> bool;
}

/// Maps change notifications onto a [`FormView`], one patch per change.
///
/// A strict consumer: it never mutates the store. Writes are dropped once
/// the view reports itself detached, which is what guards an in-flight
/// submission outcome against landing on a torn-down form.
pub struct Renderer<V> {
    view: V,
}

impl<V: FormView> Renderer<V> {
    /// Wrap a view.
    pub fn new(view: V) -> Self {
        Self { view }
    }

    /// Shared access to the wrapped view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Apply one change to the view.
    pub fn apply(&mut self, change: &Change) {
        if !self.view.is_attached() {
            trace!("view detached, dropping {change:?}");
            return;
        }

        match change {
            Change::Field { field, value, .. } => self.view.set_input_value(*field, value),
            // Touched has no view counterpart; error display is already
            // gated in the store.
            Change::Touched { .. } => {}
            Change::Error { field, message, .. } => match message {
                Some(message) => self.view.set_field_error(*field, message),
                None => self.view.clear_field_error(*field),
            },
            Change::Validity { is_valid } => self.view.set_submit_enabled(*is_valid),
            Change::Submission { state, .. } => self.apply_submission(state),
        }
    }

    fn apply_submission(&mut self, state: &SubmissionState) {
        match state {
            SubmissionState::Filling => self.view.set_submit_enabled(true),
            SubmissionState::Sending => self.view.set_submit_enabled(false),
            SubmissionState::Sent => self.view.show_terminal_message(USER_CREATED),
            SubmissionState::Error(message) => {
                self.view.show_submission_error(message);
                self.view.set_submit_enabled(true);
            }
        }
    }
}

impl<V: FormView + Send + 'static> Renderer<V> {
    /// Subscribe a renderer for `view` to every change `store` emits.
    pub fn bind(store: &FormStore, view: V) {
        let mut renderer = Renderer::new(view);
        store.subscribe(move |change| renderer.apply(change));
    }
}
