//! Form state model and change notifications.

use formwork::FieldValues;

use crate::field::{Field, FieldMap};

/// The submission lifecycle.
///
/// `Filling -> Sending -> Sent | Error`. A failed submission returns to
/// `Sending` on resubmit, or to `Filling` implicitly on the next edit.
/// `Sent` is terminal for the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    /// The user is still editing; nothing has been sent.
    #[default]
    Filling,
    /// A request is in flight.
    Sending,
    /// The endpoint accepted the signup. Terminal.
    Sent,
    /// The request failed; carries the page-level message.
    Error(String),
}

impl SubmissionState {
    /// Whether the form session is over.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Sent)
    }
}

/// Single source of truth for one form mount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    /// Current field values, trimmed at the controller boundary.
    pub fields: FieldMap<String>,
    /// Set on a field's first input or blur, never reset.
    pub touched: FieldMap<bool>,
    /// Head violation per field, `None` when clean.
    pub errors: FieldMap<Option<String>>,
    /// Where the submission lifecycle stands.
    pub submission: SubmissionState,
    /// Derived: every field non-empty and every error absent.
    pub is_valid: bool,
}

impl FormState {
    /// Recompute validity from the current snapshot.
    pub(crate) fn compute_validity(&self) -> bool {
        let filled = self
            .fields
            .iter()
            .all(|(_, value)| !value.trim().is_empty());
        let clean = self.errors.iter().all(|(_, error)| error.is_none());
        filled && clean
    }
}

impl FieldValues<Field> for FieldMap<String> {
    fn value(&self, field: Field) -> &str {
        self.get(field)
    }
}

/// One notification per mutated leaf of [`FormState`].
///
/// Emitted synchronously, in mutation order, carrying the new and previous
/// values so the renderer can apply point-in-time patches instead of
/// re-rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A field's value changed.
    Field {
        field: Field,
        value: String,
        previous: String,
    },
    /// A field received its first interaction.
    Touched { field: Field },
    /// A field's error was set or cleared.
    Error {
        field: Field,
        message: Option<String>,
        previous: Option<String>,
    },
    /// The derived validity flag flipped.
    Validity { is_valid: bool },
    /// The submission lifecycle advanced.
    Submission {
        state: SubmissionState,
        previous: SubmissionState,
    },
}
