//! The signup validation schema.

use formwork::Schema;

use crate::field::{Field, FieldMap};

/// Violation messages surfaced to the user. The email message doubles as the
/// required-field message so an empty and a malformed address read the same.
pub const NAME_REQUIRED: &str = "name is a required field";
pub const EMAIL_INVALID: &str = "email must be a valid email";
pub const PASSWORD_REQUIRED: &str = "password is a required field";
pub const PASSWORD_TOO_SHORT: &str = "password must be at least 6 characters";
pub const CONFIRMATION_REQUIRED: &str = "password confirmation is a required field";
pub const CONFIRMATION_MISMATCH: &str = "password confirmation does not match to password";

/// Minimum password length.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// The schema type the form store validates against.
pub type SignupSchema = Schema<Field, FieldMap<String>>;

/// Build the signup schema.
///
/// Rules are evaluated against the full value snapshot, so the confirmation
/// check always compares with the password's current value.
pub fn signup_schema() -> SignupSchema {
    Schema::builder()
        .field(Field::Name)
        .required(NAME_REQUIRED)
        .field(Field::Email)
        .required(EMAIL_INVALID)
        .email(EMAIL_INVALID)
        .field(Field::Password)
        .required(PASSWORD_REQUIRED)
        .min_length(PASSWORD_MIN_LENGTH, PASSWORD_TOO_SHORT)
        .field(Field::PasswordConfirmation)
        .required(CONFIRMATION_REQUIRED)
        .matches_field(Field::Password, CONFIRMATION_MISMATCH)
        .build()
}
