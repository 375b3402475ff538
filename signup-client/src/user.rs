//! Signup payload

use serde::Serialize;

/// The payload posted to the users endpoint.
///
/// The password confirmation is a form-side check only and never leaves the
/// client, so it has no slot here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
    /// Display name of the new user.
    pub name: String,
    /// Email address of the new user.
    pub email: String,
    /// Plaintext password; transport security is the endpoint's concern.
    pub password: String,
}

impl NewUser {
    /// Creates a new payload.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}
