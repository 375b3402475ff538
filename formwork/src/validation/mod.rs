//! Schema validation for form fields.
//!
//! A [`Schema`] maps field identifiers to ordered lists of rules. Rules are
//! evaluated against the field's value *and* the full value snapshot, so
//! cross-field rules (password confirmation, dependent fields) can fire on
//! any edit.
//!
//! # Example
//!
//! ```ignore
//! use formwork::Schema;
//!
//! let schema = Schema::builder()
//!     .field(Field::Username)
//!         .required("username is a required field")
//!         .min_length(3, "username must be at least 3 characters")
//!     .field(Field::Email)
//!         .required("email must be a valid email")
//!         .email("email must be a valid email")
//!     .field(Field::Confirm)
//!         .matches_field(Field::Password, "confirmation does not match")
//!     .build();
//!
//! let violations = schema.validate_field(Field::Email, &values);
//! ```

mod schema;

pub use schema::{FieldRulesBuilder, FieldValues, Schema, SchemaBuilder};
