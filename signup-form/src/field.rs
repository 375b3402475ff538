//! Field identifiers and per-field storage.

use std::fmt;
use std::ops::{Index, IndexMut};

/// The closed set of signup-form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    PasswordConfirmation,
}

impl Field {
    /// All fields in canonical order.
    pub const ALL: [Field; 4] = [
        Field::Name,
        Field::Email,
        Field::Password,
        Field::PasswordConfirmation,
    ];

    /// The input-element name the view binds this field to.
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::PasswordConfirmation => "passwordConfirmation",
        }
    }

    /// Human-readable label used in violation messages.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::PasswordConfirmation => "password confirmation",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-field storage with one slot per [`Field`].
///
/// A struct rather than a map: lookups cannot miss, and adding a field is a
/// compile error everywhere a slot is forgotten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap<T> {
    name: T,
    email: T,
    password: T,
    password_confirmation: T,
}

impl<T> FieldMap<T> {
    /// Shared access to one slot.
    pub fn get(&self, field: Field) -> &T {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::PasswordConfirmation => &self.password_confirmation,
        }
    }

    /// Exclusive access to one slot.
    pub fn get_mut(&mut self, field: Field) -> &mut T {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::PasswordConfirmation => &mut self.password_confirmation,
        }
    }

    /// Iterate over `(field, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &T)> {
        Field::ALL.into_iter().map(move |field| (field, self.get(field)))
    }
}

impl<T> Index<Field> for FieldMap<T> {
    type Output = T;

    fn index(&self, field: Field) -> &T {
        self.get(field)
    }
}

impl<T> IndexMut<Field> for FieldMap<T> {
    fn index_mut(&mut self, field: Field) -> &mut T {
        self.get_mut(field)
    }
}
