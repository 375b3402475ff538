//! Schema and rule builders.

use std::collections::HashMap;
use std::hash::Hash;

use log::trace;

/// Read access to the full set of field values during validation.
///
/// Rules receive the snapshot alongside the value under test, which is what
/// lets cross-field rules like [`FieldRulesBuilder::matches_field`] compare
/// against the current state of another field.
pub trait FieldValues<F> {
    /// The current value of `field`.
    fn value(&self, field: F) -> &str;
}

/// Type alias for sync validation rule closures.
type SyncRule<V> = Box<dyn Fn(&str, &V) -> Result<(), String> + Send + Sync>;

/// A validation schema over a closed set of field identifiers.
///
/// Build one with [`Schema::builder`]; validate with
/// [`Schema::validate_field`]. A field with no registered rules is always
/// valid.
pub struct Schema<F, V> {
    rules: HashMap<F, Vec<SyncRule<V>>>,
}

impl<F, V> Schema<F, V>
where
    F: Copy + Eq + Hash,
{
    /// Create a new builder.
    pub fn builder() -> SchemaBuilder<F, V> {
        SchemaBuilder::new()
    }

    /// Validate one field against the full value snapshot.
    ///
    /// Returns every violation message for the field, in rule registration
    /// order. An empty list means the field is valid.
    pub fn validate_field(&self, field: F, values: &V) -> Vec<String>
    where
        V: FieldValues<F>,
    {
        let Some(rules) = self.rules.get(&field) else {
            return Vec::new();
        };

        let value = values.value(field);
        let violations: Vec<String> = rules
            .iter()
            .filter_map(|rule| rule(value, values).err())
            .collect();

        trace!("validated field: {} violation(s)", violations.len());
        violations
    }

    /// The first violation for `field`, if any.
    ///
    /// Convenience for stores that surface only the head of the list.
    pub fn first_violation(&self, field: F, values: &V) -> Option<String>
    where
        V: FieldValues<F>,
    {
        self.validate_field(field, values).into_iter().next()
    }
}

impl<F, V> std::fmt::Debug for Schema<F, V>
where
    F: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for a [`Schema`].
///
/// Call [`SchemaBuilder::field`] to start a rule chain for one field, then
/// either chain into the next field or finish with
/// [`FieldRulesBuilder::build`].
pub struct SchemaBuilder<F, V> {
    rules: HashMap<F, Vec<SyncRule<V>>>,
}

impl<F, V> SchemaBuilder<F, V>
where
    F: Copy + Eq + Hash,
{
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Start a rule chain for `field`.
    pub fn field(self, field: F) -> FieldRulesBuilder<F, V> {
        FieldRulesBuilder {
            builder: self,
            field,
            rules: Vec::new(),
        }
    }

    /// Finish the schema.
    pub fn build(self) -> Schema<F, V> {
        Schema { rules: self.rules }
    }
}

impl<F, V> Default for SchemaBuilder<F, V>
where
    F: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for the rules of a single field.
pub struct FieldRulesBuilder<F, V> {
    builder: SchemaBuilder<F, V>,
    field: F,
    rules: Vec<SyncRule<V>>,
}

impl<F, V> FieldRulesBuilder<F, V>
where
    F: Copy + Eq + Hash,
{
    /// Add a custom rule.
    ///
    /// The predicate receives the field's value and the full snapshot and
    /// returns `true` when the value is acceptable.
    pub fn rule<P>(mut self, predicate: P, msg: impl Into<String>) -> Self
    where
        P: Fn(&str, &V) -> bool + Send + Sync + 'static,
    {
        let msg = msg.into();
        self.rules.push(Box::new(move |value, values| {
            if predicate(value, values) {
                Ok(())
            } else {
                Err(msg.clone())
            }
        }));
        self
    }

    /// Require the value to be non-empty after trimming.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule(|value, _| !value.trim().is_empty(), msg)
    }

    /// Require minimum length (in characters).
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule(move |value, _| value.chars().count() >= min, msg)
    }

    /// Require maximum length (in characters).
    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.rule(move |value, _| value.chars().count() <= max, msg)
    }

    /// Require the value to match a regex pattern.
    pub fn pattern(self, pattern: &str, msg: impl Into<String>) -> Self {
        let re = regex::Regex::new(pattern).expect("Invalid regex pattern");
        self.rule(move |value, _| re.is_match(value), msg)
    }

    /// Require a valid email address.
    ///
    /// Empty is valid; combine with [`FieldRulesBuilder::required`] for a
    /// mandatory field.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.rule(
            |value, _| value.is_empty() || email_address::EmailAddress::is_valid(value),
            msg,
        )
    }

    /// Require the value to equal the current value of another field.
    pub fn matches_field(self, other: F, msg: impl Into<String>) -> Self
    where
        F: Send + Sync + 'static,
        V: FieldValues<F>,
    {
        self.rule(move |value, values| value == values.value(other), msg)
    }

    /// Continue to the next field.
    pub fn field(self, field: F) -> FieldRulesBuilder<F, V> {
        self.finalize().field(field)
    }

    /// Finalize this field and finish the schema.
    pub fn build(self) -> Schema<F, V> {
        self.finalize().build()
    }

    /// Finalize this field's rules and return the schema builder.
    fn finalize(self) -> SchemaBuilder<F, V> {
        let mut builder = self.builder;
        builder
            .rules
            .entry(self.field)
            .or_default()
            .extend(self.rules);
        builder
    }
}
