pub mod observe;
pub mod validation;

pub use observe::Observers;
pub use validation::{FieldRulesBuilder, FieldValues, Schema, SchemaBuilder};
