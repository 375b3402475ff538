//! Reactive signup form.
//!
//! One [`store::FormStore`] per form mount holds the single source of truth:
//! field values, touched flags, per-field errors, the submission lifecycle
//! and the derived validity flag. Controllers mutate the store, every leaf
//! mutation emits one [`model::Change`], and a [`view::Renderer`] maps each
//! change onto a [`view::FormView`] as a point-in-time patch. The renderer
//! never mutates the store.
//!
//! ```text
//! view event -> Controller -> FormStore -> Change -> Renderer -> FormView
//!                                 |
//!                                 +-> UserGateway (submit only)
//! ```

pub mod controller;
pub mod field;
pub mod model;
pub mod schema;
pub mod store;
pub mod view;

pub use controller::{Controller, FormEvent, NETWORK_ERROR};
pub use field::{Field, FieldMap};
pub use model::{Change, FormState, SubmissionState};
pub use schema::{SignupSchema, signup_schema};
pub use store::FormStore;
pub use view::{FormView, Renderer, USER_CREATED};
