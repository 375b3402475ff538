//! HTTP client for the signup users endpoint.
//!
//! The form core never talks to the network directly; it depends on the
//! [`UserGateway`] trait, and [`SignupClient`] is the production
//! implementation. Any 2xx response counts as success and the response body
//! is not inspected.

mod client;
mod error;
mod gateway;
mod user;

pub use client::{Missing, Set, SignupClient, SignupClientBuilder};
pub use error::Error;
pub use gateway::UserGateway;
pub use user::NewUser;
