//! UserGateway trait

use async_trait::async_trait;

use crate::client::SignupClient;
use crate::error::Error;
use crate::user::NewUser;

/// The request/response seam the form core submits through.
///
/// Production code uses [`SignupClient`]; tests substitute a stub with a
/// scripted outcome.
#[async_trait]
pub trait UserGateway: Send + Sync {
    /// Creates a user on the remote endpoint.
    async fn create_user(&self, user: &NewUser) -> Result<(), Error>;
}

#[async_trait]
impl UserGateway for SignupClient {
    async fn create_user(&self, user: &NewUser) -> Result<(), Error> {
        SignupClient::create_user(self, user).await
    }
}
