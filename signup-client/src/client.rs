//! Main SignupClient

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::Client;
use url::Url;

use crate::error::Error;
use crate::user::NewUser;

/// Client for the signup users endpoint.
///
/// Cheap to clone (uses `Arc` internally) and safe to share across threads.
///
/// # Example
///
/// ```ignore
/// use signup_client::SignupClient;
///
/// let client = SignupClient::builder()
///     .base_url("https://signup.example.com")
///     .build();
///
/// client.create_user(&new_user).await?;
/// ```
#[derive(Clone)]
pub struct SignupClient {
    inner: Arc<SignupClientInner>,
}

struct SignupClientInner {
    base_url: String,
    http_client: Client,
    timeout: Option<Duration>,
}

impl SignupClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> SignupClientBuilder<Missing> {
        SignupClientBuilder::new()
    }

    /// Posts a new user to the users endpoint.
    ///
    /// Any 2xx response is success; the response body is not inspected.
    /// Non-2xx statuses map to [`Error::Http`], transport failures to
    /// [`Error::Network`].
    pub async fn create_user(&self, user: &NewUser) -> Result<(), Error> {
        let url = self.users_url()?;
        debug!("POST {url}");

        let mut request = self.inner.http_client.post(url).json(user);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(Error::http(status, body))
        }
    }

    /// Returns the base URL of the signup endpoint.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Resolves the users route against the base URL.
    fn users_url(&self) -> Result<Url, Error> {
        let base = self.inner.base_url.trim_end_matches('/');
        Url::parse(&format!("{base}/users")).map_err(|e| Error::InvalidUrl(e.to_string()))
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`SignupClient`].
///
/// Uses the typestate pattern to ensure the base URL is set at compile time.
///
/// # Example
///
/// ```ignore
/// let client = SignupClient::builder()
///     .base_url("https://signup.example.com")
///     .timeout(Duration::from_secs(30))
///     .build();
/// ```
pub struct SignupClientBuilder<UrlState> {
    base_url: UrlState,
    timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl SignupClientBuilder<Missing> {
    /// Creates a builder with no base URL set.
    pub fn new() -> Self {
        Self {
            base_url: Missing,
            timeout: None,
            http_client: None,
        }
    }

    /// Sets the base URL of the signup endpoint. Required.
    pub fn base_url(self, url: impl Into<String>) -> SignupClientBuilder<Set<String>> {
        SignupClientBuilder {
            base_url: Set(url.into()),
            timeout: self.timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for SignupClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<UrlState> SignupClientBuilder<UrlState> {
    /// Sets a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Injects a preconfigured `reqwest::Client`.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl SignupClientBuilder<Set<String>> {
    /// Builds the client.
    pub fn build(self) -> SignupClient {
        SignupClient {
            inner: Arc::new(SignupClientInner {
                base_url: self.base_url.0,
                http_client: self.http_client.unwrap_or_default(),
                timeout: self.timeout,
            }),
        }
    }
}
