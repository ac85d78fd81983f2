//! Hangar API client.
//!
//! Low-level HTTP client that owns transport configuration and implements the
//! request/response contract shared by every operation. Entity-specific
//! operations are implemented via traits and functions in the model modules.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{HangarError, Result};

/// Public production endpoint.
pub const DEFAULT_BASE_URL: &str = "https://hangar.papermc.io/api/v1";
/// Transport timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("hangarapi/", env!("CARGO_PKG_VERSION"));

/// Settings for [`HangarClient::new`].
///
/// An empty `base_url` or a zero `timeout` fall back to the defaults. When
/// `http` is set, that client is used as the transport and `timeout` is
/// ignored.
#[derive(Clone)]
pub struct ClientConfig {
    /// API base URL.
    pub base_url: String,
    /// Optional bearer token.
    pub token: Option<String>,
    /// Transport timeout.
    pub timeout: Duration,
    /// Injected transport.
    pub http: Option<Client>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            http: None,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Low-level Hangar API client.
///
/// Handles authentication and HTTP requests. Entity-specific operations
/// are implemented via the `Get` and `List` traits on model types and the
/// free functions next to them.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool. It holds no mutable state, so concurrent calls from
/// several tasks are independent of each other.
///
/// # Example
///
/// ```no_run
/// use hangarapi::{ClientConfig, HangarClient};
///
/// # fn example() -> hangarapi::Result<()> {
/// // Public API, no token
/// let client = HangarClient::new(ClientConfig::default())?;
///
/// // Or configure manually
/// let client = HangarClient::new(ClientConfig {
///     base_url: "https://hangar.papermc.io/api/v1".into(),
///     token: Some("your-api-token".into()),
///     ..Default::default()
/// })?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HangarClient {
    http: Client,
    base_url: Arc<Url>,
    token: Option<String>,
}

impl std::fmt::Debug for HangarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HangarClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// A successful response body together with its declared type.
pub(crate) struct Body {
    pub text: String,
    pub is_json: bool,
}

impl HangarClient {
    /// Create a new client. No network access happens here.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the transport cannot be
    /// built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = if config.base_url.trim().is_empty() {
            DEFAULT_BASE_URL
        } else {
            config.base_url.trim()
        };

        // Ensure base URL ends with / so relative paths stay under it
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = match config.http {
            Some(http) => http,
            None => {
                let timeout = if config.timeout.is_zero() {
                    DEFAULT_TIMEOUT
                } else {
                    config.timeout
                };

                Client::builder()
                    .user_agent(USER_AGENT)
                    .brotli(true)
                    .gzip(true)
                    .deflate(true)
                    .timeout(timeout)
                    .build()
                    .map_err(|e| HangarError::transport("build client", e))?
            }
        };

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: config.token.filter(|t| !t.is_empty()),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether requests carry a bearer token.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, operation: &'static str, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;
        self.send(operation, self.request(url)).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        operation: &'static str,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;
        self.send(operation, self.request(url).query(query)).await
    }

    /// GET and decode a JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
    ) -> Result<T> {
        let response = self.get(operation, path).await?;
        Self::decode(operation, response).await
    }

    /// GET with query parameters and decode a JSON body.
    pub(crate) async fn get_json_with_query<T, Q>(
        &self,
        operation: &'static str,
        path: &str,
        query: &Q,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.get_with_query(operation, path, query).await?;
        Self::decode(operation, response).await
    }

    /// Decode a successful response body as JSON.
    pub(crate) async fn decode<T: DeserializeOwned>(
        operation: &'static str,
        response: Response,
    ) -> Result<T> {
        let body = Self::read_body(operation, response).await?;
        serde_json::from_str(&body.text).map_err(|source| HangarError::Decode { operation, source })
    }

    /// Read a successful response body as text, noting whether it is JSON.
    ///
    /// Used by endpoints that may answer with plain text instead of JSON.
    pub(crate) async fn read_body(operation: &'static str, response: Response) -> Result<Body> {
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("json"));

        let text = response
            .text()
            .await
            .map_err(|e| HangarError::transport(operation, e))?;

        Ok(Body { text, is_json })
    }

    fn request(&self, url: Url) -> RequestBuilder {
        let request = self.http.get(url).header(ACCEPT, "application/json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, operation: &'static str, request: RequestBuilder) -> Result<Response> {
        let request = request
            .build()
            .map_err(|e| HangarError::transport(operation, e))?;

        tracing::debug!(operation, method = %request.method(), url = %request.url(), "making API request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| HangarError::transport(operation, e))?;

        Self::check_response(operation, response).await
    }

    /// Check response status and convert errors.
    async fn check_response(operation: &'static str, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // The body is diagnostic only; an unreadable body still yields the status
        let body = response.text().await.unwrap_or_default();

        tracing::debug!(operation, status = status.as_u16(), "API request failed");

        Err(HangarError::Status {
            operation,
            status: status.as_u16(),
            body,
        })
    }
}

/// Validate a required argument.
pub(crate) fn require<'a>(operation: &'static str, name: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(HangarError::invalid(operation, format!("{name} cannot be empty")));
    }
    Ok(value)
}

/// Validate a required argument and percent-encode it as one path segment.
///
/// `/`, `+`, spaces and every other reserved character are escaped, so the
/// value can never add or remove path segments. Dot segments are rejected
/// because URL resolution would collapse them even when escaped.
pub(crate) fn segment<'a>(
    operation: &'static str,
    name: &str,
    value: &'a str,
) -> Result<Cow<'a, str>> {
    require(operation, name, value)?;
    if value == "." || value == ".." {
        return Err(HangarError::invalid(
            operation,
            format!("{name} cannot be '{value}'"),
        ));
    }
    Ok(urlencoding::encode(value))
}
