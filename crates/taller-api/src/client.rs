// HTTP client for the maintenance-shop backend.
//
// Wraps `reqwest::Client` with base-URL joining, bearer-token injection,
// and uniform response/error decoding. Endpoint groups (vehicles, orders,
// etc.) are inherent methods in `resources/` to keep this module focused
// on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use secrecy::ExposeSecret;
use tracing::{debug, trace};
use url::Url;

use crate::auth::TokenSlot;
use crate::error::Error;
use crate::transport::TransportConfig;

// ── Error response shape ─────────────────────────────────────────────

/// The backend reports failures as `{"message": "..."}`; ASP.NET model
/// validation failures arrive as problem details with a `title`.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

/// Extract the backend's own error message from a raw error body.
pub(crate) fn backend_message(raw: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(raw)
        .ok()
        .and_then(|e| e.message.or(e.title))
        .filter(|m| !m.trim().is_empty())
}

/// Cut `s` to at most `max` bytes without splitting a UTF-8 sequence.
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the backend REST API.
///
/// The sole network egress point: every resource call goes through one
/// of the verb helpers below, which attach `Authorization: Bearer` when
/// the shared [`TokenSlot`] holds a token.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: TokenSlot,
    timeout_secs: u64,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` using the given transport settings.
    pub fn new(
        base_url: &str,
        transport: &TransportConfig,
        token: TokenSlot,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            token,
            timeout_secs: transport.timeout_secs(),
        })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        token: TokenSlot,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            token,
            timeout_secs: 0,
        })
    }

    /// Ensure the base path ends with `/` so relative joins append
    /// instead of replacing the last segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The token slot this client reads from.
    pub fn token_slot(&self) -> &TokenSlot {
        &self.token
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"api/Vehiculo/3"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.get() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    pub(crate) fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.send(self.http.get(url)).await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn get_with_params<T, P>(&self, path: &str, params: &P) -> Result<T, Error>
    where
        T: DeserializeOwned,
        P: Serialize + std::fmt::Debug + ?Sized,
    {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.send(self.http.get(url).query(params)).await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.send(self.http.post(url).json(body)).await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.send(self.http.put(url).json(body)).await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let resp = self.send(self.http.patch(url).json(body)).await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.send(self.http.delete(url)).await?;
        self.handle_empty(resp).await
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        self.authorize(builder)
            .send()
            .await
            .map_err(|e| self.transport_error(e))
    }

    // ── Response handling ────────────────────────────────────────────

    /// Decode a success body into `T`. An empty body decodes as JSON
    /// `null`, so `Option<_>` targets accept `204 No Content`.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(self.parse_error(status, resp).await);
        }

        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        trace!(len = body.len(), "response body received");
        let source = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(source).map_err(|e| {
            let preview = truncate(&body, 200);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let path = resp.url().path().to_owned();
        let raw = resp.text().await.unwrap_or_default();
        let message = backend_message(&raw);

        match status {
            reqwest::StatusCode::UNAUTHORIZED => Error::SessionExpired,
            reqwest::StatusCode::FORBIDDEN => Error::Forbidden {
                message: message.unwrap_or_else(|| "insufficient permissions (HTTP 403)".into()),
            },
            reqwest::StatusCode::NOT_FOUND => Error::NotFound { path },
            _ => Error::Api {
                status: status.as_u16(),
                message: message.unwrap_or_else(|| {
                    if raw.is_empty() {
                        status.to_string()
                    } else {
                        truncate(&raw, 200).to_owned()
                    }
                }),
            },
        }
    }
}
