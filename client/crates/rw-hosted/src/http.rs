use crate::wire::ErrorBody;

use std::time::Duration;

use log::debug;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode, Url};
use rw_session::{SessionError, SessionResult};
use serde::de::DeserializeOwned;

/// REST client bound to one service root, sending the project key on every call
pub(crate) struct HttpClient {
    base_url: String,
    anon_key: String,
    client: ReqwestClient,
}

impl HttpClient {
    pub(crate) fn new(base_url: &str, anon_key: &str, timeout: Duration) -> SessionResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SessionError::unavailable(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            client,
        })
    }

    /// Absolute URL for `path` with encoded query pairs
    pub(crate) fn url(&self, path: &str, query: &[(&str, &str)]) -> SessionResult<Url> {
        let raw = format!("{}{}", self.base_url, path);
        let mut url = Url::parse(&raw)
            .map_err(|e| SessionError::unavailable(format!("Invalid URL '{raw}': {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Build a request with `apikey` and bearer headers.
    /// Without a user token the anon key is the bearer.
    pub(crate) fn request(&self, method: Method, url: Url, bearer: Option<&str>) -> RequestBuilder {
        let token = bearer.unwrap_or(&self.anon_key);
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {token}"))
    }

    /// Send and decode a JSON body
    pub(crate) async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> SessionResult<T> {
        let response = send(req).await?;
        response.json::<T>().await.map_err(from_reqwest)
    }

    /// Send and ignore the body
    pub(crate) async fn execute_empty(&self, req: RequestBuilder) -> SessionResult<()> {
        send(req).await.map(|_| ())
    }
}

async fn send(req: RequestBuilder) -> SessionResult<Response> {
    let response = req.send().await.map_err(from_reqwest)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!("Hosted API returned {status}");
    Err(error_from_body(status, &body))
}

#[track_caller]
pub(crate) fn from_reqwest(err: reqwest::Error) -> SessionError {
    if err.is_decode() {
        SessionError::malformed(describe(&err))
    } else {
        SessionError::unavailable(describe(&err))
    }
}

/// Outer error plus its source chain
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Map a non-success response to `SessionError::Rejected`
pub(crate) fn error_from_body(status: StatusCode, body: &str) -> SessionError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed.message().map(String::from).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    });
    let code = parsed
        .code()
        .map(String::from)
        .unwrap_or_else(|| status.as_str().to_string());

    SessionError::rejected(status.as_u16(), code, message)
}
