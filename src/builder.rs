use crate::error::Result;

/// Produces an `Authorization` header value for a request URL.
pub trait OAuthSigner {
    fn authorization(&self, url: &str) -> Result<String>;
}

/// OAuth2 bearer credential for OneClick endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct Bearer(String);

impl Bearer {
    pub fn new<T: Into<String>>(token: T) -> Self {
        Bearer(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Bearer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Bearer(<redacted>)")
    }
}

impl OAuthSigner for Bearer {
    fn authorization(&self, _url: &str) -> Result<String> {
        Ok(format!("Bearer {}", self.0))
    }
}

/// Status and raw body of a completed GET.
pub(crate) struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Send a single authorized GET. No retries.
pub(crate) fn send_get<S: OAuthSigner>(
    http: &reqwest::blocking::Client,
    url: &str,
    signer: &S,
    timeout: Option<std::time::Duration>,
) -> Result<RawResponse> {
    let authorization = signer.authorization(url)?;
    let mut request = http
        .get(url)
        .header(reqwest::header::AUTHORIZATION, authorization);
    if let Some(timeout) = timeout {
        request = request.timeout(timeout);
    }
    let response = request.send().inspect_err(|e| {
        tracing::warn!(url, error = %e, "request failed before a response arrived");
    })?;
    let status = response.status().as_u16();
    let body = response.text()?;
    tracing::debug!(url, status, "received response");
    Ok(RawResponse { status, body })
}
