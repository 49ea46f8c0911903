use std::time::Duration;

use crate::builder::{self, OAuthSigner};
use crate::config::Config;
use crate::credentials::Credentials;
use crate::error::Result;
use crate::v1::values::NETWORK_ERROR_BODY;
use crate::v1::RequestSigner;

/// Status code and unparsed body of a roster request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterResponse {
    pub status_code: u16,
    pub body: String,
}

impl RosterResponse {
    /// Collapse any error into status `0` with a fixed message.
    ///
    /// For callers that still expect the legacy `(0, message)` convention
    /// instead of a typed error.
    pub fn from_result(result: Result<RosterResponse>) -> RosterResponse {
        result.unwrap_or_else(|_| RosterResponse {
            status_code: 0,
            body: NETWORK_ERROR_BODY.to_string(),
        })
    }
}

/// Blocking OneRoster client: signs each GET and sends it once.
#[derive(Clone, Debug)]
pub struct RosterClient<S = RequestSigner> {
    signer: S,
    http: reqwest::blocking::Client,
    timeout: Option<Duration>,
}

impl RosterClient<RequestSigner> {
    pub fn new<K: Into<String>, S: Into<String>>(client_id: K, client_secret: S) -> Result<Self> {
        Self::with_config(Credentials::new(client_id, client_secret), &Config::default())
    }

    pub fn with_config(credentials: Credentials, config: &Config) -> Result<Self> {
        let http = reqwest::blocking::Client::builder().build()?;
        Ok(RosterClient::with_signer(RequestSigner::from_credentials(credentials), http)
            .timeout(config.timeout()))
    }
}

impl<S: OAuthSigner> RosterClient<S> {
    pub fn with_signer(signer: S, http: reqwest::blocking::Client) -> Self {
        RosterClient {
            signer,
            http,
            timeout: None,
        }
    }

    /// Default deadline applied to every request from this client.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// Sign and GET `url`, returning the status code and body text.
    ///
    /// A response with any status code is `Ok`; only transport failures
    /// (name resolution, connection, timeout) are `Err`.
    pub fn make_roster_request(&self, url: &str) -> Result<RosterResponse> {
        self.request(url, self.timeout)
    }

    /// Like [`make_roster_request`](Self::make_roster_request) with a
    /// deadline for this call only.
    pub fn make_roster_request_with_timeout(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<RosterResponse> {
        self.request(url, Some(timeout))
    }

    fn request(&self, url: &str, timeout: Option<Duration>) -> Result<RosterResponse> {
        let response = builder::send_get(&self.http, url, &self.signer, timeout)?;
        Ok(RosterResponse {
            status_code: response.status,
            body: response.body,
        })
    }
}
