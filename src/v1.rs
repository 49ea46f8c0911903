//! OneRoster request signing (OAuth 1.0 style, HMAC-SHA256).
//!
//! Signing is pure: [`RequestSigner::sign_url`] turns a request URL into a
//! [`SignedRequest`] carrying the `Authorization` header value. Sending the
//! request is left to [`client::RosterClient`].

pub mod client;
pub mod values;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;

use crate::builder::OAuthSigner;
use crate::credentials::Credentials;
use crate::encoding::{percent_encode, percent_encode_str};
use crate::error::Result;
use crate::parameters::ParameterSet;
use crate::{nonce, util};
use values::*;

type HmacSha256 = Hmac<Sha256>;

/// A request signed for one call. Transient; build a new one per request.
#[derive(Clone, Debug)]
pub struct SignedRequest {
    /// The full URL as given, query included.
    pub url: String,
    /// The URL up to the first `?`.
    pub base_url: String,
    /// Query and oauth parameters the signature covers.
    pub params: ParameterSet,
    pub base_string: String,
    pub signature: String,
    /// Value for the `Authorization` header.
    pub authorization: String,
}

/// Signs OneRoster GET requests with a client key and secret.
#[derive(Clone, Debug)]
pub struct RequestSigner {
    credentials: Credentials,
    signature_method: SignatureMethod,
}

impl RequestSigner {
    pub fn new<K: Into<String>, S: Into<String>>(client_id: K, client_secret: S) -> Self {
        Self::from_credentials(Credentials::new(client_id, client_secret))
    }

    pub fn from_credentials(credentials: Credentials) -> Self {
        RequestSigner {
            credentials,
            signature_method: SignatureMethod::HmacSha256,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Sign `raw_url` with the current time and a fresh nonce.
    ///
    /// The nonce has as many characters as the timestamp.
    pub fn sign_url(&self, raw_url: &str) -> SignedRequest {
        let timestamp = nonce::timestamp();
        let nonce = nonce::generate_nonce(timestamp.len());
        self.sign_with(raw_url, timestamp, nonce)
    }

    /// Sign `raw_url` with a caller-chosen timestamp and nonce.
    pub fn sign_with<T: Into<String>, N: Into<String>>(
        &self,
        raw_url: &str,
        timestamp: T,
        nonce: N,
    ) -> SignedRequest {
        let (base_url, query) = util::split_url(raw_url);
        let query_params = query.map(util::query_to_params).unwrap_or_default();

        let mut oauth = ParameterSet::new();
        oauth
            .insert(OAUTH_PARAM_KEY_CONSUMER_KEY, self.credentials.key())
            .insert(
                OAUTH_PARAM_KEY_SIGNATURE_METHOD,
                <&str>::from(self.signature_method),
            )
            .insert(OAUTH_PARAM_KEY_TIMESTAMP, timestamp)
            .insert(OAUTH_PARAM_KEY_NONCE, nonce);

        // oauth values win over same-named query parameters
        let params = query_params.merge(oauth.clone());
        let base_string = base_string(OAUTH_HTTP_METHOD, base_url, &params);
        let signature = signature(&composite_key(self.credentials.secret()), &base_string);
        oauth.insert(OAUTH_PARAM_KEY_SIGNATURE, signature.as_str());

        debug!(
            base_url,
            params = ?params.keys().collect::<Vec<_>>(),
            "signed roster request"
        );

        SignedRequest {
            url: raw_url.to_string(),
            base_url: base_url.to_string(),
            params,
            base_string,
            signature,
            authorization: authorization_header(&oauth),
        }
    }
}

impl OAuthSigner for RequestSigner {
    fn authorization(&self, url: &str) -> Result<String> {
        Ok(self.sign_url(url).authorization)
    }
}

/// `METHOD&enc(base_url)&enc(normalized params)`.
pub fn base_string(http_method: &str, base_url: &str, params: &ParameterSet) -> String {
    let http_method = http_method.to_ascii_uppercase();
    format!(
        "{}&{}&{}",
        percent_encode(&http_method),
        percent_encode(base_url),
        percent_encode(&params.normalize())
    )
}

/// Signing key: the encoded client secret and an empty token secret.
pub fn composite_key(client_secret: &str) -> String {
    format!("{}&", percent_encode(client_secret))
}

/// Base64 of HMAC-SHA256 over `base_string`.
pub fn signature(composite_key: &str, base_string: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(composite_key.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(base_string.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

/// `OAuth k="v",...` for the oauth parameters in a fixed order.
pub fn authorization_header(oauth: &ParameterSet) -> String {
    let values = OAUTH_HEADER_ORDER
        .iter()
        .filter_map(|key| oauth.get(key).map(|v| (key, v)))
        .map(|(key, v)| format!("{}=\"{}\"", key, percent_encode_str(v)))
        .collect::<Vec<String>>()
        .join(",");
    format!("{} {}", OAUTH_HEADER, values)
}
