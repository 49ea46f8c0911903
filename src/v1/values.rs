pub const OAUTH_HEADER: &str = "OAuth";
pub const OAUTH_HTTP_METHOD: &str = "GET";

pub const OAUTH_PARAM_KEY_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_PARAM_KEY_NONCE: &str = "oauth_nonce";
pub const OAUTH_PARAM_KEY_SIGNATURE: &str = "oauth_signature";
pub const OAUTH_PARAM_KEY_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_PARAM_KEY_TIMESTAMP: &str = "oauth_timestamp";

pub const OAUTH_VALUE_SIGMETHOD_HMACSHA256: &str = "HMAC-SHA256";

/// Order the oauth parameters are written into the Authorization header.
pub const OAUTH_HEADER_ORDER: [&str; 5] = [
    OAUTH_PARAM_KEY_CONSUMER_KEY,
    OAUTH_PARAM_KEY_SIGNATURE_METHOD,
    OAUTH_PARAM_KEY_TIMESTAMP,
    OAUTH_PARAM_KEY_NONCE,
    OAUTH_PARAM_KEY_SIGNATURE,
];

/// Fallback body returned by the status-code-0 compatibility shim.
pub const NETWORK_ERROR_BODY: &str = "An error occurred, check your URL";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignatureMethod {
    #[default]
    HmacSha256,
}

impl From<SignatureMethod> for &'static str {
    fn from(method: SignatureMethod) -> Self {
        match method {
            SignatureMethod::HmacSha256 => OAUTH_VALUE_SIGMETHOD_HMACSHA256,
        }
    }
}
