//! ClassLink client library.
//!
//! - [`v1`]: OneRoster request signing (OAuth 1.0 style, HMAC-SHA256) and a
//!   blocking client that sends the signed GET.
//! - [`v2`]: OneClick OAuth2 authorization-code flow and the
//!   bearer-authenticated profile and roster endpoints.

pub mod builder;
pub mod config;
pub mod credentials;
pub mod encoding;
pub mod error;
pub mod nonce;
pub mod parameters;
pub mod util;
pub mod v1;
pub mod v2;

#[cfg(test)]
mod test_support;

pub use builder::{Bearer, OAuthSigner};
pub use config::Config;
pub use credentials::Credentials;
pub use error::{Error, Result};
pub use parameters::ParameterSet;
pub use v1::{RequestSigner, SignedRequest};
pub use v2::{Scope, TokenResponse};

pub use v1::client::{RosterClient, RosterResponse};
pub use v2::client::ProfileClient;
