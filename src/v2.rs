//! OneClick OAuth2 authorization-code flow.
//!
//! URL construction and JSON field extraction live here;
//! [`client::ProfileClient`] performs the calls.

pub mod client;

use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

use crate::config::Config;
use crate::credentials::Credentials;
use crate::encoding::percent_encode;
use crate::error::{Error, Result};

pub const ENDPOINT_USER_INFO: &str = "v2/my/info";
pub const ENDPOINT_DISTRICT: &str = "v2/my/district";
pub const ENDPOINT_USER_PROFILES: &str = "v2/my/profiles";
pub const ENDPOINT_USER_CHILDREN: &str = "v2/my/students";
pub const ENDPOINT_USER_GROUPS: &str = "my/groups";
pub const ENDPOINT_ONEROSTER_INFO: &str = "v2/oneroster/my/info";
pub const ENDPOINT_ONEROSTER_CLASSES: &str = "v2/oneroster/my/classes";

pub const NODE_TEACHERS: &str = "teachers";
pub const NODE_STUDENTS: &str = "students";

/// Access level requested in the authorization URL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scope {
    #[default]
    Profile,
    OneRoster,
    Full,
}

impl From<Scope> for &'static str {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Profile => "profile",
            Scope::OneRoster => "oneroster",
            Scope::Full => "full",
        }
    }
}

/// Body of a successful token exchange.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub response_type: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
}

/// URL the user visits to approve access and receive a code.
///
/// `scope` defaults to [`Scope::Profile`] and `redirect_uri` to the
/// configured redirect.
pub fn code_url(
    config: &Config,
    client_id: &str,
    scope: Option<Scope>,
    redirect_uri: Option<&str>,
) -> Result<String> {
    let scope: &str = scope.unwrap_or_default().into();
    let redirect_uri = redirect_uri
        .filter(|r| !r.is_empty())
        .unwrap_or(&config.redirect_uri);
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", client_id),
            ("scope", scope),
            ("redirect_uri", redirect_uri),
            ("response_type", "code"),
        ],
    )?;
    Ok(url.into())
}

/// Token endpoint URL carrying the credentials and code as query parameters.
pub fn token_url(config: &Config, credentials: &Credentials, code: &str) -> Result<Url> {
    Ok(Url::parse_with_params(
        &config.token_url,
        &[
            ("client_id", credentials.key()),
            ("client_secret", credentials.secret()),
            ("code", code),
        ],
    )?)
}

/// Absolute URL of an info endpoint.
///
/// A base without a trailing `/` is treated as a directory, so its last
/// path segment is kept.
pub fn info_url(config: &Config, endpoint: &str) -> Result<Url> {
    let mut base = Url::parse(&config.info_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(endpoint)?)
}

pub fn class_teachers_endpoint(sourced_id: &str) -> String {
    format!(
        "{}/{}/{}",
        ENDPOINT_ONEROSTER_CLASSES,
        percent_encode(sourced_id),
        NODE_TEACHERS
    )
}

pub fn class_students_endpoint(sourced_id: &str) -> String {
    format!(
        "{}/{}/{}",
        ENDPOINT_ONEROSTER_CLASSES,
        percent_encode(sourced_id),
        NODE_STUDENTS
    )
}

// Object responses are searched directly, array responses through their
// first element. `None` means the shape holds no objects at all.
fn node_source(value: &Value) -> Option<Option<&Map<String, Value>>> {
    match value {
        Value::Object(map) => Some(Some(map)),
        Value::Array(items) => Some(items.first().and_then(Value::as_object)),
        _ => None,
    }
}

/// Pull `node` out of a JSON response and re-serialize it.
///
/// Scalars and other non-container bodies are returned unchanged.
pub fn extract_node(body: &str, endpoint: &str, node: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body)?;
    let Some(source) = node_source(&value) else {
        return Ok(body.to_string());
    };
    match source.and_then(|map| map.get(node)) {
        Some(found) => Ok(serde_json::to_string(found)?),
        None => Err(Error::ExtractNode {
            body: body.to_string(),
            endpoint: endpoint.to_string(),
            node: node.to_string(),
        }),
    }
}

/// Collect the listed fields that are present into one object.
///
/// Absent fields are skipped rather than reported.
pub fn extract_nodes(body: &str, nodes: &[&str]) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(body)?;
    let source = node_source(&value).flatten();
    Ok(nodes
        .iter()
        .filter_map(|node| {
            source
                .and_then(|map| map.get(*node))
                .map(|v| (node.to_string(), v.clone()))
        })
        .collect())
}
