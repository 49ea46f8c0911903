use std::time::Duration;

use tracing::{debug, warn};

use crate::builder::{self, Bearer};
use crate::config::Config;
use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::v2::{self, Scope, TokenResponse};

/// Blocking OneClick client for the authorization-code flow and the
/// bearer-authenticated info endpoints.
#[derive(Clone, Debug)]
pub struct ProfileClient {
    credentials: Credentials,
    config: Config,
    http: reqwest::blocking::Client,
}

impl ProfileClient {
    pub fn new<K: Into<String>, S: Into<String>>(client_id: K, client_secret: S) -> Result<Self> {
        Self::with_config(Credentials::new(client_id, client_secret), Config::default())
    }

    pub fn with_config(credentials: Credentials, config: Config) -> Result<Self> {
        let http = reqwest::blocking::Client::builder().build()?;
        Ok(Self::with_http_client(credentials, config, http))
    }

    pub fn with_http_client(
        credentials: Credentials,
        config: Config,
        http: reqwest::blocking::Client,
    ) -> Self {
        ProfileClient {
            credentials,
            config,
            http,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// See [`v2::code_url`].
    pub fn code_url(&self, scope: Option<Scope>, redirect_uri: Option<&str>) -> Result<String> {
        v2::code_url(&self.config, self.credentials.key(), scope, redirect_uri)
    }

    /// Exchange an authorization code for the full token response.
    pub fn exchange_code(&self, code: &str) -> Result<TokenResponse> {
        self.exchange_code_with_timeout(code, self.config.timeout())
    }

    /// Like [`exchange_code`](Self::exchange_code) with a deadline for this
    /// call only.
    pub fn exchange_code_with_timeout(
        &self,
        code: &str,
        timeout: Option<Duration>,
    ) -> Result<TokenResponse> {
        let url = v2::token_url(&self.config, &self.credentials, code)?;
        let mut request = self.http.post(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().inspect_err(|e| {
            warn!(error = %e, "token exchange request failed");
        })?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            warn!(%status, "token endpoint rejected the code");
            return Err(Error::TokenExchange(format!(
                "token endpoint returned {status}: {body}"
            )));
        }
        serde_json::from_str::<TokenResponse>(&body)
            .map_err(|e| Error::TokenExchange(format!("invalid token response: {e}")))
    }

    /// Exchange an authorization code for a bearer token.
    pub fn get_token(&self, code: &str) -> Result<String> {
        self.exchange_code(code).map(|token| token.access_token)
    }

    /// GET an info endpoint with `bearer`, optionally extracting one field.
    ///
    /// The body is returned whatever the status code; extraction errors
    /// carry the body for diagnosis.
    pub fn get_info(
        &self,
        bearer: &str,
        endpoint: &str,
        extract_node: Option<&str>,
    ) -> Result<String> {
        self.get_info_with_timeout(bearer, endpoint, extract_node, self.config.timeout())
    }

    /// Like [`get_info`](Self::get_info) with a deadline for this call only.
    pub fn get_info_with_timeout(
        &self,
        bearer: &str,
        endpoint: &str,
        extract_node: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<String> {
        let url = v2::info_url(&self.config, endpoint)?;
        let bearer = Bearer::new(bearer);
        let response = builder::send_get(&self.http, url.as_str(), &bearer, timeout)?;
        debug!(endpoint, status = response.status, "info response");
        match extract_node.filter(|n| !n.is_empty()) {
            Some(node) => v2::extract_node(&response.body, endpoint, node),
            None => Ok(response.body),
        }
    }

    pub fn get_user_info(&self, bearer: &str) -> Result<String> {
        self.get_info(bearer, v2::ENDPOINT_USER_INFO, None)
    }

    pub fn get_district(&self, bearer: &str) -> Result<String> {
        self.get_info(bearer, v2::ENDPOINT_DISTRICT, None)
    }

    pub fn get_user_profiles(&self, bearer: &str) -> Result<String> {
        self.get_info(bearer, v2::ENDPOINT_USER_PROFILES, None)
    }

    /// Linked student accounts of a parent user.
    pub fn get_user_children(&self, bearer: &str) -> Result<String> {
        self.get_info(bearer, v2::ENDPOINT_USER_CHILDREN, None)
    }

    pub fn get_user_groups(&self, bearer: &str) -> Result<String> {
        self.get_info(bearer, v2::ENDPOINT_USER_GROUPS, None)
    }

    /// Requires a district with OneRoster enabled, as do the class calls below.
    pub fn get_user_oneroster_info(&self, bearer: &str) -> Result<String> {
        self.get_info(bearer, v2::ENDPOINT_ONEROSTER_INFO, None)
    }

    pub fn get_user_oneroster_classes(&self, bearer: &str) -> Result<String> {
        self.get_info(bearer, v2::ENDPOINT_ONEROSTER_CLASSES, None)
    }

    pub fn get_user_oneroster_class_teachers(
        &self,
        bearer: &str,
        sourced_id: &str,
    ) -> Result<String> {
        self.get_info(
            bearer,
            &v2::class_teachers_endpoint(sourced_id),
            Some(v2::NODE_TEACHERS),
        )
    }

    pub fn get_user_oneroster_class_students(
        &self,
        bearer: &str,
        sourced_id: &str,
    ) -> Result<String> {
        self.get_info(
            bearer,
            &v2::class_students_endpoint(sourced_id),
            Some(v2::NODE_STUDENTS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::init_tracing;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // Blocking clients must be built and dropped off the async runtime,
    // so tests call this inside `spawn_blocking`.
    fn client_for(uri: &str) -> ProfileClient {
        let config = Config {
            token_url: format!("{uri}/oauth2/v2/token"),
            info_url: format!("{uri}/"),
            ..Config::default()
        };
        ProfileClient::with_config(Credentials::new("CID", "CSECRET"), config).unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn get_token_returns_access_token() {
        init_tracing();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/v2/token"))
            .and(query_param("client_id", "CID"))
            .and(query_param("client_secret", "CSECRET"))
            .and(query_param("code", "the-code"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"access_token":"at_123","token_type":"Bearer","id_token":"idt"}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let uri = server.uri();
        let token = tokio::task::spawn_blocking(move || client_for(&uri).get_token("the-code"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(token, "at_123");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn rejected_code_is_token_exchange_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/v2/token"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#),
            )
            .mount(&server)
            .await;

        let uri = server.uri();
        let result = tokio::task::spawn_blocking(move || client_for(&uri).get_token("bad"))
            .await
            .unwrap();
        match result {
            Err(Error::TokenExchange(msg)) => assert!(msg.contains("invalid_grant")),
            other => panic!("expected token exchange error, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn token_body_without_access_token_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"error":"nope"}"#))
            .mount(&server)
            .await;

        let uri = server.uri();
        let result = tokio::task::spawn_blocking(move || client_for(&uri).get_token("bad"))
            .await
            .unwrap();
        assert!(matches!(result, Err(Error::TokenExchange(_))));
    }

    #[test]
    fn unreachable_token_endpoint_is_network_error() {
        let config = Config {
            token_url: "http://127.0.0.1:1/oauth2/v2/token".to_string(),
            ..Config::default()
        };
        let client =
            ProfileClient::with_config(Credentials::new("CID", "CSECRET"), config).unwrap();
        assert!(matches!(client.get_token("code"), Err(Error::Network(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn get_info_sends_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/my/info"))
            .and(header("Authorization", "Bearer at_123"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"UserId":7}"#))
            .expect(1)
            .mount(&server)
            .await;

        let uri = server.uri();
        let body = tokio::task::spawn_blocking(move || client_for(&uri).get_user_info("at_123"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(body, r#"{"UserId":7}"#);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn fixed_endpoints_hit_their_paths() {
        let server = MockServer::start().await;
        for p in [
            "/v2/my/district",
            "/v2/my/profiles",
            "/v2/my/students",
            "/my/groups",
            "/v2/oneroster/my/info",
            "/v2/oneroster/my/classes",
        ] {
            Mock::given(method("GET"))
                .and(path(p))
                .respond_with(ResponseTemplate::new(200).set_body_string(p))
                .expect(1)
                .mount(&server)
                .await;
        }

        let uri = server.uri();
        let bodies = tokio::task::spawn_blocking(move || -> Result<Vec<String>> {
            let client = client_for(&uri);
            Ok(vec![
                client.get_district("t")?,
                client.get_user_profiles("t")?,
                client.get_user_children("t")?,
                client.get_user_groups("t")?,
                client.get_user_oneroster_info("t")?,
                client.get_user_oneroster_classes("t")?,
            ])
        })
        .await
        .unwrap()
        .unwrap();
        assert_eq!(bodies[3], "/my/groups");
        assert_eq!(bodies[5], "/v2/oneroster/my/classes");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn class_teachers_are_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/oneroster/my/classes/cls-9/teachers"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"teachers":[{"name":"A"}]}"#),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/oneroster/my/classes/cls-9/students"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"users":[]}"#))
            .mount(&server)
            .await;

        let uri = server.uri();
        let (teachers, students) = tokio::task::spawn_blocking(move || {
            let client = client_for(&uri);
            (
                client.get_user_oneroster_class_teachers("t", "cls-9"),
                client.get_user_oneroster_class_students("t", "cls-9"),
            )
        })
        .await
        .unwrap();

        assert_eq!(teachers.unwrap(), r#"[{"name":"A"}]"#);
        match students {
            Err(Error::ExtractNode { endpoint, node, .. }) => {
                assert_eq!(endpoint, "v2/oneroster/my/classes/cls-9/students");
                assert_eq!(node, "students");
            }
            other => panic!("expected extract error, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn per_call_deadlines_are_network_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/v2/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"access_token":"at_123"}"#)
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v2/my/info"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"UserId":7}"#)
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let uri = server.uri();
        let (token, info) = tokio::task::spawn_blocking(move || {
            let client = client_for(&uri);
            let deadline = Some(Duration::from_millis(100));
            (
                client.exchange_code_with_timeout("the-code", deadline),
                client.get_info_with_timeout("t", v2::ENDPOINT_USER_INFO, None, deadline),
            )
        })
        .await
        .unwrap();

        match token {
            Err(Error::Network(e)) => assert!(e.is_timeout()),
            other => panic!("expected token timeout, got {other:?}"),
        }
        match info {
            Err(Error::Network(e)) => assert!(e.is_timeout()),
            other => panic!("expected info timeout, got {other:?}"),
        }
    }
}
