//! HTTP adapter backed by `reqwest`.

use async_trait::async_trait;
use tracing::{debug, trace};

use stencil_core::{
    application::{ApplicationError, HttpResponse, ports::HttpClient},
    error::{StencilError, StencilResult},
};

/// User-Agent sent when the configuration does not override it.
pub const DEFAULT_USER_AGENT: &str = "stencil-cli";

/// Environment variable read for the GitHub token by default.
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_OAUTH_TOKEN";

/// Production HTTP client.
///
/// Every request carries the configured User-Agent and, when a token is
/// present, `Authorization: Bearer <token>`. Redirects are followed (GitHub
/// zipball URLs redirect to codeload). No request timeout is applied.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
    token: Option<String>,
}

impl ReqwestClient {
    pub fn new(user_agent: &str, token: Option<String>) -> StencilResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| StencilError::setup("HTTP client", e))?;

        Ok(Self {
            client,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Build a client whose token is read from the environment variable
    /// `token_env`, if set.
    pub fn from_env(user_agent: &str, token_env: &str) -> StencilResult<Self> {
        let token = std::env::var(token_env).ok();
        if token.is_some() {
            debug!(token_env, "Using API token from environment");
        }
        Self::new(user_agent, token)
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> StencilResult<HttpResponse> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| transport(url, &e))?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| transport(url, &e))?;

        trace!(url, status, bytes = body.len(), "GET complete");
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

fn transport(url: &str, e: &reqwest::Error) -> StencilError {
    ApplicationError::Transport {
        url: url.to_string(),
        reason: e.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::*;

    #[tokio::test]
    async fn sends_user_agent_and_returns_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/orgs/NetCoreTemplates/repos")
                    .header("user-agent", "stencil-cli");
                then.status(200).body(r#"[{"name":"web"}]"#);
            })
            .await;

        let client = ReqwestClient::new(DEFAULT_USER_AGENT, None).unwrap();
        let response = client
            .get(&server.url("/orgs/NetCoreTemplates/repos"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, br#"[{"name":"web"}]"#);
    }

    #[tokio::test]
    async fn attaches_bearer_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/private")
                    .header("Authorization", "Bearer secret-token");
                then.status(200).body("ok");
            })
            .await;

        let client = ReqwestClient::new("custom-agent", Some("secret-token".into())).unwrap();
        assert!(client.has_token());
        client.get(&server.url("/private")).await.unwrap();
        mock.assert_async().await;
    }

    #[test]
    fn blank_token_is_ignored() {
        let client = ReqwestClient::new(DEFAULT_USER_AGENT, Some("  ".into())).unwrap();
        assert!(!client.has_token());
    }

    #[tokio::test]
    async fn error_status_is_returned_not_raised() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404).body("Not Found");
            })
            .await;

        let client = ReqwestClient::new(DEFAULT_USER_AGENT, None).unwrap();
        let url = server.url("/missing");
        let response = client.get(&url).await.unwrap();
        assert_eq!(response.status, 404);

        let err = response.error_for_status(&url).unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let client = ReqwestClient::new(DEFAULT_USER_AGENT, None).unwrap();
        let err = client.get("http://127.0.0.1:1/none").await.unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::Transport { .. })
        ));
        assert!(err.is_retryable());
    }
}
