use crate::domain::model::{AccessCheck, Existence};
use crate::domain::ports::UrlProbe;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    /// Redirects are followed; no timeout is set.
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UrlProbe for HttpProbe {
    async fn existence(&self, url: &str) -> Existence {
        match self.client.head(url).send().await {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                tracing::debug!("HEAD {} -> 404", url);
                Existence::Missing
            }
            Ok(response) => {
                tracing::debug!("HEAD {} -> {}", url, response.status());
                Existence::Exists
            }
            Err(e) => {
                tracing::debug!("HEAD {} failed: {}", url, e);
                Existence::Missing
            }
        }
    }

    async fn access(&self, url: &str, token: &str) -> Result<AccessCheck> {
        let mut request = self.client.get(url);
        if !token.is_empty() {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        let response = request.send().await?;
        tracing::debug!("GET {} -> {}", url, response.status());

        if response.status() == StatusCode::FORBIDDEN {
            Ok(AccessCheck::RequiresAuth)
        } else {
            Ok(AccessCheck::Open)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use httpmock::Method::HEAD;

    #[tokio::test]
    async fn test_existing_url() {
        let server = MockServer::start();
        let head = server.mock(|when, then| {
            when.method(HEAD).path("/owner/repo");
            then.status(200);
        });

        let probe = HttpProbe::new().unwrap();
        let result = probe.existence(&server.url("/owner/repo")).await;

        head.assert();
        assert_eq!(result, Existence::Exists);
    }

    #[tokio::test]
    async fn test_not_found_is_missing() {
        let server = MockServer::start();
        let head = server.mock(|when, then| {
            when.method(HEAD).path("/owner/gone");
            then.status(404);
        });

        let probe = HttpProbe::new().unwrap();
        let result = probe.existence(&server.url("/owner/gone")).await;

        head.assert();
        assert_eq!(result, Existence::Missing);
    }

    #[tokio::test]
    async fn test_other_error_statuses_count_as_existing() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(HEAD).path("/boom");
            then.status(500);
        });
        server.mock(|when, then| {
            when.method(HEAD).path("/private");
            then.status(403);
        });

        let probe = HttpProbe::new().unwrap();

        assert_eq!(probe.existence(&server.url("/boom")).await, Existence::Exists);
        assert_eq!(probe.existence(&server.url("/private")).await, Existence::Exists);
    }

    #[tokio::test]
    async fn test_redirect_is_followed() {
        let server = MockServer::start();
        let moved = server.mock(|when, then| {
            when.method(HEAD).path("/old-name");
            then.status(301).header("Location", server.url("/new-name"));
        });
        let target = server.mock(|when, then| {
            when.method(HEAD).path("/new-name");
            then.status(404);
        });

        let probe = HttpProbe::new().unwrap();
        let result = probe.existence(&server.url("/old-name")).await;

        moved.assert();
        target.assert();
        assert_eq!(result, Existence::Missing);
    }

    #[tokio::test]
    async fn test_connection_error_is_missing() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let probe = HttpProbe::new().unwrap();
        let result = probe
            .existence(&format!("http://127.0.0.1:{}/owner/repo", port))
            .await;

        assert_eq!(result, Existence::Missing);
    }

    #[tokio::test]
    async fn test_forbidden_requires_auth() {
        let server = MockServer::start();
        let get = server.mock(|when, then| {
            when.method(GET)
                .path("/owner/private")
                .header("Authorization", "token ghp_abc");
            then.status(403);
        });

        let probe = HttpProbe::new().unwrap();
        let result = probe
            .access(&server.url("/owner/private"), "ghp_abc")
            .await
            .unwrap();

        get.assert();
        assert_eq!(result, AccessCheck::RequiresAuth);
    }

    #[tokio::test]
    async fn test_empty_token_is_tolerated() {
        let server = MockServer::start();
        let get = server.mock(|when, then| {
            when.method(GET).path("/owner/public");
            then.status(200).body("<html></html>");
        });

        let probe = HttpProbe::new().unwrap();
        let result = probe.access(&server.url("/owner/public"), "").await.unwrap();

        get.assert();
        assert_eq!(result, AccessCheck::Open);
    }

    #[tokio::test]
    async fn test_access_transport_error_propagates() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let probe = HttpProbe::new().unwrap();
        let result = probe
            .access(&format!("http://127.0.0.1:{}/owner/repo", port), "")
            .await;

        assert!(result.is_err());
    }
}
