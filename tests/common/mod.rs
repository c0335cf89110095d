#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

use comments_api::app::{app, AppState};
use comments_api::auth::{generate_jwt, BearerToken, Claims, SharedAuthenticator, StaticCredentials};
use comments_api::config::AppConfig;
use comments_api::database::MemoryCommentStore;
use comments_api::services::CommentService;

pub const JWT_SECRET: &str = "integration-secret";
pub const BASIC_USER: &str = "admin";
pub const BASIC_PASSWORD: &str = "password";

/// A server bound to a free port on 127.0.0.1, backed by a fresh memory store.
/// It lives as long as the test's runtime.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn jwt() -> Result<Self> {
        Self::spawn(Arc::new(BearerToken::new(JWT_SECRET.as_bytes()))).await
    }

    pub async fn basic() -> Result<Self> {
        Self::spawn(Arc::new(StaticCredentials::new(BASIC_USER, BASIC_PASSWORD))).await
    }

    async fn spawn(authenticator: SharedAuthenticator) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test port")?;
        let state = AppState::new(CommentService::new(Arc::new(MemoryCommentStore::new())));
        let router = app(state, authenticator, &AppConfig::development());

        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let server = Self {
            port,
            base_url,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/api/healthz")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// A signed token the JWT server accepts
pub fn token(subject: &str) -> Result<String> {
    Ok(generate_jwt(&Claims::new(subject, 1), JWT_SECRET.as_bytes())?)
}
