#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;

use mummoom_api_rust::auth::JwtKeys;
use mummoom_api_rust::config::AppConfig;
use mummoom_api_rust::database::{MemoryStore, Repositories};
use mummoom_api_rust::{app, AppState};

pub const ALICE: &str = "alice@mummoom.com";
pub const BOB: &str = "bob@mummoom.com";

/// In-process server on a free port, backed by the memory store
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub keys: JwtKeys,
    client: Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(MemoryStore::new());
        store.add_user(ALICE, "alice").await;
        store.add_user(BOB, "bob").await;

        let keys = JwtKeys::new("integration-test-secret", 1)?;
        let state = AppState::new(Repositories::memory(store.clone()), keys.clone());
        let router = app(state, &AppConfig::development());

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test port")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let server = Self {
            base_url,
            store,
            keys,
            client: Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status().is_success() {
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

    pub fn token(&self, email: &str) -> Result<String> {
        Ok(self.keys.generate_jwt(email)?)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    /// Request with a bearer token for `email`
    pub fn as_user(&self, method: reqwest::Method, path: &str, email: &str) -> Result<RequestBuilder> {
        Ok(self
            .client
            .request(method, self.url(path))
            .bearer_auth(self.token(email)?))
    }
}

/// Decode an envelope, returning the transport status alongside it
pub async fn envelope(resp: Response) -> Result<(u16, Value)> {
    let status = resp.status().as_u16();
    let body = resp.json::<Value>().await.context("response was not JSON")?;
    Ok((status, body))
}
