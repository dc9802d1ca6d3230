use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use tokio::sync::Mutex;

use super::gateway::{ConfigStore, StoreError};
use crate::config::StoreConfig;

const CONFIGS_PATH: &str = "/nacos/v1/cs/configs";
const LOGIN_PATH: &str = "/nacos/v1/auth/login";
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(30);

/// Nacos v1 open API, addressed over plain HTTP.
pub struct NacosStore {
    base_url: String,
    namespace: String,
    credentials: Option<(String, String)>,
    timeout: Duration,
    client: Client,
    token: Mutex<Option<AccessToken>>,
}

struct AccessToken {
    value: String,
    expires_at: Instant,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
    #[serde(default = "default_token_ttl")]
    token_ttl: u64,
}

fn default_token_ttl() -> u64 {
    18_000
}

impl NacosStore {
    pub fn new(cfg: &StoreConfig) -> Result<Self, StoreError> {
        let timeout = Duration::from_millis(cfg.timeout_ms);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let credentials = cfg
            .username
            .as_ref()
            .filter(|u| !u.is_empty())
            .map(|u| (u.clone(), cfg.password.clone().unwrap_or_default()));

        Ok(Self {
            base_url: base_url(&cfg.server_addr),
            namespace: cfg.namespace.clone(),
            credentials,
            timeout,
            client,
            token: Mutex::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn configs_url(&self) -> String {
        format!("{}{CONFIGS_PATH}", self.base_url)
    }

    async fn access_token(&self) -> Result<Option<String>, StoreError> {
        let Some((username, password)) = &self.credentials else {
            return Ok(None);
        };

        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(Some(token.value.clone()));
            }
        }

        let resp = self
            .client
            .post(format!("{}{LOGIN_PATH}", self.base_url))
            .timeout(self.timeout)
            .form(&[("username", username.as_str()), ("password", password.as_str())])
            .send()
            .await
            .map_err(request_error)?;

        if !resp.status().is_success() {
            return Err(StoreError::Unavailable(format!("login failed: {}", resp.status())));
        }

        let login: LoginResponse = resp.json().await.map_err(request_error)?;
        let ttl = Duration::from_secs(login.token_ttl).saturating_sub(TOKEN_REFRESH_MARGIN);
        tracing::debug!(ttl_secs = ttl.as_secs(), "nacos access token refreshed");

        *cached = Some(AccessToken {
            value: login.access_token.clone(),
            expires_at: Instant::now() + ttl,
        });
        Ok(Some(login.access_token))
    }

    async fn authorized(&self, mut req: RequestBuilder) -> Result<RequestBuilder, StoreError> {
        if let Some(token) = self.access_token().await? {
            req = req.query(&[("accessToken", token)]);
        }
        Ok(req)
    }
}

#[async_trait]
impl ConfigStore for NacosStore {
    fn name(&self) -> &str {
        "nacos"
    }

    async fn get_config(
        &self,
        data_id: &str,
        group: &str,
        timeout_ms: u64,
    ) -> Result<Option<String>, StoreError> {
        let req = self
            .client
            .get(self.configs_url())
            .timeout(Duration::from_millis(timeout_ms))
            .query(&[("dataId", data_id), ("group", group)]);
        let req = if self.namespace.is_empty() {
            req
        } else {
            req.query(&[("tenant", self.namespace.as_str())])
        };

        let resp = self.authorized(req).await?.send().await.map_err(request_error)?;

        match resp.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body = resp.text().await.map_err(request_error)?;
                Ok(Some(body))
            }
            status => Err(StoreError::Unavailable(format!("get config: {status}"))),
        }
    }

    async fn publish_config(
        &self,
        data_id: &str,
        group: &str,
        content: &str,
    ) -> Result<bool, StoreError> {
        let mut form = vec![
            ("dataId", data_id),
            ("group", group),
            ("content", content),
            ("type", "json"),
        ];
        if !self.namespace.is_empty() {
            form.push(("tenant", self.namespace.as_str()));
        }

        let req = self.client.post(self.configs_url()).form(&form);
        let resp = self.authorized(req).await?.send().await.map_err(request_error)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(StoreError::Unavailable(format!("publish config: {status}")));
        }
        let body = resp.text().await.map_err(request_error)?;
        Ok(body.trim() == "true")
    }
}

fn base_url(server_addr: &str) -> String {
    let addr = server_addr.trim().trim_end_matches('/');
    if addr.starts_with("http://") || addr.starts_with("https://") {
        addr.to_string()
    } else {
        format!("http://{addr}")
    }
}

fn request_error(e: reqwest::Error) -> StoreError {
    if e.is_timeout() {
        StoreError::Timeout
    } else {
        StoreError::Unavailable(e.to_string())
    }
}
