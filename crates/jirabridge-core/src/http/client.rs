//! Jira REST API v3 client
//!
//! Thin verb-based wrapper: every call carries basic auth, JSON bodies are
//! sent for POST/PUT, and the response status is mapped onto [`Error`].
//! There is no retry or rate-limit handling.

use crate::error::{Error, Result};
use crate::jira::{Issue, Transition};
use crate::traits::IssueTracker;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = concat!("jirabridge/", env!("CARGO_PKG_VERSION"));
const MAX_ERROR_BODY: usize = 512;

/// Connection settings for a Jira site
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Site URL, e.g. `https://example.atlassian.net`
    pub base_url: String,
    /// Account email
    pub user_email: String,
    /// API token
    pub api_token: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("user_email", &self.user_email)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

impl ClientConfig {
    /// Create connection settings; a trailing `/` on the URL is dropped.
    pub fn new(base_url: String, user_email: String, api_token: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_email,
            api_token,
        }
    }

    /// REST API root
    pub fn api_root(&self) -> String {
        format!("{}/rest/api/3", self.base_url)
    }

}

/// Human-facing issue URL; a trailing `/` on `base_url` is ignored.
pub fn browse_url(base_url: &str, key: &str) -> String {
    format!("{}/browse/{}", base_url.trim_end_matches('/'), key)
}

#[derive(Debug, Deserialize)]
struct TransitionsResponse {
    #[serde(default)]
    transitions: Vec<Transition>,
}

/// Jira REST client
pub struct JiraClient {
    client: reqwest::Client,
    config: ClientConfig,
    api_root: String,
}

impl std::fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraClient")
            .field("api_root", &self.api_root)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl JiraClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let api_root = config.api_root();
        Self {
            client,
            config,
            api_root,
        }
    }

    /// `GET {api_root}{path}`
    pub async fn get(&self, path: &str) -> Result<Option<Value>> {
        self.request(Method::GET, path, None).await
    }

    /// `POST {api_root}{path}` with a JSON body
    pub async fn post(&self, path: &str, body: &Value) -> Result<Option<Value>> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// `PUT {api_root}{path}` with a JSON body
    pub async fn put(&self, path: &str, body: &Value) -> Result<Option<Value>> {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// `DELETE {api_root}{path}`
    pub async fn delete(&self, path: &str) -> Result<Option<Value>> {
        self.request(Method::DELETE, path, None).await
    }

    /// Send a request and map the response.
    ///
    /// `204` and empty bodies yield `Ok(None)`.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>> {
        let url = format!("{}{}", self.api_root, path);
        tracing::debug!(%method, %url, "jira request");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .basic_auth(&self.config.user_email, Some(&self.config.api_token))
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Http(format!("{} {} failed: {}", method, path, e)))?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            tracing::debug!(%method, path, "no content returned");
            return Ok(None);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(%method, path, status = status.as_u16(), "jira request failed");
            return Err(map_status(status, &method, path, &text));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::Http(format!("failed to read response body: {}", e)))?;

        if text.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&text)?))
    }
}

fn map_status(status: StatusCode, method: &Method, path: &str, body: &str) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::NotFound(format!("{} {}", method, path)),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Unauthorized(format!(
            "{} {} returned {}",
            method,
            path,
            status.as_u16()
        )),
        _ => Error::Api {
            status: status.as_u16(),
            body: body.chars().take(MAX_ERROR_BODY).collect(),
        },
    }
}

impl IssueTracker for JiraClient {
    async fn get_issue(&self, key: &str) -> Result<Issue> {
        let value = self
            .get(&format!("/issue/{}", key))
            .await?
            .ok_or_else(|| Error::NotFound(format!("issue {}", key)))?;
        Issue::from_value(&value)
    }

    async fn get_transitions(&self, key: &str) -> Result<Vec<Transition>> {
        let value = self
            .get(&format!("/issue/{}/transitions", key))
            .await?
            .unwrap_or(Value::Null);
        if value.is_null() {
            return Ok(Vec::new());
        }
        let response: TransitionsResponse = serde_json::from_value(value)?;
        Ok(response.transitions)
    }

    async fn do_transition(&self, key: &str, transition_id: &str) -> Result<()> {
        let body = serde_json::json!({ "transition": { "id": transition_id } });
        self.post(&format!("/issue/{}/transitions", key), &body)
            .await?;
        Ok(())
    }

    async fn add_comment(&self, key: &str, document: &Value) -> Result<Option<String>> {
        let body = serde_json::json!({ "body": document });
        let created = self
            .post(&format!("/issue/{}/comment", key), &body)
            .await?;
        Ok(created
            .as_ref()
            .and_then(|v| v.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string))
    }
}
