use std::collections::BTreeMap;

use reqwest::Method;

use super::response::first_error;
use crate::bridge::Bridge;
use crate::error::AppError;
use crate::models::light_state::LightState;
use crate::models::scene::{SceneDetails, SceneSummary};

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// HTTP client for the Hue bridge's v1 REST API.
pub struct HueClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
}

pub(crate) fn build_http_client() -> Result<reqwest::Client, AppError> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("plexhue/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?)
}

/// Bridges are usually configured by bare IP; tests point at a full URL.
pub fn base_url(address: &str) -> String {
    let address = address.trim().trim_end_matches('/');
    if address.starts_with("http://") || address.starts_with("https://") {
        address.to_string()
    } else {
        format!("http://{}", address)
    }
}

impl HueClient {
    pub fn new(address: &str, username: &str) -> Result<Self, AppError> {
        Ok(Self {
            client: build_http_client()?,
            base_url: base_url(address),
            username: username.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/api/{}{}", self.base_url, self.username, path);
        tracing::debug!(%method, path, body = ?body, "bridge request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Bridge {
                message: format!("{}: {}", status, body),
                error_code: None,
            });
        }

        let value: serde_json::Value = response.json().await?;
        tracing::debug!(path, response = %value, "bridge response");
        if let Some(err) = first_error(&value) {
            return Err(err.into_app_error());
        }
        Ok(value)
    }
}

impl Bridge for HueClient {
    async fn list_scenes(&self) -> Result<BTreeMap<String, SceneSummary>, AppError> {
        let value = self.request(Method::GET, "/scenes", None).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get_scene(&self, scene_id: &str) -> Result<SceneDetails, AppError> {
        let value = self
            .request(Method::GET, &format!("/scenes/{}", scene_id), None)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get_light_state(&self, light_id: &str) -> Result<LightState, AppError> {
        let value = self
            .request(Method::GET, &format!("/lights/{}", light_id), None)
            .await?;
        value
            .get("state")
            .map(LightState::from_json)
            .ok_or_else(|| AppError::Bridge {
                message: format!("light {} reported no state", light_id),
                error_code: None,
            })
    }

    async fn set_light_state(&self, light_id: &str, state: &LightState) -> Result<(), AppError> {
        let body = serde_json::to_value(state.command())?;
        self.request(
            Method::PUT,
            &format!("/lights/{}/state", light_id),
            Some(&body),
        )
        .await?;
        Ok(())
    }
}
