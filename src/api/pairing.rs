use std::time::Duration;

use serde_json::json;
use uuid::Uuid;

use super::client::{base_url, build_http_client};
use super::errors::ERR_LINK_BUTTON_NOT_PRESSED;
use super::response::ApiResponse;
use crate::error::AppError;

pub const DEFAULT_PAIRING_ATTEMPTS: u32 = 30;
pub const PAIRING_INTERVAL: Duration = Duration::from_secs(1);

/// Application name registered on the bridge, with a random instance suffix.
pub fn device_type() -> String {
    let instance = Uuid::new_v4().simple().to_string();
    format!("plexhue#{}", &instance[..8])
}

/// Register a new bridge user, polling while the link button has not been pressed.
pub async fn create_username(
    address: &str,
    device_type: &str,
    attempts: u32,
    interval: Duration,
) -> Result<String, AppError> {
    let client = build_http_client()?;
    let url = format!("{}/api", base_url(address));
    let body = json!({ "devicetype": device_type });
    let attempts = attempts.max(1);

    for attempt in 1..=attempts {
        tracing::debug!(%url, attempt, "requesting bridge username");
        let response = client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Bridge {
                message: format!("{}: {}", status, body),
                error_code: None,
            });
        }

        let items: Vec<ApiResponse> = response.json().await?;

        let username = items
            .iter()
            .filter_map(|item| item.success.as_ref())
            .find_map(|success| success.get("username").and_then(|v| v.as_str()));
        if let Some(username) = username {
            return Ok(username.to_string());
        }

        match items.into_iter().find_map(|item| item.error) {
            Some(err) if err.error_type == ERR_LINK_BUTTON_NOT_PRESSED => {
                if attempt < attempts {
                    tracing::info!(
                        attempt,
                        attempts,
                        "press the link button on the bridge to finish pairing"
                    );
                    tokio::time::sleep(interval).await;
                }
            }
            Some(err) => return Err(err.into_app_error()),
            None => {
                return Err(AppError::Bridge {
                    message: "Unexpected pairing response".into(),
                    error_code: None,
                })
            }
        }
    }

    Err(AppError::LinkButtonNotPressed)
}
