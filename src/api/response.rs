use serde::Deserialize;

use super::errors::*;
use crate::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct BridgeErrorBody {
    #[serde(rename = "type")]
    pub error_type: i32,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
}

/// One element of the `[{"success": ..}, {"error": ..}]` list the bridge
/// returns for writes.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub success: Option<serde_json::Value>,
    pub error: Option<BridgeErrorBody>,
}

impl BridgeErrorBody {
    pub fn into_app_error(self) -> AppError {
        let message = if self.address.is_empty() {
            self.description
        } else {
            format!("{} ({})", self.description, self.address)
        };
        match self.error_type {
            ERR_UNAUTHORIZED_USER => AppError::Unauthorized {
                message,
                error_code: Some(self.error_type),
            },
            ERR_LINK_BUTTON_NOT_PRESSED => AppError::LinkButtonNotPressed,
            _ => AppError::Bridge {
                message,
                error_code: Some(self.error_type),
            },
        }
    }
}

/// First error in a bridge response body.
///
/// Reads answer failures with an error list instead of the usual object, so
/// any body may carry one.
pub fn first_error(body: &serde_json::Value) -> Option<BridgeErrorBody> {
    body.as_array()?
        .iter()
        .filter_map(|item| item.get("error"))
        .find_map(|err| serde_json::from_value(err.clone()).ok())
}
