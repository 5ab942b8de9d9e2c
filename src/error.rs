#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unknown bridge IP. Please set it via env variable BRIDGE_IP")]
    MissingBridgeAddress,

    #[error("No bridge username. Run 'plexhue pair' and set BRIDGE_USERNAME.")]
    NotPaired,

    #[error("Link button not pressed on the bridge")]
    LinkButtonNotPressed,

    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
        error_code: Option<i32>,
    },

    #[error("Scene not found: {0}")]
    SceneNotFound(String),

    #[error("Bridge error: {message}")]
    Bridge {
        message: String,
        error_code: Option<i32>,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::MissingBridgeAddress
            | AppError::NotPaired
            | AppError::Unauthorized { .. } => 2,
            AppError::SceneNotFound(_) => 3,
            AppError::LinkButtonNotPressed => 4,
            _ => 1,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MissingBridgeAddress => "missing_bridge_address",
            AppError::NotPaired => "not_paired",
            AppError::LinkButtonNotPressed => "link_button_not_pressed",
            AppError::Unauthorized { .. } => "unauthorized",
            AppError::SceneNotFound(_) => "scene_not_found",
            AppError::Bridge { .. } => "bridge",
            AppError::Http(_) => "http",
            AppError::Json(_) => "json",
            AppError::Io(_) => "io",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "error": self.error_type(),
            "message": self.to_string(),
        });
        if let Some(code) = self.bridge_error_code() {
            obj["error_code"] = serde_json::json!(code);
        }
        obj
    }

    fn bridge_error_code(&self) -> Option<i32> {
        match self {
            AppError::Unauthorized { error_code, .. } | AppError::Bridge { error_code, .. } => {
                *error_code
            }
            _ => None,
        }
    }
}
