use serde::{Deserialize, Serialize};

/// Observable state of one light, as the bridge reports it and as it is sent back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightState {
    #[serde(default)]
    pub on: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bri: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ct: Option<u16>,
}

impl LightState {
    pub fn on(bri: Option<u8>, ct: Option<u16>) -> Self {
        Self { on: true, bri, ct }
    }

    pub fn off() -> Self {
        Self::default()
    }

    pub fn from_json(data: &serde_json::Value) -> Self {
        Self {
            on: data.get("on").and_then(|v| v.as_bool()).unwrap_or(false),
            bri: data
                .get("bri")
                .and_then(|v| v.as_u64())
                .and_then(|v| u8::try_from(v).ok()),
            ct: data
                .get("ct")
                .and_then(|v| v.as_u64())
                .and_then(|v| u16::try_from(v).ok()),
        }
    }

    /// The write that reproduces this state: brightness and colour temperature
    /// are only sent when the light is on.
    pub fn command(&self) -> Self {
        if self.on {
            Self::on(self.bri, self.ct)
        } else {
            Self::off()
        }
    }
}
