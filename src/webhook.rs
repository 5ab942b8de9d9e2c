//! Plex webhook payload and the decision of what a webhook should do.

use crate::config::Config;
use crate::models::event::PlaybackEvent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    pub local: Option<bool>,
    pub uuid: Option<String>,
}

/// The parts of a Plex webhook the lights care about.
///
/// Every field is optional; a field of the wrong type counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Webhook {
    pub event: Option<String>,
    pub player: Option<Player>,
}

impl Webhook {
    pub fn from_json(data: &serde_json::Value) -> Self {
        Self {
            event: data
                .get("event")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
            player: data.get("Player").filter(|v| v.is_object()).map(|player| Player {
                local: player.get("local").and_then(|v| v.as_bool()),
                uuid: player
                    .get("uuid")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string()),
            }),
        }
    }

    pub fn is_local(&self) -> Option<bool> {
        self.player.as_ref().and_then(|player| player.local)
    }

    pub fn player_uuid(&self) -> Option<&str> {
        self.player.as_ref().and_then(|player| player.uuid.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    RemotePlayer,
    MissingPlayerUuid,
    PlayerNotAllowed(String),
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnoreReason::RemotePlayer => f.write_str("player is not local"),
            IgnoreReason::MissingPlayerUuid => f.write_str("no player uuid in webhook"),
            IgnoreReason::PlayerNotAllowed(uuid) => {
                write!(f, "player {} is not allowed to drive the lights", uuid)
            }
        }
    }
}

/// What a webhook asks for once the player filters have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The payload has no event.
    NoEvent,
    Ignore(IgnoreReason),
    Activate { event: PlaybackEvent, scene: String },
    Restore { event: PlaybackEvent },
    /// Nothing is configured for this event.
    Nothing { event: String },
}

pub fn route(config: &Config, webhook: &Webhook) -> Route {
    let Some(event) = webhook.event.as_deref() else {
        return Route::NoEvent;
    };

    if config.local_player_only {
        match webhook.is_local() {
            Some(false) => return Route::Ignore(IgnoreReason::RemotePlayer),
            Some(true) => {}
            None => tracing::info!(event, "player locality unknown, processing anyway"),
        }
    }

    if let Some(allowed) = &config.allowed_players {
        let Some(uuid) = webhook.player_uuid() else {
            return Route::Ignore(IgnoreReason::MissingPlayerUuid);
        };
        if !allowed.iter().any(|candidate| candidate == uuid) {
            return Route::Ignore(IgnoreReason::PlayerNotAllowed(uuid.to_string()));
        }
    }

    let Some(known) = PlaybackEvent::from_name(event) else {
        tracing::info!(event, "unknown event");
        return Route::Nothing {
            event: event.to_string(),
        };
    };

    match config.scene_for(known) {
        Some(scene) => Route::Activate {
            event: known,
            scene: scene.to_string(),
        },
        None if known.restores_snapshot() => Route::Restore { event: known },
        None => Route::Nothing {
            event: event.to_string(),
        },
    }
}
