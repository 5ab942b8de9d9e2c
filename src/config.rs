use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::cli::serve::ServeArgs;
use crate::cli::BridgeArgs;
use crate::error::AppError;
use crate::models::event::PlaybackEvent;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SNAPSHOT_PATH: &str = "/tmp/last_known_state";

#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub address: String,
    pub username: String,
}

/// Settings of the webhook listener, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bridge: BridgeConfig,
    pub local_player_only: bool,
    /// `None` disables filtering by player uuid.
    pub allowed_players: Option<Vec<String>>,
    pub snapshot_path: PathBuf,
    pub scenes: BTreeMap<PlaybackEvent, Option<String>>,
}

impl Config {
    pub fn resolve(
        bridge: &BridgeArgs,
        args: &ServeArgs,
        username: String,
    ) -> Result<Self, AppError> {
        let scenes = PlaybackEvent::ALL
            .into_iter()
            .map(|event| (event, scene_name(args.scene_setting(event))))
            .collect();

        Ok(Self {
            port: args.port,
            bridge: BridgeConfig {
                address: bridge_address(bridge.bridge_ip.as_deref())?,
                username,
            },
            local_player_only: args.local_player_only,
            allowed_players: allowed_players(&args.players_uuid),
            snapshot_path: bridge.backup_file.clone(),
            scenes,
        })
    }

    pub fn scene_for(&self, event: PlaybackEvent) -> Option<&str> {
        self.scenes.get(&event).and_then(|scene| scene.as_deref())
    }
}

pub fn bridge_address(raw: Option<&str>) -> Result<String, AppError> {
    raw.map(str::trim)
        .filter(|address| !address.is_empty())
        .map(str::to_string)
        .ok_or(AppError::MissingBridgeAddress)
}

/// Trimmed, non-empty player uuids; `None` when nothing usable is listed.
pub fn allowed_players(raw: &[String]) -> Option<Vec<String>> {
    let players: Vec<String> = raw
        .iter()
        .map(|uuid| uuid.trim())
        .filter(|uuid| !uuid.is_empty())
        .map(str::to_string)
        .collect();
    if players.is_empty() {
        None
    } else {
        Some(players)
    }
}

pub fn scene_name(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
impl Config {
    pub fn for_tests(snapshot_path: PathBuf) -> Self {
        Self {
            port: DEFAULT_PORT,
            bridge: BridgeConfig {
                address: "127.0.0.1".into(),
                username: "test-user".into(),
            },
            local_player_only: true,
            allowed_players: None,
            snapshot_path,
            scenes: PlaybackEvent::ALL
                .into_iter()
                .map(|event| (event, None))
                .collect(),
        }
    }

    pub fn with_scene(mut self, event: PlaybackEvent, scene: &str) -> Self {
        self.scenes.insert(event, Some(scene.to_string()));
        self
    }
}
