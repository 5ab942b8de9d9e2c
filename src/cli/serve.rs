use clap::{ArgAction, Args};

use crate::api::pairing::{self, DEFAULT_PAIRING_ATTEMPTS, PAIRING_INTERVAL};
use crate::cli::BridgeArgs;
use crate::config::{Config, DEFAULT_PORT};
use crate::error::AppError;
use crate::models::event::PlaybackEvent;
use crate::server;

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "LISTEN_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Ignore webhooks from players Plex does not report as local
    #[arg(
        long,
        env = "LOCAL_PLAYER_ONLY",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = parse_local_player_only
    )]
    pub local_player_only: bool,

    /// Comma separated player uuids allowed to drive the lights
    #[arg(long = "players-uuid", env = "PLAYERS_UUID", value_delimiter = ',')]
    pub players_uuid: Vec<String>,

    /// Scene for media.play
    #[arg(long, env = "MEDIA_PLAY")]
    pub media_play: Option<String>,

    /// Scene for media.pause (unset: restore the saved light state)
    #[arg(long, env = "MEDIA_PAUSE")]
    pub media_pause: Option<String>,

    /// Scene for media.resume
    #[arg(long, env = "MEDIA_RESUME")]
    pub media_resume: Option<String>,

    /// Scene for media.stop (unset: restore the saved light state)
    #[arg(long, env = "MEDIA_STOP")]
    pub media_stop: Option<String>,

    /// Scene for media.scrobble
    #[arg(long, env = "MEDIA_SCOBBLE")]
    pub media_scobble: Option<String>,

    /// Scene for media.rate
    #[arg(long, env = "MEDIA_RATE")]
    pub media_rate: Option<String>,

    /// Link button polls when pairing at startup
    #[arg(long, default_value_t = DEFAULT_PAIRING_ATTEMPTS)]
    pub pairing_attempts: u32,
}

/// Boolean spellings accepted for `LOCAL_PLAYER_ONLY`; empty keeps the default.
fn parse_local_player_only(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        other => Err(format!("expected a boolean, got '{}'", other)),
    }
}

impl ServeArgs {
    pub fn scene_setting(&self, event: PlaybackEvent) -> Option<&str> {
        let setting = match event {
            PlaybackEvent::Play => &self.media_play,
            PlaybackEvent::Pause => &self.media_pause,
            PlaybackEvent::Resume => &self.media_resume,
            PlaybackEvent::Stop => &self.media_stop,
            PlaybackEvent::Scrobble => &self.media_scobble,
            PlaybackEvent::Rate => &self.media_rate,
        };
        setting.as_deref()
    }
}

pub async fn handle(bridge: &BridgeArgs, args: &ServeArgs) -> Result<(), AppError> {
    let address = bridge.address()?;

    let username = match bridge.username() {
        Ok(username) => username,
        Err(AppError::NotPaired) => {
            tracing::warn!(bridge = %address, "no bridge username, pairing");
            let username = pairing::create_username(
                &address,
                &pairing::device_type(),
                args.pairing_attempts,
                PAIRING_INTERVAL,
            )
            .await?;
            tracing::warn!(
                %username,
                "paired with bridge, set BRIDGE_USERNAME to keep this username across restarts"
            );
            username
        }
        Err(err) => return Err(err),
    };

    let config = Config::resolve(bridge, args, username)?;
    server::serve(config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn serve_args(extra: &[&str]) -> ServeArgs {
        let mut argv = vec!["plexhue", "--bridge-ip", "10.0.0.2", "serve"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Serve(args) => args,
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_local_player_only_spellings() {
        for raw in ["1", "true", "Yes", "on", " y "] {
            assert_eq!(parse_local_player_only(raw), Ok(true), "{raw:?}");
        }
        for raw in ["0", "false", "NO", "off", "n"] {
            assert_eq!(parse_local_player_only(raw), Ok(false), "{raw:?}");
        }
        assert!(parse_local_player_only("maybe").is_err());
    }

    #[test]
    fn test_empty_local_player_only_keeps_default() {
        assert!(serve_args(&["--local-player-only="]).local_player_only);
        assert!(!serve_args(&["--local-player-only", "0"]).local_player_only);
    }
}
