pub mod output;
pub mod pair;
pub mod scene;
pub mod serve;

use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::api::client::HueClient;
use crate::api::pairing::DEFAULT_PAIRING_ATTEMPTS;
use crate::config::{bridge_address, DEFAULT_SNAPSHOT_PATH};
use crate::engine::SceneEngine;
use crate::error::AppError;
use crate::snapshot::SnapshotStore;

#[derive(Parser)]
#[command(
    name = "plexhue",
    version,
    about = "Drive Philips Hue scenes from Plex playback webhooks"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub bridge: BridgeArgs,

    /// Debug logging (bridge requests/responses, webhook bodies)
    #[arg(
        short,
        long,
        global = true,
        env = "DEBUG",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Listen for Plex webhooks
    Serve(serve::ServeArgs),

    /// Create a bridge username (press the bridge link button first)
    Pair {
        /// How many times to poll for the link button, one second apart
        #[arg(long, default_value_t = DEFAULT_PAIRING_ATTEMPTS)]
        attempts: u32,
    },

    /// Inspect and trigger bridge scenes
    #[command(subcommand)]
    Scene(scene::SceneCommand),
}

#[derive(Args, Debug, Clone)]
pub struct BridgeArgs {
    /// Bridge IP address or host name
    #[arg(long = "bridge-ip", env = "BRIDGE_IP", global = true)]
    pub bridge_ip: Option<String>,

    /// Bridge username, as printed by `plexhue pair`
    #[arg(
        long = "bridge-username",
        env = "BRIDGE_USERNAME",
        global = true,
        hide_env_values = true
    )]
    pub bridge_username: Option<String>,

    /// File holding the light states captured before the last scene change
    #[arg(
        long = "backup-file",
        env = "BACKUP_FILE",
        global = true,
        default_value = DEFAULT_SNAPSHOT_PATH
    )]
    pub backup_file: PathBuf,
}

impl BridgeArgs {
    pub fn address(&self) -> Result<String, AppError> {
        bridge_address(self.bridge_ip.as_deref())
    }

    pub fn username(&self) -> Result<String, AppError> {
        self.bridge_username
            .as_deref()
            .map(str::trim)
            .filter(|username| !username.is_empty())
            .map(str::to_string)
            .ok_or(AppError::NotPaired)
    }

    pub fn client(&self) -> Result<HueClient, AppError> {
        HueClient::new(&self.address()?, &self.username()?)
    }

    pub fn engine(&self) -> Result<SceneEngine<HueClient>, AppError> {
        Ok(SceneEngine::new(
            self.client()?,
            SnapshotStore::new(self.backup_file.clone()),
        ))
    }
}
