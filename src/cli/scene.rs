use clap::Subcommand;
use serde_json::json;

use crate::bridge::Bridge;
use crate::cli::output::print_json;
use crate::cli::BridgeArgs;
use crate::engine::Activation;
use crate::error::AppError;

#[derive(Subcommand)]
pub enum SceneCommand {
    /// List scenes defined on the bridge
    List,

    /// Apply a scene, unless all of its lights are off
    Activate {
        /// Scene name (exact, case-sensitive)
        name: String,
    },

    /// Put back the light state saved before the last scene change
    Restore,
}

pub async fn handle(cmd: &SceneCommand, bridge: &BridgeArgs) -> Result<(), AppError> {
    match cmd {
        SceneCommand::List => {
            let client = bridge.client()?;
            let scenes = client.list_scenes().await?;
            let list: Vec<serde_json::Value> = scenes
                .iter()
                .map(|(id, scene)| json!({"id": id, "name": scene.name, "lights": scene.lights}))
                .collect();
            print_json(&json!(list));
            Ok(())
        }
        SceneCommand::Activate { name } => {
            let engine = bridge.engine()?;
            let outcome = engine.activate_scene(name).await?;
            if outcome == Activation::SceneNotFound {
                return Err(AppError::SceneNotFound(name.clone()));
            }
            print_json(&json!({
                "scene": name,
                "outcome": outcome,
                "activated": outcome.activated(),
            }));
            Ok(())
        }
        SceneCommand::Restore => {
            let engine = bridge.engine()?;
            let restored = engine.restore_snapshot().await?;
            print_json(&json!({
                "restored": restored,
                "backup_file": bridge.backup_file.display().to_string(),
            }));
            Ok(())
        }
    }
}
