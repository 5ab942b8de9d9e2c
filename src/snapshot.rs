//! Single-slot store for the light states captured before a scene change.
//!
//! There is exactly one snapshot: every scene evaluation overwrites it with
//! the lights of that scene. Restoring therefore brings back the lights of the
//! most recently evaluated scene, which is not necessarily the scene that is
//! being left. Restore is best-effort.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::bridge::Bridge;
use crate::error::AppError;
use crate::models::light_state::LightState;

/// Light id to the state it had when captured.
pub type Snapshot = BTreeMap<String, LightState>;

pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the stored snapshot. Failures are logged, never returned.
    pub async fn save(&self, snapshot: &Snapshot) {
        if let Err(err) = self.try_save(snapshot).await {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to save light snapshot");
        }
    }

    async fn try_save(&self, snapshot: &Snapshot) -> Result<(), AppError> {
        let body = serde_json::to_vec(snapshot)?;
        tokio::fs::write(&self.path, body).await?;
        tracing::debug!(path = %self.path.display(), lights = snapshot.len(), "saved light snapshot");
        Ok(())
    }

    /// The stored snapshot, or `None` when there is no usable one.
    pub async fn load(&self) -> Option<Snapshot> {
        let body = match tokio::fs::read(&self.path).await {
            Ok(body) => body,
            Err(err) => {
                tracing::info!(path = %self.path.display(), error = %err, "no light snapshot");
                return None;
            }
        };
        match serde_json::from_slice(&body) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "ignoring unreadable light snapshot");
                None
            }
        }
    }

    /// Put every light of the stored snapshot back to its recorded state.
    ///
    /// Returns `false` without touching any light when nothing is stored.
    pub async fn restore<B: Bridge>(&self, bridge: &B) -> Result<bool, AppError> {
        let Some(snapshot) = self.load().await else {
            return Ok(false);
        };

        for (light_id, state) in &snapshot {
            bridge.set_light_state(light_id, &state.command()).await?;
        }
        tracing::info!(lights = snapshot.len(), "restored last known light state");
        Ok(true)
    }
}
