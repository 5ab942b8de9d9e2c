use serde::Serialize;

use crate::bridge::Bridge;
use crate::error::AppError;
use crate::models::scene::find_scene_id;
use crate::snapshot::{Snapshot, SnapshotStore};

/// Outcome of a scene activation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// The scene was written to its lights.
    Applied,
    /// Every light of the scene was off, so nothing changed.
    LightsOff,
    SceneNotFound,
}

impl Activation {
    pub fn activated(&self) -> bool {
        matches!(self, Activation::Applied)
    }
}

pub struct SceneEngine<B> {
    bridge: B,
    snapshots: SnapshotStore,
}

impl<B: Bridge> SceneEngine<B> {
    pub fn new(bridge: B, snapshots: SnapshotStore) -> Self {
        Self { bridge, snapshots }
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Apply the scene called `name`, but only when the room is already lit.
    ///
    /// The live state of the scene's lights is captured first and saved as the
    /// snapshot, whether or not the scene is applied.
    pub async fn activate_scene(&self, name: &str) -> Result<Activation, AppError> {
        let scenes = self.bridge.list_scenes().await?;
        let Some(scene_id) = find_scene_id(&scenes, name) else {
            tracing::warn!(scene = name, "no scene with this name on the bridge");
            return Ok(Activation::SceneNotFound);
        };

        let scene = self.bridge.get_scene(scene_id).await?;

        let mut snapshot = Snapshot::new();
        for light_id in scene.lightstates.keys() {
            let state = self.bridge.get_light_state(light_id).await?;
            snapshot.insert(light_id.clone(), state);
        }

        if snapshot.values().all(|state| !state.on) {
            self.snapshots.save(&snapshot).await;
            return Ok(Activation::LightsOff);
        }

        for (light_id, target) in &scene.lightstates {
            self.bridge
                .set_light_state(light_id, &target.command())
                .await?;
        }
        self.snapshots.save(&snapshot).await;

        Ok(Activation::Applied)
    }

    /// Bring back the lights recorded by the last scene evaluation.
    pub async fn restore_snapshot(&self) -> Result<bool, AppError> {
        self.snapshots.restore(&self.bridge).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::fake::FakeBridge;
    use crate::models::light_state::LightState;

    fn movie_night() -> FakeBridge {
        FakeBridge::default().with_scene(
            "scene-1",
            "Movie Night",
            &[
                ("A", LightState::on(Some(150), Some(250))),
                ("B", LightState::off()),
            ],
        )
    }

    fn engine(bridge: FakeBridge, dir: &tempfile::TempDir) -> SceneEngine<FakeBridge> {
        SceneEngine::new(bridge, SnapshotStore::new(dir.path().join("state")))
    }

    #[tokio::test]
    async fn test_all_lights_off_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = movie_night()
            .with_light("A", LightState::off())
            .with_light("B", LightState::off());
        let engine = engine(bridge, &dir);

        let outcome = engine.activate_scene("Movie Night").await.unwrap();

        assert_eq!(outcome, Activation::LightsOff);
        assert!(!outcome.activated());
        assert!(engine.bridge().writes().is_empty());

        let saved = SnapshotStore::new(dir.path().join("state")).load().await.unwrap();
        let mut expected = Snapshot::new();
        expected.insert("A".into(), LightState::off());
        expected.insert("B".into(), LightState::off());
        assert_eq!(saved, expected);
    }

    #[tokio::test]
    async fn test_lit_room_applies_scene_and_saves_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = movie_night()
            .with_light("A", LightState::off())
            .with_light("B", LightState::on(Some(254), Some(366)));
        let engine = engine(bridge, &dir);

        let outcome = engine.activate_scene("Movie Night").await.unwrap();

        assert_eq!(outcome, Activation::Applied);
        assert!(outcome.activated());
        assert_eq!(
            engine.bridge().writes(),
            vec![
                ("A".to_string(), LightState::on(Some(150), Some(250))),
                ("B".to_string(), LightState::off()),
            ]
        );

        let saved = SnapshotStore::new(dir.path().join("state")).load().await.unwrap();
        assert_eq!(saved["A"], LightState::off());
        assert_eq!(saved["B"], LightState::on(Some(254), Some(366)));
    }

    #[tokio::test]
    async fn test_unknown_scene_is_noop_without_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = movie_night().with_light("A", LightState::on(Some(10), None));
        let engine = engine(bridge, &dir);

        let outcome = engine.activate_scene("movie night").await.unwrap();

        assert_eq!(outcome, Activation::SceneNotFound);
        assert!(engine.bridge().writes().is_empty());
        assert!(!dir.path().join("state").exists());
    }

    #[tokio::test]
    async fn test_activate_then_restore_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = movie_night()
            .with_light("A", LightState::on(Some(254), Some(300)))
            .with_light("B", LightState::on(Some(100), Some(200)));
        let engine = engine(bridge, &dir);

        engine.activate_scene("Movie Night").await.unwrap();
        assert!(engine.restore_snapshot().await.unwrap());

        let writes = engine.bridge().writes();
        assert_eq!(writes.len(), 4);
        assert_eq!(writes[2], ("A".to_string(), LightState::on(Some(254), Some(300))));
        assert_eq!(writes[3], ("B".to_string(), LightState::on(Some(100), Some(200))));
    }

    #[tokio::test]
    async fn test_bridge_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine(movie_night().offline(), &dir);

        let result = engine.activate_scene("Movie Night").await;

        assert!(matches!(result, Err(AppError::Bridge { .. })));
    }
}
