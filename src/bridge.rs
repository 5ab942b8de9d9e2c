//! The slice of the lighting bridge API that scene handling needs.

use std::collections::BTreeMap;
use std::future::Future;

use crate::error::AppError;
use crate::models::light_state::LightState;
use crate::models::scene::{SceneDetails, SceneSummary};

pub trait Bridge: Send + Sync {
    /// All scenes known to the bridge, keyed by scene id.
    fn list_scenes(
        &self,
    ) -> impl Future<Output = Result<BTreeMap<String, SceneSummary>, AppError>> + Send;

    /// A scene's member lights and their target states.
    fn get_scene(&self, scene_id: &str)
        -> impl Future<Output = Result<SceneDetails, AppError>> + Send;

    /// Live state of one light.
    fn get_light_state(
        &self,
        light_id: &str,
    ) -> impl Future<Output = Result<LightState, AppError>> + Send;

    fn set_light_state(
        &self,
        light_id: &str,
        state: &LightState,
    ) -> impl Future<Output = Result<(), AppError>> + Send;
}
