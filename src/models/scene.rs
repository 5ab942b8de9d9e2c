use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::light_state::LightState;

/// One entry of the bridge's scene list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSummary {
    pub name: String,
    #[serde(default)]
    pub lights: Vec<String>,
}

/// A scene with the target state of each member light.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneDetails {
    pub name: String,
    #[serde(default)]
    pub lightstates: BTreeMap<String, LightState>,
}

/// Find the id of the scene called `name`.
///
/// Names are matched exactly. The bridge does not enforce unique names; when
/// several scenes share one, the last in id order is returned.
pub fn find_scene_id<'a>(scenes: &'a BTreeMap<String, SceneSummary>, name: &str) -> Option<&'a str> {
    scenes
        .iter()
        .rev()
        .find(|(_, scene)| scene.name == name)
        .map(|(id, _)| id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scenes() -> BTreeMap<String, SceneSummary> {
        serde_json::from_value(json!({
            "abc": {"name": "Movie Night", "lights": ["1", "2"], "type": "LightScene"},
            "def": {"name": "Relax", "lights": ["3"]},
            "xyz": {"name": "Movie Night", "lights": ["4"]}
        }))
        .unwrap()
    }

    #[test]
    fn test_find_scene_exact_match() {
        assert_eq!(find_scene_id(&scenes(), "Relax"), Some("def"));
        assert_eq!(find_scene_id(&scenes(), "relax"), None);
        assert_eq!(find_scene_id(&scenes(), "Reading"), None);
    }

    #[test]
    fn test_find_scene_duplicate_name_uses_last() {
        assert_eq!(find_scene_id(&scenes(), "Movie Night"), Some("xyz"));
    }

    #[test]
    fn test_scene_details_parse_lightstates() {
        let details: SceneDetails = serde_json::from_value(json!({
            "name": "Movie Night",
            "lights": ["1", "2"],
            "lightstates": {
                "1": {"on": true, "bri": 150, "ct": 250},
                "2": {"on": false}
            }
        }))
        .unwrap();
        assert_eq!(details.lightstates["1"], LightState::on(Some(150), Some(250)));
        assert_eq!(details.lightstates["2"], LightState::off());
    }
}
