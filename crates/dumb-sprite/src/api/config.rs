use serde::{Deserialize, Serialize};

/// Engine configuration, usually shipped next to the atlas manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of live sprite instances (default: 1024).
    pub max_sprites: usize,
    /// Viewport width in pixels (default: 800).
    pub viewport_width: f32,
    /// Viewport height in pixels (default: 600).
    pub viewport_height: f32,
    /// Pixels per world unit (default: 1.0).
    pub viewport_scale: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_sprites: 1024,
            viewport_width: 800.0,
            viewport_height: 600.0,
            viewport_scale: 1.0,
        }
    }
}

impl EngineConfig {
    /// Parse a config from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
