use serde::{Deserialize, Serialize};

/// Atlas manifest describing the texture pages, sprite definitions and
/// animations of an atlas. Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasManifest {
    /// Width of every texture page in pixels.
    pub width: u32,
    /// Height of every texture page in pixels.
    pub height: u32,
    /// Number of definition slots. Defaults to the highest sprite id + 1.
    #[serde(default)]
    pub capacity: Option<usize>,
    /// Image paths, one per texture layer. Loading them is up to the GPU back end.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sprites: Vec<SpriteDescriptor>,
    #[serde(default)]
    pub animations: Vec<AnimationDescriptor>,
}

/// Describes a single sprite definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    /// Definition slot.
    pub id: u32,
    /// Pixel rectangle: x, y, width, height.
    pub rect: [u32; 4],
    /// Logical origin relative to the rectangle's top-left corner.
    #[serde(default)]
    pub anchor: [f32; 2],
    /// Texture layer (index into `images`).
    #[serde(default)]
    pub layer: u32,
}

/// Describes a frame sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationDescriptor {
    pub id: u32,
    pub frames: Vec<FrameDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameDescriptor {
    /// Sprite definition id shown during the frame.
    pub sprite: u32,
    /// Seconds on screen.
    #[serde(default = "default_duration")]
    pub duration: f32,
}

fn default_duration() -> f32 {
    0.1
}

impl AtlasManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Definition slots the atlas needs for this manifest.
    pub fn definition_capacity(&self) -> usize {
        self.capacity.unwrap_or_else(|| {
            self.sprites
                .iter()
                .map(|s| s.id as usize + 1)
                .max()
                .unwrap_or(0)
        })
    }
}
