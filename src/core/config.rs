//! Picker configuration, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// How the BVH is descended during a query.
///
/// Both variants visit nodes in the same left-then-right order, so they
/// return bit-identical hit records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Traversal {
    /// Recursive descent, one call frame per visited node.
    #[default]
    Recursive,
    /// Iterative descent over an explicit node stack.
    Stack,
}

/// BVH construction and query settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BvhConfig {
    /// Nodes holding this many triangles or fewer are never split.
    pub leaf_size: u32,
    /// Descent strategy used by `Bvh::query`.
    pub traversal: Traversal,
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self {
            leaf_size: 2,
            traversal: Traversal::Recursive,
        }
    }
}

/// Target texture dimensions used to turn hit UVs into texels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
        }
    }
}

/// Top-level configuration for a mesh picker.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintConfig {
    pub bvh: BvhConfig,
    pub texture: TextureConfig,
}

impl PaintConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PaintConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::debug!("Loaded paint config from {}", path.display());
        Ok(config)
    }

    /// Write this config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.bvh.leaf_size == 0 {
            return Err(Error::Config("bvh.leaf_size must be at least 1".into()));
        }
        if self.texture.width == 0 || self.texture.height == 0 {
            return Err(Error::Config(format!(
                "texture size must be non-zero, got {}x{}",
                self.texture.width, self.texture.height
            )));
        }
        Ok(())
    }
}
