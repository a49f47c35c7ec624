//! Codec configuration, persisted as TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::glyph::Strictness;
use crate::grid::LayoutMode;
use crate::numeral::Modulus;
use crate::raster::geometry::CellGeometry;

/// Result type for config operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Everything needed to build a [`Codec`](crate::codec::Codec).
///
/// Every field has a default, so a partial file (or an empty one) loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Size of the character-code space; codes must be below it.
    #[serde(default = "default_modulus")]
    pub modulus: u32,
    /// Cell arrangement used when encoding.
    #[serde(default)]
    pub layout: LayoutMode,
    /// Treatment of quadrants that match no reference glyph.
    #[serde(default)]
    pub strictness: Strictness,
    /// Drop trailing all-background cells when decoding.
    #[serde(default = "default_trim_padding")]
    pub trim_padding: bool,
    /// Glyph asset directory. Unset means the procedurally drawn set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_dir: Option<PathBuf>,
    /// Cell size and quadrant split.
    #[serde(default)]
    pub geometry: CellGeometry,
}

fn default_modulus() -> u32 {
    Modulus::ASCII.get()
}
fn default_trim_padding() -> bool {
    true
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            modulus: default_modulus(),
            layout: LayoutMode::default(),
            strictness: Strictness::default(),
            trim_padding: default_trim_padding(),
            library_dir: None,
            geometry: CellGeometry::default(),
        }
    }
}

impl CodecConfig {
    /// The modulus as a checked value.
    pub fn checked_modulus(&self) -> ConfigResult<Modulus> {
        Modulus::new(self.modulus)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.checked_modulus()?;
        self.geometry.validate()
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), modulus = config.modulus, "loaded config");
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: "<config>".into(),
            message: e.to_string(),
        })
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}
