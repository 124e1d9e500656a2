//! HUD placement preferences, persisted as RON between runs.

use std::path::{Path, PathBuf};

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

/// Errors that can occur while loading or saving HUD preferences.
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("failed to read hud prefs: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("failed to write hud prefs: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("failed to parse hud prefs: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    #[error("failed to serialize hud prefs: {0}")]
    SerializeError(#[source] ron::Error)
}

/// Serialized as a lowercase string.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HudAlign {
    Left,
    Center,
    Right
}

impl Default for HudAlign {
    fn default() -> Self {
        HudAlign::Center
    }
}

impl From<HudAlign> for String {
    fn from(align: HudAlign) -> Self {
        match align {
            HudAlign::Left => "left",
            HudAlign::Center => "center",
            HudAlign::Right => "right"
        }.to_string()
    }
}

impl TryFrom<String> for HudAlign {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "left" => Ok(HudAlign::Left),
            "center" => Ok(HudAlign::Center),
            "right" => Ok(HudAlign::Right),
            _ => Err(format!("unknown hud alignment `{}`", value))
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredPrefs")]
pub struct HudPrefs {
    /// Shift of the whole HUD in reference pixels.
    pub offset_x: f32,
    pub offset_y: f32,
    /// Text height in reference pixels.
    pub text_size: f32,
    /// Alignment of the center text block.
    pub align: HudAlign,
    /// Kept for older preference files, currently not read by the layout.
    pub ratio_from_center: f32,
    pub show_hud: bool
}

impl Default for HudPrefs {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            text_size: 14.0,
            align: HudAlign::Center,
            ratio_from_center: 0.24,
            show_hud: true
        }
    }
}

/// A field value that either has the expected type or is skipped.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Valid(T),
    Invalid(IgnoredAny)
}

impl<T> Default for Lenient<T> {
    fn default() -> Self {
        Lenient::Invalid(IgnoredAny)
    }
}

impl<T> Lenient<T> {
    fn or(self, fallback: T) -> T {
        match self {
            Lenient::Valid(value) => value,
            Lenient::Invalid(_) => fallback
        }
    }
}

/// On-disk shape of the prefs; every field falls back on its own.
#[derive(Default, Deserialize)]
#[serde(default)]
struct StoredPrefs {
    offset_x: Lenient<f32>,
    offset_y: Lenient<f32>,
    text_size: Lenient<f32>,
    align: Lenient<HudAlign>,
    ratio_from_center: Lenient<f32>,
    show_hud: Lenient<bool>
}

impl From<StoredPrefs> for HudPrefs {
    fn from(stored: StoredPrefs) -> Self {
        let defaults = HudPrefs::default();
        Self {
            offset_x: stored.offset_x.or(defaults.offset_x),
            offset_y: stored.offset_y.or(defaults.offset_y),
            text_size: stored.text_size.or(defaults.text_size),
            align: stored.align.or(defaults.align),
            ratio_from_center: stored.ratio_from_center.or(defaults.ratio_from_center),
            show_hud: stored.show_hud.or(defaults.show_hud)
        }
    }
}

impl HudPrefs {
    /// Integer font scale giving roughly `text_size` at this resolution.
    pub fn font_scale(&self, px_scale: f32, glyph_height: f32) -> i32 {
        ((self.text_size * px_scale / glyph_height).round() as i32).max(1)
    }

    pub fn offset(&self, px_scale: f32) -> (f32, f32) {
        (self.offset_x * px_scale, self.offset_y * px_scale)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("homebound").join("hud.ron"))
    }

    pub fn load(path: &Path) -> Result<Self, PrefsError> {
        let contents = std::fs::read_to_string(path).map_err(PrefsError::ReadError)?;
        ron::from_str(&contents).map_err(PrefsError::ParseError)
    }

    /// Missing files are normal on first run; anything else is logged before falling back.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(prefs) => {
                log::info!("Loaded hud prefs from {}", path.display());
                prefs
            }
            Err(error) => {
                log::warn!("{}, using defaults", error);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PrefsError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(PrefsError::WriteError)?;
        }
        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(PrefsError::SerializeError)?;
        std::fs::write(path, serialized).map_err(PrefsError::WriteError)?;
        log::debug!("Saved hud prefs to {}", path.display());
        Ok(())
    }
}
