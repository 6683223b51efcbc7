//! Configuration types for meme composition.
//!
//! All composition behaviour is controlled through [`MemeConfig`], built via
//! its [`MemeConfigBuilder`] or read from the environment with
//! [`MemeConfig::from_env`]. The font path in particular is configuration,
//! never a path baked into the binary: a missing font is reported when the
//! engine is built instead of surfacing as an image with no caption.

use crate::error::MemeError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Environment variable holding the caption font path.
pub const FONT_PATH_ENV: &str = "MEME_FONT_PATH";
/// Older name for [`FONT_PATH_ENV`], still honoured.
pub const LEGACY_FONT_PATH_ENV: &str = "FONTPATH";
/// Environment variable holding the output directory.
pub const OUTPUT_DIR_ENV: &str = "MEME_OUTPUT_DIR";

/// Configuration for meme composition.
///
/// # Example
/// ```rust
/// use meme_forge::MemeConfig;
///
/// let config = MemeConfig::builder()
///     .font_path("fonts/LilitaOne-Regular.ttf")
///     .output_dir("./static")
///     .target_width(500)
///     .build()
///     .unwrap();
/// assert_eq!(config.wrap_width, 20);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemeConfig {
    /// TrueType/OpenType font used for captions. Required by
    /// [`crate::MemeEngine::new`].
    pub font_path: Option<PathBuf>,

    /// Directory composed images are written to. Created on demand.
    /// Default: `./static`.
    pub output_dir: PathBuf,

    /// Width in pixels the source image is resized to. Default: 500.
    ///
    /// Height follows from the aspect ratio.
    pub target_width: u32,

    /// Caption column width in characters before wrapping. Default: 20.
    pub wrap_width: usize,

    /// Inclusive point-size range captions are drawn from. Default: 25–40.
    pub font_size_range: RangeInclusive<u32>,

    /// Largest x/y offset of the caption's top-left corner. Default: (200, 200).
    ///
    /// Each axis is further capped at half the resized image so the caption
    /// always starts inside it.
    pub max_offset: (u32, u32),

    /// JPEG quality of the written image (1–100). Default: 90.
    pub jpeg_quality: u8,

    /// Download timeout for URL image inputs in seconds. Default: 30.
    pub download_timeout_secs: u64,
}

impl Default for MemeConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            output_dir: PathBuf::from("./static"),
            target_width: 500,
            wrap_width: 20,
            font_size_range: 25..=40,
            max_offset: (200, 200),
            jpeg_quality: 90,
            download_timeout_secs: 30,
        }
    }
}

impl MemeConfig {
    /// Create a new builder for `MemeConfig`.
    pub fn builder() -> MemeConfigBuilder {
        MemeConfigBuilder {
            config: Self::default(),
        }
    }

    /// Defaults overridden by `MEME_FONT_PATH` (or `FONTPATH`) and
    /// `MEME_OUTPUT_DIR` when set and non-empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.font_path = non_empty_env(FONT_PATH_ENV)
            .or_else(|| non_empty_env(LEGACY_FONT_PATH_ENV))
            .map(PathBuf::from);

        if let Some(dir) = non_empty_env(OUTPUT_DIR_ENV) {
            config.output_dir = PathBuf::from(dir);
        }

        config
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Builder for [`MemeConfig`].
#[derive(Debug)]
pub struct MemeConfigBuilder {
    config: MemeConfig,
}

impl MemeConfigBuilder {
    pub fn font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.font_path = Some(path.into());
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn target_width(mut self, width: u32) -> Self {
        self.config.target_width = width.clamp(1, 10_000);
        self
    }

    pub fn wrap_width(mut self, columns: usize) -> Self {
        self.config.wrap_width = columns.max(1);
        self
    }

    pub fn font_size_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.config.font_size_range = range;
        self
    }

    pub fn max_offset(mut self, x: u32, y: u32) -> Self {
        self.config.max_offset = (x, y);
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = quality.clamp(1, 100);
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<MemeConfig, MemeError> {
        let c = &self.config;
        if c.font_size_range.is_empty() || *c.font_size_range.start() == 0 {
            return Err(MemeError::InvalidConfig(format!(
                "font size range must be non-empty and start above 0, got {}..={}",
                c.font_size_range.start(),
                c.font_size_range.end()
            )));
        }
        if c.output_dir.as_os_str().is_empty() {
            return Err(MemeError::InvalidConfig(
                "output directory must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = MemeConfig::default();
        assert_eq!(c.target_width, 500);
        assert_eq!(c.wrap_width, 20);
        assert_eq!(c.font_size_range, 25..=40);
        assert_eq!(c.max_offset, (200, 200));
        assert!(c.font_path.is_none());
    }

    #[test]
    fn builder_clamps() {
        let c = MemeConfig::builder()
            .target_width(0)
            .wrap_width(0)
            .jpeg_quality(0)
            .build()
            .unwrap();
        assert_eq!(c.target_width, 1);
        assert_eq!(c.wrap_width, 1);
        assert_eq!(c.jpeg_quality, 1);
    }

    #[test]
    #[allow(clippy::reversed_empty_ranges)]
    fn empty_font_range_rejected() {
        let err = MemeConfig::builder()
            .font_size_range(40..=25)
            .build()
            .unwrap_err();
        assert!(matches!(err, MemeError::InvalidConfig(_)));
    }

    #[test]
    fn empty_output_dir_rejected() {
        assert!(MemeConfig::builder().output_dir("").build().is_err());
    }
}
