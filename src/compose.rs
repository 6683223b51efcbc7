//! Meme composition entry point.
//!
//! [`MemeEngine`] runs the single-shot pipeline
//! Load → Resize → Caption-layout → Render → Persist. There are no retries
//! between stages: the first failing stage aborts the call and nothing is
//! left in the output directory.

use crate::config::MemeConfig;
use crate::error::MemeError;
use crate::naming::{NameSupplier, RandomToken};
use crate::pipeline::layout::{wrap_text, CaptionStyle};
use crate::pipeline::render::{draw_caption, CaptionFont};
use crate::pipeline::{input, persist, resize};
use crate::quote::{caption, QuoteRecord};
use crate::random::{RandomSource, ThreadRandom};
use image::DynamicImage;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Composes captioned images.
///
/// Built once from a [`MemeConfig`]; the font is loaded at construction, so
/// a missing or broken font is reported before any image is touched.
/// `MemeEngine` is `Send + Sync`; concurrent calls never share an output
/// name.
pub struct MemeEngine {
    config: MemeConfig,
    font: CaptionFont,
    rng: Arc<dyn RandomSource>,
    names: Arc<dyn NameSupplier>,
}

impl MemeEngine {
    /// Create an engine with unseeded randomness and 5-character names.
    ///
    /// # Errors
    /// * [`MemeError::InvalidConfig`]: `config.font_path` is not set
    /// * [`MemeError::FontUnavailable`]: the font cannot be read or parsed
    pub fn new(config: MemeConfig) -> Result<Self, MemeError> {
        let font_path = config.font_path.as_deref().ok_or_else(|| {
            MemeError::InvalidConfig(format!(
                "no caption font configured; set {} or pass a font path",
                crate::config::FONT_PATH_ENV
            ))
        })?;
        let font = CaptionFont::from_file(font_path)?;
        Ok(Self::with_font(config, font))
    }

    /// Create an engine around an already-loaded font.
    pub fn with_font(config: MemeConfig, font: CaptionFont) -> Self {
        Self {
            config,
            font,
            rng: Arc::new(ThreadRandom),
            names: Arc::new(RandomToken::default()),
        }
    }

    /// Replace the random source used for caption style.
    pub fn with_random(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Replace the output file name supplier.
    pub fn with_names(mut self, names: Arc<dyn NameSupplier>) -> Self {
        self.names = names;
        self
    }

    pub fn config(&self) -> &MemeConfig {
        &self.config
    }

    /// Caption `image` (local path or HTTP/HTTPS URL) with `body - author`
    /// at the configured target width. Returns the written file's path.
    ///
    /// # Errors
    /// * [`MemeError::ImageUnreadable`]: missing or undecodable image
    /// * [`MemeError::ImageTooLarge`]: the resized image would exceed the
    ///   output size limits
    /// * [`MemeError::DownloadFailed`]: URL input could not be fetched
    /// * [`MemeError::OutputWriteFailed`]: the result could not be saved
    pub fn compose(&self, image: &str, body: &str, author: &str) -> Result<PathBuf, MemeError> {
        self.compose_with_width(image, body, author, self.config.target_width)
    }

    /// [`MemeEngine::compose`] with an explicit target width.
    pub fn compose_with_width(
        &self,
        image: &str,
        body: &str,
        author: &str,
        target_width: u32,
    ) -> Result<PathBuf, MemeError> {
        let start = Instant::now();

        // ── Step 1: Load ─────────────────────────────────────────────────────
        let resolved = input::resolve_input(image, self.config.download_timeout_secs)?;
        let source = input::load_image(resolved.path())?;

        // ── Steps 2–4: Resize, lay out, render ───────────────────────────────
        let composed = self.render(&source, &caption(body, author), target_width)?;

        // ── Step 5: Persist ──────────────────────────────────────────────────
        let path = persist::save_jpeg(
            &composed,
            &self.config.output_dir,
            self.names.as_ref(),
            self.config.jpeg_quality,
        )?;

        info!(
            "Composed {} ({}x{}) in {}ms",
            path.display(),
            composed.width(),
            composed.height(),
            start.elapsed().as_millis()
        );
        Ok(path)
    }

    /// [`MemeEngine::compose`] for a parsed quote.
    pub fn compose_quote(&self, image: &str, quote: &QuoteRecord) -> Result<PathBuf, MemeError> {
        self.compose(image, quote.body(), quote.author())
    }

    /// Resize `source` and draw `text` on it, without touching the disk.
    ///
    /// `target_width` is clamped to [`resize::MAX_OUTPUT_DIMENSION`].
    pub fn render(
        &self,
        source: &DynamicImage,
        text: &str,
        target_width: u32,
    ) -> Result<DynamicImage, MemeError> {
        let resized = resize::resize_to_width(source, target_width).ok_or(
            MemeError::ImageTooLarge {
                width: source.width(),
                height: source.height(),
                target_width,
                max_dimension: resize::MAX_OUTPUT_DIMENSION,
                max_pixels: resize::MAX_OUTPUT_PIXELS,
            },
        )?;
        let mut canvas = resized.to_rgba8();

        let lines = wrap_text(text, self.config.wrap_width);
        let style = CaptionStyle::random(
            self.rng.as_ref(),
            &self.config,
            canvas.width(),
            canvas.height(),
        );
        draw_caption(&mut canvas, &lines, &style, &self.font);

        Ok(DynamicImage::ImageRgba8(canvas))
    }
}

impl std::fmt::Debug for MemeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemeEngine")
            .field("config", &self.config)
            .field("font", &self.font)
            .field("rng", &"<dyn RandomSource>")
            .field("names", &"<dyn NameSupplier>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::render::tests::system_font;
    use crate::random::FixedRandom;
    use image::{Rgba, RgbaImage};

    #[test]
    fn missing_font_path_is_config_error() {
        let err = MemeEngine::new(MemeConfig::default()).unwrap_err();
        match err {
            MemeError::InvalidConfig(msg) => assert!(msg.contains("MEME_FONT_PATH")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn unreadable_font_is_reported_at_construction() {
        let config = MemeConfig::builder()
            .font_path("/no/such/font.ttf")
            .build()
            .unwrap();
        assert!(matches!(
            MemeEngine::new(config),
            Err(MemeError::FontUnavailable { .. })
        ));
    }

    /// Replays a fixed list of draws: x, y, size, r, g, b, a.
    struct ScriptedRandom(std::sync::Mutex<Vec<u32>>);

    impl RandomSource for ScriptedRandom {
        fn uniform(&self, low: u32, high: u32) -> u32 {
            let mut draws = self.0.lock().unwrap();
            let v = if draws.is_empty() { low } else { draws.remove(0) };
            v.clamp(low, high)
        }
    }

    #[test]
    fn render_resizes_and_inks() {
        let Some(font_path) = system_font() else {
            println!("SKIP: no system TrueType font found (set MEME_TEST_FONT)");
            return;
        };
        let config = MemeConfig::builder().font_path(font_path).build().unwrap();
        let black_text = ScriptedRandom(std::sync::Mutex::new(vec![10, 10, 30, 0, 0, 0, 255]));
        let engine = MemeEngine::new(config)
            .unwrap()
            .with_random(Arc::new(black_text));

        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            1000,
            600,
            Rgba([255, 255, 255, 255]),
        ));
        let out = engine.render(&source, "Chase squirrels - Rex", 500).unwrap();

        assert_eq!((out.width(), out.height()), (500, 300));
        assert!(out.to_rgba8().pixels().any(|p| p.0[0] < 64));
    }

    #[test]
    fn transparent_caption_leaves_image_untouched() {
        let Some(font_path) = system_font() else {
            println!("SKIP: no system TrueType font found (set MEME_TEST_FONT)");
            return;
        };
        let config = MemeConfig::builder().font_path(font_path).build().unwrap();
        let engine = MemeEngine::new(config)
            .unwrap()
            .with_random(Arc::new(FixedRandom::Low));

        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            500,
            250,
            Rgba([40, 80, 120, 255]),
        ));
        let out = engine.render(&source, "Invisible - Ghost", 500).unwrap();

        let plain = resize::resize_to_width(&source, 500).unwrap();
        assert_eq!(out.to_rgba8().as_raw(), plain.to_rgba8().as_raw());
    }
}
