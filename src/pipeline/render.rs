//! Caption rasterisation with `ab_glyph`.
//!
//! Glyph coverage is scaled by the caption's alpha and alpha-blended onto the
//! image, so translucent colours come out translucent rather than punching
//! holes in the alpha channel.

use super::layout::CaptionStyle;
use crate::error::MemeError;
use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use image::{Pixel, Rgba, RgbaImage};
use std::path::Path;
use tracing::debug;

/// A parsed TrueType/OpenType caption font.
pub struct CaptionFont {
    font: FontVec,
}

impl CaptionFont {
    /// Read and parse a font file.
    pub fn from_file(path: &Path) -> Result<Self, MemeError> {
        let unavailable = |detail: String| MemeError::FontUnavailable {
            path: path.to_path_buf(),
            detail,
        };
        let bytes = std::fs::read(path).map_err(|e| unavailable(e.to_string()))?;
        let font = FontVec::try_from_vec(bytes).map_err(|e| unavailable(e.to_string()))?;
        debug!("Loaded caption font {}", path.display());
        Ok(Self { font })
    }

    /// Parse font bytes already in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, MemeError> {
        FontVec::try_from_vec(bytes)
            .map(|font| Self { font })
            .map_err(|e| MemeError::FontUnavailable {
                path: "<memory>".into(),
                detail: e.to_string(),
            })
    }
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont")
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

/// Draw `lines` top-down starting at the style's offset.
///
/// Glyphs falling outside the image are clipped. Returns the number of
/// pixels that received any ink: zero for blank, fully transparent or
/// entirely off-image captions.
pub fn draw_caption(
    img: &mut RgbaImage,
    lines: &[String],
    style: &CaptionStyle,
    font: &CaptionFont,
) -> usize {
    let font = &font.font;
    let scale = PxScale::from(style.size as f32);
    let scaled = font.as_scaled(scale);
    let line_height = scaled.height() + scaled.line_gap();
    let (width, height) = img.dimensions();
    let [r, g, b, a] = style.color.0;
    let mut inked = 0usize;

    for (i, line) in lines.iter().enumerate() {
        let baseline = style.y as f32 + scaled.ascent() + i as f32 * line_height;
        let mut caret = style.x as f32;
        let mut previous: Option<GlyphId> = None;

        for ch in line.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + i64::from(gx);
                let py = bounds.min.y as i64 + i64::from(gy);
                if px < 0 || py < 0 || px >= i64::from(width) || py >= i64::from(height) {
                    return;
                }
                let alpha = (f32::from(a) * coverage.clamp(0.0, 1.0)).round() as u8;
                if alpha == 0 {
                    return;
                }
                inked += 1;
                img.get_pixel_mut(px as u32, py as u32)
                    .blend(&Rgba([r, g, b, alpha]));
            });
        }
    }

    debug!("Drew {} caption lines, {} pixels inked", lines.len(), inked);
    inked
}
