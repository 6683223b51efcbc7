//! Caption layout: word wrapping and the randomised text style.

use crate::config::MemeConfig;
use crate::random::RandomSource;
use image::Rgba;
use tracing::debug;

/// Wrap `text` into lines of at most `width` characters.
///
/// Breaks at whitespace; a word longer than `width` is split across lines.
/// Whitespace runs collapse to one space. Empty input yields no lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            let mut chunks = chars.chunks(width).peekable();
            while let Some(chunk) = chunks.next() {
                let piece: String = chunk.iter().collect();
                if chunks.peek().is_some() {
                    lines.push(piece);
                } else {
                    current_len = chunk.len();
                    current = piece;
                }
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Where, how large, and in which colour a caption is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionStyle {
    /// Left edge of the first line, in pixels.
    pub x: u32,
    /// Top edge of the first line, in pixels.
    pub y: u32,
    /// Font size in pixels.
    pub size: u32,
    /// RGBA fill; alpha below 255 draws translucent text.
    pub color: Rgba<u8>,
}

impl CaptionStyle {
    /// Draw a style for an image of `width` x `height` pixels.
    ///
    /// Offsets are uniform in `0..=min(max_offset, dimension / 2)`, the size
    /// uniform in `config.font_size_range`, each colour channel uniform in
    /// `0..=255`.
    pub fn random(rng: &dyn RandomSource, config: &MemeConfig, width: u32, height: u32) -> Self {
        let max_x = config.max_offset.0.min(width / 2);
        let max_y = config.max_offset.1.min(height / 2);
        let size_low = *config.font_size_range.start();
        let size_high = (*config.font_size_range.end()).max(size_low);

        let channel = || rng.uniform(0, 255) as u8;
        let style = Self {
            x: rng.uniform(0, max_x),
            y: rng.uniform(0, max_y),
            size: rng.uniform(size_low, size_high),
            color: Rgba([channel(), channel(), channel(), channel()]),
        };
        debug!("Caption style: {:?}", style);
        style
    }
}
