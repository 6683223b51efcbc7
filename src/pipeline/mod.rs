//! Pipeline stages for meme composition.
//!
//! Each submodule implements exactly one transformation step.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ resize ──▶ layout ──▶ render ──▶ persist
//! (path/URL)  (width)  (wrap+style) (glyphs)   (JPEG, atomic)
//! ```
//!
//! 1. [`input`]  : resolve a local path or URL and decode the raster image
//! 2. [`resize`] : scale to the target width, keeping the aspect ratio
//! 3. [`layout`] : wrap the caption and draw its random position/size/colour
//! 4. [`render`] : rasterise the caption glyphs onto the image
//! 5. [`persist`]: encode JPEG into a temp file, then move it into place
//!
//! Randomness enters only through [`layout`] (caption style) and
//! [`persist`] (output name); the other stages are pure given their inputs.

pub mod input;
pub mod layout;
pub mod persist;
pub mod render;
pub mod resize;
