//! Persisting the composed image: JPEG, written atomically.
//!
//! The image is encoded into a temp file inside the output directory and
//! then moved to its final name with a no-clobber rename, so the final path
//! either holds a complete image or does not exist. A name collision draws a
//! fresh token instead of overwriting an earlier meme.

use crate::error::MemeError;
use crate::naming::NameSupplier;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbImage};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File extension of every composed image.
pub const OUTPUT_EXTENSION: &str = "jpg";

const MAX_NAME_ATTEMPTS: usize = 16;

/// Encode `img` as JPEG under `output_dir` with a freshly supplied name.
///
/// Creates `output_dir` if needed. Returns the final path.
pub fn save_jpeg(
    img: &DynamicImage,
    output_dir: &Path,
    names: &dyn NameSupplier,
    quality: u8,
) -> Result<PathBuf, MemeError> {
    std::fs::create_dir_all(output_dir).map_err(|e| MemeError::OutputWriteFailed {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    // JPEG has no alpha channel.
    let rgb: RgbImage = img.to_rgb8();

    let mut staged = tempfile::Builder::new()
        .prefix(".meme-")
        .suffix(".part")
        .tempfile_in(output_dir)
        .map_err(|e| MemeError::OutputWriteFailed {
            path: output_dir.to_path_buf(),
            source: e,
        })?;

    {
        let mut writer = BufWriter::new(staged.as_file_mut());
        JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100))
            .encode_image(&rgb)
            .map_err(|e| MemeError::OutputWriteFailed {
                path: output_dir.to_path_buf(),
                source: std::io::Error::other(e),
            })?;
        writer.flush().map_err(|e| MemeError::OutputWriteFailed {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
    }

    let mut last_err = None;
    for _ in 0..MAX_NAME_ATTEMPTS {
        let target = output_dir.join(format!("{}.{}", names.next_token(), OUTPUT_EXTENSION));
        match staged.persist_noclobber(&target) {
            Ok(_) => {
                debug!("Saved {}", target.display());
                return Ok(target);
            }
            Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => {
                warn!("Output name {} taken, drawing another", target.display());
                staged = e.file;
                last_err = Some((target, e.error));
            }
            Err(e) => {
                // Dropping `e.file` removes the staged temp file.
                return Err(MemeError::OutputWriteFailed {
                    path: target,
                    source: e.error,
                });
            }
        }
    }

    let (path, source) = last_err.unwrap_or_else(|| {
        (
            output_dir.to_path_buf(),
            std::io::Error::other("no output name available"),
        )
    });
    Err(MemeError::OutputWriteFailed { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Hands out a fixed sequence of tokens, repeating the last.
    struct ScriptedNames {
        tokens: Vec<&'static str>,
        next: AtomicUsize,
    }

    impl NameSupplier for ScriptedNames {
        fn next_token(&self) -> String {
            let i = self.next.fetch_add(1, Ordering::SeqCst);
            self.tokens[i.min(self.tokens.len() - 1)].to_string()
        }
    }

    fn scripted(tokens: Vec<&'static str>) -> ScriptedNames {
        ScriptedNames {
            tokens,
            next: AtomicUsize::new(0),
        }
    }

    fn sample() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 6, Rgba([200, 10, 10, 128])))
    }

    fn dir_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn writes_decodable_jpeg_and_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("static");
        let path = save_jpeg(&sample(), &out, &scripted(vec!["ABCDE"]), 90).unwrap();

        assert_eq!(path, out.join("ABCDE.jpg"));
        let back = image::open(&path).unwrap();
        assert_eq!((back.width(), back.height()), (8, 6));
        assert_eq!(dir_names(&out), vec!["ABCDE.jpg"]);
    }

    #[test]
    fn collision_draws_a_new_name() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("AAAAA.jpg"), b"earlier meme").unwrap();

        let path = save_jpeg(&sample(), tmp.path(), &scripted(vec!["AAAAA", "BBBBB"]), 90).unwrap();

        assert_eq!(path, tmp.path().join("BBBBB.jpg"));
        assert_eq!(
            std::fs::read(tmp.path().join("AAAAA.jpg")).unwrap(),
            b"earlier meme"
        );
        assert_eq!(dir_names(tmp.path()), vec!["AAAAA.jpg", "BBBBB.jpg"]);
    }

    #[test]
    fn exhausted_names_fail_without_leftovers() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("AAAAA.jpg"), b"taken").unwrap();

        let err = save_jpeg(&sample(), tmp.path(), &scripted(vec!["AAAAA"]), 90).unwrap_err();

        assert!(matches!(err, MemeError::OutputWriteFailed { .. }));
        assert_eq!(dir_names(tmp.path()), vec!["AAAAA.jpg"]);
    }

    #[test]
    fn output_dir_under_a_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        let err = save_jpeg(&sample(), &blocker.join("out"), &scripted(vec!["A"]), 90).unwrap_err();
        assert!(matches!(err, MemeError::OutputWriteFailed { .. }));
    }
}
