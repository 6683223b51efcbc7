//! Input resolution: normalise a user-supplied path or URL to a decoded image.
//!
//! URL inputs are downloaded into a `TempDir` that lives inside
//! [`ResolvedImage`]; the directory and the image in it are removed when the
//! value drops, whether composition succeeded or not.

use crate::error::MemeError;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tracing::{debug, info};

/// The resolved input: a local path or a downloaded temp file.
#[derive(Debug)]
pub enum ResolvedImage {
    /// Input was already a local file.
    Local(PathBuf),
    /// Input was a URL; image downloaded to a temp directory.
    /// The `TempDir` is kept alive to prevent cleanup until composition completes.
    Downloaded { path: PathBuf, _temp_dir: TempDir },
}

impl ResolvedImage {
    /// Get the path to the image file regardless of how it was resolved.
    pub fn path(&self) -> &Path {
        match self {
            ResolvedImage::Local(p) => p,
            ResolvedImage::Downloaded { path, .. } => path,
        }
    }
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve the input string to a local image path, downloading URLs.
pub fn resolve_input(input: &str, timeout_secs: u64) -> Result<ResolvedImage, MemeError> {
    if is_url(input) {
        download_url(input, timeout_secs)
    } else {
        Ok(ResolvedImage::Local(PathBuf::from(input)))
    }
}

/// Largest source width or height accepted by [`load_image`].
pub const MAX_SOURCE_DIMENSION: u32 = 20_000;

/// Decode a raster image from disk.
///
/// Missing files, undecodable content, and images wider or taller than
/// [`MAX_SOURCE_DIMENSION`] all yield [`MemeError::ImageUnreadable`].
pub fn load_image(path: &Path) -> Result<DynamicImage, MemeError> {
    let unreadable = |detail: String| MemeError::ImageUnreadable {
        path: path.to_path_buf(),
        detail,
    };

    let mut reader = image::ImageReader::open(path)
        .map_err(|e| unreadable(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| unreadable(e.to_string()))?;
    let mut limits = image::Limits::default();
    limits.max_image_width = Some(MAX_SOURCE_DIMENSION);
    limits.max_image_height = Some(MAX_SOURCE_DIMENSION);
    reader.limits(limits);
    let img = reader.decode().map_err(|e| unreadable(e.to_string()))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(unreadable("image has zero width or height".into()));
    }

    debug!(
        "Loaded {} → {}x{} px",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(img)
}

/// Download a URL to a temporary directory and return the path.
fn download_url(url: &str, timeout_secs: u64) -> Result<ResolvedImage, MemeError> {
    info!("Downloading image from: {}", url);

    let failed = |reason: String| MemeError::DownloadFailed {
        url: url.to_string(),
        reason,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| failed(e.to_string()))?;

    let response = client.get(url).send().map_err(|e| {
        if e.is_timeout() {
            failed(format!("timed out after {timeout_secs}s"))
        } else {
            failed(e.to_string())
        }
    })?;

    if !response.status().is_success() {
        return Err(failed(format!("HTTP {}", response.status())));
    }

    let filename = extract_filename(url);
    let bytes = response.bytes().map_err(|e| failed(e.to_string()))?;

    let temp_dir = TempDir::new().map_err(|e| MemeError::Internal(e.to_string()))?;
    let file_path = temp_dir.path().join(&filename);
    std::fs::write(&file_path, &bytes)
        .map_err(|e| MemeError::Internal(format!("Failed to write temp file: {}", e)))?;

    info!("Downloaded to: {}", file_path.display());

    Ok(ResolvedImage::Downloaded {
        path: file_path,
        _temp_dir: temp_dir,
    })
}

/// Extract a reasonable filename from the URL path.
fn extract_filename(url: &str) -> String {
    if let Ok(parsed) = reqwest::Url::parse(url) {
        if let Some(mut segments) = parsed.path_segments() {
            if let Some(last) = segments.next_back() {
                if !last.is_empty() && last.contains('.') {
                    return last.to_string();
                }
            }
        }
    }

    "downloaded-image".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/dog.jpg"));
        assert!(is_url("http://example.com/dog.jpg"));
        assert!(!is_url("/tmp/dog.jpg"));
        assert!(!is_url("dog.jpg"));
        assert!(!is_url(""));
    }

    #[test]
    fn test_extract_filename() {
        assert_eq!(extract_filename("https://example.com/img/dog.png"), "dog.png");
        assert_eq!(extract_filename("https://example.com/img/"), "downloaded-image");
        assert_eq!(extract_filename("not a url"), "downloaded-image");
    }

    #[test]
    fn local_input_is_passed_through() {
        let resolved = resolve_input("photos/dog.jpg", 5).unwrap();
        assert_eq!(resolved.path(), Path::new("photos/dog.jpg"));
    }

    #[test]
    fn missing_image_is_unreadable() {
        let err = load_image(Path::new("/no/such/dog.jpg")).unwrap_err();
        assert!(matches!(err, MemeError::ImageUnreadable { .. }));
    }

    #[test]
    fn garbage_image_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dog.jpg");
        std::fs::write(&path, b"this is not a jpeg").unwrap();
        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, MemeError::ImageUnreadable { .. }));
    }

    #[test]
    fn decodes_png_regardless_of_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dog.jpg");
        RgbImage::from_pixel(4, 3, Rgb([10, 20, 30]))
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();
        let img = load_image(&path).unwrap();
        assert_eq!((img.width(), img.height()), (4, 3));
    }

    #[test]
    fn oversized_source_is_refused_before_decoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strip.png");
        RgbImage::from_pixel(1, 200_000, Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();
        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, MemeError::ImageUnreadable { .. }), "{err:?}");
    }
}
