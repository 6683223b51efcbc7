//! Random meme generation front end.
//!
//! Fills in whatever the caller left out of a [`MemeRequest`]: an image is
//! drawn from an image directory, a quote from the ingested quote files.
//! Both draws go through the same [`RandomSource`] so tests can pin them.

use crate::compose::MemeEngine;
use crate::error::{MemeError, RecordError};
use crate::ingest::QuoteIngestor;
use crate::quote::QuoteRecord;
use crate::random::RandomSource;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Raster extensions considered when picking an image, compared
/// case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// What the caller asked for. `None` fields are chosen at random.
#[derive(Debug, Clone, Default)]
pub struct MemeRequest {
    /// Local path or HTTP/HTTPS URL.
    pub image: Option<String>,
    pub body: Option<String>,
    /// Required whenever `body` is given.
    pub author: Option<String>,
}

/// Where random images and quotes come from.
#[derive(Debug, Clone, Default)]
pub struct MemeSources {
    pub image_dir: PathBuf,
    pub quote_files: Vec<PathBuf>,
}

/// Outcome of [`generate_meme`].
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedMeme {
    /// The written JPEG.
    pub path: PathBuf,
    /// The image that was captioned, as given or as picked.
    pub image: String,
    pub quote: QuoteRecord,
}

/// Compose a meme, picking the image and quote the request leaves open.
///
/// # Errors
/// * [`MemeError::AuthorRequired`]: `body` without `author`; checked before
///   any file is touched
/// * [`MemeError::EmptyBody`]: `body` holds only quote marks
/// * [`MemeError::NothingToChoose`]: no image in `image_dir`, or no quote
///   in `quote_files`
/// * anything [`QuoteIngestor::ingest_many`] or [`MemeEngine::compose`]
///   returns
pub fn generate_meme(
    engine: &MemeEngine,
    ingestor: &QuoteIngestor,
    sources: &MemeSources,
    request: &MemeRequest,
    rng: &dyn RandomSource,
) -> Result<GeneratedMeme, MemeError> {
    let requested = requested_quote(request)?;
    let image = choose_image(request, &sources.image_dir, rng)?;
    let quote = match requested {
        Some(quote) => quote,
        None => choose_quote(ingestor, &sources.quote_files, rng)?,
    };
    debug!("Generating with image {} and quote {}", image, quote);

    let path = engine.compose_quote(&image, &quote)?;
    info!("Generated {}", path.display());
    Ok(GeneratedMeme { path, image, quote })
}

/// The caller's own quote, if any. A blank `body` counts as absent.
fn requested_quote(request: &MemeRequest) -> Result<Option<QuoteRecord>, MemeError> {
    let body = request.body.as_deref().filter(|b| !b.trim().is_empty());
    let author = request.author.as_deref().filter(|a| !a.trim().is_empty());

    match (body, author) {
        (None, _) => Ok(None),
        (Some(_), None) => Err(MemeError::AuthorRequired),
        (Some(body), Some(author)) => match QuoteRecord::new(body, author) {
            Ok(quote) => Ok(Some(quote)),
            Err(RecordError::EmptyField { field: "author", .. }) => Err(MemeError::AuthorRequired),
            Err(_) => Err(MemeError::EmptyBody),
        },
    }
}

fn choose_image(
    request: &MemeRequest,
    image_dir: &Path,
    rng: &dyn RandomSource,
) -> Result<String, MemeError> {
    if let Some(image) = &request.image {
        return Ok(image.clone());
    }
    let candidates = list_images(image_dir)?;
    let index = rng
        .pick_index(candidates.len())
        .ok_or(MemeError::NothingToChoose { what: "image" })?;
    Ok(candidates[index].to_string_lossy().into_owned())
}

fn choose_quote(
    ingestor: &QuoteIngestor,
    quote_files: &[PathBuf],
    rng: &dyn RandomSource,
) -> Result<QuoteRecord, MemeError> {
    let mut quotes = ingestor.ingest_many(quote_files)?;
    let index = rng
        .pick_index(quotes.len())
        .ok_or(MemeError::NothingToChoose { what: "quote" })?;
    Ok(quotes.swap_remove(index))
}

/// Raster files directly inside `dir`, sorted by path.
///
/// A missing directory yields an empty list.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>, MemeError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(MemeError::SourceUnreadable {
                path: dir.to_path_buf(),
                detail: e.to_string(),
            })
        }
    };

    let mut images: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_raster(path))
        .collect();
    images.sort();
    debug!("Found {} images in {}", images.len(), dir.display());
    Ok(images)
}

fn is_raster(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|k| k.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FixedRandom;

    fn request(body: Option<&str>, author: Option<&str>) -> MemeRequest {
        MemeRequest {
            image: None,
            body: body.map(str::to_string),
            author: author.map(str::to_string),
        }
    }

    #[test]
    fn raster_extensions_are_case_insensitive() {
        assert!(is_raster(Path::new("dog.JPG")));
        assert!(is_raster(Path::new("cat.webp")));
        assert!(!is_raster(Path::new("quotes.txt")));
        assert!(!is_raster(Path::new("README")));
    }

    #[test]
    fn lists_only_images_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.JPEG", "notes.txt"] {
            std::fs::write(tmp.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(tmp.path().join("nested.png")).unwrap();

        let found = list_images(tmp.path()).unwrap();
        assert_eq!(
            found,
            vec![tmp.path().join("a.JPEG"), tmp.path().join("b.png")]
        );
    }

    #[test]
    fn missing_image_dir_is_empty() {
        assert!(list_images(Path::new("/no/such/dir")).unwrap().is_empty());
    }

    #[test]
    fn body_without_author_is_rejected() {
        assert!(matches!(
            requested_quote(&request(Some("Sit"), None)),
            Err(MemeError::AuthorRequired)
        ));
        assert!(matches!(
            requested_quote(&request(Some("Sit"), Some("   "))),
            Err(MemeError::AuthorRequired)
        ));
    }

    #[test]
    fn body_of_only_quote_marks_is_empty() {
        assert!(matches!(
            requested_quote(&request(Some("\"\""), Some("Rex"))),
            Err(MemeError::EmptyBody)
        ));
    }

    #[test]
    fn blank_body_means_random_quote() {
        assert_eq!(requested_quote(&request(Some("  "), None)).unwrap(), None);
        assert_eq!(requested_quote(&request(None, Some("Rex"))).unwrap(), None);
    }

    #[test]
    fn explicit_quote_is_normalised() {
        let quote = requested_quote(&request(Some(" \"Roll over\" "), Some("Spot")))
            .unwrap()
            .unwrap();
        assert_eq!(quote.caption(), "Roll over - Spot");
    }

    #[test]
    fn given_image_is_used_without_listing() {
        let req = MemeRequest {
            image: Some("https://example.com/dog.png".into()),
            ..Default::default()
        };
        let image = choose_image(&req, Path::new("/no/such/dir"), &FixedRandom::Low).unwrap();
        assert_eq!(image, "https://example.com/dog.png");
    }

    #[test]
    fn empty_image_dir_has_nothing_to_choose() {
        let tmp = tempfile::tempdir().unwrap();
        let err = choose_image(&MemeRequest::default(), tmp.path(), &FixedRandom::Low).unwrap_err();
        assert!(matches!(err, MemeError::NothingToChoose { what: "image" }));
    }

    #[test]
    fn image_pick_follows_the_draw() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["a.png", "b.png", "c.png"] {
            std::fs::write(tmp.path().join(name), b"x").unwrap();
        }
        let last = choose_image(&MemeRequest::default(), tmp.path(), &FixedRandom::High).unwrap();
        assert_eq!(last, tmp.path().join("c.png").to_string_lossy());
    }

    #[test]
    fn empty_quote_set_has_nothing_to_choose() {
        let tmp = tempfile::tempdir().unwrap();
        let quotes = tmp.path().join("empty.txt");
        std::fs::write(&quotes, "\n\n").unwrap();

        let err = choose_quote(&QuoteIngestor::default(), &[quotes], &FixedRandom::Low).unwrap_err();
        assert!(matches!(err, MemeError::NothingToChoose { what: "quote" }));
    }

    #[test]
    fn quote_pick_follows_the_draw() {
        let tmp = tempfile::tempdir().unwrap();
        let quotes = tmp.path().join("quotes.txt");
        std::fs::write(&quotes, "Sit - Rex\nStay - Fido\n").unwrap();

        let quote = choose_quote(&QuoteIngestor::default(), &[quotes], &FixedRandom::High).unwrap();
        assert_eq!(quote.author(), "Fido");
    }
}
