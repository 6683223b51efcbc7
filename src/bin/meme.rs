//! CLI binary for meme-forge.
//!
//! A thin shim over the library crate that maps CLI flags to `MemeConfig`,
//! generates one meme and prints where it went.

use anyhow::{Context, Result};
use clap::Parser;
use meme_forge::config::LEGACY_FONT_PATH_ENV;
use meme_forge::{
    generate_meme, MemeConfig, MemeEngine, MemeRequest, MemeSources, QuoteIngestor, ThreadRandom,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = "\
EXAMPLES:
  meme
      Random dog photo, random quote from the bundled quote files.

  meme --body \"Chase squirrels\" --author Rex --path photos/rex.jpg
      Caption a specific image with a specific quote.

  meme --path https://example.com/dog.png --quotes my_quotes.docx
      Download the image, pick a quote from a DOCX file.

ENVIRONMENT:
  MEME_FONT_PATH (or FONTPATH)  caption font, required
  MEME_OUTPUT_DIR               where memes are written (default ./static)
  RUST_LOG                      overrides -v / -q";

#[derive(Parser, Debug)]
#[command(
    name = "meme",
    version,
    about = "Caption images with quotes from CSV, TXT, DOCX and PDF files",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Quote body; requires --author.
    #[arg(long)]
    body: Option<String>,

    /// Quote author.
    #[arg(long)]
    author: Option<String>,

    /// Image to caption: local path or HTTP/HTTPS URL. Random from --image-dir if omitted.
    #[arg(long)]
    path: Option<String>,

    /// Directory random images are picked from.
    #[arg(long, env = "MEME_IMAGE_DIR", default_value = "./_data/photos/dog")]
    image_dir: PathBuf,

    /// Quote files (csv, txt, docx, pdf) random quotes are picked from.
    #[arg(
        long = "quotes",
        env = "MEME_QUOTES",
        value_delimiter = ',',
        default_values = [
            "./_data/DogQuotes/DogQuotesTXT.txt",
            "./_data/DogQuotes/DogQuotesDOCX.docx",
            "./_data/DogQuotes/DogQuotesPDF.pdf",
            "./_data/DogQuotes/DogQuotesCSV.csv",
        ]
    )]
    quotes: Vec<PathBuf>,

    /// Directory memes are written to.
    #[arg(long, env = "MEME_OUTPUT_DIR", default_value = "./static")]
    output_dir: PathBuf,

    /// TrueType/OpenType caption font.
    #[arg(long, env = "MEME_FONT_PATH")]
    font: Option<PathBuf>,

    /// Width the image is resized to, in pixels.
    #[arg(long, default_value_t = 500,
          value_parser = clap::value_parser!(u32).range(1..=10_000))]
    width: u32,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "MEME_DOWNLOAD_TIMEOUT", default_value_t = 30)]
    download_timeout: u64,

    /// Print a JSON object (path, image, quote) instead of the bare path.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all logs except errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build engine ─────────────────────────────────────────────────────
    let config = build_config(&cli)?;
    let engine = MemeEngine::new(config).context("Failed to prepare the meme engine")?;

    // ── Generate ─────────────────────────────────────────────────────────
    let sources = MemeSources {
        image_dir: cli.image_dir.clone(),
        quote_files: cli.quotes.clone(),
    };
    let request = MemeRequest {
        image: cli.path.clone(),
        body: cli.body.clone(),
        author: cli.author.clone(),
    };
    let meme = generate_meme(
        &engine,
        QuoteIngestor::global(),
        &sources,
        &request,
        &ThreadRandom,
    )
    .context("Meme generation failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&meme).context("Failed to serialise output")?;
        println!("{json}");
    } else {
        println!("{}", meme.path.display());
    }

    Ok(())
}

/// Map CLI args to `MemeConfig`.
fn build_config(cli: &Cli) -> Result<MemeConfig> {
    let font = cli.font.clone().or_else(|| {
        std::env::var_os(LEGACY_FONT_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    });

    let mut builder = MemeConfig::builder()
        .output_dir(&cli.output_dir)
        .target_width(cli.width)
        .download_timeout_secs(cli.download_timeout);
    if let Some(font) = font {
        builder = builder.font_path(font);
    }

    builder.build().context("Invalid configuration")
}
