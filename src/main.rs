//! LSB Flag Finder CLI
//!
//! Extracts LSB data from an image, decodes it with several text
//! encodings and greps the results for CTF flags.

use clap::{error::ErrorKind, CommandFactory, Parser};
use lsb_flag_finder::{
    config::{OutputFormat, ScanConfig},
    decoding::{Decoders, EncodingSelection},
    extraction::Extractor,
    matching::FlagPattern,
    report,
    scanner::{self, Scanner},
    source::ImageFile,
};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "lsb-flag-finder",
    version,
    about = "Extract LSB from images, decode, and grep for CTF flags"
)]
struct Cli {
    /// Image file path (PNG, BMP, TIFF, etc.)
    image: PathBuf,

    /// LSBs to extract per channel [default: 1]
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
    bits: Option<u8>,

    /// Channels to read, in order [default: RGB]
    #[arg(long)]
    channels: Option<String>,

    /// Decoding to try: ascii, base64, base32, rot13 or all [default: all]
    #[arg(long)]
    encoding: Option<EncodingSelection>,

    /// Custom flag regex, e.g. 'myctf\{.*\}'
    #[arg(long)]
    flag_format: Option<String>,

    /// Minimum Base64/Base32 run length [default: 16]
    #[arg(long)]
    min_run: Option<usize>,

    /// Dump raw LSB bytes to stdout
    #[arg(long)]
    raw: bool,

    /// Show previews even without flag hits
    #[arg(short, long)]
    verbose: bool,

    /// Report format: text or json [default: text]
    #[arg(long)]
    format: Option<OutputFormat>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Layers explicit flags over the file (or default) configuration.
    fn scan_config(&self) -> Result<ScanConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => ScanConfig::from_file(path)?,
            None => ScanConfig::default(),
        };

        if let Some(bits) = self.bits {
            config.extraction.bits = bits;
        }
        if let Some(channels) = &self.channels {
            config.extraction.channels = channels.clone();
        }
        if let Some(encoding) = &self.encoding {
            config.decoding.encodings = encoding.clone();
        }
        if let Some(pattern) = &self.flag_format {
            config.decoding.flag_format = Some(pattern.clone());
        }
        if let Some(min_run) = self.min_run {
            config.decoding.min_run_len = min_run;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        config.output.verbose |= self.verbose;

        config.validate()?;
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.scan_config()?;
    let extractor = Extractor::from_parts(config.extraction.bits, &config.extraction.channels)?;
    let stream = scanner::extract_from(&extractor, &ImageFile::new(&cli.image))?;

    if cli.raw {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(stream.data())?;
        stdout.flush()?;
        return Ok(());
    }

    // The flag pattern is only needed once decoding starts
    let flag_scanner = Scanner::new(
        extractor,
        Decoders::new(config.decoding.min_run_len),
        config.decoding.encodings.clone(),
        FlagPattern::new(config.decoding.flag_format.as_deref())?,
    );
    let report = flag_scanner.scan_bytes(&stream);
    match config.output.format {
        OutputFormat::Text => print!("{}", report::render_text(&report, &config.output)),
        OutputFormat::Json => println!("{}", report::render_json(&report)?),
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so raw dumps on stdout stay clean
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if !cli.image.is_file() {
        Cli::command()
            .error(
                ErrorKind::ValueValidation,
                format!("File not found: {}", cli.image.display()),
            )
            .exit();
    }

    tracing::debug!("LSB Flag Finder v{}", lsb_flag_finder::VERSION);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
