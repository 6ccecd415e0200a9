//! Deed validation from the command line
//!
//! Exit codes: 0 when the deed is valid, 1 when violations were found, 2 on
//! any fatal error (unreadable input, missing fields, failed extraction).

mod display;

use anyhow::{bail, Context, Result};
use clap::Parser;
use deed_engine::{DeedValidator, ReferenceData, ValidationConfig};
use deed_extract::{build_extractor, ExtractorKind};
use shared_types::ExtractedFields;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "deed-validate")]
#[command(
    version,
    about = "Check extracted deed data against deterministic consistency rules"
)]
struct Args {
    /// JSON object of extracted fields ("-" reads stdin)
    #[arg(long, conflicts_with = "ocr", required_unless_present = "ocr")]
    fields: Option<PathBuf>,

    /// Raw OCR text to extract fields from ("-" reads stdin)
    #[arg(long)]
    ocr: Option<PathBuf>,

    /// County reference table (JSON); defaults to the bundled California table
    #[arg(long, env = "DEED_REFERENCE_PATH")]
    reference: Option<PathBuf>,

    /// Relative tolerance allowed between numeric and written amounts
    #[arg(long, env = "DEED_AMOUNT_TOLERANCE", default_value_t = 0.0)]
    tolerance: f64,

    /// Extractor used with --ocr: layout or anthropic
    #[arg(long, env = "DEED_EXTRACTOR", default_value = "layout")]
    extractor: ExtractorKind,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let outcome = run(args).await;
    if let Err(e) = &outcome {
        eprintln!("error: {e:#}");
    }
    ExitCode::from(exit_status(&outcome))
}

/// 0 when valid, 1 when violations were found, 2 on a fatal error
fn exit_status(outcome: &Result<bool>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

async fn run(args: Args) -> Result<bool> {
    let reference = match &args.reference {
        Some(path) => {
            let json = read_input(path)?;
            ReferenceData::from_json_str(&json)
                .with_context(|| format!("loading reference table {}", path.display()))?
        }
        None => ReferenceData::bundled()?,
    };
    let config = ValidationConfig::new(Arc::new(reference)).with_tolerance(args.tolerance)?;
    let validator = DeedValidator::new(config);

    let fields: ExtractedFields = match (&args.fields, &args.ocr) {
        (Some(path), _) => serde_json::from_str(&read_input(path)?)
            .with_context(|| format!("{} is not a JSON object of fields", path.display()))?,
        (None, Some(path)) => {
            let text = read_input(path)?;
            let extractor = build_extractor(args.extractor)?;
            tracing::info!("Extracting fields with the {} extractor", extractor.name());
            extractor.extract(&text).await?
        }
        (None, None) => bail!("either --fields or --ocr is required"),
    };

    let report = validator.validate(&fields)?.to_report();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", display::render_report(&report));
    }

    Ok(report.valid)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
