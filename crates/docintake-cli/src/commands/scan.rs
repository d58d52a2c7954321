//! Scan command - run the intake pipeline on a document file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use docintake_core::error::OcrError;
use docintake_core::ocr::{OcrBackend, Recognition};
use docintake_core::{
    IncomingFile, IntakeConfig, LopdfTextLayer, PureOcrEngine, ScanResponse, TextSource,
    UploadLifecycleManager,
};

use super::load_config;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Input file (PDF, JPEG or PNG)
    #[arg(required = true)]
    input: PathBuf,

    /// Declared MIME type (default: inferred from the file extension)
    #[arg(long)]
    mime: Option<String>,

    /// OCR model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Pretty-print the JSON response
    #[arg(long)]
    pretty: bool,
}

/// Stand-in engine used when the OCR models cannot be loaded.
///
/// PDF scans never reach it; image scans fail with the load error.
struct UnavailableOcr(String);

impl OcrBackend for UnavailableOcr {
    fn recognize(&self, _path: &Path, _languages: &[String]) -> docintake_core::ocr::Result<Recognition> {
        Err(OcrError::ModelLoad(self.0.clone()))
    }
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(model_dir) = &args.model_dir {
        config.ocr.model_dir = model_dir.clone();
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let mut file = IncomingFile::from_path(&args.input)?;
    if let Some(mime) = &args.mime {
        file = file.with_content_type(mime.as_str());
    }

    info!("Scanning {} as {}", args.input.display(), file.content_type);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Loading OCR models...");

    let manager = UploadLifecycleManager::new(build_source(&config), &config);

    pb.set_message("Reading document...");
    let response = ScanResponse::from_result(manager.process(vec![file]).await);
    pb.finish_and_clear();

    let output = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", output);

    debug!("Total processing time: {:?}", start.elapsed());

    match &response {
        ScanResponse::Completed { success: true, .. } => {
            eprintln!("{} All fields detected", style("✓").green());
            Ok(())
        }
        ScanResponse::Completed { data, .. } => {
            eprintln!(
                "{} {}/3 fields detected: {}",
                style("!").yellow(),
                data.resolved_count(),
                data.errors.join(", ")
            );
            Ok(())
        }
        ScanResponse::Rejected { error, .. } | ScanResponse::Failed { error, .. } => {
            anyhow::bail!("{} (status {})", error, response.http_status())
        }
    }
}

/// PDF text layer plus the native OCR engine, when its models load.
fn build_source(config: &IntakeConfig) -> TextSource {
    let ocr: Arc<dyn OcrBackend> = match PureOcrEngine::from_config(&config.ocr) {
        Ok(engine) => Arc::new(engine),
        Err(e) => {
            info!("OCR engine unavailable, image scans will fail: {}", e);
            Arc::new(UnavailableOcr(e.to_string()))
        }
    };

    TextSource::new(Arc::new(LopdfTextLayer::new()), ocr)
}
