//! Extract command - parse identity fields from recognized text.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::debug;

use docintake_core::{ExtractionInput, FieldMatch, IdentityParser, ScanResult};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Text file to read (default: stdin)
    input: Option<PathBuf>,

    /// Confidence attached to the text (0 - 100)
    #[arg(long, default_value_t = 100.0)]
    confidence: f32,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Reject birth dates that do not exist in the calendar
    #[arg(long)]
    strict_calendar: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let text = match &args.input {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            std::fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let parser = IdentityParser::from_config(&config.extraction);
    let parser = if args.strict_calendar {
        parser.with_strict_calendar(true)
    } else {
        parser
    };

    let input = ExtractionInput::new(text, args.confidence);
    let (fields, result) = parser.parse_detailed(&input);

    debug!("Resolved {}/3 fields", result.resolved_count());

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&result)?,
        OutputFormat::Text => format_text(&result, &fields.matches),
    };
    println!("{}", output);

    Ok(())
}

fn format_text(result: &ScanResult, matches: &[FieldMatch]) -> String {
    let mut output = String::new();

    let rows = [
        ("Surname", &result.surname),
        ("Given names", &result.given_names),
        ("Birth date", &result.birth_date),
    ];

    for ((label, value), m) in rows.iter().zip(matches) {
        match (value, m.pattern_index) {
            (Some(value), Some(index)) => output.push_str(&format!(
                "{} {:<12} {} (pattern {})\n",
                style("✓").green(),
                label,
                value,
                index
            )),
            (Some(value), None) => {
                output.push_str(&format!("{} {:<12} {}\n", style("✓").green(), label, value))
            }
            (None, _) => output.push_str(&format!("{} {:<12} -\n", style("✗").red(), label)),
        }
    }

    output.push_str(&format!("\nConfidence: {:.1}\n", result.confidence));
    if result.is_truncated() {
        output.push_str(&format!(
            "Text: {} characters (preview truncated)\n",
            result.full_text_length
        ));
    } else {
        output.push_str(&format!("Text: {} characters\n", result.full_text_length));
    }

    if !result.errors.is_empty() {
        output.push('\n');
        for error in &result.errors {
            output.push_str(&format!("  - {}\n", error));
        }
    }

    output
}
