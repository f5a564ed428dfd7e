//! Extract command - pull labeled amounts out of text or an image.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use amtx_core::models::config::{AmtxConfig, OcrConfig};
use amtx_core::{AmountPipeline, DocumentInput, ExtractionResponse, OcrError, PureOcrProvider};

use super::config::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Text to scan
    #[arg(short, long, conflicts_with = "file")]
    text: Option<String>,

    /// Input file: an image for OCR, or a .txt file read as text
    #[arg(long)]
    file: Option<PathBuf>,

    /// Currency code echoed back in the result
    #[arg(long)]
    currency: Option<String>,

    /// Words of context on each side of a token (overrides config)
    #[arg(short, long)]
    window: Option<usize>,

    /// OCR model directory (overrides config)
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON result envelope
    Json,
    /// One CSV row per amount
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;

    if let Some(model_dir) = &args.model_dir {
        config.ocr.model_dir = model_dir.clone();
    }

    let input = read_input(&args)?;

    let response = if input.image.is_some() {
        run_with_ocr(&config, args.window, input).await?
    } else {
        let pipeline = build_pipeline(&config, args.window);
        debug!("Context window: {} words", pipeline.config().context_window);
        pipeline.run(&input)?
    };

    if !response.is_ok() {
        warn!("Extraction finished with status {}", response.status());
    }

    let output = format_response(&response, args.format, args.pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_input(args: &ExtractArgs) -> anyhow::Result<DocumentInput> {
    let mut input = match (&args.text, &args.file) {
        (Some(text), _) => DocumentInput::from_text(text.clone()),
        (None, Some(path)) => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }

            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_lowercase();

            info!("Reading input file: {}", path.display());

            if extension == "txt" {
                DocumentInput::from_text(fs::read_to_string(path)?)
            } else {
                DocumentInput::from_image(fs::read(path)?)
            }
        }
        (None, None) => anyhow::bail!("Either --text or --file must be provided"),
    };

    if let Some(currency) = &args.currency {
        input = input.with_currency(currency.clone());
    }

    Ok(input)
}

fn build_pipeline(config: &AmtxConfig, window: Option<usize>) -> AmountPipeline {
    let pipeline = AmountPipeline::new(config.extraction.clone());
    match window {
        Some(window) => pipeline.with_context_window(window),
        None => pipeline,
    }
}

/// Load the OCR engine if it is provisioned; otherwise leave the pipeline text-only.
fn attach_ocr(pipeline: AmountPipeline, ocr: &OcrConfig) -> AmountPipeline {
    match PureOcrProvider::from_config(ocr) {
        Ok(provider) => pipeline.with_ocr(provider),
        Err(OcrError::Unavailable(reason)) => {
            debug!("OCR not provisioned: {}", reason);
            pipeline
        }
        Err(e) => {
            warn!("Failed to load OCR engine: {}", e);
            pipeline
        }
    }
}

async fn run_with_ocr(
    config: &AmtxConfig,
    window: Option<usize>,
    input: DocumentInput,
) -> anyhow::Result<ExtractionResponse> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Loading OCR models...");

    // The OCR engine is loaded and used on the blocking thread.
    let config = config.clone();
    let spinner = pb.clone();
    let response = tokio::task::spawn_blocking(move || {
        let pipeline = attach_ocr(build_pipeline(&config, window), &config.ocr);
        if pipeline.has_ocr() {
            spinner.set_message("Running OCR...");
        }
        pipeline.run(&input)
    })
    .await??;

    pb.finish_and_clear();

    Ok(response)
}

fn format_response(
    response: &ExtractionResponse,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(response.to_json(pretty)?),
        OutputFormat::Csv => format_csv(response),
        OutputFormat::Text => Ok(format_text(response)),
    }
}

fn format_csv(response: &ExtractionResponse) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["type", "value", "source"])?;

    for amount in response.amounts() {
        wtr.write_record([
            amount.kind.as_str(),
            amount.value.to_string().as_str(),
            amount.source.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(response: &ExtractionResponse) -> String {
    let mut output = String::new();

    match response {
        ExtractionResponse::Ok {
            confidence,
            currency,
            amounts,
            validation_status,
        } => {
            output.push_str(&format!("Status: {}\n", validation_status));
            output.push_str(&format!("Confidence: {:.0}%\n", confidence * 100.0));
            if !currency.is_empty() {
                output.push_str(&format!("Currency: {}\n", currency));
            }
            output.push('\n');

            for amount in amounts {
                output.push_str(&format!(
                    "  {:<16} {:>12}  {}\n",
                    amount.kind.as_str(),
                    amount.value.to_string(),
                    amount.source
                ));
            }
        }
        ExtractionResponse::OcrUnavailable { reason }
        | ExtractionResponse::NoAmountsFound { reason } => {
            output.push_str(&format!("Status: {}\n", response.status()));
            output.push_str(&format!("Reason: {}\n", reason));
        }
    }

    output
}
