//! Extract command - pull structured fields from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use procure_core::{DocumentKind, DocumentProcessor, FieldExtractionPipeline};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF, Word, or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Document kind
    #[arg(short, long, value_enum, default_value = "proforma")]
    kind: KindArg,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Skip the assisted backend and use only rule-based extraction
    #[arg(long)]
    rules_only: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum KindArg {
    /// Proforma invoice
    Proforma,
    /// Delivery receipt
    Receipt,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Proforma => DocumentKind::Proforma,
            KindArg::Receipt => DocumentKind::Receipt,
        }
    }
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Extracting from {}", args.input.display());

    let assist = if args.rules_only {
        None
    } else {
        config.assist_backend()
    };
    if assist.is_none() {
        debug!("Assisted extraction disabled, using rules only");
    }

    let pipeline = FieldExtractionPipeline::new(assist).with_config(config.extraction.clone());
    let processor = DocumentProcessor::new(pipeline);

    let fields = processor.process(&args.input, args.kind.into());

    if let Some(error) = &fields.error {
        eprintln!("{} {}", style("✗").red(), error);
    }

    let output = if args.pretty {
        serde_json::to_string_pretty(&fields)?
    } else {
        serde_json::to_string(&fields)?
    };

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
