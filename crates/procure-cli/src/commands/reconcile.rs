//! Reconcile command - compare a receipt document against a purchase order.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use procure_core::{
    reconcile, DocumentKind, DocumentProcessor, FieldExtractionPipeline, PoSnapshot, Severity,
};

/// Arguments for the reconcile command.
#[derive(Args)]
pub struct ReconcileArgs {
    /// Receipt document (PDF, Word, or plain text)
    #[arg(required = true)]
    receipt: PathBuf,

    /// Purchase order snapshot (JSON file with po_number, vendor_name,
    /// total_amount)
    #[arg(short, long, required = true)]
    po: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

pub fn run(args: ReconcileArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    if !args.receipt.exists() {
        anyhow::bail!("Receipt file not found: {}", args.receipt.display());
    }

    let po_json = fs::read_to_string(&args.po)
        .map_err(|e| anyhow::anyhow!("Cannot read PO snapshot {}: {}", args.po.display(), e))?;
    let po: PoSnapshot = serde_json::from_str(&po_json)
        .map_err(|e| anyhow::anyhow!("Invalid PO snapshot: {}", e))?;

    info!(
        "Reconciling {} against PO {}",
        args.receipt.display(),
        po.po_number
    );

    let pipeline =
        FieldExtractionPipeline::new(config.assist_backend()).with_config(config.extraction.clone());
    let processor = DocumentProcessor::new(pipeline);

    let fields = processor.process(&args.receipt, DocumentKind::Receipt);
    if let Some(error) = &fields.error {
        anyhow::bail!("Receipt extraction failed: {}", error);
    }

    let report = reconcile(&po, &fields);

    let output = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
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

    // Human-readable verdict on stderr
    if report.valid {
        eprintln!("{} Receipt matches PO {}", style("✓").green(), po.po_number);
    } else {
        eprintln!(
            "{} Receipt does not match PO {}",
            style("✗").red(),
            po.po_number
        );
    }
    for discrepancy in &report.discrepancies {
        let tag = match discrepancy.severity {
            Severity::High => style("high").red(),
            Severity::Medium => style("medium").yellow(),
        };
        eprintln!("  [{}] {}", tag, discrepancy.message);
    }

    Ok(())
}
