//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::backends::{tools, CamelotFlavor};
use crate::config::{ExtractorConfig, PipelineVariant, DEFAULT_IMAGE_DPI, DEFAULT_OUTPUT_DIR};
use crate::pipeline::Pipeline;

/// Printed when no document is given.
pub const USAGE: &str = "Usage: docextract <file_path>";

#[derive(Parser, Debug)]
#[command(name = "docextract")]
#[command(about = "Extract text, metadata, images and tables from a document into JSON")]
#[command(version)]
pub struct Cli {
    /// Document to extract
    file_path: Option<PathBuf>,

    /// Extract text and metadata only (writes <name>_tika.json)
    #[arg(long)]
    text_only: bool,

    /// Output directory
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Resolution for rasterized PDF images
    #[arg(long, default_value_t = DEFAULT_IMAGE_DPI)]
    dpi: u32,

    /// Camelot parsing flavor for table detection
    #[arg(long, value_enum, default_value_t = CamelotFlavor::Lattice)]
    table_flavor: CamelotFlavor,

    /// Report which external tools are installed and exit
    #[arg(long)]
    check_tools: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Run configuration from the parsed arguments.
    pub fn config(&self) -> ExtractorConfig {
        let variant = if self.text_only {
            PipelineVariant::TextOnly
        } else {
            PipelineVariant::Full
        };

        ExtractorConfig::new()
            .with_output_dir(self.output_dir.clone())
            .with_dpi(self.dpi)
            .with_table_flavor(self.table_flavor)
            .with_variant(variant)
    }
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Parse arguments and process one document.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.check_tools {
        print_tool_status();
        return Ok(());
    }

    let Some(file_path) = cli.file_path.clone() else {
        println!("{}", USAGE);
        std::process::exit(1);
    };

    let pipeline = Pipeline::with_local_backends(cli.config());
    tracing::info!(
        "Extracting {} into {} ({:?})",
        file_path.display(),
        pipeline.config().output_dir.display(),
        pipeline.config().variant
    );
    for (name, available, hint) in pipeline.backends().availability() {
        if !available {
            tracing::warn!("{} backend unavailable: {}", name, hint);
        }
    }

    let output_path = pipeline.run(&file_path, &mut std::io::stdout().lock())?;
    println!("\nExtraction results saved to {}", output_path.display());

    Ok(())
}

fn print_tool_status() {
    for (tool, available) in tools::check_tools() {
        println!("{:<10} {}", tool, if available { "found" } else { "missing" });
    }
}
