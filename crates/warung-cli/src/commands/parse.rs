//! Parse command - extract rows from a single OCR line file.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use warung_core::{InputFormat, LineParser, RuleBasedParser, ScanInput, ScanResult};

use super::load_config;
use super::output::{format_rows, OutputFormat};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file with OCR lines (.txt or .json), or "-" for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Print parser warnings to stderr
    #[arg(long)]
    show_warnings: bool,

    /// Print detected date and grand total after the rows
    #[arg(long)]
    summary: bool,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let format = OutputFormat::resolve(args.format, &config)?;

    let input = read_input(&args.input)?;
    info!("Parsing {} lines from {}", input.lines.len(), args.input.display());

    let result = RuleBasedParser::new().parse_lines(&input.lines);

    if args.show_warnings || config.output.show_warnings {
        print_warnings(&result);
    }

    let output = format_rows(&result.parsed, format, config.output.pretty_json)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }

    if args.summary {
        print_summary(&result);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<ScanInput> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok(ScanInput::parse(&content, InputFormat::sniff(&content))?);
    }

    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    Ok(ScanInput::from_file(path)?)
}

fn print_warnings(result: &ScanResult) {
    for warning in &result.warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }
}

fn print_summary(result: &ScanResult) {
    eprintln!();
    eprintln!(
        "{} Date: {}",
        style("ℹ").blue(),
        result.detected_date.as_deref().unwrap_or("not detected")
    );
    eprintln!(
        "{} Rows: {} ({} lines discarded)",
        style("ℹ").blue(),
        result.sales().count(),
        result.discarded
    );
    eprintln!("{} Total: {}", style("ℹ").blue(), result.grand_total());
}
