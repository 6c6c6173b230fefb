//! operon-features CLI entry point
//!
//! Fetches the RegulonDB operon table if needed and prints it as
//! annotation features in YAML or JSON.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use operon_features::core::{create_output, open_input, ScannerConfig};
use operon_features::formats::{convert_operons, ConvertOptions, FeatureOptions, OutputFormat};
use std::path::PathBuf;
use std::time::Instant;

/// Output format (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum FormatArg {
    /// YAML block sequence
    #[default]
    #[value(name = "yaml")]
    Yaml,
    /// Pretty-printed JSON array
    #[value(name = "json")]
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Yaml => OutputFormat::Yaml,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "operon-features")]
#[command(about = "Convert RegulonDB operon tables into annotation features")]
#[command(version)]
struct Cli {
    /// Operon table (plain, .gz or .bz2)
    #[arg(short = 'i', long, default_value = "OperonSet.txt")]
    input: PathBuf,

    /// Download source used when the input file does not exist
    #[cfg(feature = "fetch")]
    #[arg(long, default_value = operon_features::fetch::REGULONDB_OPERON_SET_URL)]
    url: String,

    /// Never download; fail if the input file is missing
    #[cfg(feature = "fetch")]
    #[arg(long)]
    no_fetch: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "yaml")]
    format: FormatArg,

    /// Output file (optional, stdout if not specified)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Abort on the first malformed row instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Add an `operon` qualifier carrying the operon name
    #[arg(long = "operon-qualifier")]
    operon_qualifier: bool,

    /// Feature key
    #[arg(long, default_value = "operon")]
    key: String,

    /// Number of threads used for parsing
    #[arg(short = 't', long, default_value = "1")]
    threads: usize,
}

/// Download the input table unless it is already on disk
#[cfg(feature = "fetch")]
fn ensure_input(cli: &Cli) -> anyhow::Result<()> {
    if cli.no_fetch {
        return Ok(());
    }
    let outcome = operon_features::fetch::fetch_if_missing(&cli.input, &cli.url)
        .with_context(|| format!("Failed to fetch {}", cli.url))?;
    if let operon_features::fetch::FetchOutcome::Downloaded { bytes } = outcome {
        eprintln!("Downloaded {} bytes to {:?}", bytes, cli.input);
    }
    Ok(())
}

#[cfg(not(feature = "fetch"))]
fn ensure_input(_cli: &Cli) -> anyhow::Result<()> {
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    ensure_input(&cli)?;

    let reader = open_input(&cli.input)
        .with_context(|| format!("Failed to open {:?}", cli.input))?;
    let mut writer = create_output(cli.output.as_deref())
        .with_context(|| format!("Failed to create output {:?}", cli.output))?;

    let options = ConvertOptions {
        scanner: ScannerConfig::operon_set().with_continue_on_error(!cli.strict),
        feature: FeatureOptions::default()
            .with_key(cli.key)
            .with_operon_qualifier(cli.operon_qualifier),
        format: cli.format.into(),
        threads: cli.threads,
    };

    let stats = convert_operons(reader, &mut writer, &options)
        .with_context(|| format!("Failed to convert {:?}", cli.input))?;

    eprintln!("\n=== Conversion Statistics ===");
    eprintln!("Total records:   {}", stats.total);
    eprintln!("Successful:      {}", stats.success);
    eprintln!("Skipped:         {}", stats.skipped);
    eprintln!("Comment lines:   {}", stats.comments);
    eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
