mod logutil;

use clap::{Parser, ValueEnum};
use csv_lens_common::{Config, CsvLensError, ErrorKind, MessagesConfig, OutputFormat};
use csv_lens_core::{render, Query, RowStore};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg { Table, Json }

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f { FormatArg::Table => OutputFormat::Table, FormatArg::Json => OutputFormat::Json }
    }
}

#[derive(Parser)]
#[command(name = "csv-lens", version, about = "Filter and aggregate CSV files")]
struct Cli {
    /// Path to the CSV file
    #[arg(long)]
    file: PathBuf,
    /// Filter condition, e.g. "rating>4.7"
    #[arg(long = "where", value_name = "CONDITION")]
    filter: Option<String>,
    /// Aggregation, e.g. "rating=avg"
    #[arg(long, value_name = "COLUMN=OP")]
    aggregate: Option<String>,
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    #[arg(long)]
    delimiter: Option<char>,
    #[arg(short, long)]
    verbose: bool,
}

fn load_config() -> Config {
    match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("ignoring config {}: {e}", Config::config_path().display());
            Config::default()
        }
    }
}

fn run(cli: Cli, mut config: Config) -> anyhow::Result<()> {
    if let Some(f) = cli.format { config.display.format = f.into(); }
    if let Some(d) = cli.delimiter { config.csv.delimiter = d; }

    let store = RowStore::open(&cli.file, &config.csv)?;
    let query = Query::parse(cli.filter.as_deref(), cli.aggregate.as_deref())?;
    let output = query.run(&store)?;
    println!("{}", render(&output, store.columns(), &config.display)?);
    Ok(())
}

// clap exits with 2 on usage errors, so domain errors get their own code
const EXIT_FAILURE: u8 = 1;
const EXIT_FILE_ACCESS: u8 = 3;
const EXIT_BAD_QUERY: u8 = 4;

/// One-line message for stdout plus the process exit code.
fn describe(err: &anyhow::Error, msgs: &MessagesConfig) -> (String, u8) {
    let Some(e) = err.downcast_ref::<CsvLensError>() else {
        return (format!("{}: {err}", msgs.error), EXIT_FAILURE);
    };
    match (e.kind(), e) {
        (ErrorKind::FileAccess, CsvLensError::FileAccess { path, .. }) => {
            let detail = msgs.file_not_found.replace("{path}", &path.display().to_string());
            (format!("{}: {detail}", msgs.error), EXIT_FILE_ACCESS)
        }
        (ErrorKind::InvalidOperator, _) => (format!("{}: {e}", msgs.filter_error), EXIT_BAD_QUERY),
        (ErrorKind::InvalidAggregate, _) => (format!("{}: {e}", msgs.aggregate_error), EXIT_BAD_QUERY),
        (ErrorKind::InvalidColumn, _) => (format!("{}: {e}", msgs.column_error), EXIT_BAD_QUERY),
        _ => (format!("{}: {e}", msgs.error), EXIT_FAILURE),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logutil::init(cli.verbose);
    let config = load_config();
    let messages = config.messages.clone();
    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("{err:?}");
            let (msg, code) = describe(&err, &messages);
            println!("{msg}");
            ExitCode::from(code)
        }
    }
}
