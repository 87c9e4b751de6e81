//! Lakes CLI - Convert the fishing lakes CSV export to MongoDB JSON
//!
//! # Main Commands
//!
//! ```bash
//! lakes                                   # pecheplaneau.csv → lakes_for_mongodb.json
//! lakes convert -i lacs.csv -o lacs.json  # Explicit paths
//! lakes catalog lacs.csv -o catalog.json  # Species and camping tables
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! lakes parse lacs.csv              # Raw rows as JSON
//! lakes validate lacs.json          # Validate converted records
//! ```
//!
//! Paths default to `LAKES_INPUT` / `LAKES_OUTPUT` when set (a `.env` file
//! is read at startup).

use clap::{Parser, Subcommand};
use lakes::config::ConvertOptions;
use lakes::logs;
use lakes::parser::DEFAULT_DELIMITER;
use lakes::{build_catalog, convert_file, read_file, run, validate_lakes};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lakes")]
#[command(about = "Convert the fishing lakes CSV export to MongoDB-ready JSON", long_about = None)]
struct Cli {
    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the lakes CSV to a JSON array (default command)
    Convert {
        /// Input CSV file [default: pecheplaneau.csv]
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output JSON file, overwritten [default: lakes_for_mongodb.json]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// CSV delimiter
        #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
        delimiter: char,

        /// Skip schema validation
        #[arg(long)]
        no_validate: bool,
    },

    /// Parse a CSV file and output raw rows as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter
        #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
        delimiter: char,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a JSON array of lake records
    Validate {
        /// Input JSON file (array of lakes)
        input: PathBuf,
    },

    /// Build the deduplicated species and camping catalog from a CSV
    Catalog {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter
        #[arg(short, long, default_value_t = DEFAULT_DELIMITER)]
        delimiter: char,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logs::set_quiet(cli.quiet);

    let command = cli.command.unwrap_or(Commands::Convert {
        input: None,
        output: None,
        delimiter: DEFAULT_DELIMITER,
        no_validate: false,
    });

    let result = match command {
        Commands::Convert {
            input,
            output,
            delimiter,
            no_validate,
        } => cmd_convert(input, output, delimiter, no_validate),

        Commands::Parse {
            input,
            delimiter,
            output,
        } => cmd_parse(&input, delimiter, output.as_deref()),

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Catalog {
            input,
            delimiter,
            output,
        } => cmd_catalog(&input, delimiter, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    delimiter: char,
    no_validate: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ConvertOptions::from_env()
        .with_delimiter(delimiter)
        .with_validation(!no_validate);
    if let Some(input) = input {
        options = options.with_input(input);
    }
    if let Some(output) = output {
        options = options.with_output(output);
    }

    let report = run(&options)?;

    if !cli_quiet() {
        eprintln!(
            "\n✨ Done: {} lakes, {} bytes ({})",
            report.lake_count,
            report.bytes_written,
            report.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    Ok(())
}

fn cmd_parse(
    input: &Path,
    delimiter: char,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    logs::log_info(format!("📄 Parsing CSV: {}", input.display()));

    let table = read_file(input, delimiter)?;
    logs::log_info(format!("Encoding: {}", table.encoding));
    logs::log_info(format!("Columns: {}", table.headers.join(", ")));
    logs::log_success(format!("Parsed {} rows", table.rows.len()));

    let json = serde_json::to_string_pretty(&table.to_json_records())?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    logs::log_info(format!("✔️  Validating: {}", input.display()));

    let content = fs::read_to_string(input)?;
    let records: Vec<Value> = serde_json::from_str(&content)?;

    let report = validate_lakes(&records)?;
    for (i, errors) in report.errors.iter().take(5) {
        logs::log_error(format!("Record {} invalid:", i));
        for err in errors.iter().take(3) {
            logs::log_info_indent(format!("- {}", err), 1);
        }
    }

    logs::log_info(format!(
        "📊 Results: {} valid, {} invalid",
        report.valid_count, report.invalid_count
    ));

    report.into_result()?;
    Ok(())
}

fn cmd_catalog(
    input: &Path,
    delimiter: char,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    logs::log_info(format!("📚 Building catalog from: {}", input.display()));

    let lakes = convert_file(input, delimiter)?;
    let catalog = build_catalog(&lakes);
    logs::log_success(format!(
        "{} species, {} campings from {} lakes",
        catalog.especes.len(),
        catalog.campings.len(),
        lakes.len()
    ));

    let json = serde_json::to_string_pretty(&catalog)?;
    write_output(&json, output)?;

    Ok(())
}

fn cli_quiet() -> bool {
    logs::LOGGER.is_quiet()
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            logs::log_success(format!("💾 Output written to: {}", p.display()));
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
