//! csv2ris CLI - Convert a CSV file to RIS
//!
//! ```bash
//! csv2ris -i library.csv                 # writes library.ris
//! csv2ris -i library.csv -o out.ris      # explicit output path
//! csv2ris -i my.data.csv --legacy-output-name   # writes my.ris
//! csv2ris -i library.csv --report run.json
//! ```
//!
//! Exit codes: 0 on success or `--help`, 1 when conversion fails, 2 on a
//! command-line usage error.

use clap::Parser;
use csv2ris::logs::{init_logging, log_info};
use csv2ris::{convert_file, ConvertOptions, OutputNaming};
use std::path::PathBuf;

const DEFAULT_INPUT: &str = "filename.csv";

const USAGE_HINT: &str = "Expected usage is \"csv2ris -i <yourInputFileName>.csv\". \
For example, \"csv2ris -i Example.csv\".";

#[derive(Parser)]
#[command(name = "csv2ris")]
#[command(about = "Convert a CSV file whose columns are RIS tags into a RIS file", long_about = None)]
#[command(after_help = USAGE_HINT)]
struct Cli {
    /// Input CSV file [default: filename.csv]
    #[arg(short, long, env = "CSV2RIS_INPUT")]
    input: Option<PathBuf>,

    /// Output RIS file (default: input path with a .ris extension)
    #[arg(short, long, env = "CSV2RIS_OUTPUT")]
    output: Option<PathBuf>,

    /// Name the output after the input file name up to its first dot
    #[arg(long)]
    legacy_output_name: bool,

    /// Write a JSON summary of the run to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let input = match cli.input {
        Some(path) => path,
        None => {
            log_info(format!(
                "Attempting to read in data from {}. To use your own file, pass it with -i.",
                DEFAULT_INPUT
            ));
            log_info(USAGE_HINT);
            PathBuf::from(DEFAULT_INPUT)
        }
    };

    let options = ConvertOptions {
        output: cli.output,
        naming: if cli.legacy_output_name {
            OutputNaming::TruncateAtFirstDot
        } else {
            OutputNaming::ReplaceExtension
        },
    };

    let report = convert_file(&input, &options)?;

    if let Some(path) = cli.report {
        report.save(&path)?;
        log_info(format!("Report written to {}", path.display()));
    }

    println!("File successfully converted");
    Ok(())
}
