//! xlsxmerge command-line tool
//!
//! Merges every `*.xlsx` / `*.xls` file in a folder into `<folder>/DTM.csv`.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use xlsxmerge::{
    FileOrder, MergeError, MergeReport, MergerBuilder, SheetSelector, DEFAULT_INPUT_FOLDER,
    DEFAULT_OUTPUT_FILE_NAME,
};

#[derive(Parser, Debug)]
#[command(name = "xlsxmerge")]
#[command(author, version, about = "Merge a folder of Excel files into one CSV", long_about = None)]
struct Cli {
    /// Folder containing the Excel files
    #[arg(default_value = DEFAULT_INPUT_FOLDER)]
    folder: PathBuf,

    /// Output file name, created inside the folder
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE_NAME)]
    output: String,

    /// Read the sheet at this index (0-based) instead of the first one
    #[arg(long, conflicts_with = "sheet_name")]
    sheet_index: Option<usize>,

    /// Read the sheet with this name instead of the first one
    #[arg(long)]
    sheet_name: Option<String>,

    /// Field delimiter
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Text written for missing values
    #[arg(long, default_value = "")]
    na_rep: String,

    /// Merge files in plain path order instead of *.xlsx first, then *.xls
    #[arg(long)]
    sorted: bool,

    /// Print the merge report as JSON instead of the summary line
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("JSON Error: {}", e);
                        process::exit(1);
                    }
                }
            } else {
                println!("{}", report.summary());
            }
        }
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<MergeReport, MergeError> {
    let delimiter = u8::try_from(cli.delimiter).map_err(|_| {
        MergeError::Config(format!("Delimiter must be a single ASCII character: {:?}", cli.delimiter))
    })?;

    let sheet_selector = match (cli.sheet_index, &cli.sheet_name) {
        (Some(index), _) => SheetSelector::Index(index),
        (None, Some(name)) => SheetSelector::Name(name.clone()),
        (None, None) => SheetSelector::First,
    };

    let file_order = if cli.sorted {
        FileOrder::Sorted
    } else {
        FileOrder::ByExtension
    };

    let merger = MergerBuilder::new()
        .with_sheet_selector(sheet_selector)
        .with_delimiter(delimiter)
        .with_missing_value(cli.na_rep.clone())
        .with_output_file_name(cli.output.clone())
        .with_file_order(file_order)
        .build()?;

    merger.merge_folder(&cli.folder)
}

fn handle_error(error: MergeError) {
    match error {
        MergeError::NoInputFiles(location) => {
            eprintln!("No Input Files: {}", location);
            eprintln!("Please check that the folder exists and contains .xlsx or .xls files.");
        }
        MergeError::Load { path, source } => {
            eprintln!("Load Error: {}", path.display());
            eprintln!("  Cause: {}", source);
            eprintln!("The file may not be a valid Excel file or may be corrupted.");
        }
        MergeError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the output location is writable.");
        }
        MergeError::Parse(parse_err) => {
            eprintln!("Parse Error: {}", parse_err);
            eprintln!("The file may not be a valid Excel file or may be corrupted.");
        }
        MergeError::Csv(csv_err) => {
            eprintln!("CSV Error: {}", csv_err);
        }
        MergeError::Pattern(pattern_err) => {
            eprintln!("Pattern Error: {}", pattern_err);
        }
        MergeError::Glob(glob_err) => {
            eprintln!("Enumeration Error: {}", glob_err);
            eprintln!("Please check that you have permission to read the folder.");
        }
        MergeError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
            eprintln!("Please check your sheet selection and delimiter.");
        }
        MergeError::SecurityViolation(msg) => {
            eprintln!("Security Violation: {}", msg);
        }
    }
}
