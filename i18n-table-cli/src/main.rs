use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use i18n_table::{
    ConversionReport, ConvertOptions, DeeplTranslator, Error, FillOptions, Translator,
    convert::DEFAULT_CSV_FILE, csv_to_json, discovery::DEFAULT_PREFIX,
    fill::DEFAULT_REFERENCE_LANGUAGE, json_to_csv,
};
use i18n_table_cli::{deepl_config, print_summary};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "i18n_table=info,i18n_table_cli=info";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print the run summary as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Flatten all `<prefix>*.json` files into one CSV table.
    ToCsv {
        /// Directory holding the JSON files (defaults to the current directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// CSV file to write, relative to the directory
        #[arg(short, long, default_value = DEFAULT_CSV_FILE)]
        output: PathBuf,

        /// File name prefix of the JSON files
        #[arg(short, long, default_value = DEFAULT_PREFIX)]
        prefix: String,

        /// Fill missing values with DeepL translations (needs DEEPL_API_KEY)
        #[arg(long)]
        translate: bool,

        /// Language whose values are translated
        #[arg(long, default_value = DEFAULT_REFERENCE_LANGUAGE)]
        reference_lang: String,

        /// DeepL API base URL (overrides DEEPL_API_URL)
        #[arg(long)]
        deepl_url: Option<String>,

        /// Timeout of a single translation request in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Stop at the first failed translation
        #[arg(long)]
        fail_fast: bool,
    },

    /// Write one `<prefix><language>.json` per column of the CSV table.
    ToJson {
        /// Directory to write the JSON files to (defaults to the current directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// CSV file to read, relative to the directory
        #[arg(short, long, default_value = DEFAULT_CSV_FILE)]
        input: PathBuf,

        /// File name prefix of the JSON files
        #[arg(short, long, default_value = DEFAULT_PREFIX)]
        prefix: String,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_dir(cwd: &Path, dir: Option<PathBuf>) -> PathBuf {
    match dir {
        Some(dir) => cwd.join(dir),
        None => cwd.to_path_buf(),
    }
}

fn run(commands: Commands, cwd: &Path) -> Result<ConversionReport, Error> {
    match commands {
        Commands::ToCsv {
            dir,
            output,
            prefix,
            translate,
            reference_lang,
            deepl_url,
            timeout,
            fail_fast,
        } => {
            let options = ConvertOptions::new(resolve_dir(cwd, dir))
                .with_prefix(prefix)
                .with_csv_file(output)
                .with_fill(
                    FillOptions::new()
                        .with_reference_language(reference_lang)
                        .with_fail_fast(fail_fast),
                );
            debug!(?options, "converting JSON to CSV");

            let translator = if translate {
                Some(DeeplTranslator::new(deepl_config(deepl_url, timeout)?)?)
            } else {
                None
            };
            json_to_csv(&options, translator.as_ref().map(|t| t as &dyn Translator))
        }
        Commands::ToJson { dir, input, prefix } => {
            let options = ConvertOptions::new(resolve_dir(cwd, dir))
                .with_prefix(prefix)
                .with_csv_file(input);
            debug!(?options, "converting CSV to JSON");
            csv_to_json(&options)
        }
    }
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(e) => {
            eprintln!("Error: cannot determine the current directory: {}", e);
            std::process::exit(1);
        }
    };

    match run(args.commands, &cwd) {
        Ok(report) => {
            print_summary(&report, args.json);
            if !report.is_success() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
