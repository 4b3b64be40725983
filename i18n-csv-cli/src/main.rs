use clap::{Parser, Subcommand};
use i18n_csv_cli::config::load_config;
use i18n_csv_cli::export::{run_export, run_from_json, run_init};
use i18n_csv_cli::generate::{SourceOptions, run_generate, run_validate, run_validate_json};
use i18n_csv_cli::watch::run_watch;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (defaults to ./i18n-csv.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate JSON files from CSV.
    Generate {
        /// Input CSV file path
        #[arg(short, long)]
        input: Option<String>,
        /// Output directory for JSON files
        #[arg(short, long)]
        output: Option<String>,
        /// Create backup of existing files
        #[arg(short, long)]
        backup: bool,
        /// Comma-separated languages to generate (default: every language column)
        #[arg(short, long)]
        languages: Option<String>,
        /// Map language names such as "English" or "eng" to their codes
        #[arg(long)]
        normalize_languages: bool,
        /// Write empty translations as "" instead of omitting the key
        #[arg(long)]
        keep_empty: bool,
    },

    /// Validate CSV file only.
    Validate {
        /// Input CSV file path
        #[arg(short, long)]
        input: Option<String>,
        /// Comma-separated languages to check
        #[arg(short, long)]
        languages: Option<String>,
        /// Map language names to their codes before checking
        #[arg(long)]
        normalize_languages: bool,
        /// Exit with status 1 when errors are found
        #[arg(long)]
        strict: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate generated JSON files against the CSV.
    ValidateJson {
        /// Input CSV file path
        #[arg(short, long)]
        input: Option<String>,
        /// Directory holding the <lang>.json files
        #[arg(short, long)]
        json_dir: Option<String>,
        /// Comma-separated languages to check
        #[arg(short, long)]
        languages: Option<String>,
        /// Map language names to their codes before checking
        #[arg(long)]
        normalize_languages: bool,
        /// Exit with status 1 when errors are found
        #[arg(long)]
        strict: bool,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Watch CSV file for changes.
    Watch {
        /// Input CSV file path
        #[arg(short, long)]
        input: Option<String>,
        /// Output directory for JSON files
        #[arg(short, long)]
        output: Option<String>,
        /// Create backup of existing files
        #[arg(short, long)]
        backup: bool,
        /// Comma-separated languages to generate
        #[arg(short, long)]
        languages: Option<String>,
        /// Map language names to their codes
        #[arg(long)]
        normalize_languages: bool,
        /// Polling interval in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Export JSON files to CSV.
    Export {
        /// Directory holding the <lang>.json files
        #[arg(short, long)]
        input: Option<String>,
        /// Output CSV file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Create sample CSV template.
    Init {
        /// Output CSV file
        #[arg(short, long)]
        output: Option<String>,
        /// Comma-separated language columns (default: en,mr)
        #[arg(short, long)]
        languages: Option<String>,
    },

    /// Create a CSV template from one language's JSON file.
    FromJson {
        /// Source JSON file
        #[arg(short, long)]
        input: Option<String>,
        /// Output CSV file
        #[arg(short, long)]
        output: Option<String>,
        /// Comma-separated language columns (default: en,mr)
        #[arg(short, long)]
        languages: Option<String>,
        /// Language of the source file; its column is pre-filled
        #[arg(long)]
        source_lang: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<(), String> {
    let file = load_config(args.config.as_deref())?;

    match args.commands {
        Commands::Generate {
            input,
            output,
            backup,
            languages,
            normalize_languages,
            keep_empty,
        } => {
            let opts = SourceOptions {
                input,
                output,
                backup,
                languages,
                normalize_languages,
                keep_empty,
            };
            run_generate(&opts, &file)
        }
        Commands::Validate {
            input,
            languages,
            normalize_languages,
            strict,
            json,
        } => {
            let opts = SourceOptions {
                input,
                languages,
                normalize_languages,
                ..SourceOptions::default()
            };
            run_validate(&opts, &file, strict, json)
        }
        Commands::ValidateJson {
            input,
            json_dir,
            languages,
            normalize_languages,
            strict,
            json,
        } => {
            let opts = SourceOptions {
                input,
                languages,
                normalize_languages,
                ..SourceOptions::default()
            };
            run_validate_json(&opts, json_dir, &file, strict, json)
        }
        Commands::Watch {
            input,
            output,
            backup,
            languages,
            normalize_languages,
            interval_ms,
        } => {
            let opts = SourceOptions {
                input,
                output,
                backup,
                languages,
                normalize_languages,
                keep_empty: false,
            };
            run_watch(&opts, &file, interval_ms).await
        }
        Commands::Export { input, output } => run_export(input, output),
        Commands::Init { output, languages } => run_init(output, languages),
        Commands::FromJson {
            input,
            output,
            languages,
            source_lang,
        } => run_from_json(input, output, languages, source_lang),
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}
