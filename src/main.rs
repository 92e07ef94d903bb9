use clap::{Parser, ValueEnum};
use recopy::classifier::{HeuristicClassifier, MimeClassifier, TextClassifier};
use recopy::config::ensure_ignore_file;
use recopy::copy::{deliver, ClipboardWriter, SystemClipboard};
use recopy::logger::initialize_logger;
use recopy::reporting::print_stats;
use recopy::{Collector, CollectorConfig, RecopyError, DEFAULT_IGNORE_FILE};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::warn;

const AFTER_HELP: &str = "\
Examples:
  recopy                    # Collect all files and copy to clipboard
  recopy --no-clipboard     # Print to stdout instead
  recopy --stats            # Show statistics about processed files

Configuration:
  Create 'recopy.ignore' files with exclusion patterns (glob supported):
    *.log
    ./temp/*
    node_modules/
    # This is a comment";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Recursively collect file contents with gitignore-like exclusion patterns",
    after_help = AFTER_HELP
)]
struct CliArgs {
    #[arg(default_value = ".", help = "Directory to collect from")]
    path: PathBuf,
    #[arg(long, help = "Print output to stdout instead of copying to clipboard")]
    no_clipboard: bool,
    #[arg(long, help = "Show statistics about processed files")]
    stats: bool,
    #[arg(long, env = "RECOPY_CONFIG", default_value = DEFAULT_IGNORE_FILE, help = "Custom config file name")]
    config: String,
    #[arg(long, value_enum, default_value_t = ClassifierKind::Mime, help = "How text files are detected")]
    classifier: ClassifierKind,
    #[arg(long, default_value_t = 5000, help = "Timeout for each content type check")]
    sniff_timeout_ms: u64,
    #[arg(short, long, help = "Log each decision to stderr")]
    verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ClassifierKind {
    /// Ask the `file` utility for the MIME type
    Mime,
    /// Look for NUL and control bytes
    Heuristic,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args = CliArgs::parse();
    if let Err(e) = initialize_logger(cli_args.verbose) {
        eprintln!("{}", e);
    }

    match run(cli_args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> Result<(), RecopyError> {
    if ensure_ignore_file(&args.path, &args.config).await? {
        eprintln!("Created {}", args.config);
    }

    let text_classifier: Box<dyn TextClassifier> = match args.classifier {
        ClassifierKind::Mime => Box::new(MimeClassifier::new(Duration::from_millis(
            args.sniff_timeout_ms,
        ))),
        ClassifierKind::Heuristic => Box::new(HeuristicClassifier::new()),
    };

    let collector = Collector::new(
        CollectorConfig {
            root: args.path,
            ignore_file_name: args.config,
        },
        text_classifier,
    );
    let result = collector.run().await?;
    let output = result.render();

    let mut clipboard = if args.no_clipboard {
        None
    } else {
        match SystemClipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                warn!("Could not copy to clipboard: {}", e);
                None
            }
        }
    };

    let mut stdout = std::io::stdout().lock();
    deliver(
        &output,
        result.stats.copied,
        clipboard.as_mut().map(|c| c as &mut dyn ClipboardWriter),
        &mut stdout,
    )?;

    if args.stats {
        print_stats(&result.stats)?;
    }
    Ok(())
}
