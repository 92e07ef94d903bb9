pub mod classifier;
pub mod collector;
pub mod config;
pub mod copy;
pub mod errors;
pub mod ignore;
pub mod logger;
pub mod reporting;
pub mod utils;

pub use classifier::{Decision, HeuristicClassifier, MimeClassifier, TextClassifier};
pub use collector::{CollectedFile, Collector, CollectorConfig, RunResult, RunStats};
pub use errors::RecopyError;
pub use ignore::{Pattern, PatternSet, DEFAULT_IGNORE_FILE};
