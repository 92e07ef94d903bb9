use crate::utils::decode_lossy;
use async_trait::async_trait;
use std::path::Path;
use tokio::fs as async_fs;
use tokio::io::AsyncReadExt;
use tracing::{debug, trace, warn};

pub mod heuristic;
pub mod mime;

pub use heuristic::HeuristicClassifier;
pub use mime::MimeClassifier;

/// Number of leading bytes handed to a [`TextClassifier`].
pub const SNIFF_LEN: u64 = 64 * 1024;

/// Decides whether a byte sample looks like text. Implementations must return
/// within a bounded time and answer `false` whenever they cannot tell.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    async fn is_text(&self, sample: &[u8]) -> bool;
}

/// Outcome for one file met during traversal.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Excluded,
    SkippedNotRegularOrEmpty,
    SkippedBinary,
    SkippedBlankText,
    IncludedWithContent(String),
    ErrorReading(String),
}

impl Decision {
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            Decision::Excluded
                | Decision::SkippedNotRegularOrEmpty
                | Decision::SkippedBinary
                | Decision::SkippedBlankText
        )
    }
}

/// Runs the content gates for a file that no ignore rule excluded.
pub struct EligibilityClassifier {
    text_classifier: Box<dyn TextClassifier>,
}

impl EligibilityClassifier {
    pub fn new(text_classifier: Box<dyn TextClassifier>) -> Self {
        EligibilityClassifier { text_classifier }
    }

    pub async fn classify(&self, path: &Path) -> Decision {
        match async_fs::metadata(path).await {
            Ok(meta) if meta.is_file() && meta.len() > 0 => {}
            Ok(_) => {
                trace!("{} is not a regular non-empty file", path.display());
                return Decision::SkippedNotRegularOrEmpty;
            }
            Err(e) => {
                debug!("Cannot stat {}: {}", path.display(), e);
                return Decision::SkippedNotRegularOrEmpty;
            }
        }

        match read_sample(path).await {
            Ok(sample) if self.text_classifier.is_text(&sample).await => {}
            Ok(_) => {
                debug!("Skipping non-text file {}", path.display());
                return Decision::SkippedBinary;
            }
            Err(e) => {
                debug!("Cannot sniff {}: {}", path.display(), e);
                return Decision::SkippedBinary;
            }
        }

        let content = match async_fs::read(path).await {
            Ok(bytes) => decode_lossy(&bytes),
            Err(e) => {
                warn!("Error reading {}: {}", path.display(), e);
                return Decision::ErrorReading(e.to_string());
            }
        };

        if content.trim().is_empty() {
            debug!("Skipping blank file {}", path.display());
            return Decision::SkippedBlankText;
        }

        Decision::IncludedWithContent(content)
    }
}

async fn read_sample(path: &Path) -> std::io::Result<Vec<u8>> {
    let file = async_fs::File::open(path).await?;
    let mut sample = Vec::new();
    file.take(SNIFF_LEN).read_to_end(&mut sample).await?;
    Ok(sample)
}
