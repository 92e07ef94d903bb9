pub mod matcher;
pub mod pattern;
pub mod store;

pub use pattern::Pattern;
pub use store::{load_ignore_file, parse_ignore_content};

use std::path::Path;
use tracing::debug;

pub const DEFAULT_IGNORE_FILE: &str = "recopy.ignore";

/// Rules from the root ignore file followed by every nested ignore file, in
/// the order they were found.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    pub fn new() -> Self {
        PatternSet::default()
    }

    pub fn from_patterns(patterns: Vec<Pattern>) -> Self {
        PatternSet { patterns }
    }

    /// Parses `lines` as the content of an ignore file living in `base_dir`.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], base_dir: &str) -> Self {
        let content = lines
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        PatternSet::from_patterns(parse_ignore_content(&content, base_dir))
    }

    pub async fn load(&mut self, path: &Path, base_dir: &str) {
        let loaded = load_ignore_file(path, base_dir).await;
        debug!("Adding {} patterns from {}", loaded.len(), path.display());
        self.patterns.extend(loaded);
    }

    pub fn should_ignore(&self, candidate: &str) -> bool {
        matcher::is_excluded(candidate, &self.patterns)
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
