use crate::classifier::{Decision, EligibilityClassifier, TextClassifier};
use crate::errors::RecopyError;
use crate::ignore::{PatternSet, DEFAULT_IGNORE_FILE};
use crate::utils::{dot_relative, normalize_path};
use std::cmp::Ordering;
use std::path::PathBuf;
use tokio::fs as async_fs;
use tracing::{debug, info, trace, warn};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub root: PathBuf,
    pub ignore_file_name: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        CollectorConfig {
            root: PathBuf::from("."),
            ignore_file_name: DEFAULT_IGNORE_FILE.to_owned(),
        }
    }
}

impl CollectorConfig {
    pub fn root_ignore_file(&self) -> PathBuf {
        self.root.join(&self.ignore_file_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedFile {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub total: usize,
    pub copied: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl RunStats {
    /// Accounts for one file. Every file lands in exactly one bucket.
    pub fn record(&mut self, decision: &Decision) {
        self.total += 1;
        if decision.is_skip() {
            self.skipped += 1;
        } else if let Decision::ErrorReading(_) = decision {
            self.errors += 1;
        } else {
            self.copied += 1;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    pub entries: Vec<CollectedFile>,
    pub stats: RunStats,
}

impl RunResult {
    /// Renders every entry as a `filepath:` header, the content and a
    /// separator line, all joined by newlines.
    pub fn render(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(self.entries.len() * 3);
        let headers: Vec<String> = self
            .entries
            .iter()
            .map(|entry| format!("filepath: {}", entry.path))
            .collect();
        for (entry, header) in self.entries.iter().zip(&headers) {
            parts.push(header);
            parts.push(&entry.content);
            parts.push("\n");
        }
        parts.join("\n")
    }
}

pub struct Collector {
    config: CollectorConfig,
    classifier: EligibilityClassifier,
}

impl Collector {
    pub fn new(config: CollectorConfig, text_classifier: Box<dyn TextClassifier>) -> Self {
        Collector {
            config,
            classifier: EligibilityClassifier::new(text_classifier),
        }
    }

    pub async fn run(&self) -> Result<RunResult, RecopyError> {
        self.check_root().await?;
        let patterns = self.load_patterns().await;
        Ok(self.collect(&patterns).await)
    }

    /// Loads the root ignore file, then every nested one found under the root,
    /// each rooted at its own directory.
    pub async fn load_patterns(&self) -> PatternSet {
        let mut patterns = PatternSet::new();
        patterns.load(&self.config.root_ignore_file(), ".").await;

        for entry in self.walk() {
            if entry.depth() < 2 || entry.file_name() != self.config.ignore_file_name.as_str() {
                continue;
            }
            let base_dir = match entry.path().parent() {
                Some(parent) => dot_relative(&self.config.root, parent),
                None => ".".to_owned(),
            };
            patterns.load(entry.path(), &base_dir).await;
        }

        info!("Using {} ignore patterns", patterns.len());
        patterns
    }

    pub async fn collect(&self, patterns: &PatternSet) -> RunResult {
        let mut result = RunResult::default();

        for entry in self.walk() {
            let candidate = dot_relative(&self.config.root, entry.path());
            let decision = self.decide(&entry, &candidate, patterns).await;
            result.stats.record(&decision);

            if let Decision::IncludedWithContent(content) = decision {
                debug!("Collected {}", candidate);
                result.entries.push(CollectedFile {
                    path: normalize_path(&candidate),
                    content,
                });
            }
        }

        info!(
            "Scanned {} files: {} copied, {} skipped, {} errors",
            result.stats.total, result.stats.copied, result.stats.skipped, result.stats.errors
        );
        result
    }

    async fn decide(&self, entry: &DirEntry, candidate: &str, patterns: &PatternSet) -> Decision {
        if entry.file_name() == self.config.ignore_file_name.as_str() {
            trace!("Skipping ignore file {}", candidate);
            return Decision::Excluded;
        }
        if patterns.should_ignore(candidate) {
            debug!("Skipping {}: excluded by pattern", candidate);
            return Decision::Excluded;
        }
        self.classifier.classify(entry.path()).await
    }

    async fn check_root(&self) -> Result<(), RecopyError> {
        async_fs::read_dir(&self.config.root).await.map_err(|e| {
            RecopyError::RootUnreadable(self.config.root.display().to_string(), e.to_string())
        })?;
        Ok(())
    }

    /// Non-directory entries below the root in a stable order: within each
    /// directory files come first, then subdirectories, each sorted by name.
    fn walk(&self) -> impl Iterator<Item = DirEntry> + '_ {
        WalkDir::new(&self.config.root)
            .follow_links(false)
            .sort_by(compare_entries)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Error walking {}: {}", self.config.root.display(), e);
                    None
                }
            })
            .filter(|entry| entry.depth() > 0 && !is_dir_like(entry))
    }
}

fn is_dir_like(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
    is_dir_like(a)
        .cmp(&is_dir_like(b))
        .then_with(|| a.file_name().cmp(b.file_name()))
}
