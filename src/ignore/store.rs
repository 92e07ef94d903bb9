use super::pattern::Pattern;
use crate::utils::decode_lossy;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs as async_fs;
use tracing::{debug, warn};

/// Parses the text of one ignore file. Blank lines and `#` comments produce
/// nothing; every other line becomes a rule rooted at `base_dir`.
pub fn parse_ignore_content(content: &str, base_dir: &str) -> Vec<Pattern> {
    content
        .lines()
        .map(|line| line.trim().trim_end_matches('\r'))
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| Pattern::new(line, base_dir))
        .collect()
}

/// Loads an ignore file. Missing or unreadable files contribute no rules.
pub async fn load_ignore_file(path: &Path, base_dir: &str) -> Vec<Pattern> {
    match async_fs::read(path).await {
        Ok(bytes) => {
            let patterns = parse_ignore_content(&decode_lossy(&bytes), base_dir);
            debug!(
                "Loaded {} ignore patterns from {}",
                patterns.len(),
                path.display()
            );
            patterns
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No ignore file at {}", path.display());
            Vec::new()
        }
        Err(e) => {
            warn!("Could not read ignore file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}
