use super::pattern::Pattern;
use tracing::trace;

/// Returns true when any rule excludes `candidate`. Rules are tested
/// independently, so their order only changes how early this returns.
pub fn is_excluded(candidate: &str, patterns: &[Pattern]) -> bool {
    match patterns.iter().find(|pattern| pattern.matches(candidate)) {
        Some(pattern) => {
            trace!("{} excluded by '{}'", candidate, pattern.raw);
            true
        }
        None => false,
    }
}
