use crate::utils::join_under;
use glob::{MatchOptions, Pattern as GlobPattern};
use tracing::{trace, warn};

/// Shell-glob options used for every wildcard rule: `*` and `?` cross `/`,
/// case-sensitive, no special treatment of leading dots.
const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// One exclusion rule, resolved against the directory of the ignore file that
/// defined it.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub raw: String,
    pub rooted_path: String,
    pub has_wildcard: bool,
    compiled: Option<GlobPattern>,
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw && self.rooted_path == other.rooted_path
    }
}

impl Pattern {
    /// Builds a rule from one already-trimmed, non-comment line. `base_dir` is
    /// the `./`-relative directory holding the ignore file (`.` for the root).
    pub fn new(raw: &str, base_dir: &str) -> Self {
        let has_wildcard = raw.contains('*') || raw.contains('?');

        // Candidates are root-relative `./` paths, so an anchored `/x` has to
        // become `./x` to ever match.
        let mut rooted_path = if raw.starts_with('/') {
            format!(".{}", raw)
        } else if let Some(rest) = raw.strip_prefix("./") {
            join_under(base_dir, rest)
        } else {
            join_under(base_dir, raw)
        };

        if rooted_path.ends_with('/') {
            if has_wildcard {
                rooted_path.push('*');
            } else {
                rooted_path = rooted_path.trim_end_matches('/').to_owned();
            }
        }

        let compiled = if has_wildcard {
            compile_glob(&rooted_path)
        } else {
            None
        };

        trace!("Rooted pattern '{}' as '{}'", raw, rooted_path);
        Pattern {
            raw: raw.to_owned(),
            rooted_path,
            has_wildcard,
            compiled,
        }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        if self.has_wildcard {
            return match &self.compiled {
                Some(glob) => glob.matches_with(candidate, GLOB_OPTIONS),
                None => candidate == self.rooted_path,
            };
        }

        candidate == self.rooted_path
            || candidate
                .strip_prefix(self.rooted_path.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// `**` is two plain stars here, never "zero or more directories": `**/`
/// still needs a `/` to match. Since `*` already crosses separators, runs of
/// stars collapse to one before compiling. An unclosed `[` is retried with
/// brackets escaped before giving up on globbing the rule at all.
fn compile_glob(rooted: &str) -> Option<GlobPattern> {
    let mut collapsed = rooted.to_owned();
    while collapsed.contains("**") {
        collapsed = collapsed.replace("**", "*");
    }
    match GlobPattern::new(&collapsed) {
        Ok(glob) => return Some(glob),
        Err(e) => trace!("Retrying glob '{}' after error: {}", collapsed, e),
    }

    let escaped: String = collapsed
        .chars()
        .map(|c| match c {
            '[' => "[[]".to_owned(),
            ']' => "[]]".to_owned(),
            other => other.to_string(),
        })
        .collect();
    match GlobPattern::new(&escaped) {
        Ok(glob) => Some(glob),
        Err(e) => {
            warn!("Invalid ignore pattern '{}': {}", rooted, e);
            None
        }
    }
}
