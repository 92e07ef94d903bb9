use std::path::Path;

/// Renders `path` relative to `root` in the `./`-prefixed form used for
/// matching. The root itself is `.`.
pub fn dot_relative(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let relative = relative.to_string_lossy().replace('\\', "/");
    if relative.is_empty() {
        ".".to_owned()
    } else {
        format!("./{}", relative)
    }
}

pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    match path.strip_prefix("./") {
        Some(stripped) => stripped.to_owned(),
        None => path,
    }
}

/// Joins a pattern under a `./`-relative directory the way a shell path join
/// would, without normalizing `..` or duplicate separators.
pub fn join_under(base_dir: &str, rest: &str) -> String {
    if base_dir.is_empty() {
        return rest.to_owned();
    }
    if base_dir.ends_with('/') {
        format!("{}{}", base_dir, rest)
    } else {
        format!("{}/{}", base_dir, rest)
    }
}

pub fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
