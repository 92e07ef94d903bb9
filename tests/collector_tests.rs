use recopy::collector::{CollectedFile, Collector, CollectorConfig, RunResult, RunStats};
use recopy::config::ensure_ignore_file;
use recopy::errors::RecopyError;
use async_trait::async_trait;
use recopy::{HeuristicClassifier, TextClassifier};
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use tokio::fs;
use tracing_test::traced_test;

fn collector_for(root: &Path) -> Collector {
    Collector::new(
        CollectorConfig {
            root: root.to_path_buf(),
            ..CollectorConfig::default()
        },
        Box::new(HeuristicClassifier::new()),
    )
}

async fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.unwrap();
    }
    fs::write(path, content).await.unwrap();
}

/// Treats everything as text, but deletes `victim` when asked about it so
/// its full read fails.
struct VanishingClassifier {
    victim: PathBuf,
}

#[async_trait]
impl TextClassifier for VanishingClassifier {
    async fn is_text(&self, sample: &[u8]) -> bool {
        if sample == b"doomed" {
            std::fs::remove_file(&self.victim).unwrap();
        }
        true
    }
}

fn paths(result: &RunResult) -> Vec<&str> {
    result.entries.iter().map(|e| e.path.as_str()).collect()
}

#[tokio::test]
async fn test_basic_scenario() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a.txt", b"hello").await;
    write(root, "b.bin", b"\x7fELF\x02\x01\x01\0\0\0\0\0").await;
    write(root, "empty.txt", b"").await;
    write(root, "recopy.ignore", b"b.bin\n").await;

    let result = collector_for(root).run().await.unwrap();

    assert_eq!(
        result.entries,
        vec![CollectedFile {
            path: "a.txt".to_string(),
            content: "hello".to_string(),
        }]
    );
    assert_eq!(
        result.stats,
        RunStats {
            total: 4,
            copied: 1,
            skipped: 3,
            errors: 0,
        }
    );
}

#[tokio::test]
async fn test_comment_only_ignore_file_still_applies_content_gates() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "recopy.ignore", b"# nothing here\n\n   \n").await;
    write(root, "keep.txt", b"kept").await;
    write(root, "blob.bin", b"\0\0\0\x01\x02").await;
    write(root, "blank.txt", b"\n\n  ").await;

    let collector = collector_for(root);
    assert!(collector.load_patterns().await.is_empty());

    let result = collector.run().await.unwrap();
    assert_eq!(paths(&result), vec!["keep.txt"]);
    assert_eq!(result.stats.total, 4);
    assert_eq!(result.stats.skipped, 3);
}

#[tokio::test]
async fn test_nested_ignore_file_only_applies_below_its_directory() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "recopy.ignore", b"").await;
    write(root, "subdir/recopy.ignore", b"*.log\n").await;
    write(root, "subdir/a.log", b"sub log").await;
    write(root, "subdir/keep.txt", b"sub text").await;
    write(root, "other/a.log", b"other log").await;

    let result = collector_for(root).run().await.unwrap();

    assert_eq!(paths(&result), vec!["other/a.log", "subdir/keep.txt"]);
    assert_eq!(
        result.stats,
        RunStats {
            total: 5,
            copied: 2,
            skipped: 3,
            errors: 0,
        }
    );
}

#[tokio::test]
async fn test_nested_patterns_follow_root_patterns_in_traversal_order() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "recopy.ignore", b"root-rule\n").await;
    write(root, "b/recopy.ignore", b"b-rule\n").await;
    write(root, "a/recopy.ignore", b"a-rule\n").await;
    write(root, "a/deeper/recopy.ignore", b"deep-rule\n").await;

    let patterns = collector_for(root).load_patterns().await;
    let rooted: Vec<&str> = patterns
        .patterns()
        .iter()
        .map(|p| p.rooted_path.as_str())
        .collect();
    assert_eq!(
        rooted,
        vec!["./root-rule", "./a/a-rule", "./a/deeper/deep-rule", "./b/b-rule"]
    );
}

#[tokio::test]
async fn test_directory_rule_excludes_whole_subtree() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "recopy.ignore", b"node_modules/\n/dist\n").await;
    write(root, "node_modules/pkg/index.js", b"module.exports = 1;").await;
    write(root, "dist/bundle.js", b"bundle").await;
    write(root, "src/dist/keep.js", b"nested dist is kept").await;
    write(root, "src/main.js", b"console.log(1);").await;

    let result = collector_for(root).run().await.unwrap();
    assert_eq!(paths(&result), vec!["src/main.js", "src/dist/keep.js"]);
}

#[tokio::test]
async fn test_dot_slash_star_crosses_directories() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "recopy.ignore", b"./temp/*\n").await;
    write(root, "temp/x.txt", b"x").await;
    write(root, "temp/sub/x.txt", b"deep x").await;
    write(root, "keep/x.txt", b"kept").await;

    let result = collector_for(root).run().await.unwrap();
    assert_eq!(paths(&result), vec!["keep/x.txt"]);
    assert_eq!(result.stats.skipped, 3);
}

#[tokio::test]
async fn test_traversal_lists_files_before_subdirectories_sorted_by_name() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "recopy.ignore", b"").await;
    write(root, "zz.txt", b"zz").await;
    write(root, "b.txt", b"b").await;
    write(root, "aa/x.txt", b"x").await;
    write(root, "m/d.txt", b"d").await;
    write(root, "m/c/e.txt", b"e").await;

    let result = collector_for(root).run().await.unwrap();
    assert_eq!(
        paths(&result),
        vec!["b.txt", "zz.txt", "aa/x.txt", "m/d.txt", "m/c/e.txt"]
    );
}

#[tokio::test]
async fn test_runs_are_idempotent() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "recopy.ignore", b"*.tmp\n").await;
    write(root, "one.txt", b"1").await;
    write(root, "two/two.txt", b"2").await;
    write(root, "scratch.tmp", b"tmp").await;

    let collector = collector_for(root);
    let first = collector.run().await.unwrap();
    let second = collector.run().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.render(), second.render());
}

#[tokio::test]
async fn test_custom_ignore_file_name() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, ".collectignore", b"secret.txt\n").await;
    write(root, "secret.txt", b"hidden").await;
    write(root, "public.txt", b"shown").await;
    write(root, "recopy.ignore", b"public.txt\n").await;

    let collector = Collector::new(
        CollectorConfig {
            root: root.to_path_buf(),
            ignore_file_name: ".collectignore".to_string(),
        },
        Box::new(HeuristicClassifier::new()),
    );
    let result = collector.run().await.unwrap();
    assert_eq!(paths(&result), vec!["public.txt", "recopy.ignore"]);
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlinked_directories_are_not_followed() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "real/file.txt", b"real").await;
    std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();

    let result = collector_for(root).run().await.unwrap();
    assert_eq!(paths(&result), vec!["real/file.txt"]);
    assert_eq!(result.stats.total, 1);
}

#[tokio::test]
async fn test_missing_root_is_fatal() {
    let dir = tempdir().unwrap();
    let result = collector_for(&dir.path().join("nope")).run().await;
    assert!(matches!(result, Err(RecopyError::RootUnreadable(_, _))));
}

#[tokio::test]
#[traced_test]
async fn test_exclusions_are_logged() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "recopy.ignore", b"skip.txt\n").await;
    write(root, "skip.txt", b"skip me").await;

    let result = collector_for(root).run().await.unwrap();
    assert!(result.entries.is_empty());
    assert!(logs_contain("excluded by pattern"));
}

#[tokio::test]
async fn test_ensure_ignore_file_creates_once() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    assert!(ensure_ignore_file(root, "recopy.ignore").await.unwrap());
    assert!(!ensure_ignore_file(root, "recopy.ignore").await.unwrap());

    let content = fs::read(root.join("recopy.ignore")).await.unwrap();
    assert!(content.is_empty());
}

#[tokio::test]
async fn test_existing_ignore_file_is_left_untouched() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "recopy.ignore", b"*.log\n").await;

    assert!(!ensure_ignore_file(root, "recopy.ignore").await.unwrap());
    let content = fs::read_to_string(root.join("recopy.ignore")).await.unwrap();
    assert_eq!(content, "*.log\n");
}

#[tokio::test]
#[traced_test]
async fn test_unreadable_file_counts_as_error_and_run_continues() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "recopy.ignore", b"").await;
    write(root, "a.txt", b"first").await;
    write(root, "b.txt", b"doomed").await;
    write(root, "c.txt", b"last").await;

    let collector = Collector::new(
        CollectorConfig {
            root: root.to_path_buf(),
            ..CollectorConfig::default()
        },
        Box::new(VanishingClassifier {
            victim: root.join("b.txt"),
        }),
    );
    let result = collector.run().await.unwrap();

    assert_eq!(paths(&result), vec!["a.txt", "c.txt"]);
    assert_eq!(
        result.stats,
        RunStats {
            total: 4,
            copied: 2,
            skipped: 1,
            errors: 1,
        }
    );
    assert!(logs_contain("Error reading"));
}
