//! [`TestWorkspace`] builder for conversion test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

/// A temporary directory laid out like the converter's `/workspace`, with a
/// sibling directory standing in for the pre-built invoker tree.
///
/// # Example
///
/// ```rust,no_run
/// use convert_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write("index.php", "<?php echo 'hi';");
/// ws.assert_file_exists("index.php");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty workspace and a populated invoker source tree.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("workspace")).unwrap();

        let invoker = temp_dir.path().join("invoker-src");
        fs::create_dir_all(invoker.join("src")).unwrap();
        fs::write(
            invoker.join("composer.json"),
            r#"{"name": "google/function-invoker"}"#,
        )
        .unwrap();
        fs::write(invoker.join("router.php"), "<?php // router").unwrap();
        fs::write(invoker.join("src/Invoker.php"), "<?php // invoker").unwrap();

        Self { temp_dir }
    }

    /// The directory being converted.
    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join("workspace")
    }

    /// The stand-in for the pre-built `/invoker` tree.
    pub fn invoker_source(&self) -> PathBuf {
        self.temp_dir.path().join("invoker-src")
    }

    /// A scratch directory outside the workspace, e.g. for fake tools.
    pub fn outside(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `path` relative to the workspace root, creating
    /// parent directories.
    pub fn write(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    /// Read `path` relative to the workspace root.
    pub fn read(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("failed to read {}: {}", full_path.display(), e))
    }

    /// Parse `path` relative to the workspace root as JSON.
    pub fn read_json(&self, path: &str) -> Value {
        serde_json::from_str(&self.read(path)).unwrap()
    }

    /// Names of the entries at the top of the workspace, sorted.
    pub fn top_level(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Assert that `path` (relative to the workspace root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the workspace root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}

/// Recursively copy `from` into `to`, like `cp -r` onto a missing target.
pub fn copy_tree(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_tree(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), target).unwrap();
        }
    }
}
