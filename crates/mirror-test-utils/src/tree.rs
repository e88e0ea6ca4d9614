//! [`TestTree`] builder for mirror test scenarios.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

/// What lives at one relative path of a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Dir,
    File(Vec<u8>),
}

/// A temporary directory tree with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use mirror_test_utils::TestTree;
///
/// let tree = TestTree::new()
///     .with_file("a.txt", "hi")
///     .with_dir("empty")
///     .with_file("sub/b.txt", "yo");
/// tree.assert_file_contains("sub/b.txt", "yo");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file at `path`, creating parent directories.
    pub fn with_file(self, path: &str, content: impl AsRef<[u8]>) -> Self {
        self.write(path, content);
        self
    }

    /// Create the directory `path` and its parents.
    pub fn with_dir(self, path: &str) -> Self {
        self.mkdir(path);
        self
    }

    /// Write (or overwrite) a file at `path`, creating parent directories.
    pub fn write(&self, path: &str, content: impl AsRef<[u8]>) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }

    pub fn mkdir(&self, path: &str) {
        fs::create_dir_all(self.root().join(path)).unwrap();
    }

    /// Delete a file or a whole directory.
    pub fn remove(&self, path: &str) {
        let full_path = self.root().join(path);
        if full_path.is_dir() {
            fs::remove_dir_all(&full_path).unwrap();
        } else {
            fs::remove_file(&full_path).unwrap();
        }
    }

    /// Every entry below the root, keyed by `/`-separated relative path.
    pub fn list(&self) -> BTreeMap<String, Node> {
        list_tree(self.root())
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected path to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected path NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` holds exactly `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or differs.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let full_path = self.root().join(path);
        let file_content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert_eq!(
            file_content,
            content,
            "File {} has unexpected content",
            full_path.display()
        );
    }
}

/// List every entry under `root` (root itself excluded).
pub fn list_tree(root: &Path) -> BTreeMap<String, Node> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            let entry = entry.unwrap();
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            let node = if entry.file_type().is_dir() {
                Node::Dir
            } else {
                Node::File(fs::read(entry.path()).unwrap())
            };
            (relative, node)
        })
        .collect()
}

/// Assert that `replica` holds exactly the paths, kinds and bytes of `source`.
///
/// # Panics
/// Panics listing the first difference.
pub fn assert_mirrors(source: &Path, replica: &Path) {
    let expected = list_tree(source);
    let actual = list_tree(replica);

    for (path, node) in &expected {
        match actual.get(path) {
            None => panic!("{path} missing from replica"),
            Some(found) => assert_eq!(found, node, "{path} differs between source and replica"),
        }
    }
    for path in actual.keys() {
        assert!(expected.contains_key(path), "{path} exists only in replica");
    }
}
