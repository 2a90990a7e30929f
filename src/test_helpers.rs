//! Shared test utilities.
//!
//! Builds throwaway group directories and reads back the generated tree.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let dir = write_group(tmp.path(), "g1", "Project A", "Group 1", "  - html: a.html\n");
//! write_file(&dir, "a.html", "<p>hi</p>");
//! let group = Group::load(&dir).unwrap();
//! ```

use std::fs;
use std::path::{Path, PathBuf};

// =========================================================================
// Input fixtures
// =========================================================================

/// Write `root/<dir>/group.yaml` with one author and return the group dir.
///
/// `content_lines` are YAML list items placed under `content:`, for example
/// `"  - pdf: doc.pdf\n"`. Pass `""` for a group with no declared content.
pub fn write_group(
    root: &Path,
    dir: &str,
    project: &str,
    group: &str,
    content_lines: &str,
) -> PathBuf {
    let path = root.join(dir);
    fs::create_dir_all(&path).unwrap();
    let content = if content_lines.is_empty() {
        "content: []\n".to_string()
    } else {
        format!("content:\n{content_lines}")
    };
    let yaml = format!(
        "project: \"{project}\"\n\
         group: \"{group}\"\n\
         authors:\n  - name: X\n    email: x@example.com\n    edx: x1\n\
         {content}"
    );
    fs::write(path.join("group.yaml"), yaml).unwrap();
    path
}

/// Write `dir/<rel>`, creating parent directories.
pub fn write_file(dir: &Path, rel: &str, content: impl AsRef<[u8]>) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

// =========================================================================
// Output inspection
// =========================================================================

/// Read `root/<rel>` as a string, panicking with the path on failure.
pub fn read(root: &Path, rel: &str) -> String {
    let path = root.join(rel);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

/// All `url_name` attribute values in document order.
pub fn url_names(xml: &str) -> Vec<String> {
    xml.split("url_name=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}

#[test]
fn url_names_in_order() {
    let xml = r#"<chapter><sequential url_name="b"></sequential><sequential url_name="a"></sequential></chapter>"#;
    assert_eq!(url_names(xml), vec!["b", "a"]);
}
