//! `group.yaml` parsing.
//!
//! Every group directory carries a manifest at a fixed location:
//!
//! ```yaml
//! project: Project A
//! group: Group 1
//! authors:
//!   - name: mokaspar
//!     email: mokaspar@gmail.com
//!     edx: NotAvailable
//! content:
//!   - pdf: docs/introduction.pdf
//!   - html: docs/html1.html
//!   - text: docs/simple.txt
//!   - file: docs/sample-data.zip
//!   - img: docs/figure.png
//!   - video: http://www.youtube.com/watch?v=04ZOMuAg2bA
//!   - source: src/
//! ```
//!
//! Content order is display order and the same type may appear many times.
//! Paths are relative to the directory holding `group.yaml`. The author's
//! profile id may be given as `edx` or `external_profile_id`.
//!
//! Parsing only checks what later stages rely on: the top-level fields, and
//! that each author has a name and a profile id. Entries in `content` are kept
//! as declared; deciding what they mean happens when the group resolves them.

use crate::error::{CourseError, Result};
use crate::types::Author;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// File name of the manifest inside a group directory.
pub const MANIFEST_FILE: &str = "group.yaml";

/// A parsed, validated manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub project: String,
    pub group: String,
    pub authors: Vec<Author>,
    pub content: Vec<ContentDeclaration>,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    project: String,
    group: String,
    #[serde(default)]
    authors: Vec<RawAuthor>,
    #[serde(default)]
    content: Vec<ContentDeclaration>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAuthor {
    name: Option<String>,
    email: Option<String>,
    #[serde(alias = "edx")]
    external_profile_id: Option<String>,
}

/// One entry of the `content` list.
///
/// Exactly one of the typed fields is expected to be set. Keys we do not know
/// are collected in `other` so they can be reported when the entry is skipped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContentDeclaration {
    pub html: Option<String>,
    pub source: Option<String>,
    pub text: Option<String>,
    pub video: Option<String>,
    pub pdf: Option<String>,
    pub file: Option<String>,
    pub img: Option<String>,
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_yaml::Value>,
}

/// The recognized content tags, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationTag {
    Html,
    Source,
    Text,
    Video,
    Pdf,
    File,
    Img,
}

impl ContentDeclaration {
    /// The populated tag and its value, if any.
    ///
    /// Should an entry populate several tags, the first in dispatch order wins.
    pub fn declared(&self) -> Option<(DeclarationTag, &str)> {
        [
            (DeclarationTag::Html, &self.html),
            (DeclarationTag::Source, &self.source),
            (DeclarationTag::Text, &self.text),
            (DeclarationTag::Video, &self.video),
            (DeclarationTag::Pdf, &self.pdf),
            (DeclarationTag::File, &self.file),
            (DeclarationTag::Img, &self.img),
        ]
        .into_iter()
        .find_map(|(tag, value)| value.as_deref().map(|v| (tag, v)))
    }

    /// Keys of this entry that are not content tags.
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.other.keys().map(String::as_str).collect()
    }
}

/// Read and validate `<dir>/group.yaml`.
pub fn load_manifest(dir: &Path) -> Result<Manifest> {
    let path = dir.join(MANIFEST_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CourseError::manifest(&path, "file not found"));
        }
        Err(e) => return Err(CourseError::manifest(&path, e.to_string())),
    };
    parse_manifest(&content).map_err(|e| match e {
        CourseError::Manifest { reason, .. } => CourseError::manifest(&path, reason),
        other => other,
    })
}

/// Parse manifest text. Errors carry an empty path; [`load_manifest`] fills it in.
pub fn parse_manifest(content: &str) -> Result<Manifest> {
    let raw: RawManifest = serde_yaml::from_str(content)
        .map_err(|e| CourseError::manifest("", format!("YAML parse error: {e}")))?;

    let label = format!("{}/{}", raw.project, raw.group);
    let authors = raw
        .authors
        .into_iter()
        .enumerate()
        .map(|(i, author)| validate_author(author, &label, i + 1))
        .collect::<Result<Vec<_>>>()?;

    Ok(Manifest {
        project: raw.project,
        group: raw.group,
        authors,
        content: raw.content,
    })
}

fn validate_author(raw: RawAuthor, group: &str, index: usize) -> Result<Author> {
    let missing = |field| CourseError::Author {
        group: group.to_string(),
        index,
        field,
    };
    let name = raw
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| missing("name"))?;
    let profile_id = raw
        .external_profile_id
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| missing("edx"))?;
    Ok(Author {
        name,
        email: raw.email.unwrap_or_default(),
        profile_id,
    })
}
