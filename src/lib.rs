//! # edx-presenter
//!
//! Turns student group submissions into a course package an Open edX
//! instance can import. Each group directory carries a `group.yaml` naming its
//! project, group, authors and an ordered list of content; the tool gathers
//! all groups into one course where every project is a chapter and every group
//! a unit page.
//!
//! # Pipeline
//!
//! ```text
//! 1. Load       <dir>/group.yaml  →  Group        (manifest → resolved content)
//! 2. Collect    Groups            →  Course       (projects and groups sorted by name)
//! 3. Assemble   Course            →  <root>/      (descriptors, pages, static assets)
//! 4. Archive    <root>/           →  to_import.tar.gz
//! ```
//!
//! Each raw group directory is also archived as `<group_id>.tar.gz` right after
//! it loads, before later groups get a chance to fail the run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`manifest`] | `group.yaml` parsing and author validation |
//! | [`content`] | The nine content variants, their identifiers and rendering |
//! | [`group`] | A loaded group; renders its sequential and vertical |
//! | [`project`] | Groups of one project; renders the chapter |
//! | [`assemble`] | Collects projects and writes the whole tree |
//! | [`descriptor`] | Writes XML descriptors, HTML pages and static assets |
//! | [`archive`] | Deterministic `.tar.gz` bundles |
//! | [`naming`] | Identifier sanitizing |
//! | [`config`] | `course.toml` loading and validation |
//! | [`types`] | Shared types (`Author`, `ContentKind`, `Category`) |
//! | [`error`] | The [`CourseError`](error::CourseError) taxonomy |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud for XML
//!
//! Descriptors are written with the same [Maud](https://maud.lambda.xyz/)
//! macros as the HTML pages. The element names are arbitrary tags to Maud, so
//! `chapter`, `sequential` and `vertical` need no special support, and every
//! interpolated name is escaped. Attribute order is the order written in the
//! macro, which keeps the output stable.
//!
//! ## Identifiers Derive From Names
//!
//! Nothing is numbered. Every identifier comes from the project and group
//! names plus the declared path, so the same input always produces the same
//! tree, and two builds can be compared file by file.
//!
//! ## One Soft Failure
//!
//! A content entry with no recognized type is logged and skipped. Everything
//! else (missing manifest, missing author field, unsupported video host,
//! unreadable file) stops the run.

pub mod archive;
pub mod assemble;
pub mod config;
pub mod content;
pub mod descriptor;
pub mod error;
pub mod group;
pub mod manifest;
pub mod naming;
pub mod output;
pub mod project;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
