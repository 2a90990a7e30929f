//! A submitted group: one `group.yaml` and the files it points at.
//!
//! In the course a group becomes a `sequential` holding exactly one
//! `vertical`, and the vertical lists the group's content in order:
//!
//! ```text
//! sequential/<gid>.xml           → <vertical url_name="<gid>_vertical">
//! vertical/<gid>_vertical.xml    → intro, declared content..., discussion
//! ```

use crate::assemble::RenderContext;
use crate::content::Content;
use crate::descriptor::write_descriptor;
use crate::error::Result;
use crate::manifest::load_manifest;
use crate::naming::group_identifier;
use crate::types::{Author, Category};
use maud::{Markup, html};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Group {
    path: PathBuf,
    project: String,
    group: String,
    authors: Vec<Author>,
    content: Vec<Content>,
}

impl Group {
    /// Read `<path>/group.yaml` and resolve its content list.
    ///
    /// The content always starts with an intro and ends with a discussion.
    /// Entries without a recognized tag are logged and dropped.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let manifest = load_manifest(&path)?;
        let label = format!("{}/{}", manifest.project, manifest.group);

        let mut content = Vec::with_capacity(manifest.content.len() + 2);
        content.push(Content::Intro);
        for (index, declaration) in manifest.content.iter().enumerate() {
            match Content::from_declaration(declaration, &label)? {
                Some(item) => {
                    debug!(group = %label, kind = %item.kind(), "resolved content entry");
                    content.push(item);
                }
                None => info!(
                    group = %label,
                    entry = index + 1,
                    keys = ?declaration.unknown_keys(),
                    "skipping content entry without a known type"
                ),
            }
        }
        content.push(Content::Discussion);

        Ok(Self {
            path,
            project: manifest.project,
            group: manifest.group,
            authors: manifest.authors,
            content,
        })
    }

    /// Directory holding `group.yaml`; content paths are relative to it.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn content(&self) -> &[Content] {
        &self.content
    }

    pub fn identifier(&self) -> String {
        group_identifier(&self.project, &self.group)
    }

    pub fn vertical_identifier(&self) -> String {
        format!("{}_vertical", self.identifier())
    }

    /// Write the sequential, every content item, and finally the vertical.
    pub fn render(&self, ctx: &mut RenderContext) -> Result<()> {
        let id = self.identifier();
        let vertical_id = self.vertical_identifier();

        let sequential = html! {
            sequential display_name=(self.group) {
                vertical url_name=(vertical_id) {}
            }
        };
        write_descriptor(ctx.root, Category::Sequential, &id, sequential)?;

        let mut fragments: Vec<Markup> = Vec::with_capacity(self.content.len());
        for item in &self.content {
            fragments.push(item.reference_fragment(self));
            item.render(self, ctx)?;
        }

        let vertical = html! {
            vertical display_name="MainUnit" {
                @for fragment in &fragments { (fragment) }
            }
        };
        write_descriptor(ctx.root, Category::Vertical, &vertical_id, vertical)?;
        info!(group = %id, items = self.content.len(), "rendered group");
        Ok(())
    }
}
