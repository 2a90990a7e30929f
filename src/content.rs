//! Content items of a group and how each one lands in the course tree.
//!
//! A group's unit page (its `vertical`) is a sequence of content items. Each
//! item can do two things:
//!
//! - [`Content::reference_fragment`]: the element the vertical embeds to
//!   point at the item (`<html url_name=..>`, `<video ..>`, `<discussion ..>`);
//! - [`Content::render`]: write the item's own descriptor and payload files.
//!
//! Both use [`Content::identifier`], so a reference always names the files
//! the item writes.
//!
//! ## Identifiers
//!
//! | Variant | Identifier | Payload |
//! |---|---|---|
//! | Intro | `<gid>_intro` | `html/<id>.html` (generated) |
//! | Html | `<gid>_html_<path>` | `html/<id>.html` (copied) |
//! | Text | `<gid>_text_<path>` | `html/<id>.html` (generated) |
//! | Pdf | `<gid>_pdf_<path>` | `static/<id>.pdf` + page |
//! | Image | `<gid>_img_<path>` | `static/<id>.<ext>` + page |
//! | File | `<gid>_file_<path without ext>`, dots kept | `static/<id>.<ext>` + page |
//! | Source | `<gid>_source_<path>` | `static/<id>.tar.gz` + page |
//! | Video | `<gid>_youtube_<video id>` | descriptor only |
//! | Discussion | `<gid>_discussion` | descriptor only |
//!
//! Everything is passed through [`slug`] (or [`slug_file`] for files), and
//! every identifier starts with the owning group's identifier.

use crate::archive;
use crate::assemble::RenderContext;
use crate::config::SourceConfig;
use crate::descriptor::{
    copy_page, copy_static, static_path, static_url, write_descriptor, write_page,
};
use crate::error::{CourseError, IoContext, Result};
use crate::group::Group;
use crate::manifest::{ContentDeclaration, DeclarationTag};
use crate::naming::{slug, slug_file};
use crate::types::{Category, ContentKind};
use maud::{Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;
use walkdir::WalkDir;

/// One content item. Paths are relative to the group directory.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Intro,
    Html { path: String },
    Text { path: String },
    Pdf { path: String },
    Image { path: String },
    File { path: String },
    Source { path: String },
    Video { video_id: String },
    Discussion,
}

impl Content {
    /// Turn a manifest entry into a content item.
    ///
    /// `Ok(None)` means the entry has no recognized tag. A video URL we cannot
    /// embed is an error, since dropping it would silently lose content.
    pub fn from_declaration(declaration: &ContentDeclaration, group: &str) -> Result<Option<Self>> {
        let Some((tag, value)) = declaration.declared() else {
            return Ok(None);
        };
        let path = value.to_string();
        let content = match tag {
            DeclarationTag::Html => Content::Html { path },
            DeclarationTag::Source => Content::Source { path },
            DeclarationTag::Text => Content::Text { path },
            DeclarationTag::Pdf => Content::Pdf { path },
            DeclarationTag::File => Content::File { path },
            DeclarationTag::Img => Content::Image { path },
            DeclarationTag::Video => {
                let video_id =
                    youtube_id(value).ok_or_else(|| CourseError::UnsupportedContent {
                        group: group.to_string(),
                        url: value.to_string(),
                    })?;
                Content::Video { video_id }
            }
        };
        Ok(Some(content))
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Content::Intro => ContentKind::Intro,
            Content::Html { .. } => ContentKind::Html,
            Content::Text { .. } => ContentKind::Text,
            Content::Pdf { .. } => ContentKind::Pdf,
            Content::Image { .. } => ContentKind::Image,
            Content::File { .. } => ContentKind::File,
            Content::Source { .. } => ContentKind::Source,
            Content::Video { .. } => ContentKind::Video,
            Content::Discussion => ContentKind::Discussion,
        }
    }

    /// The declared path or video id, for display.
    pub fn label(&self) -> Option<&str> {
        match self {
            Content::Html { path }
            | Content::Text { path }
            | Content::Pdf { path }
            | Content::Image { path }
            | Content::File { path }
            | Content::Source { path } => Some(path),
            Content::Video { video_id } => Some(video_id),
            Content::Intro | Content::Discussion => None,
        }
    }

    pub fn identifier(&self, group: &Group) -> String {
        let gid = group.identifier();
        match self {
            Content::Intro => slug(&format!("{gid}_intro")),
            Content::Html { path } => slug(&format!("{gid}_html_{path}")),
            Content::Text { path } => slug(&format!("{gid}_text_{path}")),
            Content::Pdf { path } => slug(&format!("{gid}_pdf_{path}")),
            Content::Image { path } => slug(&format!("{gid}_img_{path}")),
            Content::File { path } => slug_file(&format!("{gid}_file_{}", strip_extension(path))),
            Content::Source { path } => slug(&format!("{gid}_source_{path}")),
            Content::Video { video_id } => slug(&format!("{gid}_youtube_{video_id}")),
            Content::Discussion => slug(&format!("{gid}_discussion")),
        }
    }

    /// File name of the item's static asset, for variants that have one.
    pub fn static_file_name(&self, group: &Group) -> Option<String> {
        let id = self.identifier(group);
        match self {
            Content::Pdf { .. } => Some(format!("{id}.pdf")),
            Content::Image { path } | Content::File { path } => Some(match extension(path) {
                Some(ext) => format!("{id}.{ext}"),
                None => id,
            }),
            Content::Source { .. } => Some(format!("{id}.tar.gz")),
            _ => None,
        }
    }

    /// The element a vertical embeds to reference this item.
    pub fn reference_fragment(&self, group: &Group) -> Markup {
        let id = self.identifier(group);
        match self.kind().category() {
            Category::Video => html! { video url_name=(id) {} },
            Category::Discussion => html! { discussion url_name=(id) {} },
            _ => html! { html url_name=(id) {} },
        }
    }

    /// Write this item's descriptor and payload into the tree.
    pub fn render(&self, group: &Group, ctx: &mut RenderContext) -> Result<()> {
        let id = self.identifier(group);
        let (root, config) = (ctx.root, ctx.config);
        debug!(kind = %self.kind(), id = %id, "rendering content");
        match self {
            Content::Intro => {
                let page = intro_page(group, &config.profile_base);
                write_html_node(root, &id, self.kind(), page)
            }
            Content::Html { path } => {
                write_html_descriptor(root, &id, self.kind())?;
                copy_page(root, &id, &group.path().join(path))?;
                Ok(())
            }
            Content::Text { path } => {
                let source = group.path().join(path);
                let text = fs::read_to_string(&source).at(&source)?;
                write_html_node(root, &id, self.kind(), text_page(&text))
            }
            Content::Pdf { path } => {
                let file_name = format!("{id}.pdf");
                copy_static(root, &file_name, &group.path().join(path))?;
                let viewer = match &config.course_base_url {
                    Some(base) => Some(format!(
                        "{}?url={base}/asset/{file_name}&embedded=true",
                        config.pdf_viewer
                    )),
                    None => {
                        ctx.warn(format!(
                            "course_base_url is not set, inline PDF viewer disabled for {path}"
                        ));
                        None
                    }
                };
                let page = pdf_page(&file_name, base_name(path), viewer.as_deref());
                write_html_node(root, &id, self.kind(), page)
            }
            Content::Image { path } => {
                let file_name = self.static_file_name(group).unwrap_or_default();
                copy_static(root, &file_name, &group.path().join(path))?;
                write_html_node(root, &id, self.kind(), image_page(&file_name, base_name(path)))
            }
            Content::File { path } => {
                let file_name = self.static_file_name(group).unwrap_or_default();
                copy_static(root, &file_name, &group.path().join(path))?;
                write_html_node(root, &id, self.kind(), file_page(&file_name, base_name(path)))
            }
            Content::Source { path } => {
                let source = group.path().join(path);
                let file_name = format!("{id}.tar.gz");
                let arcname = source
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| id.clone());
                archive::archive_path(&source, &static_path(root, &file_name)?, &arcname)?;

                let mut listings = Vec::new();
                for file in source_files(&source, &config.source.extension)? {
                    let code = fs::read_to_string(&file).at(&file)?;
                    listings.push((relative_display(&file, group.path()), code));
                }
                let page = source_page(path, &file_name, &listings, &config.source);
                write_html_node(root, &id, self.kind(), page)
            }
            Content::Video { video_id } => {
                let markup = html! {
                    video youtube={ "1.00:" (video_id) } youtube_id_1_0=(video_id) {}
                };
                write_descriptor(root, Category::Video, &id, markup)?;
                Ok(())
            }
            Content::Discussion => {
                let markup = html! {
                    discussion
                        discussion_id=(id)
                        discussion_category=(group.project())
                        discussion_target=(group.group()) {}
                };
                write_descriptor(root, Category::Discussion, &id, markup)?;
                Ok(())
            }
        }
    }
}

/// Extract the video id from a YouTube URL.
///
/// Accepts `youtube.com/watch?v=<id>` (with or without `www.`/`m.`) and
/// `youtu.be/<id>`. Any other host yields `None`.
pub fn youtube_id(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    let id = match url.host_str()? {
        "www.youtube.com" | "youtube.com" | "m.youtube.com" => url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned()),
        "youtu.be" => url
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_string),
        _ => None,
    }?;
    (!id.is_empty()).then_some(id)
}

fn write_html_descriptor(root: &Path, id: &str, kind: ContentKind) -> Result<()> {
    let markup = html! { html filename=(id) display_name=(kind.display_name()) {} };
    write_descriptor(root, Category::Html, id, markup)?;
    Ok(())
}

fn write_html_node(root: &Path, id: &str, kind: ContentKind, page: Markup) -> Result<()> {
    write_html_descriptor(root, id, kind)?;
    write_page(root, id, page)?;
    Ok(())
}

fn intro_page(group: &Group, profile_base: &str) -> Markup {
    html! {
        h2 { (group.project()) ": " (group.group()) }
        div.authors {
            "Author(s):"
            ul {
                @for author in group.authors() {
                    @let profile_url = format!("{profile_base}{}/", author.profile_id);
                    li {
                        a href={ "mailto:" (author.email) } { (author.name) }
                        " AKA "
                        a href=(profile_url) { (author.profile_id) }
                    }
                }
            }
        }
    }
}

fn text_page(text: &str) -> Markup {
    html! {
        div {
            @for (i, line) in text.split('\n').enumerate() {
                @if i > 0 { br; }
                (line)
            }
        }
    }
}

fn pdf_page(file_name: &str, name: &str, viewer: Option<&str>) -> Markup {
    html! {
        @if let Some(src) = viewer {
            iframe src=(src) style="border: none; width:100%; height:780px;" {}
        }
        a href=(static_url(file_name)) { "Download Pdf " (name) }
    }
}

fn image_page(file_name: &str, name: &str) -> Markup {
    html! {
        img src=(static_url(file_name));
        br;
        a href=(static_url(file_name)) { "Download Image " (name) }
    }
}

fn file_page(file_name: &str, name: &str) -> Markup {
    html! {
        a href=(static_url(file_name)) { "Download " (name) }
    }
}

fn source_page(
    path: &str,
    archive_name: &str,
    listings: &[(String, String)],
    source: &SourceConfig,
) -> Markup {
    html! {
        h3 { "Source of " (path) }
        a href=(static_url(archive_name)) { "Download source as archive" }
        @for (name, code) in listings {
            h3 { (name) }
            script src=(source.highlighter) {}
            pre class={ "prettyprint " (source.language) } { (code) }
        }
    }
}

/// Files listed inline on a source page: a single matching file, or every
/// matching file below a directory, sorted by name within each directory.
/// Symlinks are not followed and never listed.
fn source_files(source: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let suffix = format!(".{extension}");
    let listed = |name: &str| name.ends_with(&suffix) && !name.starts_with('.');
    if fs::symlink_metadata(source).is_ok_and(|m| m.is_file()) {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        return Ok(if listed(&name) {
            vec![source.to_path_buf()]
        } else {
            Vec::new()
        });
    }
    let entries = WalkDir::new(source)
        .follow_root_links(false)
        .sort_by_file_name()
        .into_iter()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(std::io::Error::from)
        .at(source)?;
    Ok(entries
        .into_iter()
        .filter(|e| e.file_type().is_file() && listed(&e.file_name().to_string_lossy()))
        .map(|e| e.into_path())
        .collect())
}

/// Path relative to the group directory, `/`-separated.
fn relative_display(file: &Path, group_dir: &Path) -> String {
    let rel = file.strip_prefix(group_dir).unwrap_or(file);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Last path segment of a declared path.
fn base_name(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(path)
}

/// Sanitized extension of the last path segment, without the dot.
fn extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .map(|e| slug(&e.to_string_lossy()))
        .filter(|e| !e.is_empty())
}

/// The declared path with the extension of its last segment removed.
fn strip_extension(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|ext| path.strip_suffix(&format!(".{}", ext.to_string_lossy())))
        .unwrap_or(path)
}
