//! Shared types used by the manifest, content and output modules.

use std::fmt;

/// A validated author entry from `group.yaml`.
///
/// Name and profile id are required by the intro page; the email is optional
/// and rendered as an empty `mailto:` link when missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub name: String,
    pub email: String,
    pub profile_id: String,
}

/// Variant tag of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Intro,
    Html,
    Text,
    Pdf,
    Image,
    File,
    Source,
    Video,
    Discussion,
}

impl ContentKind {
    /// The `display_name` written into html descriptors.
    pub fn display_name(self) -> &'static str {
        match self {
            ContentKind::Intro => "Intro",
            ContentKind::Html => "HTML",
            ContentKind::Text => "Text",
            ContentKind::Pdf => "Pdf",
            ContentKind::Image => "Img",
            ContentKind::File => "File",
            ContentKind::Source => "Source",
            ContentKind::Video => "Video",
            ContentKind::Discussion => "Discussion",
        }
    }

    /// Category directory holding this kind's descriptor.
    pub fn category(self) -> Category {
        match self {
            ContentKind::Video => Category::Video,
            ContentKind::Discussion => Category::Discussion,
            _ => Category::Html,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Top-level directories of the course package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Course,
    Chapter,
    Sequential,
    Vertical,
    Html,
    Video,
    Discussion,
    Static,
}

impl Category {
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Course => "course",
            Category::Chapter => "chapter",
            Category::Sequential => "sequential",
            Category::Vertical => "vertical",
            Category::Html => "html",
            Category::Video => "video",
            Category::Discussion => "discussion",
            Category::Static => "static",
        }
    }
}
