//! Course configuration.
//!
//! Settings describing the course as a whole live in an optional `course.toml`
//! passed with `--config`. Values not given there fall back to the stock
//! defaults below; `--course-url` on the command line wins over the file.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! display_name = "MAT101 projects"
//! org = "IMATHatUZH"
//! course = "course"
//! # course_base_url = "https://edx.example.org/courses/ORG/COURSE/RUN"
//! profile_base = "http://edx.math.uzh.ch/courses/IMATHatUZH/MAT101/Fall_2013/wiki/MAT101/profiles/"
//! pdf_viewer = "http://docs.google.com/viewer"
//!
//! [source]
//! extension = "py"
//! language = "python"
//! highlighter = "https://google-code-prettify.googlecode.com/svn/loader/run_prettify.js?skin=tomorrow"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::naming::slug;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Course-wide settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CourseConfig {
    /// Course title; also the name of the assembled tree's root directory.
    pub display_name: String,
    /// Organisation written into the top-level `course.xml`.
    pub org: String,
    /// Course number written into the top-level `course.xml`.
    pub course: String,
    /// Public URL of the running course. Without it PDFs get no inline viewer.
    pub course_base_url: Option<String>,
    /// Prefix for author profile links on intro pages.
    pub profile_base: String,
    /// Embedded PDF viewer endpoint.
    pub pdf_viewer: String,
    /// Source listing settings.
    pub source: SourceConfig,
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            display_name: "MAT101 projects".to_string(),
            org: "IMATHatUZH".to_string(),
            course: "course".to_string(),
            course_base_url: None,
            profile_base:
                "http://edx.math.uzh.ch/courses/IMATHatUZH/MAT101/Fall_2013/wiki/MAT101/profiles/"
                    .to_string(),
            pdf_viewer: "http://docs.google.com/viewer".to_string(),
            source: SourceConfig::default(),
        }
    }
}

/// Which files a source bundle lists inline, and how they are highlighted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// File extension (without the dot) of listed files.
    pub extension: String,
    /// Language class handed to the highlighter.
    pub language: String,
    /// Script URL of the syntax highlighter.
    pub highlighter: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            extension: "py".to_string(),
            language: "python".to_string(),
            highlighter:
                "https://google-code-prettify.googlecode.com/svn/loader/run_prettify.js?skin=tomorrow"
                    .to_string(),
        }
    }
}

impl CourseConfig {
    /// Validate values that would otherwise produce a broken package.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if slug(&self.org).is_empty() {
            return Err(ConfigError::Validation(
                "org must contain at least one letter, digit or '_'".into(),
            ));
        }
        if slug(&self.course).is_empty() {
            return Err(ConfigError::Validation(
                "course must contain at least one letter, digit or '_'".into(),
            ));
        }
        if self.display_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "display_name must not be empty".into(),
            ));
        }
        if self.display_name.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "display_name names a directory and must not contain '/' or '\\'".into(),
            ));
        }
        if self.source.extension.is_empty() || self.source.extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "source.extension must be a bare extension like \"py\"".into(),
            ));
        }
        if let Some(url) = &self.course_base_url
            && (url.is_empty() || url.ends_with('/'))
        {
            return Err(ConfigError::Validation(
                "course_base_url must be non-empty and must not end with '/'".into(),
            ));
        }
        Ok(())
    }

    /// Replace the course base URL, e.g. from `--course-url`.
    pub fn with_course_base_url(mut self, url: Option<String>) -> Result<Self, ConfigError> {
        if url.is_some() {
            self.course_base_url = url;
        }
        self.validate()?;
        Ok(self)
    }
}

/// Load the course config from `path`, or stock defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<CourseConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => CourseConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `course.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# edx-presenter configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Course title. Also the name of the directory inside the generated archive.
display_name = "MAT101 projects"

# Organisation and course number written into the top-level course.xml.
org = "IMATHatUZH"
course = "course"

# Public URL of the course (no trailing slash). Enables the inline PDF viewer,
# which needs a publicly reachable asset URL. Overridden by --course-url.
# course_base_url = "https://edx.example.org/courses/ORG/COURSE/RUN"

# Author profile ids from group.yaml are appended to this URL on intro pages.
profile_base = "http://edx.math.uzh.ch/courses/IMATHatUZH/MAT101/Fall_2013/wiki/MAT101/profiles/"

# Endpoint of the embedded PDF viewer.
pdf_viewer = "http://docs.google.com/viewer"

# ---------------------------------------------------------------------------
# Source listings
# ---------------------------------------------------------------------------
[source]
# Files with this extension are shown inline on source pages.
extension = "py"

# Language class for the syntax highlighter.
language = "python"

# Highlighter script included once per listing.
highlighter = "https://google-code-prettify.googlecode.com/svn/loader/run_prettify.js?skin=tomorrow"
"##
}
