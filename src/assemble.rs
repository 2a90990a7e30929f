//! Course assembly: groups in, import tree out.
//!
//! ```text
//! <root>/
//! ├── course.xml                     <course url_name="course" org=.. course=..>
//! ├── course/course.xml              one <chapter> per project, sorted by name
//! ├── chapter/<project_id>.xml       one <sequential> per group, sorted by name
//! ├── sequential/<group_id>.xml
//! ├── vertical/<group_id>_vertical.xml
//! ├── html/   video/   discussion/   static/
//! ```
//!
//! [`assemble`] always starts from an empty root, so the tree reflects the
//! current input and nothing else. Rendering is single-threaded and ordered,
//! which keeps repeated builds byte-identical.

use crate::config::CourseConfig;
use crate::descriptor::write_descriptor;
use crate::error::{IoContext, Result};
use crate::group::Group;
use crate::naming::slug;
use crate::project::Project;
use crate::types::Category;
use maud::html;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What every render step needs: where to write, the course settings, and a
/// place to leave non-fatal warnings.
#[derive(Debug)]
pub struct RenderContext<'a> {
    pub root: &'a Path,
    pub config: &'a CourseConfig,
    pub warnings: Vec<String>,
}

impl<'a> RenderContext<'a> {
    pub fn new(root: &'a Path, config: &'a CourseConfig) -> Self {
        Self {
            root,
            config,
            warnings: Vec::new(),
        }
    }

    /// Log a warning and keep it for the build report.
    pub fn warn(&mut self, message: String) {
        warn!("{message}");
        self.warnings.push(message);
    }
}

/// The whole course: projects sorted by name.
#[derive(Debug, Clone, Default)]
pub struct Course {
    projects: Vec<Project>,
}

impl Course {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a course from loaded groups, in any order.
    pub fn from_groups(groups: impl IntoIterator<Item = Group>) -> Self {
        let mut course = Self::new();
        for group in groups {
            course.add_group(group);
        }
        course
    }

    /// File a group under its project, creating the project on first sight.
    pub fn add_group(&mut self, group: Group) {
        match self
            .projects
            .iter_mut()
            .find(|p| p.name() == group.project())
        {
            Some(project) => project.append(group),
            None => {
                let mut project = Project::new(group.project());
                project.append(group);
                self.projects.push(project);
                self.projects.sort_by(|a, b| a.name().cmp(b.name()));
            }
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn group_count(&self) -> usize {
        self.projects.iter().map(|p| p.groups().len()).sum()
    }

    pub fn content_count(&self) -> usize {
        self.projects
            .iter()
            .flat_map(|p| p.groups())
            .map(|g| g.content().len())
            .sum()
    }
}

/// Summary of one assembly run.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub root: PathBuf,
    pub projects: usize,
    pub groups: usize,
    pub content_items: usize,
    pub warnings: Vec<String>,
}

/// Write the complete course tree for `course` under `root`.
///
/// An existing `root` is removed first.
pub fn assemble(course: &Course, root: &Path, config: &CourseConfig) -> Result<BuildReport> {
    if root.exists() {
        info!(root = %root.display(), "removing previous course tree");
        fs::remove_dir_all(root).at(root)?;
    }
    fs::create_dir_all(root).at(root)?;

    let course_slug = slug(&config.course);
    let pointer = html! {
        course url_name="course" org=(config.org) course=(course_slug) {}
    };
    let pointer_path = root.join("course.xml");
    fs::write(&pointer_path, pointer.into_string()).at(&pointer_path)?;

    let outline = html! {
        course display_name=(config.display_name) {
            @for project in course.projects() {
                chapter url_name=(project.identifier()) {}
            }
        }
    };
    write_descriptor(root, Category::Course, "course", outline)?;

    let mut ctx = RenderContext::new(root, config);
    for project in course.projects() {
        project.render(&mut ctx)?;
    }

    let report = BuildReport {
        root: root.to_path_buf(),
        projects: course.projects().len(),
        groups: course.group_count(),
        content_items: course.content_count(),
        warnings: ctx.warnings,
    };
    info!(
        projects = report.projects,
        groups = report.groups,
        items = report.content_items,
        "course assembled"
    );
    Ok(report)
}
