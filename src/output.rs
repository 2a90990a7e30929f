//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Each entity leads with its positional index and name; filesystem paths and
//! other detail follow as indented context lines. The outline reads as an
//! inventory of the course, in the same order the package will show it.
//!
//! # Output Format
//!
//! ## Outline (`check`, and the start of `build`)
//!
//! ```text
//! Projects
//! 001 Project A (2 groups)
//!     001 Group 1
//!         Source: submissions/group1
//!         Authors: mokaspar
//!         001 Intro
//!         002 Pdf docs/introduction.pdf
//!         003 Video 04ZOMuAg2bA
//!         004 Discussion
//! ```
//!
//! ## Build report
//!
//! ```text
//! Assembled 1 project, 2 groups, 9 items → /tmp/x/MAT101 projects
//!
//! Warnings
//!     course_base_url is not set, inline PDF viewer disabled for doc.pdf
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::assemble::{BuildReport, Course};
use crate::content::Content;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 group`, `2 groups`.
fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

fn content_line(index: usize, content: &Content) -> String {
    match content.label() {
        Some(label) => format!("{} {} {}", format_index(index), content.kind(), label),
        None => format!("{} {}", format_index(index), content.kind()),
    }
}

/// Format the loaded course as a project → group → content tree.
pub fn format_course_outline(course: &Course) -> Vec<String> {
    let mut lines = vec!["Projects".to_string()];
    for (p, project) in course.projects().iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(p + 1),
            project.name(),
            count(project.groups().len(), "group")
        ));
        for (g, group) in project.groups().iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(g + 1), group.group()));
            lines.push(format!("{}Source: {}", indent(2), group.path().display()));
            let authors: Vec<&str> = group.authors().iter().map(|a| a.name.as_str()).collect();
            if !authors.is_empty() {
                lines.push(format!("{}Authors: {}", indent(2), authors.join(", ")));
            }
            for (c, content) in group.content().iter().enumerate() {
                lines.push(format!("{}{}", indent(2), content_line(c + 1, content)));
            }
        }
    }
    lines
}

pub fn print_course_outline(course: &Course) {
    for line in format_course_outline(course) {
        println!("{}", line);
    }
}

/// Format the summary of an assembly run, followed by any warnings.
pub fn format_build_report(report: &BuildReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Assembled {}, {}, {} → {}",
        count(report.projects, "project"),
        count(report.groups, "group"),
        count(report.content_items, "item"),
        report.root.display()
    )];
    if !report.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for warning in &report.warnings {
            lines.push(format!("{}{}", indent(1), warning));
        }
    }
    lines
}

pub fn print_build_report(report: &BuildReport) {
    for line in format_build_report(report) {
        println!("{}", line);
    }
}
