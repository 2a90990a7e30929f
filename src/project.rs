//! Projects: the chapters of the course.

use crate::assemble::RenderContext;
use crate::descriptor::write_descriptor;
use crate::error::Result;
use crate::group::Group;
use crate::naming::slug;
use crate::types::Category;
use maud::html;

/// All groups sharing one project name, kept sorted by group name.
///
/// Group names are assumed unique within a project. Two groups with the same
/// name would share identifiers and overwrite each other's files.
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    groups: Vec<Group>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifier(&self) -> String {
        slug(&self.name)
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Add a group and restore the sort order.
    pub fn append(&mut self, group: Group) {
        self.groups.push(group);
        // Stable, so equal names keep insertion order.
        self.groups.sort_by(|a, b| a.group().cmp(b.group()));
    }

    /// Write the chapter descriptor, then each group.
    pub fn render(&self, ctx: &mut RenderContext) -> Result<()> {
        let chapter = html! {
            chapter display_name=(self.name) {
                @for group in &self.groups {
                    sequential url_name=(group.identifier()) {}
                }
            }
        };
        write_descriptor(ctx.root, Category::Chapter, &self.identifier(), chapter)?;

        for group in &self.groups {
            group.render(ctx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CourseConfig;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn load(tmp: &TempDir, dir: &str, project: &str, group: &str) -> Group {
        Group::load(write_group(tmp.path(), dir, project, group, "")).unwrap()
    }

    fn names(project: &Project) -> Vec<&str> {
        project.groups().iter().map(Group::group).collect()
    }

    #[test]
    fn append_keeps_groups_sorted() {
        let tmp = TempDir::new().unwrap();
        let mut project = Project::new("Project A");
        project.append(load(&tmp, "g2", "Project A", "Group 2"));
        project.append(load(&tmp, "g3", "Project A", "Group 3"));
        project.append(load(&tmp, "g1", "Project A", "Group 1"));

        assert_eq!(names(&project), vec!["Group 1", "Group 2", "Group 3"]);
    }

    #[test]
    fn append_sequences_keep_every_group() {
        let tmp = TempDir::new().unwrap();
        let orders: [&[&str]; 3] = [
            &["b", "a", "c", "d"],
            &["d", "c", "b", "a"],
            &["a", "b", "c", "d"],
        ];
        for order in orders {
            let mut project = Project::new("P");
            for (i, name) in order.iter().enumerate() {
                project.append(load(&tmp, &format!("{name}{i}"), "P", name));
            }
            assert_eq!(names(&project), vec!["a", "b", "c", "d"]);
        }
    }

    #[test]
    fn identifier_is_slugged_name() {
        assert_eq!(Project::new("Project A: Ärger").identifier(), "ProjectArger");
    }

    #[test]
    fn render_lists_groups_in_sorted_order() {
        let tmp = TempDir::new().unwrap();
        let mut project = Project::new("Project A");
        project.append(load(&tmp, "g2", "Project A", "Group 2"));
        project.append(load(&tmp, "g1", "Project A", "Group 1"));
        let out = tmp.path().join("out");
        let config = CourseConfig::default();
        let mut ctx = RenderContext::new(&out, &config);

        project.render(&mut ctx).unwrap();

        let chapter = read(&out, "chapter/ProjectA.xml");
        assert!(chapter.starts_with(r#"<chapter display_name="Project A">"#));
        assert_eq!(
            url_names(&chapter),
            vec!["Project_A__Group_1", "Project_A__Group_2"]
        );
        assert!(out.join("sequential/Project_A__Group_1.xml").is_file());
        assert!(out.join("sequential/Project_A__Group_2.xml").is_file());
    }
}
