//! Identifier generation for every node of the course tree.
//!
//! edX refers to nodes by `url_name`, and we also use that token as the file
//! name of the node's descriptor, so it has to be safe in both places. Every
//! identifier is derived from human-readable names by dropping whatever falls
//! outside a small alphabet:
//!
//! - [`slug`] keeps ASCII letters, digits and `_`.
//! - [`slug_file`] additionally keeps `.` so multi-part file names such as
//!   `data.v2.csv` stay distinguishable.
//!
//! Nothing is inserted in place of a dropped character:
//! - `"Project A__Group 1"` → `"ProjectA__Group1"`
//! - `"Zürich Übung"` → `"Zrichbung"`
//! - `"!!!"` → `""`
//!
//! An empty result is not an error. Callers always prefix with their owning
//! group's identifier, which is itself derived from the project and group
//! names, so identifiers stay unique across the tree.

/// Strip everything outside `[A-Za-z0-9_]`.
pub fn slug(raw: &str) -> String {
    raw.chars().filter(|c| is_word_char(*c)).collect()
}

/// Like [`slug`], but the literal dot survives.
pub fn slug_file(raw: &str) -> String {
    raw.chars()
        .filter(|c| is_word_char(*c) || *c == '.')
        .collect()
}

/// Identifier of a group: project and group joined by `__`, spaces as `_`.
pub fn group_identifier(project: &str, group: &str) -> String {
    slug(&format!("{project}__{group}").replace(' ', "_"))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
