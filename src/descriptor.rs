//! Writing nodes into the course tree.
//!
//! Descriptors are tiny XML documents. They are produced with the same `maud`
//! markup as the HTML pages: element names like `chapter` or `vertical` are
//! just tags to it, and attribute values get escaped for free.
//!
//! Directories are created on first use and silently reused afterwards, so
//! rendering twice into the same tree only overwrites files.

use crate::error::{IoContext, Result};
use crate::types::Category;
use maud::Markup;
use std::fs;
use std::path::{Path, PathBuf};

/// Return `root/<category>`, creating it when missing.
pub fn category_dir(root: &Path, category: Category) -> Result<PathBuf> {
    let dir = root.join(category.dir_name());
    if !dir.exists() {
        fs::create_dir_all(&dir).at(&dir)?;
    }
    Ok(dir)
}

/// Write `root/<category>/<name>.xml`.
pub fn write_descriptor(
    root: &Path,
    category: Category,
    name: &str,
    markup: Markup,
) -> Result<PathBuf> {
    let path = category_dir(root, category)?.join(format!("{name}.xml"));
    fs::write(&path, markup.into_string()).at(&path)?;
    Ok(path)
}

/// Write the HTML body of an html node to `root/html/<name>.html`.
pub fn write_page(root: &Path, name: &str, markup: Markup) -> Result<PathBuf> {
    let path = page_path(root, name)?;
    fs::write(&path, markup.into_string()).at(&path)?;
    Ok(path)
}

/// Copy an existing HTML file verbatim to `root/html/<name>.html`.
pub fn copy_page(root: &Path, name: &str, source: &Path) -> Result<PathBuf> {
    let path = page_path(root, name)?;
    fs::copy(source, &path).at(source)?;
    Ok(path)
}

/// Copy an asset to `root/static/<file_name>`.
pub fn copy_static(root: &Path, file_name: &str, source: &Path) -> Result<PathBuf> {
    let path = static_path(root, file_name)?;
    fs::copy(source, &path).at(source)?;
    Ok(path)
}

/// Path of `root/static/<file_name>`, with the directory in place.
pub fn static_path(root: &Path, file_name: &str) -> Result<PathBuf> {
    Ok(category_dir(root, Category::Static)?.join(file_name))
}

/// URL under which the LMS serves a static asset.
pub fn static_url(file_name: &str) -> String {
    format!("/static/{file_name}")
}

fn page_path(root: &Path, name: &str) -> Result<PathBuf> {
    Ok(category_dir(root, Category::Html)?.join(format!("{name}.html")))
}
