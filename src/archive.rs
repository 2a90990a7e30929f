//! Gzipped tarballs.
//!
//! Three bundles come out of a run:
//!
//! - one per input group, `<group_id>.tar.gz`, holding the raw group
//!   directory for the record ([`archive_group`]);
//! - one per `source` content item, placed in the course's static assets;
//! - the assembled course tree itself ([`archive_tree`]).
//!
//! Headers are written in deterministic mode (fixed mtime, owner and
//! permissions), so unchanged input yields byte-identical archives.
//!
//! Symlinks are stored as links, never followed. Group directories are
//! submissions, so a link must not pull in files from outside them, and a
//! dangling link is not an error.

use crate::error::{CourseError, IoContext, Result};
use crate::group::Group;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::path::{Path, PathBuf};
use tar::{Builder, HeaderMode};

/// Compress `src` (a directory or a single file) into `dest`, stored under `arcname`.
pub fn archive_path(src: &Path, dest: &Path, arcname: &str) -> Result<()> {
    let file = File::create(dest).at(dest)?;
    let mut builder = Builder::new(GzEncoder::new(file, Compression::default()));
    builder.mode(HeaderMode::Deterministic);
    builder.follow_symlinks(false);

    if src.is_dir() {
        builder.append_dir_all(arcname, src).at(src)?;
    } else {
        builder.append_path_with_name(src, arcname).at(src)?;
    }

    builder
        .into_inner()
        .and_then(|encoder| encoder.finish())
        .at(dest)?;
    Ok(())
}

/// Bundle a group's source directory as `<out_dir>/<group_id>.tar.gz`.
pub fn archive_group(group: &Group, out_dir: &Path) -> Result<PathBuf> {
    let identifier = group.identifier();
    let dest = out_dir.join(format!("{identifier}.tar.gz"));
    archive_path(group.path(), &dest, &identifier)?;
    Ok(dest)
}

/// Bundle the assembled tree at `root` into `dest`, under the root's own name.
pub fn archive_tree(root: &Path, dest: &Path) -> Result<()> {
    let arcname = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            CourseError::io(
                root,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "tree root has no name"),
            )
        })?;
    archive_path(root, dest, &arcname)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::fs;
    use tempfile::TempDir;

    fn entries(archive: &Path) -> Vec<String> {
        let file = File::open(archive).unwrap();
        let mut tar = tar::Archive::new(GzDecoder::new(file));
        let mut names: Vec<String> = tar
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn directory_is_stored_under_arcname() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(src.join("pkg")).unwrap();
        fs::write(src.join("main.py"), "print(1)\n").unwrap();
        fs::write(src.join("pkg/util.py"), "x = 1\n").unwrap();
        let dest = tmp.path().join("out.tar.gz");

        archive_path(&src, &dest, "bundle").unwrap();

        let names = entries(&dest);
        assert!(names.contains(&"bundle/main.py".to_string()));
        assert!(names.contains(&"bundle/pkg/util.py".to_string()));
    }

    #[test]
    fn single_file_is_stored_under_arcname() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("solve.py");
        fs::write(&src, "pass\n").unwrap();
        let dest = tmp.path().join("out.tar.gz");

        archive_path(&src, &dest, "solve.py").unwrap();
        assert_eq!(entries(&dest), vec!["solve.py".to_string()]);
    }

    #[test]
    fn unchanged_input_gives_identical_bytes() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.txt"), "a").unwrap();

        let first = tmp.path().join("1.tar.gz");
        let second = tmp.path().join("2.tar.gz");
        archive_path(&src, &first, "src").unwrap();
        archive_path(&src, &second, "src").unwrap();
        assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
    }

    #[test]
    fn missing_source_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = archive_path(
            &tmp.path().join("missing"),
            &tmp.path().join("out.tar.gz"),
            "x",
        );
        assert!(matches!(result, Err(CourseError::Io { .. })));
    }

    #[test]
    fn unwritable_destination_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = archive_path(tmp.path(), &tmp.path().join("no/such/dir/out.tar.gz"), "x");
        assert!(matches!(result, Err(CourseError::Io { .. })));
    }

    #[cfg(unix)]
    fn link_entries(archive: &Path) -> Vec<(String, String)> {
        let file = File::open(archive).unwrap();
        let mut tar = tar::Archive::new(GzDecoder::new(file));
        tar.entries()
            .unwrap()
            .map(|e| e.unwrap())
            .filter(|e| e.header().entry_type().is_symlink())
            .map(|e| {
                (
                    e.path().unwrap().to_string_lossy().into_owned(),
                    e.link_name().unwrap().unwrap().to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    #[cfg(unix)]
    #[test]
    fn symlink_to_outside_directory_is_stored_as_link() {
        let tmp = TempDir::new().unwrap();
        let private = tmp.path().join("private");
        fs::create_dir_all(&private).unwrap();
        fs::write(private.join("id_rsa"), "SECRET-KEY").unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("main.py"), "x=1\n").unwrap();
        std::os::unix::fs::symlink(&private, src.join("link")).unwrap();
        let dest = tmp.path().join("out.tar.gz");

        archive_path(&src, &dest, "src").unwrap();

        let names = entries(&dest);
        assert!(names.contains(&"src/main.py".to_string()));
        assert!(names.contains(&"src/link".to_string()));
        assert!(!names.iter().any(|n| n.contains("id_rsa")));
        assert_eq!(
            link_entries(&dest),
            vec![("src/link".to_string(), private.to_string_lossy().into_owned())]
        );

        let mut tar = tar::Archive::new(GzDecoder::new(File::open(&dest).unwrap()));
        for entry in tar.entries().unwrap() {
            let mut entry = entry.unwrap();
            let mut body = String::new();
            std::io::Read::read_to_string(&mut entry, &mut body).unwrap();
            assert!(!body.contains("SECRET-KEY"));
        }
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_does_not_fail() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("main.py"), "x=1\n").unwrap();
        std::os::unix::fs::symlink("/nonexistent/target", src.join("dangling")).unwrap();
        let dest = tmp.path().join("out.tar.gz");

        archive_path(&src, &dest, "src").unwrap();

        assert_eq!(
            link_entries(&dest),
            vec![("src/dangling".to_string(), "/nonexistent/target".to_string())]
        );
    }

    #[test]
    fn tree_is_stored_under_its_directory_name() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("MAT101 projects");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("course.xml"), "<course></course>").unwrap();
        let dest = tmp.path().join("to_import.tar.gz");

        archive_tree(&root, &dest).unwrap();
        assert!(entries(&dest).contains(&"MAT101 projects/course.xml".to_string()));
    }
}
