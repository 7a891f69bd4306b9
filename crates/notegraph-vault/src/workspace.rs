//! Working directory of an analysis run.
//!
//! A run reads from one directory of exported notes. It is either given
//! directly or extracted from a zip archive into a temporary directory that
//! lives as long as the [`WorkingDir`].

use notegraph_core::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Directory entries created by archivers that never hold notes
const IGNORED_TOP_LEVEL: &[&str] = &["__MACOSX"];

/// Explicit working-directory context passed through every stage
#[derive(Debug)]
pub struct WorkingDir {
    root: PathBuf,
    /// Keeps the extraction directory alive for archive inputs
    _extracted: Option<TempDir>,
}

impl WorkingDir {
    /// Open a directory or a `.zip` archive.
    pub fn open(path: &Path, index: &IndexConfig) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }
        if path.is_dir() {
            Self::from_dir(path)
        } else {
            Self::from_archive(path, index)
        }
    }

    /// Use an existing directory of exported notes
    pub fn from_dir(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(Error::config_error(format!(
                "Not a directory: {}",
                path.display()
            )));
        }
        Ok(Self {
            root: path.to_path_buf(),
            _extracted: None,
        })
    }

    /// Extract a zip archive and use its top-level directory.
    ///
    /// The extraction root itself is used when it already holds an index
    /// file; otherwise the first directory in name order.
    pub fn from_archive(path: &Path, index: &IndexConfig) -> Result<Self> {
        let temp = TempDir::new()?;
        extract_zip(path, temp.path())?;

        let root = locate_top_level(temp.path(), index)?;
        log::info!("Extracted {} into {}", path.display(), root.display());
        Ok(Self {
            root,
            _extracted: Some(temp),
        })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Path of a file directly inside the working directory
    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Path of the exported note file for a title
    pub fn note_path(&self, title: &Title) -> PathBuf {
        self.root.join(title.note_file_name())
    }

    /// Read a note document. Invalid UTF-8 is replaced, not rejected.
    pub fn read_note(&self, title: &Title) -> Result<String> {
        let path = self.note_path(title);
        read_lossy(&path)
    }

    /// HTML files directly inside the working directory, sorted by name
    pub fn html_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
            })
            .collect();
        files.sort();
        files
    }
}

/// Read a file as text, mapping a missing file to [`Error::FileNotFound`]
pub(crate) fn read_lossy(path: &Path) -> Result<String> {
    match fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::file_not_found(path)),
        Err(e) => Err(Error::Io(e)),
    }
}

fn extract_zip(archive_path: &Path, dest: &Path) -> Result<()> {
    let file = fs::File::open(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| Error::archive_error(format!("Failed to open zip archive: {}", e)))?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| Error::archive_error(format!("Failed to read zip entry {}: {}", i, e)))?;

        let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
            log::warn!("Skipping zip entry outside the archive root: {}", entry.name());
            continue;
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out_file = fs::File::create(&out_path)?;
            io::copy(&mut entry, &mut out_file)?;
        }
    }

    Ok(())
}

fn locate_top_level(root: &Path, index: &IndexConfig) -> Result<PathBuf> {
    if root.join(&index.tsv_file).is_file() || root.join(&index.html_file).is_file() {
        return Ok(root.to_path_buf());
    }

    let mut dirs: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .filter(|entry| {
            let name = entry.file_name();
            !IGNORED_TOP_LEVEL
                .iter()
                .any(|ignored| name.to_str() == Some(*ignored))
        })
        .map(|entry| entry.path())
        .collect();
    dirs.sort();

    dirs.into_iter()
        .next()
        .ok_or_else(|| Error::archive_error("Archive contains no top-level directory"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    fn write_zip(path: &Path, files: &[(&str, &str)]) {
        let file = fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        for (name, content) in files {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_from_dir() {
        let temp = TempDir::new().unwrap();
        let dir = WorkingDir::from_dir(temp.path()).unwrap();
        assert_eq!(dir.path(), temp.path());
        assert_eq!(
            dir.note_path(&Title::from("a/b?")),
            temp.path().join("a_b_.html")
        );
    }

    #[test]
    fn test_open_missing_path() {
        let result = WorkingDir::open(Path::new("/nonexistent/notes.zip"), &IndexConfig::default());
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_read_missing_note() {
        let temp = TempDir::new().unwrap();
        let dir = WorkingDir::from_dir(temp.path()).unwrap();
        assert!(matches!(
            dir.read_note(&Title::from("Nope")),
            Err(Error::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_html_files_sorted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.html"), "").unwrap();
        fs::write(temp.path().join("a.html"), "").unwrap();
        fs::write(temp.path().join("mydict.txt"), "").unwrap();

        let dir = WorkingDir::from_dir(temp.path()).unwrap();
        let names: Vec<_> = dir
            .html_files()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.html", "b.html"]);
    }

    #[test]
    fn test_archive_uses_top_level_directory() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("notes.zip");
        write_zip(
            &archive,
            &[
                ("__MACOSX/._junk", "x"),
                ("Notebook/mydict.txt", "A\tevernote:///1\n"),
                ("Notebook/A.html", "<p>A</p>"),
            ],
        );

        let dir = WorkingDir::open(&archive, &IndexConfig::default()).unwrap();
        assert!(dir.path().ends_with("Notebook"));
        assert!(dir.file("mydict.txt").is_file());
        assert_eq!(dir.read_note(&Title::from("A")).unwrap(), "<p>A</p>");
    }

    #[test]
    fn test_archive_with_index_at_root() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("flat.zip");
        write_zip(&archive, &[("Table of Contents.html", "<a href=\"evernote:///1\">A</a>")]);

        let dir = WorkingDir::open(&archive, &IndexConfig::default()).unwrap();
        assert!(dir.file("Table of Contents.html").is_file());
    }

    #[test]
    fn test_invalid_archive() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("broken.zip");
        fs::write(&archive, "not a zip").unwrap();

        let result = WorkingDir::open(&archive, &IndexConfig::default());
        assert!(matches!(result, Err(Error::ArchiveError { .. })));
    }
}
