//! CBZ packaging
//!
//! Files directly under a source directory are stored (uncompressed; page images are already
//! compressed) into a zip container. The container is written to a temporary file next to the
//! destination and renamed into place, so a reader never sees a half-written archive.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use zip::CompressionMethod;
use zip::write::{FileOptions, ZipWriter};

use crate::error::PackagingError;

/// Extension of finished archives
pub const ARCHIVE_EXTENSION: &str = "cbz";

/// Final archive path for `dest_without_ext`
///
/// The extension is appended to the file name rather than substituted, so display names
/// containing dots (e.g. `"10.5 - Title - Extra"`) are kept whole.
pub fn archive_path(dest_without_ext: &Path) -> Result<PathBuf, PackagingError> {
    let file_name = dest_without_ext
        .file_name()
        .ok_or_else(|| PackagingError::InvalidDestination {
            path: dest_without_ext.to_path_buf(),
        })?;
    let mut name = file_name.to_os_string();
    name.push(".");
    name.push(ARCHIVE_EXTENSION);
    Ok(dest_without_ext.with_file_name(name))
}

/// Pack every regular file directly under `source_dir` into `{dest_without_ext}.cbz`
///
/// Entries are added in file-name order. An existing archive at the destination is replaced.
///
/// # Errors
/// Fails if the source cannot be read or the destination directory is not writable.
pub fn pack(source_dir: &Path, dest_without_ext: &Path) -> Result<PathBuf, PackagingError> {
    let final_path = archive_path(dest_without_ext)?;
    let parent = match final_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let entries = list_files(source_dir)?;

    let mut staging = NamedTempFile::new_in(&parent).map_err(|source| PackagingError::File {
        path: parent.clone(),
        source,
    })?;

    {
        let mut zip = ZipWriter::new(staging.as_file_mut());
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);

        for (name, path) in &entries {
            zip.start_file(name.as_str(), options)
                .map_err(|source| PackagingError::Archive {
                    path: final_path.clone(),
                    source,
                })?;
            let mut input = File::open(path).map_err(|source| PackagingError::File {
                path: path.clone(),
                source,
            })?;
            std::io::copy(&mut input, &mut zip).map_err(|source| PackagingError::File {
                path: path.clone(),
                source,
            })?;
        }

        let file = zip.finish().map_err(|source| PackagingError::Archive {
            path: final_path.clone(),
            source,
        })?;
        file.flush().map_err(|source| PackagingError::File {
            path: final_path.clone(),
            source,
        })?;
    }

    staging
        .persist(&final_path)
        .map_err(|e| PackagingError::Finalize {
            path: final_path.clone(),
            source: e.error,
        })?;

    tracing::debug!(archive = %final_path.display(), entries = entries.len(), "archive written");
    Ok(final_path)
}

/// [`pack`] on the blocking thread pool
pub async fn pack_async(
    source_dir: PathBuf,
    dest_without_ext: PathBuf,
) -> Result<PathBuf, PackagingError> {
    tokio::task::spawn_blocking(move || pack(&source_dir, &dest_without_ext))
        .await
        .map_err(|e| PackagingError::Task(e.to_string()))?
}

fn list_files(source_dir: &Path) -> Result<Vec<(String, PathBuf)>, PackagingError> {
    let read_dir = std::fs::read_dir(source_dir).map_err(|source| PackagingError::File {
        path: source_dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| PackagingError::File {
            path: source_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        files.push((entry.file_name().to_string_lossy().into_owned(), path));
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    fn entry_names(archive: &Path) -> Vec<String> {
        let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
        (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect()
    }

    fn write_pages(dir: &Path, names: &[&str]) {
        for name in names {
            std::fs::write(dir.join(name), format!("bytes of {name}")).unwrap();
        }
    }

    #[test]
    fn packs_files_in_name_order() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_pages(source.path(), &["3-c.png", "1-a.png", "2-b.png"]);

        let path = pack(source.path(), &out.path().join("1 - Title - Start")).unwrap();

        assert_eq!(path, out.path().join("1 - Title - Start.cbz"));
        assert_eq!(entry_names(&path), vec!["1-a.png", "2-b.png", "3-c.png"]);

        let mut zip = zip::ZipArchive::new(File::open(&path).unwrap()).unwrap();
        let mut content = String::new();
        zip.by_name("2-b.png")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "bytes of 2-b.png");
    }

    #[test]
    fn extension_is_appended_to_dotted_names() {
        let dest = Path::new("/out/10.5 - Title - Extra");
        assert_eq!(
            archive_path(dest).unwrap(),
            PathBuf::from("/out/10.5 - Title - Extra.cbz")
        );
    }

    #[test]
    fn destination_without_file_name_is_rejected() {
        let err = archive_path(Path::new("/")).unwrap_err();
        assert!(matches!(err, PackagingError::InvalidDestination { .. }));
    }

    #[test]
    fn subdirectories_are_not_packed() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_pages(source.path(), &["1.png"]);
        std::fs::create_dir(source.path().join("nested")).unwrap();
        write_pages(&source.path().join("nested"), &["2.png"]);

        let path = pack(source.path(), &out.path().join("chapter")).unwrap();

        assert_eq!(entry_names(&path), vec!["1.png"]);
    }

    #[test]
    fn existing_archive_is_replaced() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        std::fs::write(out.path().join("chapter.cbz"), b"stale").unwrap();
        write_pages(source.path(), &["1.png", "2.png"]);

        let path = pack(source.path(), &out.path().join("chapter")).unwrap();

        assert_eq!(entry_names(&path).len(), 2);
    }

    #[test]
    fn only_the_archive_remains_in_destination() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_pages(source.path(), &["1.png"]);

        pack(source.path(), &out.path().join("chapter")).unwrap();

        let names: Vec<_> = std::fs::read_dir(out.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["chapter.cbz"]);
    }

    #[test]
    fn missing_destination_directory_is_an_io_failure() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_pages(source.path(), &["1.png"]);

        let err = pack(source.path(), &out.path().join("missing").join("chapter")).unwrap_err();

        assert!(matches!(err, PackagingError::File { .. }));
    }

    #[tokio::test]
    async fn pack_async_runs_off_the_runtime() {
        let source = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_pages(source.path(), &["a.jpg", "b.jpg"]);

        let path = pack_async(source.path().to_path_buf(), out.path().join("ch"))
            .await
            .unwrap();

        assert_eq!(entry_names(&path), vec!["a.jpg", "b.jpg"]);
    }
}
