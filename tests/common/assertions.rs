//! Custom test assertions for integration tests

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use manga_dl::Event;
use tokio::sync::broadcast;

/// Entry names of a zip archive, in archive order
pub fn archive_entries(archive: &Path) -> Vec<String> {
    let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
    (0..zip.len())
        .map(|i| zip.by_index(i).unwrap().name().to_string())
        .collect()
}

/// Contents of one archive entry as text
pub fn archive_entry_text(archive: &Path, name: &str) -> String {
    let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
    let mut content = String::new();
    zip.by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

/// Every regular file below `dir`, relative to it and sorted
pub fn files_under(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(dir).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}

/// Assert that `dir` holds exactly the named archives and nothing else
pub fn assert_only_archives(dir: &Path, expected: &[&str]) {
    let mut expected: Vec<PathBuf> = expected.iter().map(PathBuf::from).collect();
    expected.sort();
    assert_eq!(
        files_under(dir),
        expected,
        "output directory should only hold the finished archives"
    );
}

/// Every event already queued on `events`
pub fn drain_events(events: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut collected = Vec::new();
    while let Ok(event) = events.try_recv() {
        collected.push(event);
    }
    collected
}
