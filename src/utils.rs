//! Utility functions for naming files and archives

use crate::models::{Chapter, Manga};

/// Longest file name (in bytes) produced by [`sanitize_file_name`]
///
/// Leaves room for the `.cbz` extension and temp-file suffixes under the common 255-byte limit.
const MAX_FILE_NAME_BYTES: usize = 200;

/// Make `name` safe to use as a single path component
///
/// Path separators, characters reserved on Windows and control characters become `_`.
/// Leading and trailing whitespace and trailing dots are removed, and over-long names are
/// cut on a character boundary. A name with nothing left becomes `_`.
///
/// # Examples
///
/// ```
/// use manga_dl::utils::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("Fate/Zero: Vol 1?"), "Fate_Zero_ Vol 1_");
/// assert_eq!(sanitize_file_name(".."), "_");
/// ```
pub fn sanitize_file_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = replaced.trim().trim_end_matches(['.', ' ']);

    let mut end = trimmed.len().min(MAX_FILE_NAME_BYTES);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    let cut = trimmed[..end].trim_end_matches(['.', ' ']);

    if cut.is_empty() {
        "_".to_string()
    } else {
        cut.to_string()
    }
}

/// Last path segment of `url`, sanitized for use as a file name
///
/// Query strings and fragments are ignored. Returns `None` if the URL has no non-empty last
/// segment.
pub fn url_file_name(url: &str) -> Option<String> {
    let segment = match url::Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .map(str::to_string),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .and_then(|path| path.rsplit('/').next())
            .map(str::to_string),
    }?;

    if segment.is_empty() {
        return None;
    }
    Some(sanitize_file_name(&segment))
}

/// Archive name of a chapter: `"{chapter number} - {title} - {chapter title}"`
///
/// The title is taken in `language` when available. Chapters without a number are named
/// `Oneshot`. The result is sanitized for the filesystem.
pub fn chapter_display_name(manga: &Manga, chapter: &Chapter, language: &str) -> String {
    let name = format!(
        "{} - {} - {}",
        chapter.number(),
        manga.display_title(language),
        chapter.title()
    );
    sanitize_file_name(&name)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{chapter_json, manga_json};

    #[test]
    fn sanitize_replaces_separators_and_reserved_characters() {
        assert_eq!(sanitize_file_name("a/b\\c"), "a_b_c");
        assert_eq!(sanitize_file_name("what?*<>|\""), "what______");
        assert_eq!(sanitize_file_name("tab\there"), "tab_here");
    }

    #[test]
    fn sanitize_trims_edges() {
        assert_eq!(sanitize_file_name("  name. . "), "name");
        assert_eq!(sanitize_file_name("..."), "_");
        assert_eq!(sanitize_file_name(""), "_");
    }

    #[test]
    fn sanitize_keeps_unicode_and_cuts_on_char_boundary() {
        assert_eq!(sanitize_file_name("呪術廻戦"), "呪術廻戦");

        let long = "語".repeat(100);
        let cut = sanitize_file_name(&long);
        assert!(cut.len() <= MAX_FILE_NAME_BYTES);
        assert!(cut.chars().all(|c| c == '語'));
    }

    #[test]
    fn url_file_name_takes_last_segment() {
        assert_eq!(
            url_file_name("https://uploads.example.org/data/abc123/1-f00d.png").as_deref(),
            Some("1-f00d.png")
        );
        assert_eq!(
            url_file_name("https://uploads.example.org/data/abc123/2-beef.jpg?token=x").as_deref(),
            Some("2-beef.jpg")
        );
        assert_eq!(url_file_name("https://uploads.example.org/data/"), None);
        assert_eq!(url_file_name("relative/path/3.png").as_deref(), Some("3.png"));
    }

    #[test]
    fn display_name_joins_number_and_titles() {
        let manga: Manga = serde_json::from_value(manga_json("m1", "Jujutsu Kaisen")).unwrap();
        let chapter: Chapter =
            serde_json::from_value(chapter_json("c1", Some("1"), Some("Ryomen Sukuna"))).unwrap();

        assert_eq!(
            chapter_display_name(&manga, &chapter, "en"),
            "1 - Jujutsu Kaisen - Ryomen Sukuna"
        );
    }

    #[test]
    fn display_name_handles_missing_fields_and_slashes() {
        let manga: Manga = serde_json::from_value(manga_json("m1", "Fate/Zero")).unwrap();
        let chapter: Chapter = serde_json::from_value(chapter_json("c1", None, None)).unwrap();

        assert_eq!(
            chapter_display_name(&manga, &chapter, "en"),
            "Oneshot - Fate_Zero -"
        );
    }
}
