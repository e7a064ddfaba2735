// src/output/paths.rs
//! Pure functions for output paths, directory names and link targets.
//!
//! Nothing here touches the filesystem.

use crate::constants::{ASSETS_DIR_NAME, MAX_DIR_NAME_LEN, PAGE_FILE_NAME};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::{Path, PathBuf};

/// Characters escaped in one path segment of a relative Markdown link.
const LINK_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b';')
    .add(b',')
    .add(b'[')
    .add(b']')
    .add(b'^')
    .add(b'|')
    .add(b'(')
    .add(b')');

/// Turns a page title into a directory name that is safe on common
/// filesystems.
///
/// Path separators and reserved characters become `_`; surrounding
/// whitespace and dots are trimmed. Titles that sanitize to nothing become
/// `unnamed`.
pub fn sanitize_dir_name(title: &str) -> String {
    let mut safe_name = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .trim_matches('.')
        .to_string();

    if safe_name.len() > MAX_DIR_NAME_LEN {
        let mut cut = MAX_DIR_NAME_LEN;
        while !safe_name.is_char_boundary(cut) {
            cut -= 1;
        }
        safe_name.truncate(cut);
        safe_name = safe_name.trim_end().to_string();
    }

    if safe_name.is_empty() {
        safe_name = "unnamed".to_string();
    }

    safe_name
}

/// Escapes a directory name for use as one segment of a link target.
pub fn escape_link_segment(segment: &str) -> String {
    utf8_percent_encode(segment, LINK_SEGMENT).to_string()
}

/// Relative link from a page to a child page's text file.
pub fn child_page_link(dir_name: &str) -> String {
    format!("./{}/{}", escape_link_segment(dir_name), PAGE_FILE_NAME)
}

/// `<dir>/index.md`
pub fn page_file_path(page_dir: &Path) -> PathBuf {
    page_dir.join(PAGE_FILE_NAME)
}

/// `<dir>/assets`
pub fn assets_dir(page_dir: &Path) -> PathBuf {
    page_dir.join(ASSETS_DIR_NAME)
}

/// File name of a downloaded asset.
pub fn asset_file_name(placeholder: &str, extension: &str) -> String {
    format!("{}.{}", placeholder, extension)
}

/// Link to a downloaded asset, relative to the page's text file.
pub fn asset_link(file_name: &str) -> String {
    format!("./{}/{}", ASSETS_DIR_NAME, file_name)
}
