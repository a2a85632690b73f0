//! Chapter folder discovery inside an extracted archive.
//!
//! Any directory that directly contains page images is a chapter; its
//! number is the last numeric token in the folder name, so "Chapter 10.5",
//! "ch10.5" and "Vol 2 - 10.5" all land on "10.5". Folders with images but
//! no number are reported rather than guessed at.

use std::path::{Path, PathBuf};

/// File extensions that count as page images.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// One directory holding a chapter's pages.
#[derive(Debug, Clone)]
pub struct ChapterFolder {
    /// Chapter number as text, exactly as it will key the catalog
    pub number: String,
    /// Parsed number used for ordering
    pub value: f64,
    /// Folder name, for reporting
    pub folder: String,
    /// Page images sorted by filename
    pub pages: Vec<PathBuf>,
}

/// Everything found in one archive.
#[derive(Debug, Default)]
pub struct ArchiveScan {
    /// Chapter folders sorted by number, ascending
    pub chapters: Vec<ChapterFolder>,
    /// Image-bearing folders whose names carry no usable number
    pub skipped: Vec<String>,
}

/// Walk an extracted archive and classify every image-bearing directory.
pub fn scan_chapters(root: &Path) -> std::io::Result<ArchiveScan> {
    let mut scan = ArchiveScan::default();
    walk(root, true, &mut scan)?;
    scan.chapters
        .sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal));
    Ok(scan)
}

fn walk(dir: &Path, is_root: bool, scan: &mut ArchiveScan) -> std::io::Result<()> {
    if !is_root {
        let pages = page_files(dir)?;
        if !pages.is_empty() {
            let folder = dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            match chapter_number(&folder) {
                Some((number, value)) => scan.chapters.push(ChapterFolder {
                    number,
                    value,
                    folder,
                    pages,
                }),
                None => scan.skipped.push(folder),
            }
        }
    }

    let mut subdirs: Vec<PathBuf> = std::fs::read_dir(dir)?
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_dir() && !is_junk(p))
        .collect();
    subdirs.sort();
    for subdir in subdirs {
        walk(&subdir, false, scan)?;
    }
    Ok(())
}

/// Page images directly inside `dir`, sorted by filename.
fn page_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file() && !is_junk(p) && has_image_extension(p))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Hidden entries and macOS resource-fork directories are never content.
fn is_junk(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.') || n == "__MACOSX")
        .unwrap_or(false)
}

/// The last numeric token in a folder name, with its parsed value.
///
/// A token is a run of ASCII digits with at most one decimal part, so
/// "Chapter 10.5 (fixed)" yields "10.5" and "S2 Chapter 13" yields "13".
pub fn chapter_number(name: &str) -> Option<(String, f64)> {
    let bytes = name.as_bytes();
    let mut last: Option<(usize, usize)> = None;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
            }
            last = Some((start, i));
        } else {
            i += 1;
        }
    }
    let (start, end) = last?;
    let token = &name[start..end];
    token.parse::<f64>().ok().map(|value| (token.to_string(), value))
}
