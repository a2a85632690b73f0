//! Archive extraction into a temporary workspace.

use std::io::Cursor;

use tempfile::TempDir;
use zip::ZipArchive;

use crate::error::ImportError;

/// Extract a ZIP archive into a fresh temporary directory.
///
/// Entry paths are sanitized with `enclosed_name`, so nothing can escape
/// the workspace. The directory and everything in it are removed when the
/// returned handle drops.
pub fn extract_archive(bytes: &[u8]) -> Result<TempDir, ImportError> {
    let workspace = TempDir::new()?;
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let Some(relative) = entry.enclosed_name() else {
            log::warn!("skipping archive entry with an unsafe path: {}", entry.name());
            continue;
        };
        let destination = workspace.path().join(relative);
        if entry.is_dir() {
            std::fs::create_dir_all(&destination)?;
        } else {
            if let Some(parent) = destination.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut output = std::fs::File::create(&destination)?;
            std::io::copy(&mut entry, &mut output)?;
        }
    }
    Ok(workspace)
}
