//! Archive import orchestration.
//!
//! An import never holds the catalog lock while pages upload: the archive
//! is extracted, scanned, and published chapter by chapter, and only the
//! finished batch is committed to the store in one write. When an upload
//! fails partway, every fully published chapter is still committed; the
//! interrupted chapter is dropped so no half chapter can ever be served.

use inkpost_core::{CatalogStore, FileRef, ImageRelay};

use crate::archive::extract_archive;
use crate::error::ImportError;
use crate::scan::scan_chapters;

/// Progress callbacks for an archive import.
pub trait ImportProgress {
    fn on_chapter(&self, current: usize, total: usize, number: &str);
    fn on_page(&self, number: &str, current: usize, total: usize);
    fn on_skipped_folder(&self, folder: &str);
    fn on_complete(&self, stats: &ImportStats);
}

/// Silent progress — no output.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_chapter(&self, _: usize, _: usize, _: &str) {}
    fn on_page(&self, _: &str, _: usize, _: usize) {}
    fn on_skipped_folder(&self, _: &str) {}
    fn on_complete(&self, _: &ImportStats) {}
}

/// Progress reported through the `log` crate, for the bot service.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_chapter(&self, current: usize, total: usize, number: &str) {
        log::info!("importing chapter {number} ({current}/{total})");
    }

    fn on_page(&self, number: &str, current: usize, total: usize) {
        log::debug!("chapter {number}: page {current}/{total}");
    }

    fn on_skipped_folder(&self, folder: &str) {
        log::warn!("skipping folder '{folder}': no chapter number in the name");
    }

    fn on_complete(&self, stats: &ImportStats) {
        log::info!(
            "import finished: {} chapter(s), {} page(s), {} folder(s) skipped",
            stats.chapters_imported,
            stats.pages_published,
            stats.folders_skipped
        );
    }
}

/// Statistics from one import.
#[derive(Debug, Default, Clone)]
pub struct ImportStats {
    pub chapters_imported: usize,
    pub pages_published: usize,
    pub folders_skipped: usize,
}

/// Result of publishing one archive through the relay.
#[derive(Debug)]
pub struct ImportOutcome {
    /// Fully published chapters in reading order: number and page refs
    pub chapters: Vec<(String, Vec<FileRef>)>,
    /// Folder names that carried images but no chapter number
    pub skipped: Vec<String>,
    pub stats: ImportStats,
    /// Set when publishing stopped early; `chapters` holds what finished
    pub failure: Option<ImportError>,
}

/// Extract, scan, and publish an archive's chapters through the relay.
///
/// Returns `Err` only when the archive itself is unusable (corrupt ZIP,
/// I/O trouble during extraction). Upload failures land in
/// [`ImportOutcome::failure`] so completed chapters survive.
pub async fn import_archive(
    relay: &dyn ImageRelay,
    archive: &[u8],
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportOutcome, ImportError> {
    let workspace = extract_archive(archive)?;
    let scan = scan_chapters(workspace.path())?;

    let mut outcome = ImportOutcome {
        chapters: Vec::new(),
        skipped: scan.skipped.clone(),
        stats: ImportStats {
            folders_skipped: scan.skipped.len(),
            ..ImportStats::default()
        },
        failure: None,
    };
    if let Some(p) = progress {
        for folder in &scan.skipped {
            p.on_skipped_folder(folder);
        }
    }

    let total = scan.chapters.len();
    'chapters: for (i, chapter) in scan.chapters.iter().enumerate() {
        if let Some(p) = progress {
            p.on_chapter(i + 1, total, &chapter.number);
        }

        let mut pages = Vec::with_capacity(chapter.pages.len());
        for (n, path) in chapter.pages.iter().enumerate() {
            if let Some(p) = progress {
                p.on_page(&chapter.number, n + 1, chapter.pages.len());
            }
            let filename = path
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_default();

            let published = match std::fs::read(path) {
                Ok(bytes) => relay
                    .publish_image(bytes, &filename)
                    .await
                    .map_err(ImportError::from),
                Err(e) => Err(ImportError::Io(e)),
            };
            match published {
                Ok(file_ref) => pages.push(file_ref),
                Err(e) => {
                    log::error!(
                        "import stopped in chapter {} at page {}: {e}",
                        chapter.number,
                        n + 1
                    );
                    outcome.failure = Some(e);
                    break 'chapters;
                }
            }
        }

        outcome.stats.pages_published += pages.len();
        outcome.chapters.push((chapter.number.clone(), pages));
        outcome.stats.chapters_imported += 1;
    }

    if let Some(p) = progress {
        p.on_complete(&outcome.stats);
    }
    Ok(outcome)
}

/// Human-facing result of an import against a stored comic.
#[derive(Debug)]
pub struct ImportReport {
    pub title: String,
    /// Chapter numbers committed, in reading order
    pub imported: Vec<String>,
    pub skipped: Vec<String>,
    pub pages_published: usize,
    /// Why publishing stopped early, when it did
    pub failure: Option<String>,
}

impl ImportReport {
    /// Short summary suitable for a chat reply or terminal output.
    pub fn summary(&self) -> String {
        let mut text = if self.imported.is_empty() {
            match &self.failure {
                Some(failure) => {
                    format!("❌ Import failed before any chapter completed: {failure}")
                }
                None => format!(
                    "No chapter folders found in the archive; {} is unchanged.",
                    self.title
                ),
            }
        } else {
            let mut ok = format!(
                "✅ Imported {} chapter(s), {} page(s), into {}: {}",
                self.imported.len(),
                self.pages_published,
                self.title,
                self.imported.join(", ")
            );
            if let Some(failure) = &self.failure {
                ok.push_str(&format!("\n⚠️ Stopped early: {failure}"));
            }
            ok
        };
        if !self.skipped.is_empty() {
            text.push_str(&format!(
                "\nSkipped folder(s) without a chapter number: {}",
                self.skipped.join(", ")
            ));
        }
        text
    }
}

/// Import an archive into a stored comic and commit the result once.
///
/// The comic is looked up before any upload starts; the merged chapter
/// map is written back in a single store update after publishing ends.
pub async fn import_into_catalog(
    store: &CatalogStore,
    relay: &dyn ImageRelay,
    slug: &str,
    archive: &[u8],
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportReport, ImportError> {
    let Some(mut comic) = store.get(slug).await else {
        return Err(ImportError::UnknownComic(slug.to_string()));
    };

    let outcome = import_archive(relay, archive, progress).await?;

    let imported: Vec<String> = outcome
        .chapters
        .iter()
        .map(|(number, _)| number.clone())
        .collect();
    if !outcome.chapters.is_empty() {
        for (number, pages) in outcome.chapters {
            comic.chapters.insert(number, pages);
        }
        store.put(comic.clone()).await?;
    }

    Ok(ImportReport {
        title: comic.title,
        imported,
        skipped: outcome.skipped,
        pages_published: outcome.stats.pages_published,
        failure: outcome.failure.map(|e| e.to_string()),
    })
}
