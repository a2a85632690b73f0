//! Chapter archive importing: ZIP in, published chapters out.

pub mod archive;
pub mod error;
pub mod import;
pub mod scan;

pub use archive::extract_archive;
pub use error::ImportError;
pub use import::{
    ImportOutcome, ImportProgress, ImportReport, ImportStats, LogProgress, SilentProgress,
    import_archive, import_into_catalog,
};
pub use scan::{ArchiveScan, ChapterFolder, chapter_number, scan_chapters};
