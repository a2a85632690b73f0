use std::io::{Cursor, Write};
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use inkpost_core::{
    BoundaryError, CatalogDocument, CatalogStore, Comic, FileRef, ImageRelay, MemoryDocument,
};
use inkpost_import::{ImportError, import_archive, import_into_catalog};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Build an in-memory ZIP with the given entry names and contents.
fn build_zip(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, bytes) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Relay fake that records upload order and can fail after N uploads.
#[derive(Default)]
struct FakeRelay {
    published: Mutex<Vec<String>>,
    fail_after: Option<usize>,
}

impl FakeRelay {
    fn failing_after(limit: usize) -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail_after: Some(limit),
        }
    }

    fn published(&self) -> Vec<String> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageRelay for FakeRelay {
    async fn publish_image(&self, _bytes: Vec<u8>, filename: &str) -> Result<FileRef, BoundaryError> {
        let mut published = self.published.lock().unwrap();
        if let Some(limit) = self.fail_after
            && published.len() >= limit
        {
            return Err(BoundaryError::unavailable("simulated upload outage"));
        }
        published.push(filename.to_string());
        Ok(FileRef::new(format!("ref-{}", published.len())))
    }

    async fn fetch_file(&self, _file: &FileRef) -> Result<Vec<u8>, BoundaryError> {
        Err(BoundaryError::FileNotFound)
    }
}

#[tokio::test]
async fn chapters_import_in_numeric_order() {
    let archive = build_zip(&[
        ("Chapter 10/01.jpg", b"x".as_ref()),
        ("Chapter 1.5/01.jpg", b"x".as_ref()),
        ("Chapter 2/01.jpg", b"x".as_ref()),
    ]);
    let relay = FakeRelay::default();

    let outcome = import_archive(&relay, &archive, None).await.unwrap();

    let numbers: Vec<&str> = outcome.chapters.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(numbers, ["1.5", "2", "10"]);
    assert_eq!(outcome.stats.chapters_imported, 3);
    assert_eq!(outcome.stats.pages_published, 3);
    assert!(outcome.failure.is_none());
}

#[tokio::test]
async fn pages_publish_in_filename_order() {
    let archive = build_zip(&[
        ("Chapter 1/b.png", b"2".as_ref()),
        ("Chapter 1/a.jpg", b"1".as_ref()),
        ("Chapter 1/c.JPG", b"3".as_ref()),
        ("Chapter 1/notes.txt", b"not a page".as_ref()),
    ]);
    let relay = FakeRelay::default();

    let outcome = import_archive(&relay, &archive, None).await.unwrap();

    assert_eq!(relay.published(), ["a.jpg", "b.png", "c.JPG"]);
    let (number, pages) = &outcome.chapters[0];
    assert_eq!(number, "1");
    assert_eq!(
        pages,
        &vec![FileRef::new("ref-1"), FileRef::new("ref-2"), FileRef::new("ref-3")]
    );
}

#[tokio::test]
async fn unnumbered_folders_are_skipped_not_guessed() {
    let archive = build_zip(&[
        ("Extras/art.png", b"x".as_ref()),
        ("Chapter 1/01.jpg", b"x".as_ref()),
    ]);
    let relay = FakeRelay::default();

    let outcome = import_archive(&relay, &archive, None).await.unwrap();

    assert_eq!(outcome.skipped, ["Extras"]);
    assert_eq!(outcome.stats.folders_skipped, 1);
    assert_eq!(outcome.chapters.len(), 1);
    assert_eq!(outcome.chapters[0].0, "1");
}

#[tokio::test]
async fn nested_chapter_folders_are_found() {
    let archive = build_zip(&[
        ("My Comic/Vol 1/Chapter 3/01.jpg", b"x".as_ref()),
        ("My Comic/Vol 1/Chapter 4/01.jpg", b"x".as_ref()),
    ]);
    let relay = FakeRelay::default();

    let outcome = import_archive(&relay, &archive, None).await.unwrap();

    let numbers: Vec<&str> = outcome.chapters.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(numbers, ["3", "4"]);
    // Wrapper directories without direct images are neither chapters nor skips
    assert!(outcome.skipped.is_empty());
}

#[tokio::test]
async fn macos_junk_entries_are_ignored() {
    let archive = build_zip(&[
        ("Chapter 1/01.jpg", b"x".as_ref()),
        ("__MACOSX/Chapter 1/._01.jpg", b"junk".as_ref()),
        ("Chapter 1/.hidden.jpg", b"junk".as_ref()),
    ]);
    let relay = FakeRelay::default();

    let outcome = import_archive(&relay, &archive, None).await.unwrap();

    assert_eq!(relay.published(), ["01.jpg"]);
    assert_eq!(outcome.chapters.len(), 1);
    assert!(outcome.skipped.is_empty());
}

#[tokio::test]
async fn corrupt_archive_is_an_error() {
    let relay = FakeRelay::default();
    let err = import_archive(&relay, b"definitely not a zip", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::Archive(_)));
    assert!(relay.published().is_empty());
}

#[tokio::test]
async fn upload_failure_keeps_finished_chapters_only() {
    let archive = build_zip(&[
        ("Chapter 1/a.jpg", b"x".as_ref()),
        ("Chapter 1/b.jpg", b"x".as_ref()),
        ("Chapter 2/a.jpg", b"x".as_ref()),
        ("Chapter 2/b.jpg", b"x".as_ref()),
    ]);
    // Third upload fails: chapter 1 completes, chapter 2 is interrupted
    let relay = FakeRelay::failing_after(2);

    let outcome = import_archive(&relay, &archive, None).await.unwrap();

    assert_eq!(outcome.chapters.len(), 1);
    assert_eq!(outcome.chapters[0].0, "1");
    assert_eq!(outcome.chapters[0].1.len(), 2);
    assert_eq!(outcome.stats.chapters_imported, 1);
    assert_eq!(outcome.stats.pages_published, 2);
    assert!(outcome.failure.is_some());
}

// ── Catalog commit ───────────────────────────────────────────────────────

/// Document fake that counts saves, to pin down single-commit behavior.
#[derive(Default)]
struct CountingDocument {
    contents: Mutex<Option<String>>,
    saves: Mutex<usize>,
}

#[async_trait]
impl CatalogDocument for CountingDocument {
    async fn load(&self) -> Result<Option<String>, BoundaryError> {
        Ok(self.contents.lock().unwrap().clone())
    }

    async fn save(&self, contents: &str) -> Result<(), BoundaryError> {
        *self.contents.lock().unwrap() = Some(contents.to_string());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

async fn store_with_comic(document: Arc<dyn CatalogDocument>) -> CatalogStore {
    let store = CatalogStore::restore(document).await;
    let comic = Comic::new("The Iron Bloom", "about", FileRef::new("cover")).unwrap();
    store.insert_new(comic).await.unwrap();
    store
}

#[tokio::test]
async fn import_commits_the_merged_comic_once() {
    let document = Arc::new(CountingDocument::default());
    let store = store_with_comic(document.clone()).await;
    let relay = FakeRelay::default();
    let archive = build_zip(&[
        ("Chapter 1/01.jpg", b"x".as_ref()),
        ("Chapter 2/01.jpg", b"x".as_ref()),
    ]);

    let saves_before = *document.saves.lock().unwrap();
    let report = import_into_catalog(&store, &relay, "the-iron-bloom", &archive, None)
        .await
        .unwrap();

    assert_eq!(report.imported, ["1", "2"]);
    assert_eq!(report.pages_published, 2);
    assert!(report.failure.is_none());
    assert!(report.summary().contains("The Iron Bloom"));

    // One store write for the whole import
    assert_eq!(*document.saves.lock().unwrap(), saves_before + 1);
    let comic = store.get("the-iron-bloom").await.unwrap();
    assert_eq!(comic.chapters.len(), 2);
    assert_eq!(comic.chapters["1"], vec![FileRef::new("ref-1")]);
}

#[tokio::test]
async fn import_into_unknown_slug_is_an_error() {
    let store = CatalogStore::restore(Arc::new(MemoryDocument::new())).await;
    let relay = FakeRelay::default();
    let archive = build_zip(&[("Chapter 1/01.jpg", b"x".as_ref())]);

    let err = import_into_catalog(&store, &relay, "ghost", &archive, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::UnknownComic(slug) if slug == "ghost"));
    assert!(relay.published().is_empty());
}

#[tokio::test]
async fn empty_archive_commits_nothing() {
    let document = Arc::new(CountingDocument::default());
    let store = store_with_comic(document.clone()).await;
    let relay = FakeRelay::default();
    let archive = build_zip(&[("readme.txt", b"no chapters here".as_ref())]);

    let saves_before = *document.saves.lock().unwrap();
    let report = import_into_catalog(&store, &relay, "the-iron-bloom", &archive, None)
        .await
        .unwrap();

    assert!(report.imported.is_empty());
    assert_eq!(*document.saves.lock().unwrap(), saves_before);
    assert!(report.summary().contains("unchanged"));
}

#[tokio::test]
async fn partial_failure_still_commits_finished_chapters() {
    let document = Arc::new(CountingDocument::default());
    let store = store_with_comic(document.clone()).await;
    let relay = FakeRelay::failing_after(1);
    let archive = build_zip(&[
        ("Chapter 1/01.jpg", b"x".as_ref()),
        ("Chapter 2/01.jpg", b"x".as_ref()),
    ]);

    let report = import_into_catalog(&store, &relay, "the-iron-bloom", &archive, None)
        .await
        .unwrap();

    assert_eq!(report.imported, ["1"]);
    assert!(report.failure.is_some());
    let comic = store.get("the-iron-bloom").await.unwrap();
    assert!(comic.chapters.contains_key("1"));
    assert!(!comic.chapters.contains_key("2"));
}

#[tokio::test]
async fn later_duplicate_chapter_number_replaces_earlier() {
    let document = Arc::new(CountingDocument::default());
    let store = store_with_comic(document.clone()).await;
    let relay = FakeRelay::default();
    // Both folders resolve to chapter "2"; the later scan entry wins
    let archive = build_zip(&[
        ("Chapter 2/old.jpg", b"x".as_ref()),
        ("Vol 1 Chapter 2/new.jpg", b"x".as_ref()),
    ]);

    import_into_catalog(&store, &relay, "the-iron-bloom", &archive, None)
        .await
        .unwrap();

    let comic = store.get("the-iron-bloom").await.unwrap();
    assert_eq!(comic.chapters.len(), 1);
    assert_eq!(comic.chapters["2"], vec![FileRef::new("ref-2")]);
}
