use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use inkpost_core::{
    BoundaryError, CatalogDocument, CatalogError, CatalogStore, Comic, FileRef, MemoryDocument,
};

/// Document fake that counts saves and can be switched into failure mode.
#[derive(Default)]
struct RecordingDocument {
    contents: std::sync::Mutex<Option<String>>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl RecordingDocument {
    fn fail_next_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogDocument for RecordingDocument {
    async fn load(&self) -> Result<Option<String>, BoundaryError> {
        Ok(self.contents.lock().unwrap().clone())
    }

    async fn save(&self, contents: &str) -> Result<(), BoundaryError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(BoundaryError::unavailable("simulated outage"));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.contents.lock().unwrap() = Some(contents.to_string());
        Ok(())
    }
}

fn comic(title: &str) -> Comic {
    Comic::new(title, format!("About {title}"), FileRef::new(format!("cover-{title}"))).unwrap()
}

#[tokio::test]
async fn insert_and_get_roundtrip() {
    let store = CatalogStore::restore(Arc::new(MemoryDocument::new())).await;

    store.insert_new(comic("The Iron Bloom")).await.unwrap();

    let found = store.get("the-iron-bloom").await.unwrap();
    assert_eq!(found.title, "The Iron Bloom");
    assert_eq!(found.description, "About The Iron Bloom");
    assert_eq!(found.cover, FileRef::new("cover-The Iron Bloom"));
    assert_eq!(store.count().await, 1);
}

#[tokio::test]
async fn get_all_sorts_by_title() {
    let store = CatalogStore::restore(Arc::new(MemoryDocument::new())).await;

    store.insert_new(comic("Cherry Road")).await.unwrap();
    store.insert_new(comic("Apple Season")).await.unwrap();
    store.insert_new(comic("Banana Law")).await.unwrap();

    let titles: Vec<String> = store.get_all().await.into_iter().map(|c| c.title).collect();
    assert_eq!(titles, ["Apple Season", "Banana Law", "Cherry Road"]);
}

#[tokio::test]
async fn insert_conflict_keeps_original() {
    let store = CatalogStore::restore(Arc::new(MemoryDocument::new())).await;

    store.insert_new(comic("Iron Bloom")).await.unwrap();

    // Different title text, same derived slug
    let dup = Comic::new("IRON BLOOM!!", "other", FileRef::new("other-cover")).unwrap();
    let err = store.insert_new(dup).await.unwrap_err();
    assert!(matches!(err, CatalogError::Conflict { slug } if slug == "iron-bloom"));

    let kept = store.get("iron-bloom").await.unwrap();
    assert_eq!(kept.description, "About Iron Bloom");
}

#[tokio::test]
async fn delete_removes_and_reports_missing() {
    let store = CatalogStore::restore(Arc::new(MemoryDocument::new())).await;

    store.insert_new(comic("Short Run")).await.unwrap();

    assert!(store.delete("short-run").await.unwrap());
    assert!(store.get("short-run").await.is_none());
    assert!(store.get_all().await.is_empty());

    // Second delete finds nothing
    assert!(!store.delete("short-run").await.unwrap());
}

#[tokio::test]
async fn get_chapter_returns_pages_in_order() {
    let store = CatalogStore::restore(Arc::new(MemoryDocument::new())).await;

    let mut entry = comic("Paged");
    entry.chapters.insert(
        "1".to_string(),
        vec![FileRef::new("p1"), FileRef::new("p2"), FileRef::new("p3")],
    );
    store.put(entry).await.unwrap();

    let pages = store.get_chapter("paged", "1").await.unwrap();
    assert_eq!(pages, vec![FileRef::new("p1"), FileRef::new("p2"), FileRef::new("p3")]);
    assert!(store.get_chapter("paged", "2").await.is_none());
    assert!(store.get_chapter("ghost", "1").await.is_none());
}

#[tokio::test]
async fn catalog_survives_restart() {
    let document = Arc::new(MemoryDocument::new());

    let store = CatalogStore::restore(document.clone()).await;
    store.insert_new(comic("Alpha Wave")).await.unwrap();
    let mut beta = comic("Beta Decay");
    beta.chapters.insert("1".to_string(), vec![FileRef::new("b1")]);
    store.put(beta).await.unwrap();
    drop(store);

    let reloaded = CatalogStore::restore(document).await;
    assert_eq!(reloaded.count().await, 2);
    let beta = reloaded.get("beta-decay").await.unwrap();
    assert_eq!(beta.chapters["1"], vec![FileRef::new("b1")]);
}

#[tokio::test]
async fn missing_or_corrupt_document_starts_empty() {
    let empty = CatalogStore::restore(Arc::new(MemoryDocument::new())).await;
    assert_eq!(empty.count().await, 0);

    let corrupt = CatalogStore::restore(Arc::new(MemoryDocument::with_contents("not json"))).await;
    assert_eq!(corrupt.count().await, 0);
}

#[tokio::test]
async fn failed_save_rolls_back_insert() {
    let document = Arc::new(RecordingDocument::default());
    let store = CatalogStore::restore(document.clone()).await;

    document.fail_next_saves(true);
    let err = store.insert_new(comic("Doomed")).await.unwrap_err();
    assert!(matches!(err, CatalogError::Document(_)));

    // Memory must not diverge from the document
    assert!(store.get("doomed").await.is_none());
    assert_eq!(store.count().await, 0);
    assert_eq!(document.save_count(), 0);
}

#[tokio::test]
async fn failed_save_rolls_back_put_and_delete() {
    let document = Arc::new(RecordingDocument::default());
    let store = CatalogStore::restore(document.clone()).await;
    store.insert_new(comic("Stable")).await.unwrap();

    document.fail_next_saves(true);

    let mut updated = store.get("stable").await.unwrap();
    updated.description = "rewritten".to_string();
    assert!(store.put(updated).await.is_err());
    assert_eq!(store.get("stable").await.unwrap().description, "About Stable");

    assert!(store.delete("stable").await.is_err());
    assert!(store.get("stable").await.is_some());
}

#[tokio::test]
async fn deleting_missing_slug_saves_nothing() {
    let document = Arc::new(RecordingDocument::default());
    let store = CatalogStore::restore(document.clone()).await;

    assert!(!store.delete("ghost").await.unwrap());
    assert_eq!(document.save_count(), 0);
}

#[tokio::test]
async fn export_json_is_keyed_by_slug() {
    let store = CatalogStore::restore(Arc::new(MemoryDocument::new())).await;
    store.insert_new(comic("First")).await.unwrap();
    store.insert_new(comic("Second")).await.unwrap();

    let json = store.export_json().await.unwrap();
    let parsed: std::collections::BTreeMap<String, Comic> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.len(), 2);
    assert!(parsed.contains_key("first"));
    assert!(parsed.contains_key("second"));
}
