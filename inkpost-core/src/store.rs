//! The in-memory catalog, mirrored into a durable document.
//!
//! All comics live in one map guarded by a single async mutex. Every
//! mutation updates the map and saves the serialized catalog while still
//! holding the lock, so the document always matches some fully-applied
//! state and writes can never interleave. Reads clone out of the lock and
//! never touch the document.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::boundary::CatalogDocument;
use crate::comic::{Comic, FileRef};
use crate::error::CatalogError;

pub struct CatalogStore {
    comics: Mutex<BTreeMap<String, Comic>>,
    document: Arc<dyn CatalogDocument>,
}

impl CatalogStore {
    /// Load the catalog from its document.
    ///
    /// A missing or unreadable document logs and starts an empty catalog
    /// rather than refusing to boot; the next successful save rewrites it.
    pub async fn restore(document: Arc<dyn CatalogDocument>) -> Self {
        let comics = match document.load().await {
            Ok(Some(text)) => match serde_json::from_str::<BTreeMap<String, Comic>>(&text) {
                Ok(map) => {
                    log::info!("restored {} comic(s) from the catalog document", map.len());
                    map
                }
                Err(e) => {
                    log::warn!("catalog document is not valid JSON, starting empty: {e}");
                    BTreeMap::new()
                }
            },
            Ok(None) => {
                log::info!("no catalog document yet, starting empty");
                BTreeMap::new()
            }
            Err(e) => {
                log::warn!("could not load the catalog document, starting empty: {e}");
                BTreeMap::new()
            }
        };
        Self {
            comics: Mutex::new(comics),
            document,
        }
    }

    /// All comics, sorted by title for stable menu order.
    pub async fn get_all(&self) -> Vec<Comic> {
        let comics = self.comics.lock().await;
        let mut all: Vec<Comic> = comics.values().cloned().collect();
        all.sort_by(|a, b| a.title.cmp(&b.title));
        all
    }

    pub async fn get(&self, slug: &str) -> Option<Comic> {
        self.comics.lock().await.get(slug).cloned()
    }

    /// Pages of one chapter, in reading order.
    pub async fn get_chapter(&self, slug: &str, number: &str) -> Option<Vec<FileRef>> {
        self.comics
            .lock()
            .await
            .get(slug)
            .and_then(|comic| comic.chapters.get(number).cloned())
    }

    pub async fn count(&self) -> usize {
        self.comics.lock().await.len()
    }

    /// Insert a brand-new comic, refusing to overwrite an existing slug.
    pub async fn insert_new(&self, comic: Comic) -> Result<(), CatalogError> {
        let mut comics = self.comics.lock().await;
        if comics.contains_key(&comic.slug) {
            return Err(CatalogError::conflict(comic.slug));
        }
        let slug = comic.slug.clone();
        comics.insert(slug.clone(), comic);
        if let Err(e) = Self::persist(&comics, &self.document).await {
            // Keep memory and document in step: undo before reporting.
            comics.remove(&slug);
            return Err(e);
        }
        Ok(())
    }

    /// Insert or replace a comic under its slug.
    pub async fn put(&self, comic: Comic) -> Result<(), CatalogError> {
        let mut comics = self.comics.lock().await;
        let slug = comic.slug.clone();
        let previous = comics.insert(slug.clone(), comic);
        if let Err(e) = Self::persist(&comics, &self.document).await {
            match previous {
                Some(prev) => {
                    comics.insert(slug, prev);
                }
                None => {
                    comics.remove(&slug);
                }
            }
            return Err(e);
        }
        Ok(())
    }

    /// Remove a comic. Returns `false` when the slug was not present, in
    /// which case nothing is saved.
    pub async fn delete(&self, slug: &str) -> Result<bool, CatalogError> {
        let mut comics = self.comics.lock().await;
        let Some(removed) = comics.remove(slug) else {
            return Ok(false);
        };
        if let Err(e) = Self::persist(&comics, &self.document).await {
            comics.insert(slug.to_string(), removed);
            return Err(e);
        }
        Ok(true)
    }

    /// The catalog as pretty-printed JSON, for export tooling.
    pub async fn export_json(&self) -> Result<String, CatalogError> {
        let comics = self.comics.lock().await;
        Ok(serde_json::to_string_pretty(&*comics)?)
    }

    async fn persist(
        comics: &BTreeMap<String, Comic>,
        document: &Arc<dyn CatalogDocument>,
    ) -> Result<(), CatalogError> {
        let json = serde_json::to_string(comics)?;
        document.save(&json).await?;
        Ok(())
    }
}
