//! The catalog data model.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::slug::slugify;

/// Opaque handle to an image hosted by the messaging platform.
///
/// The platform assigns these when an image is uploaded; the catalog only
/// ever stores and echoes them back, it never looks inside. Serializes as
/// a bare string so the catalog document stays readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileRef(String);

impl FileRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One published comic: identity, presentation fields, and chapters.
///
/// Chapter keys are the number rendered as text ("1", "2.5", "10") so the
/// JSON document round-trips without float surprises. Pages are stored in
/// reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comic {
    /// Stable identity, derived from the title at creation time
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Cover image shown in listings
    pub cover: FileRef,
    #[serde(default)]
    pub chapters: BTreeMap<String, Vec<FileRef>>,
}

impl Comic {
    /// Build a new comic with no chapters, deriving the slug from the title.
    ///
    /// Fails with [`CatalogError::Validation`] when the title yields an
    /// empty slug (no ASCII letters or digits).
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        cover: FileRef,
    ) -> Result<Self, CatalogError> {
        let title = title.into();
        let slug = slugify(&title);
        if slug.is_empty() {
            return Err(CatalogError::validation(format!(
                "title '{title}' contains no usable characters"
            )));
        }
        Ok(Self {
            slug,
            title,
            description: description.into(),
            cover,
            chapters: BTreeMap::new(),
        })
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// Chapters in reading order.
    ///
    /// When every key parses as a number the order is numeric ascending
    /// ("2" before "10"); otherwise the map's lexicographic order is kept
    /// as-is. Mirrors how readers expect chapter lists to sort.
    pub fn chapters_in_order(&self) -> Vec<(&str, &[FileRef])> {
        let mut entries: Vec<(&str, &[FileRef])> = self
            .chapters
            .iter()
            .map(|(number, pages)| (number.as_str(), pages.as_slice()))
            .collect();
        let all_numeric = entries.iter().all(|(number, _)| number.parse::<f64>().is_ok());
        if all_numeric {
            entries.sort_by(|a, b| {
                let left: f64 = a.0.parse().unwrap_or(0.0);
                let right: f64 = b.0.parse().unwrap_or(0.0);
                left.partial_cmp(&right).unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        entries
    }
}
