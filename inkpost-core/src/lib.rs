//! Core model and contracts for the inkpost catalog.
//!
//! Everything the rest of the workspace agrees on lives here: the comic
//! data model, slug derivation, the catalog store, and the traits the
//! messaging-platform crate implements.

pub mod boundary;
pub mod comic;
pub mod error;
pub mod input;
pub mod slug;
pub mod store;

pub use boundary::{BoundaryError, CatalogDocument, ImageRelay, MemoryDocument};
pub use comic::{Comic, FileRef};
pub use error::CatalogError;
pub use input::{ActorId, AdminInput, Button, Reply};
pub use slug::slugify;
pub use store::CatalogStore;
