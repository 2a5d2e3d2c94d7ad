//! Fireside core library.
//!
//! Pure domain logic shared by the persistence and HTTP crates: shared type
//! aliases, the domain error taxonomy, slug/slot validation, the read-only
//! game library, engine resolution, and the catalog scanner with its cache.
//! No database access and no web framework types live here.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod library;
pub mod slug;
pub mod types;
