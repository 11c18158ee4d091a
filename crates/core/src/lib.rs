//! Catalog domain core.
//!
//! Holds everything that is more than a pass-through to a driver call:
//! record validation, the content-addressed asset store, and the
//! ingestion pipeline that keeps the asset directory and the relational
//! catalog in step. Persistence is reached only through the
//! [`catalog::CatalogRepository`] seam.

pub mod assets;
pub mod catalog;
pub mod error;
pub mod hashing;
pub mod ingest;
pub mod query;
pub mod types;
pub mod validation;
