//! Row structs matching the catalog tables.
//!
//! Rows are converted into `catalog_core` records before they leave this
//! crate; nullable columns are normalized during that conversion.

pub mod item;
pub mod user;
