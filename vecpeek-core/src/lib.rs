//! # vecpeek Core
//!
//! Core library for vecpeek, a read-only viewer over a persisted vector
//! store.
//!
//! The engine that owns storage, embeddings and nearest-neighbor search is
//! external and reached through the [`StoreEngine`] / [`VectorStore`]
//! traits. This crate opens stores, reads them, and reshapes what comes back
//! into tables.
//!
//! ## Core Types
//!
//! ### Reading
//!
//! - [`Peeker`] - Facade over one open store: list, fetch, query
//! - [`Session`] - Keeps one [`Peeker`] per path, reopening on change
//!
//! ### Shapes
//!
//! - [`GetResult`] / [`QueryResult`] - Engine-native parallel arrays
//! - [`RawRecordSet`] / [`RawQueryResult`] - The same data aligned per record
//! - [`Metadata`] - Mapping, scalar, or absent
//!
//! ### Display
//!
//! - [`normalize_records`] / [`normalize_matches`] - Rows for rendering
//! - [`Table`] / [`DisplayRow`] - Normalized output

pub mod error;
pub mod metadata;
pub mod normalize;
pub mod peeker;
pub mod record;
pub mod row;
pub mod session;
pub mod store;

#[cfg(test)]
mod testing;

// Re-exports for convenient access
pub use error::{Error, Result};
pub use metadata::Metadata;
pub use normalize::{normalize_matches, normalize_records, CollisionPolicy};
pub use peeker::{effective_k, Peeker, DEFAULT_K};
pub use record::{
    Column, GetResult, QueryResult, RawMatch, RawQueryResult, RawRecord, RawRecordSet,
};
pub use row::{columns, Collision, DisplayRow, Table};
pub use session::Session;
pub use store::{StoreEngine, VectorStore};
