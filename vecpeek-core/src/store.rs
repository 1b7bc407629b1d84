//! Contract with the external vector-store engine.
//!
//! vecpeek never interprets the on-disk format; it only needs an engine
//! that can open a store by path and answer three read calls against it.

use std::path::Path;

use crate::error::Result;
use crate::record::{GetResult, QueryResult};

/// Opens stores rooted at a filesystem path.
pub trait StoreEngine {
    /// The handle type returned by [`StoreEngine::open`].
    type Store: VectorStore;

    /// Opens the persistent store at `path`.
    ///
    /// Must fail with [`Error::Connection`](crate::Error::Connection) when
    /// the path is not a readable store.
    fn open(&self, path: &Path) -> Result<Self::Store>;
}

/// Read operations on an open store.
pub trait VectorStore {
    /// Returns collection names in the engine's own enumeration order.
    fn list_collections(&self) -> Result<Vec<String>>;

    /// Returns every record of `collection` in native parallel-array form.
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound) for an
    /// unknown collection.
    fn get(&self, collection: &str) -> Result<GetResult>;

    /// Runs a similarity query for each text, returning at most
    /// `n_results` matches per text, nearest first.
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound) for an
    /// unknown collection.
    fn query(&self, collection: &str, texts: &[&str], n_results: usize) -> Result<QueryResult>;
}

impl<S: VectorStore + ?Sized> VectorStore for Box<S> {
    fn list_collections(&self) -> Result<Vec<String>> {
        (**self).list_collections()
    }

    fn get(&self, collection: &str) -> Result<GetResult> {
        (**self).get(collection)
    }

    fn query(&self, collection: &str, texts: &[&str], n_results: usize) -> Result<QueryResult> {
        (**self).query(collection, texts, n_results)
    }
}
