//! Read-only facade over an open store.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::normalize::{normalize_matches, normalize_records, CollisionPolicy};
use crate::record::{RawQueryResult, RawRecordSet};
use crate::row::Table;
use crate::store::{StoreEngine, VectorStore};

/// Number of matches requested when the caller does not choose.
pub const DEFAULT_K: usize = 3;

/// Caps `k` at the collection size, unless the collection is empty.
///
/// An empty collection still asks for `k`; the engine returns no matches.
///
/// ```
/// use vecpeek_core::effective_k;
///
/// assert_eq!(effective_k(3, 2), 2);
/// assert_eq!(effective_k(3, 10), 3);
/// assert_eq!(effective_k(3, 0), 3);
/// ```
#[inline]
pub fn effective_k(k: usize, collection_size: usize) -> usize {
    if collection_size > 0 {
        k.min(collection_size)
    } else {
        k
    }
}

/// A store handle plus the path it was opened from.
///
/// # Example
///
/// ```ignore
/// use vecpeek_core::{CollisionPolicy, Peeker, DEFAULT_K};
///
/// let peeker = Peeker::open(&engine, "./chroma_data")?;
/// for name in peeker.list_collections()? {
///     let table = peeker.collection_table(&name, CollisionPolicy::default())?;
///     println!("{}: {} rows", name, table.len());
/// }
/// let matches = peeker.query_table("docs", "rust ownership", DEFAULT_K, CollisionPolicy::default())?;
/// ```
#[derive(Debug)]
pub struct Peeker<S> {
    path: PathBuf,
    store: S,
}

impl<S: VectorStore> Peeker<S> {
    /// Opens the store at `path` through `engine`.
    pub fn open<E, P>(engine: &E, path: P) -> Result<Self>
    where
        E: StoreEngine<Store = S>,
        P: AsRef<Path>,
    {
        let path = path.as_ref().to_path_buf();
        let store = engine.open(&path)?;
        tracing::info!(path = %path.display(), "opened store");
        Ok(Self { path, store })
    }

    /// Returns the path this store was opened from.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the collection names, unsorted.
    pub fn list_collections(&self) -> Result<Vec<String>> {
        self.store.list_collections()
    }

    /// Fetches every record of `collection`.
    pub fn fetch_all(&self, collection: &str) -> Result<RawRecordSet> {
        let raw = self.store.get(collection)?;
        tracing::debug!(collection, ids = raw.id_count(), "fetched records");
        Ok(RawRecordSet::from(raw))
    }

    /// Queries `collection` for the `k` records nearest to `text`.
    pub fn query(&self, collection: &str, text: &str, k: usize) -> Result<RawQueryResult> {
        let size = self.store.get(collection)?.id_count();
        let n_results = effective_k(k, size);
        tracing::debug!(collection, k, size, n_results, "querying collection");

        let raw = self.store.query(collection, &[text], n_results)?;
        Ok(RawQueryResult::from(raw))
    }

    /// Fetches and normalizes every record of `collection`.
    pub fn collection_table(&self, collection: &str, policy: CollisionPolicy) -> Result<Table> {
        let set = self.fetch_all(collection)?;
        Ok(normalize_records(&set, policy))
    }

    /// Queries `collection` and normalizes the matches.
    pub fn query_table(
        &self,
        collection: &str,
        text: &str,
        k: usize,
        policy: CollisionPolicy,
    ) -> Result<Table> {
        let result = self.query(collection, text, k)?;
        Ok(normalize_matches(&result, policy))
    }
}
