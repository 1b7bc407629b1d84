//! Store engine over a directory of collection dumps.
//!
//! Layout of a persist directory:
//!
//! ```text
//! <root>/
//!   <collection>/
//!     records.json   native get() result: ids, documents, metadatas, embeddings
//!     meta.json      optional: {"metric": "cosine" | "l2" | "ip"}
//! ```

use std::cmp::Ordering;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use vecpeek_core::{
    Error, GetResult, Metadata, QueryResult, RawRecord, RawRecordSet, Result, StoreEngine,
    VectorStore,
};

use crate::distance::DistanceMetric;
use crate::embed::Embedder;

const RECORDS_FILE: &str = "records.json";
const META_FILE: &str = "meta.json";

/// Collection settings read from `meta.json`.
#[derive(Debug, Clone, Default, Deserialize)]
struct CollectionMeta {
    #[serde(default)]
    metric: DistanceMetric,
}

/// Opens dump directories, sharing one embedder across every store.
#[derive(Debug)]
pub struct DumpEngine<E> {
    embedder: Arc<E>,
}

impl<E: Embedder> DumpEngine<E> {
    /// Creates an engine that embeds query texts with `embedder`.
    pub fn new(embedder: E) -> Self {
        Self {
            embedder: Arc::new(embedder),
        }
    }
}

impl<E: Embedder> StoreEngine for DumpEngine<E> {
    type Store = DumpStore<E>;

    fn open(&self, path: &Path) -> Result<DumpStore<E>> {
        let meta = fs::metadata(path).map_err(|e| Error::connection(path, e))?;
        if !meta.is_dir() {
            return Err(Error::connection(path, "not a directory"));
        }
        // Unreadable directories fail here, not on first list.
        fs::read_dir(path).map_err(|e| Error::connection(path, e))?;

        Ok(DumpStore {
            root: path.to_path_buf(),
            embedder: Arc::clone(&self.embedder),
        })
    }
}

/// An open dump directory.
#[derive(Debug)]
pub struct DumpStore<E> {
    root: PathBuf,
    embedder: Arc<E>,
}

impl<E> DumpStore<E> {
    // Resolves a collection directory, refusing names that would escape the root.
    fn collection_dir(&self, collection: &str) -> Result<PathBuf> {
        let mut components = Path::new(collection).components();
        let single_normal = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_normal {
            return Err(Error::NotFound(collection.to_string()));
        }

        let dir = self.root.join(collection);
        if !dir.join(RECORDS_FILE).is_file() {
            return Err(Error::NotFound(collection.to_string()));
        }
        Ok(dir)
    }

    fn read_records(&self, collection: &str) -> Result<GetResult> {
        let path = self.collection_dir(collection)?.join(RECORDS_FILE);
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::Engine(format!("read {} failed: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Engine(format!("parse {} failed: {}", path.display(), e)))
    }

    fn read_meta(&self, collection: &str) -> Result<CollectionMeta> {
        let path = self.collection_dir(collection)?.join(META_FILE);
        if !path.exists() {
            return Ok(CollectionMeta::default());
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::Engine(format!("read {} failed: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Engine(format!("parse {} failed: {}", path.display(), e)))
    }
}

impl<E: Embedder> VectorStore for DumpStore<E> {
    fn list_collections(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root)
            .map_err(|e| Error::Engine(format!("list {} failed: {}", self.root.display(), e)))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|e| Error::Engine(format!("list entry failed: {}", e)))?;
            if !entry.path().join(RECORDS_FILE).is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::warn!(name = ?raw, "skipping non-UTF-8 collection name"),
            }
        }
        Ok(names)
    }

    fn get(&self, collection: &str) -> Result<GetResult> {
        self.read_records(collection)
    }

    fn query(&self, collection: &str, texts: &[&str], n_results: usize) -> Result<QueryResult> {
        let records = RawRecordSet::from(self.read_records(collection)?);
        let metric = self.read_meta(collection)?.metric;

        let mut result = QueryResult {
            ids: Some(Vec::with_capacity(texts.len())),
            documents: Some(Vec::with_capacity(texts.len())),
            metadatas: Some(Vec::with_capacity(texts.len())),
            distances: Some(Vec::with_capacity(texts.len())),
        };

        for text in texts {
            let query = self.embedder.embed(text)?;
            let ranked = rank(&records, &query, metric, n_results)?;
            tracing::debug!(collection, matches = ranked.len(), ?metric, "ranked records");

            push(&mut result.ids, ranked.iter().map(|(_, r)| r.id.clone()).collect());
            push(
                &mut result.documents,
                ranked.iter().map(|(_, r)| r.document.clone()).collect(),
            );
            push(
                &mut result.metadatas,
                ranked
                    .iter()
                    .map(|(_, r)| r.metadata.clone())
                    .collect::<Vec<Metadata>>(),
            );
            push(
                &mut result.distances,
                ranked.iter().map(|(d, _)| Some(f64::from(*d))).collect(),
            );
        }

        Ok(result)
    }
}

fn push<T>(nested: &mut Option<Vec<Option<T>>>, column: T) {
    if let Some(outer) = nested {
        outer.push(Some(column));
    }
}

// Scores every record that has an embedding and keeps the `n` closest.
fn rank<'a>(
    records: &'a RawRecordSet,
    query: &[f32],
    metric: DistanceMetric,
    n: usize,
) -> Result<Vec<(f32, &'a RawRecord)>> {
    let mut scored = Vec::with_capacity(records.len());
    for record in records.iter() {
        let Some(embedding) = record.embedding.as_deref() else {
            continue;
        };
        if embedding.len() != query.len() {
            return Err(Error::Engine(format!(
                "dimension mismatch: collection has {}, query has {}",
                embedding.len(),
                query.len()
            )));
        }
        scored.push((metric.compute(query, embedding), record));
    }

    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    scored.truncate(n);
    Ok(scored)
}
