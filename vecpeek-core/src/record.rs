//! Record shapes, native and aligned.
//!
//! Engines return results as parallel arrays ([`GetResult`], [`QueryResult`])
//! where each array may be null or shorter than the others. The aligned
//! types ([`RawRecordSet`], [`RawQueryResult`]) zip those arrays once into a
//! sequence of per-record structs with explicit optional fields, so nothing
//! downstream has to repeat length or null checks.

use serde::{Deserialize, Serialize};

use crate::metadata::Metadata;

/// One engine-native column: possibly null, with possibly null elements.
pub type Column<T> = Option<Vec<Option<T>>>;

/// Engine-native result of fetching every record of a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetResult {
    #[serde(default)]
    pub ids: Column<String>,
    #[serde(default)]
    pub documents: Column<String>,
    #[serde(default)]
    pub metadatas: Option<Vec<Metadata>>,
    #[serde(default)]
    pub embeddings: Column<Vec<f32>>,
}

impl GetResult {
    /// Number of ids reported by the engine. This is the collection size.
    pub fn id_count(&self) -> usize {
        self.ids.as_ref().map_or(0, Vec::len)
    }
}

/// Engine-native result of a similarity query.
///
/// Each field holds one inner column per query text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub ids: Option<Vec<Column<String>>>,
    #[serde(default)]
    pub documents: Option<Vec<Column<String>>>,
    #[serde(default)]
    pub metadatas: Option<Vec<Option<Vec<Metadata>>>>,
    #[serde(default)]
    pub distances: Option<Vec<Column<f64>>>,
}

impl QueryResult {
    /// Takes the columns of the first query, dropping any others.
    fn into_first(self) -> (Column<String>, Column<String>, Option<Vec<Metadata>>, Column<f64>) {
        fn first<T>(nested: Option<Vec<Option<T>>>) -> Option<T> {
            nested.and_then(|outer| outer.into_iter().next().flatten())
        }

        (
            first(self.ids),
            first(self.documents),
            first(self.metadatas),
            first(self.distances),
        )
    }
}

/// A single stored record with every field explicitly optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub id: Option<String>,
    pub document: Option<String>,
    pub metadata: Metadata,
    pub embedding: Option<Vec<f32>>,
}

impl RawRecord {
    /// Creates a record with only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Sets the document. Chainable.
    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    /// Sets the metadata. Chainable.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Sets the embedding. Chainable.
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }
}

/// A single query match with every field explicitly optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMatch {
    pub id: Option<String>,
    pub document: Option<String>,
    pub metadata: Metadata,
    pub distance: Option<f64>,
}

/// All records of a collection, aligned by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecordSet {
    records: Vec<RawRecord>,
}

impl RawRecordSet {
    /// Wraps already aligned records.
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    /// Returns the number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns an iterator over the records in engine order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, RawRecord> {
        self.records.iter()
    }
}

impl From<GetResult> for RawRecordSet {
    fn from(raw: GetResult) -> Self {
        let n = [
            column_len(&raw.ids),
            column_len(&raw.documents),
            raw.metadatas.as_ref().map_or(0, Vec::len),
            column_len(&raw.embeddings),
        ]
        .into_iter()
        .max()
        .unwrap_or(0);

        let records = padded(raw.ids, n)
            .zip(padded(raw.documents, n))
            .zip(padded_metadata(raw.metadatas, n))
            .zip(padded(raw.embeddings, n))
            .map(|(((id, document), metadata), embedding)| RawRecord {
                id,
                document,
                metadata,
                embedding,
            })
            .collect();

        Self { records }
    }
}

impl FromIterator<RawRecord> for RawRecordSet {
    fn from_iter<I: IntoIterator<Item = RawRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// The matches of a single query text, aligned by rank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQueryResult {
    matches: Vec<RawMatch>,
}

impl RawQueryResult {
    /// Wraps already aligned matches.
    pub fn new(matches: Vec<RawMatch>) -> Self {
        Self { matches }
    }

    /// Returns the number of matches.
    #[inline]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns true if nothing matched.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Returns an iterator over the matches, best first.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, RawMatch> {
        self.matches.iter()
    }
}

impl From<QueryResult> for RawQueryResult {
    fn from(raw: QueryResult) -> Self {
        let (ids, documents, metadatas, distances) = raw.into_first();
        let n = [
            column_len(&ids),
            column_len(&documents),
            metadatas.as_ref().map_or(0, Vec::len),
            column_len(&distances),
        ]
        .into_iter()
        .max()
        .unwrap_or(0);

        let matches = padded(ids, n)
            .zip(padded(documents, n))
            .zip(padded_metadata(metadatas, n))
            .zip(padded(distances, n))
            .map(|(((id, document), metadata), distance)| RawMatch {
                id,
                document,
                metadata,
                distance,
            })
            .collect();

        Self { matches }
    }
}

fn column_len<T>(column: &Column<T>) -> usize {
    column.as_ref().map_or(0, Vec::len)
}

// Yields exactly `n` slots, filling past the end of the column with `None`.
fn padded<T>(column: Column<T>, n: usize) -> impl Iterator<Item = Option<T>> {
    column
        .unwrap_or_default()
        .into_iter()
        .chain(std::iter::repeat_with(|| None))
        .take(n)
}

fn padded_metadata(column: Option<Vec<Metadata>>, n: usize) -> impl Iterator<Item = Metadata> {
    column
        .unwrap_or_default()
        .into_iter()
        .chain(std::iter::repeat_with(Metadata::default))
        .take(n)
}
