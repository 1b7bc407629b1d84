//! Row normalization.
//!
//! Turns aligned record sets and query results into [`Table`]s. Every input
//! record produces exactly one row, in input order:
//!
//! - `id` and `document` are always present, `null` when missing
//! - record sets add `embedding_length` (the vector is never shown)
//! - query results add `distance`
//! - mapping metadata is flattened into columns; scalar metadata lands in a
//!   single `metadata` column
//!
//! An empty input yields an empty table with the minimal schema.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::metadata::Metadata;
use crate::record::{RawQueryResult, RawRecordSet};
use crate::row::{columns, Collision, DisplayRow, Table};

/// What to do when a metadata key matches a structural column name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// The metadata value replaces the structural value.
    #[default]
    Overwrite,
    /// The metadata value is stored under `metadata.<key>` instead.
    Rename,
}

impl CollisionPolicy {
    fn renamed(key: &str) -> String {
        format!("{}.{}", columns::METADATA, key)
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionPolicy::Overwrite => f.write_str("overwrite"),
            CollisionPolicy::Rename => f.write_str("rename"),
        }
    }
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            "rename" => Ok(CollisionPolicy::Rename),
            other => Err(format!(
                "unknown collision policy '{}', expected 'overwrite' or 'rename'",
                other
            )),
        }
    }
}

/// Normalizes every record of a collection.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use vecpeek_core::{normalize_records, CollisionPolicy, Metadata, RawRecord, RawRecordSet};
///
/// let set: RawRecordSet = vec![RawRecord::new("a")
///     .with_document("x")
///     .with_metadata(Metadata::mapping().with_field("color", "red"))
///     .with_embedding(vec![0.1, 0.2, 0.3])]
/// .into_iter()
/// .collect();
///
/// let table = normalize_records(&set, CollisionPolicy::default());
/// let row = &table.rows()[0];
/// assert_eq!(row.get_str("color"), Some("red"));
/// assert_eq!(row.get("embedding_length"), Some(&json!(3)));
/// ```
pub fn normalize_records(set: &RawRecordSet, policy: CollisionPolicy) -> Table {
    if set.is_empty() {
        return Table::empty(&[columns::ID, columns::DOCUMENT]);
    }

    let mut collisions = Vec::new();
    let rows = set
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let mut row = DisplayRow::new();
            row.set(columns::ID, record.id.clone());
            row.set(columns::DOCUMENT, record.document.clone());
            row.set(
                columns::EMBEDDING_LENGTH,
                record.embedding.as_ref().map(Vec::len),
            );
            merge_metadata(&mut row, i, &record.metadata, policy, &mut collisions);
            row
        })
        .collect();

    Table::from_rows(rows, collisions)
}

/// Normalizes the matches of a single query.
pub fn normalize_matches(result: &RawQueryResult, policy: CollisionPolicy) -> Table {
    if result.is_empty() {
        return Table::empty(&[columns::ID, columns::DOCUMENT, columns::DISTANCE]);
    }

    let mut collisions = Vec::new();
    let rows = result
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let mut row = DisplayRow::new();
            row.set(columns::ID, m.id.clone());
            row.set(columns::DOCUMENT, m.document.clone());
            row.set(columns::DISTANCE, m.distance);
            merge_metadata(&mut row, i, &m.metadata, policy, &mut collisions);
            row
        })
        .collect();

    Table::from_rows(rows, collisions)
}

fn merge_metadata(
    row: &mut DisplayRow,
    index: usize,
    metadata: &Metadata,
    policy: CollisionPolicy,
    collisions: &mut Vec<Collision>,
) {
    match metadata {
        Metadata::Absent => {}
        Metadata::Scalar(value) => {
            row.set(columns::METADATA, value.clone());
        }
        Metadata::Mapping(map) => {
            for (key, value) in map {
                if row.contains(key) && columns::is_structural(key) {
                    tracing::warn!(
                        row = index,
                        column = %key,
                        %policy,
                        "metadata key collides with a structural column"
                    );
                    collisions.push(Collision {
                        row: index,
                        column: key.clone(),
                    });
                    if policy == CollisionPolicy::Rename {
                        row.set(CollisionPolicy::renamed(key), value.clone());
                        continue;
                    }
                }
                row.set(key.clone(), value.clone());
            }
        }
    }
}
