//! Display rows and tables.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static NULL: Value = Value::Null;

/// Column names the normalizer fills in itself.
pub mod columns {
    pub const ID: &str = "id";
    pub const DOCUMENT: &str = "document";
    pub const EMBEDDING_LENGTH: &str = "embedding_length";
    pub const DISTANCE: &str = "distance";
    /// Holds a scalar (non-mapping) metadata value.
    pub const METADATA: &str = "metadata";

    /// Returns true if `name` is filled in by the normalizer.
    pub fn is_structural(name: &str) -> bool {
        matches!(name, ID | DOCUMENT | EMBEDDING_LENGTH | DISTANCE)
    }
}

/// A flat, ordered mapping from column name to scalar value.
///
/// Columns keep the order they were first set in. `null` stands for an
/// absent value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayRow {
    cells: Map<String, Value>,
}

impl DisplayRow {
    /// Creates an empty row.
    #[inline]
    pub fn new() -> Self {
        Self { cells: Map::new() }
    }

    /// Sets a cell, returning the previous value. An existing column keeps
    /// its position.
    pub fn set<K, V>(&mut self, column: K, value: V) -> Option<Value>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.cells.insert(column.into(), value.into())
    }

    /// Gets a cell by column name.
    #[inline]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.cells.get(column)
    }

    /// Gets a cell as a string.
    #[inline]
    pub fn get_str(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(Value::as_str)
    }

    /// Returns true if the column is set, even to null.
    #[inline]
    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// Returns the column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Returns an iterator over `(column, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of columns set.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if no column is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A metadata key that clashed with a structural column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    /// Index of the affected row.
    pub row: usize,
    /// The structural column name the metadata key matched.
    pub column: String,
}

/// Normalized rows plus the column schema for rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<DisplayRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    collisions: Vec<Collision>,
}

impl Table {
    /// Creates a table with no rows and a fixed schema.
    pub fn empty(schema: &[&str]) -> Self {
        Self {
            columns: schema.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            collisions: Vec::new(),
        }
    }

    /// Creates a table whose schema is the union of the row columns in
    /// first-seen order.
    pub fn from_rows(rows: Vec<DisplayRow>, collisions: Vec<Collision>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for column in row.columns() {
                if !columns.iter().any(|c| c == column) {
                    columns.push(column.to_string());
                }
            }
        }

        Self {
            columns,
            rows,
            collisions,
        }
    }

    /// Returns the column schema.
    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the rows in order.
    #[inline]
    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    /// Returns the metadata keys that clashed with structural columns.
    #[inline]
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Returns the number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns one column across all rows; rows without it yield null.
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows
            .iter()
            .map(move |row| row.get(name).unwrap_or(&NULL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_keeps_position_on_overwrite() {
        let mut row = DisplayRow::new();
        row.set("id", "a");
        row.set("document", "x");
        let previous = row.set("id", "b");

        assert_eq!(previous, Some(json!("a")));
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["id", "document"]);
        assert_eq!(row.get_str("id"), Some("b"));
    }

    #[test]
    fn test_table_schema_union() {
        let mut first = DisplayRow::new();
        first.set("id", "a");
        first.set("color", "red");
        let mut second = DisplayRow::new();
        second.set("id", "b");
        second.set("size", 3);

        let table = Table::from_rows(vec![first, second], Vec::new());
        assert_eq!(table.columns(), &["id", "color", "size"]);
        assert_eq!(
            table.column("color").collect::<Vec<_>>(),
            vec![&json!("red"), &Value::Null]
        );
    }

    #[test]
    fn test_empty_table_schema() {
        let table = Table::empty(&[columns::ID, columns::DOCUMENT]);
        assert!(table.is_empty());
        assert_eq!(table.columns(), &["id", "document"]);
    }

    #[test]
    fn test_is_structural() {
        assert!(columns::is_structural("distance"));
        assert!(!columns::is_structural("metadata"));
        assert!(!columns::is_structural("color"));
    }
}
