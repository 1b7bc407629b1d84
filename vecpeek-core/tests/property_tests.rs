use proptest::prelude::*;
use serde_json::{json, Value};
use vecpeek_core::{
    normalize_matches, normalize_records, CollisionPolicy, GetResult, Metadata, QueryResult,
    RawQueryResult, RawRecordSet,
};

fn column(values: &[String]) -> Option<Vec<Option<String>>> {
    Some(values.iter().cloned().map(Some).collect())
}

fn optional_column<T: Clone>(len: Option<usize>, value: T) -> Option<Vec<Option<T>>> {
    len.map(|n| vec![Some(value); n])
}

proptest! {
    #[test]
    fn test_row_count_is_longest_column(
        ids in proptest::collection::vec("[a-z0-9]{1,8}", 0..20),
        docs in proptest::collection::vec(".{0,16}", 0..20),
        metadata_len in proptest::option::of(0usize..20),
        embedding_len in proptest::option::of(0usize..20),
    ) {
        let raw = GetResult {
            ids: column(&ids),
            documents: column(&docs),
            metadatas: metadata_len.map(|n| vec![Metadata::from(json!({"k": 1})); n]),
            embeddings: optional_column(embedding_len, vec![0.5f32; 4]),
        };
        let expected = [
            ids.len(),
            docs.len(),
            metadata_len.unwrap_or(0),
            embedding_len.unwrap_or(0),
        ]
        .into_iter()
        .max()
        .unwrap();

        let table = normalize_records(&RawRecordSet::from(raw), CollisionPolicy::default());
        prop_assert_eq!(table.len(), expected);

        for (i, row) in table.rows().iter().enumerate() {
            prop_assert!(row.contains("id"));
            prop_assert!(row.contains("document"));
            let expected_id = ids.get(i).map_or(Value::Null, |s| json!(s));
            prop_assert_eq!(row.get("id"), Some(&expected_id));
        }
    }

    #[test]
    fn test_ids_and_documents_round_trip(
        pairs in proptest::collection::vec(("[a-z0-9]{1,8}", ".{0,16}"), 0..30),
    ) {
        let (ids, docs): (Vec<String>, Vec<String>) = pairs.into_iter().unzip();
        let raw = GetResult {
            ids: column(&ids),
            documents: column(&docs),
            ..GetResult::default()
        };

        let table = normalize_records(&RawRecordSet::from(raw), CollisionPolicy::default());

        let ids_back: Vec<String> = table
            .column("id")
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        let docs_back: Vec<String> = table
            .column("document")
            .map(|v| v.as_str().unwrap().to_string())
            .collect();
        prop_assert_eq!(ids_back, ids);
        prop_assert_eq!(docs_back, docs);
    }

    #[test]
    fn test_query_row_count_is_longest_column(
        ids in proptest::collection::vec("[a-z]{1,4}", 0..10),
        distances in proptest::collection::vec(0.0f64..2.0, 0..10),
    ) {
        let raw = QueryResult {
            ids: Some(vec![column(&ids)]),
            documents: None,
            metadatas: None,
            distances: Some(vec![Some(distances.iter().copied().map(Some).collect())]),
        };

        let table = normalize_matches(&RawQueryResult::from(raw), CollisionPolicy::default());
        prop_assert_eq!(table.len(), ids.len().max(distances.len()));
        prop_assert!(table.columns().iter().any(|c| c == "distance"));
    }
}
