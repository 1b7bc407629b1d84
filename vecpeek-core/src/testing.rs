//! In-memory engine used by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::record::{GetResult, QueryResult};
use crate::store::{StoreEngine, VectorStore};

#[derive(Default)]
pub(crate) struct FakeEngine {
    stores: HashMap<PathBuf, Vec<(String, GetResult)>>,
    pub(crate) opens: Rc<Cell<usize>>,
    pub(crate) requested: Rc<RefCell<Vec<usize>>>,
}

impl FakeEngine {
    pub(crate) fn with_collection(
        mut self,
        path: impl Into<PathBuf>,
        name: &str,
        records: GetResult,
    ) -> Self {
        self.stores
            .entry(path.into())
            .or_default()
            .push((name.to_string(), records));
        self
    }
}

#[derive(Debug)]
pub(crate) struct FakeStore {
    collections: Vec<(String, GetResult)>,
    requested: Rc<RefCell<Vec<usize>>>,
}

impl StoreEngine for FakeEngine {
    type Store = FakeStore;

    fn open(&self, path: &Path) -> Result<FakeStore> {
        self.opens.set(self.opens.get() + 1);
        let collections = self
            .stores
            .get(path)
            .cloned()
            .ok_or_else(|| Error::connection(path, "no such store"))?;
        Ok(FakeStore {
            collections,
            requested: Rc::clone(&self.requested),
        })
    }
}

impl FakeStore {
    fn find(&self, collection: &str) -> Result<&GetResult> {
        self.collections
            .iter()
            .find(|(name, _)| name == collection)
            .map(|(_, records)| records)
            .ok_or_else(|| Error::NotFound(collection.to_string()))
    }
}

impl VectorStore for FakeStore {
    fn list_collections(&self) -> Result<Vec<String>> {
        Ok(self.collections.iter().map(|(name, _)| name.clone()).collect())
    }

    fn get(&self, collection: &str) -> Result<GetResult> {
        self.find(collection).cloned()
    }

    // Returns the first `n_results` records in stored order.
    fn query(&self, collection: &str, texts: &[&str], n_results: usize) -> Result<QueryResult> {
        let records = self.find(collection)?;
        self.requested.borrow_mut().push(n_results);

        let ids: Vec<Option<String>> = records
            .ids
            .clone()
            .unwrap_or_default()
            .into_iter()
            .take(n_results)
            .collect();
        let distances: Vec<Option<f64>> = (0..ids.len()).map(|i| Some(i as f64 * 0.1)).collect();

        Ok(QueryResult {
            ids: Some(texts.iter().map(|_| Some(ids.clone())).collect()),
            documents: None,
            metadatas: None,
            distances: Some(texts.iter().map(|_| Some(distances.clone())).collect()),
        })
    }
}

pub(crate) fn ids(values: &[&str]) -> GetResult {
    GetResult {
        ids: Some(values.iter().map(|s| Some(s.to_string())).collect()),
        ..GetResult::default()
    }
}
