//! One open store per viewing session.
//!
//! A session keeps the handle for the current path and reuses it until the
//! caller points it somewhere else. The previous handle is dropped; the
//! engine owns any cleanup.

use std::path::Path;

use crate::error::{Error, Result};
use crate::peeker::Peeker;
use crate::store::StoreEngine;

/// Holds the engine and at most one open store.
pub struct Session<E: StoreEngine> {
    engine: E,
    current: Option<Peeker<E::Store>>,
}

impl<E: StoreEngine> Session<E> {
    /// Creates a session with no store open.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            current: None,
        }
    }

    /// Points the session at `path`, opening a new handle only if the path
    /// changed.
    ///
    /// A failed open leaves the session with no store.
    pub fn point_at(&mut self, path: impl AsRef<Path>) -> Result<&Peeker<E::Store>> {
        let path = path.as_ref();
        let reuse = self
            .current
            .as_ref()
            .is_some_and(|peeker| peeker.path() == path);

        if !reuse {
            self.current = None;
            self.current = Some(Peeker::open(&self.engine, path)?);
        }

        self.peeker()
    }

    /// Returns the open store.
    pub fn peeker(&self) -> Result<&Peeker<E::Store>> {
        self.current.as_ref().ok_or(Error::NoStore)
    }

    /// Returns the path of the open store, if any.
    pub fn path(&self) -> Option<&Path> {
        self.current.as_ref().map(Peeker::path)
    }

    /// Drops the open store.
    pub fn close(&mut self) {
        if let Some(peeker) = self.current.take() {
            tracing::debug!(path = %peeker.path().display(), "closed store");
        }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }
}
