//! # vecpeek Dump
//!
//! A [`StoreEngine`](vecpeek_core::StoreEngine) over a directory of
//! collection dumps. Each collection is a subdirectory holding the engine's
//! native `get()` output as `records.json`; query texts are embedded by an
//! [`Embedder`] and ranked against the stored vectors.
//!
//! ```no_run
//! use vecpeek_core::{CollisionPolicy, Peeker, DEFAULT_K};
//! use vecpeek_dump::{DumpEngine, OllamaEmbedder};
//!
//! let engine = DumpEngine::new(OllamaEmbedder::default());
//! let peeker = Peeker::open(&engine, "./persist")?;
//! let table = peeker.query_table("docs", "memory safety", DEFAULT_K, CollisionPolicy::default())?;
//! println!("{} matches", table.len());
//! # Ok::<(), vecpeek_core::Error>(())
//! ```

pub mod distance;
pub mod embed;
pub mod engine;

pub use distance::DistanceMetric;
pub use embed::{Embedder, OllamaEmbedder};
pub use engine::{DumpEngine, DumpStore};
