//! Command line arguments.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use vecpeek_core::{CollisionPolicy, DEFAULT_K};
use vecpeek_dump::OllamaEmbedder;

/// vecpeek - look inside a persisted vector store
#[derive(Parser, Debug, Clone)]
#[command(name = "vecpeek")]
#[command(about = "List collections, browse records and run similarity queries")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct VecpeekArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Persist directory of the store
    #[arg(long, env = "VECPEEK_PATH", global = true)]
    pub path: Option<PathBuf>,

    /// Base URL of the Ollama server used to embed query texts
    #[arg(long, env = "VECPEEK_OLLAMA_URL", default_value = OllamaEmbedder::DEFAULT_URL, global = true)]
    pub ollama_url: String,

    /// Embedding model; must match the one the store was built with
    #[arg(long, env = "VECPEEK_EMBED_MODEL", default_value = OllamaEmbedder::DEFAULT_MODEL, global = true)]
    pub embed_model: String,

    /// What to do when a metadata key is named like a built-in column
    #[arg(long, default_value_t = CollisionPolicy::Overwrite, global = true)]
    pub on_collision: CollisionPolicy,

    #[command(subcommand)]
    pub command: Command,
}

impl VecpeekArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n + 1,
            }
        }
    }

    /// Default log filter when `RUST_LOG` is unset.
    ///
    /// `show` and `query` report collisions in the table output, so the
    /// normalizer's own collision warnings are filtered out for them.
    pub fn log_directives(&self) -> String {
        let level = match self.verbosity() {
            0 => "error",
            1 => "warn",
            2 => "info",
            _ => "debug",
        };
        match self.command {
            Command::Show(_) | Command::Query(_) => {
                format!("{},vecpeek_core::normalize=error", level)
            }
            Command::Collections | Command::Serve(_) => level.to_string(),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the collections in the store
    Collections,

    /// Show every record of a collection
    Show(ShowArgs),

    /// Show the records nearest to a query text
    Query(QueryArgs),

    /// Serve the HTTP dashboard API
    Serve(ServeArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Collection name
    pub collection: String,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct QueryArgs {
    /// Collection name
    pub collection: String,

    /// Query text
    pub text: String,

    /// Number of matches
    #[arg(short, default_value_t = DEFAULT_K)]
    pub k: usize,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "VECPEEK_ADDR", default_value = "127.0.0.1:8080")]
    pub addr: SocketAddr,
}

/// Output formats for tables.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned text table
    Human,
    /// Table as JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query() {
        let args = VecpeekArgs::try_parse_from([
            "vecpeek", "--path", "/data", "query", "docs", "rust", "-k", "5", "-f", "json",
        ])
        .unwrap();

        assert_eq!(args.path, Some(PathBuf::from("/data")));
        match args.command {
            Command::Query(q) => {
                assert_eq!(q.collection, "docs");
                assert_eq!(q.text, "rust");
                assert_eq!(q.k, 5);
                assert_eq!(q.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let args = VecpeekArgs::try_parse_from(["vecpeek", "query", "docs", "text"]).unwrap();
        assert_eq!(args.on_collision, CollisionPolicy::Overwrite);
        assert_eq!(args.verbosity(), 1);
        match args.command {
            Command::Query(q) => assert_eq!(q.k, DEFAULT_K),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_collision_policy_flag() {
        let args =
            VecpeekArgs::try_parse_from(["vecpeek", "collections", "--on-collision", "rename"])
                .unwrap();
        assert_eq!(args.on_collision, CollisionPolicy::Rename);
        assert!(VecpeekArgs::try_parse_from(["vecpeek", "collections", "--on-collision", "x"])
            .is_err());
    }

    #[test]
    fn test_log_directives() {
        let args = VecpeekArgs::try_parse_from(["vecpeek", "show", "docs"]).unwrap();
        assert_eq!(args.log_directives(), "warn,vecpeek_core::normalize=error");

        let args = VecpeekArgs::try_parse_from(["vecpeek", "-vv", "query", "docs", "t"]).unwrap();
        assert_eq!(args.log_directives(), "debug,vecpeek_core::normalize=error");

        let args = VecpeekArgs::try_parse_from(["vecpeek", "serve"]).unwrap();
        assert_eq!(args.log_directives(), "warn");
    }

    #[test]
    fn test_verbosity() {
        let args = VecpeekArgs::try_parse_from(["vecpeek", "-vv", "collections"]).unwrap();
        assert_eq!(args.verbosity(), 3);
        let args = VecpeekArgs::try_parse_from(["vecpeek", "-q", "collections"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }
}
