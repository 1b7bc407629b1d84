//! Command execution.

use std::path::PathBuf;

use anyhow::Context;
use vecpeek_core::{Peeker, Session, StoreEngine, Table};
use vecpeek_dump::{DumpEngine, OllamaEmbedder};

use crate::cli::{Command, OutputFormat, VecpeekArgs};
use crate::render::render_human;
use crate::server::{self, AppState};

/// Runs the parsed command.
pub fn execute_command(args: VecpeekArgs) -> anyhow::Result<()> {
    let engine = DumpEngine::new(OllamaEmbedder::new(&args.ollama_url, &args.embed_model));
    let policy = args.on_collision;

    match args.command {
        Command::Collections => {
            let peeker = open(&engine, args.path)?;
            for name in peeker.list_collections()? {
                println!("{}", name);
            }
        }
        Command::Show(show) => {
            let peeker = open(&engine, args.path)?;
            let table = peeker
                .collection_table(&show.collection, policy)
                .with_context(|| format!("cannot show collection '{}'", show.collection))?;
            print_table(&table, show.format)?;
        }
        Command::Query(query) => {
            let peeker = open(&engine, args.path)?;
            let table = peeker
                .query_table(&query.collection, &query.text, query.k, policy)
                .with_context(|| format!("cannot query collection '{}'", query.collection))?;
            print_table(&table, query.format)?;
        }
        Command::Serve(serve) => {
            let mut session = Session::new(engine);
            if let Some(path) = &args.path {
                // Start anyway; the store can be chosen later with PUT /store.
                if let Err(e) = session.point_at(path) {
                    tracing::warn!(%e, "initial store not opened");
                }
            }

            let runtime = tokio::runtime::Runtime::new().context("cannot start runtime")?;
            runtime.block_on(server::serve(serve.addr, AppState::new(session, policy)))?;
        }
    }

    Ok(())
}

fn open<E: StoreEngine>(engine: &E, path: Option<PathBuf>) -> anyhow::Result<Peeker<E::Store>> {
    let path = path.context("no persist path given; pass --path or set VECPEEK_PATH")?;
    Ok(Peeker::open(engine, &path)?)
}

fn print_table(table: &Table, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Human => print!("{}", render_human(table)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(table)?),
    }
    Ok(())
}
