use anyhow::Result;
use boolir_cli::{load_corpus, repl, run_query, write_report, write_summary};
use boolir_core::InvertedIndex;
use clap::Parser;
use std::io::{stdin, stdout};
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "boolir")]
#[command(about = "Boolean retrieval over a folder of text documents", long_about = None)]
struct Args {
    /// Folder of .txt documents to index
    #[arg(long, default_value = "./documents")]
    docs: String,
    /// Run a single query and exit instead of starting the interactive prompt
    #[arg(long)]
    query: Option<String>,
    /// Emit query output as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Number of dictionary and index entries shown after building
    #[arg(long, default_value_t = 20)]
    preview: usize,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    // Shared tokenizer tables are process-wide; force them up front so a
    // broken table fails at startup, not on the first query.
    boolir_core::tokenizer::init();

    let docs = load_corpus(Path::new(&args.docs))?;
    let index = InvertedIndex::build(docs.iter().map(|(n, t)| (n.as_str(), t.as_str())));

    let mut out = stdout();
    match args.query {
        Some(query) => {
            let report = run_query(&index, &query)?;
            write_report(&mut out, &report, args.json)?;
        }
        None => {
            write_summary(&mut out, &index, args.preview)?;
            println!("\nBoolean operators: AND, OR, NOT, parentheses. Type 'exit' to quit.");
            repl(&index, stdin().lock(), out, args.json)?;
        }
    }
    Ok(())
}
