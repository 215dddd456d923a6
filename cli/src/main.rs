use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use lexrank_cli::{corpus_stats, load_config, load_corpus, load_vocabulary, CliConfig, SearchReport};
use lexrank_core::{CancelToken, CorpusIndex, Strategy};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "lexrank")]
#[command(
    about = "Rank a text corpus against a query with BM25, TF-IDF or cosine similarity",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CorpusArgs {
    /// Input path (.json, .jsonl, .txt file or a directory of them)
    #[arg(long)]
    input: PathBuf,
    /// JSON file with `index` and `search` settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// File of whitespace-separated terms to use instead of the corpus vocabulary
    #[arg(long)]
    vocabulary: Option<PathBuf>,
    /// BM25 length normalization (0..=1)
    #[arg(long)]
    b: Option<f64>,
    /// BM25 term-frequency saturation
    #[arg(long)]
    k1: Option<f64>,
    /// Use the rayon pool for indexing and scoring
    #[arg(long, default_value_t = false)]
    parallel: bool,
    /// Print JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every document against a query and print the best matches
    Search {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Query text
        #[arg(long)]
        query: String,
        /// bm25, tfidf or cosine
        #[arg(long, default_value = "bm25")]
        strategy: Strategy,
        /// Number of results
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Print corpus statistics
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Number of most frequent terms to list
        #[arg(long, default_value_t = 10)]
        top_terms: usize,
    },
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { corpus, query, strategy, top_k } => {
            let (index, mut config) = build_index(&corpus)?;
            if let Some(k) = top_k {
                config.search.top_k = k;
            }
            config.search.parallel |= corpus.parallel;
            let entries = index.search_with(strategy, &query, &config.search, &CancelToken::new())?;
            let report = SearchReport::new(&index, &query, strategy, &entries);
            if corpus.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.to_table());
            }
        }
        Commands::Stats { corpus, top_terms } => {
            let (index, _) = build_index(&corpus)?;
            let stats = corpus_stats(&index, top_terms);
            if corpus.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("documents:      {}", stats.num_docs);
                println!("terms:          {}", stats.num_terms);
                println!("average length: {:.4}", stats.avg_length);
                println!();
                println!("df   | bm25 idf | tfidf idf | term");
                for t in &stats.top_terms {
                    println!(
                        "{:<4} | {:<8.4} | {:<9.4} | {}",
                        t.document_frequency, t.bm25_idf, t.smoothed_idf, t.term
                    );
                }
            }
        }
    }
    Ok(())
}

fn build_index(args: &CorpusArgs) -> Result<(CorpusIndex, CliConfig)> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => CliConfig::default(),
    };
    if let Some(b) = args.b {
        config.index.params.b = b;
    }
    if let Some(k) = args.k1 {
        config.index.params.k = k;
    }
    config.index.parallel |= args.parallel;

    let documents = load_corpus(&args.input)?;
    let vocabulary = args.vocabulary.as_deref().map(load_vocabulary).transpose()?;
    let cancel = CancelToken::new();
    let index = CorpusIndex::build_cancellable(documents, vocabulary, &config.index, &cancel)?;
    Ok((index, config))
}
