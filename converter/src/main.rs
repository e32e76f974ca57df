use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use topicfmt::bow::DEFAULT_HEADER_LINES;
use topicfmt::files::{convert_file, load_corpus};
use topicfmt::DocOrder;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "format_converter")]
#[command(about = "Convert UCI-style bag-of-words triples to adjacency-list training data", long_about = None)]
struct Cli {
    /// Data file with the original BOW format (D, W, NNZ header then `docID wordID count` lines)
    #[arg(long = "data_file")]
    data_file: PathBuf,
    /// Converted output file
    #[arg(long = "output_file")]
    output_file: PathBuf,
    /// Number of metadata lines to skip
    #[arg(long = "header_lines", default_value_t = DEFAULT_HEADER_LINES)]
    header_lines: usize,
    /// Document order in the output
    #[arg(long, value_enum, default_value_t = Order::FirstSeen)]
    order: Order,
    /// Re-read the written file and log its document and vocabulary counts
    #[arg(long, default_value_t = false)]
    verify: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Order {
    FirstSeen,
    Sorted,
}

impl From<Order> for DocOrder {
    fn from(o: Order) -> Self {
        match o {
            Order::FirstSeen => DocOrder::FirstSeen,
            Order::Sorted => DocOrder::Sorted,
        }
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    let adjacency = convert_file(&cli.data_file, &cli.output_file, cli.header_lines, cli.order.into())
        .with_context(|| format!("converting {}", cli.data_file.display()))?;

    if cli.verify {
        let corpus = load_corpus(&cli.output_file)
            .with_context(|| format!("verifying {}", cli.output_file.display()))?;
        anyhow::ensure!(
            corpus.doc_num == adjacency.len(),
            "verification failed: wrote {} documents but read back {}",
            adjacency.len(),
            corpus.doc_num
        );
        for doc in adjacency.documents() {
            let read_back = corpus.document(doc.id).map_or(0, |words| words.len());
            anyhow::ensure!(
                read_back == doc.words.len(),
                "verification failed: document {} has {} pairs but read back {}",
                doc.id,
                doc.words.len(),
                read_back
            );
        }
        tracing::info!(documents = corpus.doc_num, vocab_size = corpus.vocab_size, "verified output");
    }
    Ok(())
}
