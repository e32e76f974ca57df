use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use topicfmt::files::{load_vocabulary, rank_file};
use topicfmt::topics::DEFAULT_TOP_K;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "print_topics")]
#[command(about = "Print the top K words of each topic of a trained topic model", long_about = None)]
struct Cli {
    /// Word-topic distribution file (`vocabIndex,topicId,weight` rows after a header)
    #[arg(long = "model_file")]
    model_file: PathBuf,
    /// Vocabulary file, one word per line
    #[arg(long = "vocab_file")]
    vocab_file: PathBuf,
    /// Number of words per topic
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    topk: usize,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Emit topics sorted by id instead of in first-seen order
    #[arg(long = "sort_topics", default_value_t = false)]
    sort_topics: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    let vocab = load_vocabulary(&cli.vocab_file)
        .with_context(|| format!("loading vocabulary {}", cli.vocab_file.display()))?;
    let mut ranked = rank_file(&vocab, &cli.model_file, cli.topk)
        .with_context(|| format!("ranking {}", cli.model_file.display()))?;
    if cli.sort_topics {
        ranked.sort_topics();
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match cli.format {
        Format::Text => ranked.write_text(&mut out, "stdout")?,
        Format::Json => ranked.write_json(&mut out, "stdout")?,
    }
    Ok(())
}
