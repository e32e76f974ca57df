use crate::bow::{convert, Adjacency, DocOrder};
use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::topics::{rank, Ranked, Vocabulary};
use std::fs::{create_dir_all, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

fn name(path: &Path) -> String {
    path.display().to_string()
}

pub fn open(path: &Path) -> Result<BufReader<File>> {
    let f = File::open(path).map_err(|e| Error::io(name(path), e))?;
    Ok(BufReader::new(f))
}

/// Create `path`, making missing parent directories.
pub fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        create_dir_all(dir).map_err(|e| Error::io(name(dir), e))?;
    }
    let f = File::create(path).map_err(|e| Error::io(name(path), e))?;
    Ok(BufWriter::new(f))
}

/// Convert a sparse triple file into an adjacency-list file.
pub fn convert_file(data: &Path, output: &Path, header_lines: usize, order: DocOrder) -> Result<Adjacency> {
    let adjacency = convert(open(data)?, &name(data), header_lines)?;
    let mut out = create(output)?;
    adjacency.write_to(&mut out, order, &name(output))?;
    tracing::info!(output = %output.display(), documents = adjacency.len(), "wrote adjacency list");
    Ok(adjacency)
}

pub fn load_vocabulary(path: &Path) -> Result<Vocabulary> {
    Vocabulary::load(open(path)?, &name(path))
}

pub fn rank_file(vocab: &Vocabulary, model: &Path, top_k: usize) -> Result<Ranked> {
    rank(vocab, open(model)?, &name(model), top_k)
}

pub fn load_corpus(path: &Path) -> Result<Corpus> {
    Corpus::load(open(path)?, &name(path))
}
