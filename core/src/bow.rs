use crate::error::{Error, Result};
use crate::lines::{decode, raw_lines};
use std::collections::HashMap;
use std::fmt;
use std::io::{BufRead, Write};

pub type DocId = u64;
pub type WordId = u64;

/// Number of metadata lines (D, W, NNZ) at the top of a sparse triple file.
pub const DEFAULT_HEADER_LINES: usize = 3;

/// One `docID wordID count` entry of a sparse triple file. `doc_id` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTriple {
    pub doc_id: DocId,
    pub word_id: WordId,
    pub count: u64,
}

impl RawTriple {
    /// Parse a whitespace-separated triple, returning the failure reason on error.
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(format!("expected 3 fields, found {}", fields.len()));
        }
        let doc_id: DocId = fields[0]
            .parse()
            .map_err(|_| format!("document id {:?} is not an integer", fields[0]))?;
        if doc_id == 0 {
            return Err("document ids are 1-based, found 0".to_string());
        }
        let word_id: WordId = fields[1]
            .parse()
            .map_err(|_| format!("word id {:?} is not an integer", fields[1]))?;
        let count: u64 = fields[2]
            .parse()
            .map_err(|_| format!("count {:?} is not an integer", fields[2]))?;
        Ok(Self { doc_id, word_id, count })
    }

    /// Zero-based id used in the adjacency-list output.
    pub fn renumbered_id(&self) -> DocId {
        self.doc_id - 1
    }
}

/// A renumbered document with its `(wordId, count)` pairs in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocId,
    pub words: Vec<(WordId, u64)>,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        for (word_id, count) in &self.words {
            write!(f, " {word_id}:{count}")?;
        }
        Ok(())
    }
}

/// Order in which documents are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocOrder {
    /// Order of first appearance of each document in the input.
    #[default]
    FirstSeen,
    /// Ascending renumbered id.
    Sorted,
}

/// Documents grouped by renumbered id, kept in first-seen order.
#[derive(Debug, Default)]
pub struct Adjacency {
    docs: Vec<Document>,
    index: HashMap<DocId, usize>,
    triples: usize,
}

impl Adjacency {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, triple: RawTriple) {
        let id = triple.renumbered_id();
        let slot = match self.index.get(&id) {
            Some(&slot) => slot,
            None => {
                self.docs.push(Document { id, words: Vec::new() });
                self.index.insert(id, self.docs.len() - 1);
                self.docs.len() - 1
            }
        };
        self.docs[slot].words.push((triple.word_id, triple.count));
        self.triples += 1;
    }

    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.index.get(&id).map(|&slot| &self.docs[slot])
    }

    pub fn documents(&self) -> &[Document] { &self.docs }

    pub fn len(&self) -> usize { self.docs.len() }

    pub fn is_empty(&self) -> bool { self.docs.is_empty() }

    /// Number of triples consumed.
    pub fn triples(&self) -> usize { self.triples }

    pub fn ordered(&self, order: DocOrder) -> Vec<&Document> {
        let mut refs: Vec<&Document> = self.docs.iter().collect();
        if order == DocOrder::Sorted {
            refs.sort_by_key(|d| d.id);
        }
        refs
    }

    /// Write one line per document. `target` names the sink in error messages.
    pub fn write_to<W: Write>(&self, out: &mut W, order: DocOrder, target: &str) -> Result<()> {
        for doc in self.ordered(order) {
            writeln!(out, "{doc}").map_err(|e| Error::io(target, e))?;
        }
        out.flush().map_err(|e| Error::io(target, e))?;
        Ok(())
    }
}

/// Group a sparse triple stream into per-document adjacency lists.
///
/// The first `header_lines` lines are skipped whatever their content. Every
/// later line, blank ones included, must hold exactly three integers, with a
/// 1-based document id.
pub fn convert<R: BufRead>(reader: R, source_name: &str, header_lines: usize) -> Result<Adjacency> {
    let mut adjacency = Adjacency::new();
    for item in raw_lines(reader, source_name) {
        let (line_no, bytes) = item?;
        if line_no <= header_lines {
            continue;
        }
        let line = decode(bytes, source_name, line_no)?;
        let triple = RawTriple::parse(&line)
            .map_err(|reason| Error::parse(source_name, line_no, &line, reason))?;
        adjacency.push(triple);
    }
    if adjacency.is_empty() {
        tracing::warn!(source = source_name, header_lines, "no triples after the header");
    }
    tracing::info!(documents = adjacency.len(), triples = adjacency.triples(), source = source_name, "grouped triples");
    Ok(adjacency)
}
