use crate::bow::{DocId, WordId};
use crate::error::{Error, Result};
use crate::lines::{decode, raw_lines};
use std::collections::HashMap;
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordCount {
    pub word_id: WordId,
    pub count: u64,
}

/// A training corpus read back from adjacency-list lines
/// (`docID wordID:count wordID:count ...`).
#[derive(Debug, Default)]
pub struct Corpus {
    pub doc_num: usize,
    /// Largest word id seen plus one.
    pub vocab_size: u64,
    pub docs: HashMap<DocId, Vec<WordCount>>,
}

impl Corpus {
    /// Lines with no word pairs and pairs without exactly one `:` are logged
    /// and skipped; ids and counts that are not integers are errors.
    pub fn load<R: BufRead>(reader: R, source_name: &str) -> Result<Self> {
        let mut corpus = Corpus::default();
        let mut max_word: Option<WordId> = None;
        for item in raw_lines(reader, source_name) {
            let (line_no, bytes) = item?;
            let line = decode(bytes, source_name, line_no)?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 2 {
                tracing::warn!(line = line_no, content = %line, "bad document, skipped");
                continue;
            }
            let doc_id: DocId = fields[0].parse().map_err(|_| {
                Error::parse(source_name, line_no, &line, format!("document id {:?} is not an integer", fields[0]))
            })?;
            corpus.doc_num += 1;

            let words = corpus.docs.entry(doc_id).or_default();
            for pair in &fields[1..] {
                let parts: Vec<&str> = pair.split(':').collect();
                if parts.len() != 2 {
                    tracing::warn!(line = line_no, pair = %pair, "bad word count, skipped");
                    continue;
                }
                let word_id: WordId = parts[0].parse().map_err(|_| {
                    Error::parse(source_name, line_no, &line, format!("word id {:?} is not an integer", parts[0]))
                })?;
                let count: u64 = parts[1].parse().map_err(|_| {
                    Error::parse(source_name, line_no, &line, format!("count {:?} is not an integer", parts[1]))
                })?;
                words.push(WordCount { word_id, count });
                max_word = Some(max_word.map_or(word_id, |m| m.max(word_id)));
            }
        }
        corpus.vocab_size = max_word.map_or(0, |m| m + 1);
        tracing::info!(documents = corpus.doc_num, vocab_size = corpus.vocab_size, source = source_name, "loaded corpus");
        Ok(corpus)
    }

    pub fn document(&self, id: DocId) -> Option<&[WordCount]> {
        self.docs.get(&id).map(Vec::as_slice)
    }
}

/// Expand word counts into a flat token list, repeating each word `count` times.
pub fn expand_words(words: &[WordCount]) -> Vec<WordId> {
    let mut out = Vec::new();
    for wc in words {
        for _ in 0..wc.count {
            out.push(wc.word_id);
        }
    }
    out
}
