use crate::error::{Error, Result};
use crate::lines::{decode, raw_lines};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::io::{BufRead, Write};

/// Default number of words reported per topic.
pub const DEFAULT_TOP_K: usize = 10;

/// Vocabulary listing; the word on line `n` has index `n` (1-based).
#[derive(Debug, Default, Clone)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { words: words.into_iter().map(Into::into).collect() }
    }

    /// Read one word per line, trimming trailing whitespace. Bytes that are
    /// not UTF-8 are replaced rather than rejected so indices stay aligned.
    pub fn load<R: BufRead>(reader: R, source_name: &str) -> Result<Self> {
        let mut words = Vec::new();
        for item in raw_lines(reader, source_name) {
            let (line_no, bytes) = item?;
            let word = String::from_utf8_lossy(&bytes);
            if matches!(word, Cow::Owned(_)) {
                tracing::warn!(line = line_no, word = %word, source = source_name, "vocabulary word is not UTF-8, replaced invalid bytes");
            }
            words.push(word.trim_end().to_string());
        }
        let vocab = Self { words };
        if vocab.is_empty() {
            tracing::warn!(source = source_name, "vocabulary is empty, every weight row will be dropped");
        }
        tracing::info!(words = vocab.len(), source = source_name, "loaded vocabulary");
        Ok(vocab)
    }

    pub fn get(&self, index: i64) -> Option<&str> {
        if index < 1 {
            return None;
        }
        self.words.get((index - 1) as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

/// One `vocabIndex,topicId,weight` row of a word-topic weight file.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightRow {
    pub vocab_index: i64,
    pub topic_id: String,
    pub weight: f64,
}

impl WeightRow {
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let fields: Vec<&str> = line.trim().split(',').collect();
        if fields.len() != 3 {
            return Err(format!("expected 3 comma-separated fields, found {}", fields.len()));
        }
        let vocab_index: i64 = fields[0]
            .trim()
            .parse()
            .map_err(|_| format!("vocabulary index {:?} is not an integer", fields[0]))?;
        let weight: f64 = fields[2]
            .trim()
            .parse()
            .map_err(|_| format!("weight {:?} is not a number", fields[2]))?;
        Ok(Self { vocab_index, topic_id: fields[1].to_string(), weight })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordWeight {
    pub word: String,
    pub weight: f64,
}

/// Highest-weighted words of a single topic, by descending weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicRanking {
    pub topic: String,
    pub words: Vec<WordWeight>,
}

impl fmt::Display for TopicRanking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.topic)?;
        for w in &self.words {
            write!(f, " {}:{}", w.word, w.weight)?;
        }
        Ok(())
    }
}

/// Row counts from one ranking run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankSummary {
    /// Data rows read, header excluded.
    pub rows: usize,
    /// Rows whose vocabulary index had no word.
    pub dropped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Ranked {
    pub topics: Vec<TopicRanking>,
    pub summary: RankSummary,
}

impl Ranked {
    pub fn get(&self, topic: &str) -> Option<&TopicRanking> {
        self.topics.iter().find(|t| t.topic == topic)
    }

    /// Reorder topics lexicographically by id.
    pub fn sort_topics(&mut self) {
        self.topics.sort_by(|a, b| a.topic.cmp(&b.topic));
    }

    pub fn write_text<W: Write>(&self, out: &mut W, target: &str) -> Result<()> {
        for topic in &self.topics {
            writeln!(out, "{topic}").map_err(|e| Error::io(target, e))?;
        }
        out.flush().map_err(|e| Error::io(target, e))
    }

    pub fn write_json<W: Write>(&self, out: &mut W, target: &str) -> Result<()> {
        // plain structs of strings and floats: only the writer can fail
        serde_json::to_writer_pretty(&mut *out, &self.topics)
            .map_err(|e| Error::io(target, e.into()))?;
        writeln!(out).map_err(|e| Error::io(target, e))?;
        out.flush().map_err(|e| Error::io(target, e))
    }
}

/// Per-topic word weights accumulated in input order.
#[derive(Debug, Default)]
struct TopicTable {
    topics: Vec<(String, Vec<WordWeight>)>,
    index: HashMap<String, usize>,
}

impl TopicTable {
    fn push(&mut self, topic_id: String, entry: WordWeight) {
        let slot = match self.index.get(&topic_id) {
            Some(&slot) => slot,
            None => {
                self.index.insert(topic_id.clone(), self.topics.len());
                self.topics.push((topic_id, Vec::new()));
                self.topics.len() - 1
            }
        };
        self.topics[slot].1.push(entry);
    }

    fn finish(self, top_k: usize) -> Vec<TopicRanking> {
        self.topics
            .into_iter()
            .map(|(topic, mut words)| {
                // stable: equal weights keep row order
                words.sort_by(|a, b| b.weight.total_cmp(&a.weight));
                words.truncate(top_k);
                TopicRanking { topic, words }
            })
            .collect()
    }
}

/// Join a weight file against `vocab` and keep the `top_k` heaviest words per topic.
///
/// The first line of `weights` is a header and is skipped. Rows whose index is
/// not in the vocabulary are dropped and counted in [`RankSummary::dropped`].
/// Topics are returned in first-seen order.
pub fn rank<R: BufRead>(vocab: &Vocabulary, weights: R, source_name: &str, top_k: usize) -> Result<Ranked> {
    let mut table = TopicTable::default();
    let mut summary = RankSummary::default();
    for item in raw_lines(weights, source_name) {
        let (line_no, bytes) = item?;
        if line_no == 1 {
            continue;
        }
        let line = decode(bytes, source_name, line_no)?;
        let row = WeightRow::parse(&line)
            .map_err(|reason| Error::parse(source_name, line_no, &line, reason))?;
        summary.rows += 1;
        match vocab.get(row.vocab_index) {
            Some(word) => table.push(row.topic_id, WordWeight { word: word.to_string(), weight: row.weight }),
            None => {
                tracing::debug!(line = line_no, index = row.vocab_index, "vocabulary index not found, row dropped");
                summary.dropped += 1;
            }
        }
    }
    let topics = table.finish(top_k);
    tracing::info!(topics = topics.len(), rows = summary.rows, dropped = summary.dropped, top_k, "ranked topic words");
    Ok(Ranked { topics, summary })
}
