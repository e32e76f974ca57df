//! Conversion of sparse bag-of-words corpora into adjacency-list form, and
//! top-K word summaries for trained topic models.

pub mod bow;
pub mod corpus;
pub mod error;
pub mod files;
pub mod lines;
pub mod topics;

pub use bow::{convert, Adjacency, DocId, DocOrder, Document, RawTriple, WordId};
pub use corpus::{expand_words, Corpus, WordCount};
pub use error::{Error, Result};
pub use topics::{rank, RankSummary, Ranked, TopicRanking, Vocabulary, WeightRow, WordWeight};
