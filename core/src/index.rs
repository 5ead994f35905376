use crate::tokenizer::tokenize;
use std::collections::{BTreeMap, BTreeSet};

/// Document identifier: a name (typically a filename) unique and stable for
/// the run. The index never holds document text, only terms derived from it.
pub type DocName = String;

/// Term to sorted posting list, boolean model: a document appears in a
/// term's posting list iff the term occurs in the document's normalized
/// term set. Term frequency is not tracked.
///
/// Built once per run and never mutated afterwards; no mutating method is
/// exposed, so a built index can be shared freely across threads.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    postings: BTreeMap<String, BTreeSet<DocName>>,
    universe: BTreeSet<DocName>,
}

impl InvertedIndex {
    /// Build the index from (document name, raw text) pairs. Each document's
    /// tokens collapse to a set of distinct terms before insertion. An empty
    /// corpus yields an empty index, a degenerate but valid state.
    pub fn build<'a, I>(docs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut postings: BTreeMap<String, BTreeSet<DocName>> = BTreeMap::new();
        let mut universe = BTreeSet::new();
        for (name, text) in docs {
            let terms: BTreeSet<String> = tokenize(text).into_iter().collect();
            for term in terms {
                postings.entry(term).or_default().insert(name.to_string());
            }
            universe.insert(name.to_string());
        }
        tracing::info!(num_docs = universe.len(), num_terms = postings.len(), "built inverted index");
        Self { postings, universe }
    }

    /// Posting list for a term. A term absent from every document has no
    /// entry; callers treat that as an empty posting list, not an error.
    pub fn postings(&self, term: &str) -> Option<&BTreeSet<DocName>> {
        self.postings.get(term)
    }

    /// All distinct indexed terms, in sorted order. Derived view over the
    /// index, never stored separately.
    pub fn dictionary(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    /// Every document name seen at build time, the universe that NOT
    /// complements against.
    pub fn universe(&self) -> &BTreeSet<DocName> {
        &self.universe
    }

    pub fn num_docs(&self) -> usize { self.universe.len() }

    pub fn num_terms(&self) -> usize { self.postings.len() }
}
