//! In-memory keyword search engine
//!
//! Scores each document by the share of distinct query terms it contains.
//! Terms are lowercase alphanumeric runs, so `"Apple, pie!"` matches
//! `apple` and `pie`.

use std::collections::HashSet;

use async_trait::async_trait;
use toolweave_application::{SearchEngine, SearchError, SearchHit};
use tracing::debug;

#[derive(Debug, Clone)]
struct Document {
    id: String,
    text: String,
    terms: HashSet<String>,
}

/// Keyword search over documents held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySearchEngine {
    documents: Vec<Document>,
}

impl InMemorySearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, replacing any existing one with the same id
    pub fn add_document(&mut self, id: impl Into<String>, text: impl Into<String>) {
        let id = id.into();
        let text = text.into();
        let document = Document {
            terms: terms(&text).collect(),
            id,
            text,
        };

        match self.documents.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => *existing = document,
            None => self.documents.push(document),
        }
    }

    pub fn with_document(mut self, id: impl Into<String>, text: impl Into<String>) -> Self {
        self.add_document(id, text);
        self
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

#[async_trait]
impl SearchEngine for InMemorySearchEngine {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError> {
        let query_terms: HashSet<String> = terms(query).collect();
        if query_terms.is_empty() {
            return Err(SearchError::InvalidQuery(format!(
                "'{}' contains no searchable terms",
                query
            )));
        }

        let mut hits: Vec<SearchHit> = self
            .documents
            .iter()
            .filter_map(|doc| {
                let matched = query_terms.intersection(&doc.terms).count();
                (matched > 0).then(|| {
                    SearchHit::new(
                        doc.id.clone(),
                        doc.text.clone(),
                        matched as f64 / query_terms.len() as f64,
                    )
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        hits.truncate(limit);

        debug!(query = %query, hits = hits.len(), "Search finished");
        Ok(hits)
    }
}
