// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashSet;

/// Lexical-overlap relevance scorer.
///
/// Tokenizes the query once into a lowercase word set; `score` then weighs
/// the overlap with a result's title words (70%) and snippet words (30%).
/// Pure and order-independent: permuting words in either field never changes
/// the score, and an empty query always scores 0.
pub struct RelevanceScorer {
    query_words: HashSet<String>,
}

impl RelevanceScorer {
    pub fn new(query: &str) -> Self {
        Self {
            query_words: tokenize(query),
        }
    }

    /// Base score in [0, 1]. Per-source boosts are applied by the adapters
    /// on top of this value.
    pub fn score(&self, title: &str, snippet: &str) -> f64 {
        if self.query_words.is_empty() {
            return 0.0;
        }

        let title_words = tokenize(title);
        let snippet_words = tokenize(snippet);
        let query_len = self.query_words.len() as f64;

        let title_overlap = self.query_words.intersection(&title_words).count() as f64;
        let snippet_overlap = self.query_words.intersection(&snippet_words).count() as f64;

        (title_overlap / query_len) * 0.7 + (snippet_overlap / query_len) * 0.3
    }
}

fn tokenize(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|word| word.to_lowercase())
        .collect()
}
