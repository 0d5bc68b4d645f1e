use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Informational figures gathered alongside the scores.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub sections: SectionStats,
    pub references: ReferenceStats,
    pub citations: CitationStats,
    pub cross_references: CrossReferenceStats,
    pub coherence: CoherenceAnalysis,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionStats {
    pub total_sections: usize,
    pub required_sections: usize,
    pub sections_with_content: usize,
    pub empty_sections: usize,
    pub total_words: usize,
    pub total_characters: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceStats {
    pub total: usize,
    pub valid: usize,
    pub by_kind: BTreeMap<String, usize>,
    pub by_year: BTreeMap<String, usize>,
    pub unique_authors: usize,
    /// Dated within the last five years of the validation timestamp.
    pub recent: usize,
    pub oldest_year: Option<i32>,
    pub newest_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationStats {
    pub total: usize,
    pub well_formed: usize,
    pub malformed: usize,
    pub by_kind: BTreeMap<String, usize>,
    pub by_section: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossReferenceStats {
    pub orphan_count: usize,
    /// Authors of references that no well-formed citation points to.
    pub unused_references: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatedWord {
    pub word: String,
    pub count: usize,
    pub percentage: f64,
}

/// Lexical statistics over the concatenated section bodies.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoherenceAnalysis {
    pub total_words: usize,
    pub unique_words: usize,
    /// Most frequent keywords, highest count first.
    pub top_words: Vec<WordFrequency>,
    pub over_repeated: Vec<RepeatedWord>,
    pub vocabulary_diversity: f64,
}

impl CoherenceAnalysis {
    pub fn is_empty(&self) -> bool {
        self.total_words == 0
    }
}
