//! Weighted rubric: five categories, each with its own point budget.

pub mod citations;
pub mod coherence;
pub mod general;
pub mod references;
pub mod sections;

use rubrica_core::{
    CategoryResult, CitationStats, CitationToken, CoherenceAnalysis, DocumentSnapshot,
    RubricConfig, SectionStats,
};

use crate::citations::parse;
use crate::coherence::CoherenceAnalyzer;

pub use citations::score_citations;
pub use coherence::score_coherence;
pub use general::score_general_info;
pub use references::{reference_statistics, score_references};
pub use sections::score_sections;

/// Category results plus the statistics gathered while scoring them.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub categories: Vec<CategoryResult>,
    pub sections: SectionStats,
    pub citations: CitationStats,
}

#[derive(Debug, Clone, Copy)]
pub struct RubricEngine<'a> {
    config: &'a RubricConfig,
}

impl<'a> RubricEngine<'a> {
    pub fn new(config: &'a RubricConfig) -> Self {
        Self { config }
    }

    /// Score every category of `snapshot`, in rubric order.
    pub fn evaluate(&self, snapshot: &DocumentSnapshot) -> Vec<CategoryResult> {
        let tokens = parse(&snapshot.sections);
        let analysis = CoherenceAnalyzer::new(&self.config.coherence).analyze(&snapshot.sections);
        self.evaluate_parts(snapshot, &tokens, &analysis).categories
    }

    /// Score with citation tokens and coherence analysis computed by the caller.
    pub fn evaluate_parts(
        &self,
        snapshot: &DocumentSnapshot,
        tokens: &[CitationToken],
        analysis: &CoherenceAnalysis,
    ) -> Evaluation {
        let general = score_general_info(snapshot, &self.config.general_info);
        let (sections, section_stats) =
            score_sections(snapshot, &self.config.sections, &self.config.heuristics);
        let references = score_references(&snapshot.references, &self.config.references);
        let (citations, citation_stats) = score_citations(tokens, &self.config.citations);
        let coherence = score_coherence(analysis, &self.config.coherence);

        Evaluation {
            categories: vec![general, sections, references, citations, coherence],
            sections: section_stats,
            citations: citation_stats,
        }
    }
}
