use chrono::{DateTime, Datelike, Utc};
use rubrica_core::{
    CrossReferenceStats, DocumentSnapshot, Result, RubricConfig, Statistics, ValidationLevel,
    ValidationResult,
};

use crate::citations::parse;
use crate::coherence::CoherenceAnalyzer;
use crate::crossref::{find_orphans, unused_references};
use crate::references::ReferenceIndex;
use crate::report::ReportBuilder;
use crate::rubric::{RubricEngine, reference_statistics};

/// Entry point: one snapshot in, one report out.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: RubricConfig,
}

impl Validator {
    pub fn new(config: RubricConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RubricConfig {
        &self.config
    }

    /// Validate, stamping the report with the current time.
    pub fn validate(&self, snapshot: &DocumentSnapshot, level: ValidationLevel) -> ValidationResult {
        self.validate_at(snapshot, level, Utc::now())
    }

    /// Deterministic for a fixed `created_at`.
    pub fn validate_at(
        &self,
        snapshot: &DocumentSnapshot,
        level: ValidationLevel,
        created_at: DateTime<Utc>,
    ) -> ValidationResult {
        let tokens = parse(&snapshot.sections);
        let index = ReferenceIndex::build(&snapshot.references);
        let analysis = CoherenceAnalyzer::new(&self.config.coherence).analyze(&snapshot.sections);

        let evaluation = RubricEngine::new(&self.config).evaluate_parts(snapshot, &tokens, &analysis);
        let orphans = find_orphans(&tokens, &index);

        let statistics = Statistics {
            sections: evaluation.sections,
            references: reference_statistics(
                &snapshot.references,
                created_at.year(),
                &self.config.references,
            ),
            citations: evaluation.citations,
            cross_references: CrossReferenceStats {
                orphan_count: 0,
                unused_references: unused_references(&tokens, &snapshot.references),
            },
            ..Statistics::default()
        };

        ReportBuilder::new(level, &self.config.levels, created_at)
            .statistics(statistics)
            .build(evaluation.categories, orphans, analysis)
    }

    /// Parse `json` as a snapshot and validate it. Fails only on malformed
    /// input structure.
    pub fn validate_json(&self, json: &str, level: ValidationLevel) -> Result<ValidationResult> {
        let snapshot = DocumentSnapshot::from_json_str(json)?;
        Ok(self.validate(&snapshot, level))
    }
}
