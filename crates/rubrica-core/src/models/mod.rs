pub mod citation;
pub mod issue;
pub mod reference;
pub mod result;
pub mod snapshot;
pub mod stats;

pub use citation::{CitationKind, CitationToken};
pub use issue::{Issue, Severity};
pub use reference::{Reference, SourceKind, YEAR_UNKNOWN};
pub use result::{CategoryKey, CategoryResult, ValidationResult};
pub use snapshot::{DocumentSnapshot, GeneralField, Section};
pub use stats::{
    CitationStats, CoherenceAnalysis, CrossReferenceStats, ReferenceStats, RepeatedWord,
    SectionStats, Statistics, WordFrequency,
};
