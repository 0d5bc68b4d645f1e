//! Rubrica Core — document snapshot model, rubric configuration, errors.

pub mod bibtex;
pub mod config;
pub mod error;
pub mod models;

pub use bibtex::{load_bibtex, parse_bibtex};
pub use config::{
    CitationRubric, CoherenceRubric, FieldCriterion, FieldRule, GeneralInfoRubric,
    LevelThresholds, ReferenceRubric, RubricConfig, SectionHeuristic, SectionRubric,
    ValidationLevel,
};
pub use error::{ExitCode, Result, RubricaError};
pub use models::*;
