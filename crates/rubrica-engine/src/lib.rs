//! Rubrica Engine — citation parsing, rubric scoring, cross-references, reports.

pub mod citations;
pub mod coherence;
pub mod crossref;
pub mod references;
pub mod report;
pub mod rubric;
pub mod validator;

pub use citations::{parse, render_citation, render_citations};
pub use coherence::CoherenceAnalyzer;
pub use crossref::{find_orphans, unused_references};
pub use references::{ReferenceIndex, authors_match, format_bibliography, format_reference};
pub use report::{ReportBuilder, malformed_input_issue, malformed_input_report};
pub use rubric::{Evaluation, RubricEngine};
pub use validator::Validator;
