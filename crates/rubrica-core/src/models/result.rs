use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::issue::{Issue, Severity};
use super::stats::Statistics;
use crate::config::ValidationLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKey {
    GeneralInfo,
    SectionContent,
    References,
    Citations,
    Coherence,
    /// Structural problems with the input document itself. Never part of the
    /// rubric; only malformed-input reports carry it.
    Input,
}

impl CategoryKey {
    /// The scored categories, in rubric order.
    pub const ALL: [CategoryKey; 5] = [
        CategoryKey::GeneralInfo,
        CategoryKey::SectionContent,
        CategoryKey::References,
        CategoryKey::Citations,
        CategoryKey::Coherence,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::GeneralInfo => "Información General",
            Self::SectionContent => "Contenido de Secciones",
            Self::References => "Referencias Bibliográficas",
            Self::Citations => "Sistema de Citas",
            Self::Coherence => "Coherencia del Texto",
            Self::Input => "Documento de Entrada",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResult {
    pub key: CategoryKey,
    pub name: String,
    pub score: u32,
    pub max_score: u32,
    pub issues: Vec<Issue>,
}

impl CategoryResult {
    pub fn new(key: CategoryKey, max_score: u32) -> Self {
        Self {
            key,
            name: key.display_name().to_string(),
            score: 0,
            max_score,
            issues: Vec::new(),
        }
    }

    pub fn error(&mut self, message: impl Into<String>, location: impl Into<String>) {
        self.issues.push(Issue::error(message, location));
    }

    pub fn warning(&mut self, message: impl Into<String>, location: impl Into<String>) {
        self.issues.push(Issue::warning(message, location));
    }

    /// Share of the budget earned, 0.0 for an empty budget.
    pub fn ratio(&self) -> f64 {
        if self.max_score == 0 {
            0.0
        } else {
            f64::from(self.score) / f64::from(self.max_score)
        }
    }
}

/// Output of one validation run. Built once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub total_score: u32,
    pub max_score: u32,
    pub percentage: f64,
    pub passed: bool,
    pub level: ValidationLevel,
    pub threshold: f64,
    pub categories: Vec<CategoryResult>,
    pub recommendations: Vec<String>,
    pub statistics: Statistics,
    pub created_at: DateTime<Utc>,
}

impl ValidationResult {
    pub fn category(&self, key: CategoryKey) -> Option<&CategoryResult> {
        self.categories.iter().find(|category| category.key == key)
    }

    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.categories.iter().flat_map(|category| category.issues.iter())
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues().filter(|issue| issue.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues().filter(|issue| issue.severity == Severity::Warning)
    }
}
