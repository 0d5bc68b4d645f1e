use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RubricaError};
use crate::models::GeneralField;

/// Weighted rubric used to score a document, loadable from `rubric.json` or
/// `rubric.toml`. Every table is optional in the file; missing values keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RubricConfig {
    pub general_info: GeneralInfoRubric,
    pub sections: SectionRubric,
    pub references: ReferenceRubric,
    pub citations: CitationRubric,
    pub coherence: CoherenceRubric,
    pub levels: LevelThresholds,
    pub heuristics: Vec<SectionHeuristic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralInfoRubric {
    pub fields: Vec<FieldCriterion>,
}

/// One scored `generalInfo` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCriterion {
    pub field: String,
    #[serde(default)]
    pub required: bool,
    pub weight: u32,
    #[serde(default)]
    pub rule: FieldRule,
}

/// How a present, non-empty field value is judged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldRule {
    /// Any non-empty value earns the weight.
    #[default]
    Presence,
    /// Word count must fall in `min_words..=max_words`.
    WordRange { min_words: usize, max_words: usize },
    /// Comma separated "Nombre Apellido" list of at least `min_chars` characters.
    NameList { min_chars: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionRubric {
    pub min_characters: usize,
    pub min_words: usize,
    pub weight_per_section: u32,
    /// Optional sections need this many words to earn half the weight.
    pub optional_min_words: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceRubric {
    pub min_references: usize,
    pub weight: u32,
    pub recent_years: i32,
    pub duplicate_title_similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CitationRubric {
    pub weight: u32,
    pub theory_section_id: String,
    pub min_citations_in_theory: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoherenceRubric {
    pub weight: u32,
    /// Share of all words a single keyword may reach before it counts as over-repeated.
    pub repetition_threshold: f64,
    /// Keywords seen this many times or fewer are never over-repeated.
    pub min_repeat_count: usize,
    pub min_keyword_length: usize,
    pub repetition_penalty: u32,
    pub diversity_bonus: u32,
    pub diversity_bonus_threshold: f64,
    pub low_diversity_threshold: f64,
    pub top_words: usize,
    pub stop_words: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelThresholds {
    pub basic: f64,
    pub standard: f64,
    pub strict: f64,
}

/// Section-specific content checks. Each one only emits warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionHeuristic {
    /// At least one keyword must appear as a whole word.
    RequiredKeyword {
        section_id: String,
        keywords: Vec<String>,
        message: String,
    },
    /// At least `min` distinct terms must appear anywhere in the body.
    MinTermCount {
        section_id: String,
        terms: Vec<String>,
        min: usize,
        message: String,
    },
    /// The body must contain at least one `[CITA:...]` marker.
    RequiresCitation { section_id: String, message: String },
}

impl SectionHeuristic {
    pub fn section_id(&self) -> &str {
        match self {
            Self::RequiredKeyword { section_id, .. }
            | Self::MinTermCount { section_id, .. }
            | Self::RequiresCitation { section_id, .. } => section_id,
        }
    }
}

/// Largest weight a rubric file may assign to a single criterion or category.
pub const MAX_WEIGHT: u32 = 1_000;

// ─── Levels ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationLevel {
    Basic,
    #[default]
    Standard,
    Strict,
}

impl ValidationLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::Strict => "strict",
        }
    }

    pub fn threshold(self, levels: &LevelThresholds) -> f64 {
        match self {
            Self::Basic => levels.basic,
            Self::Standard => levels.standard,
            Self::Strict => levels.strict,
        }
    }
}

impl FromStr for ValidationLevel {
    type Err = RubricaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "basic" | "basico" | "básico" => Ok(Self::Basic),
            "standard" | "estandar" | "estándar" => Ok(Self::Standard),
            "strict" | "estricto" => Ok(Self::Strict),
            other => Err(RubricaError::InvalidLevel(other.to_string())),
        }
    }
}

impl fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Defaults ──────────────────────────────────────────────

const DEFAULT_STOP_WORDS: &[&str] = &[
    "el", "la", "de", "que", "y", "en", "un", "es", "se", "no", "te", "lo", "le", "da", "su",
    "por", "son", "con", "para", "al", "del", "los", "las", "una", "pero", "sus", "como", "esto",
    "esta", "está", "ser", "han", "más", "muy", "puede", "debe", "cada", "todo", "todos", "otras",
    "otros", "mismo", "también", "entre", "sobre", "desde", "hasta", "donde", "cuando", "cual",
    "cuales", "quien", "quienes",
];

const OBJECTIVE_VERBS: &[&str] = &[
    "analizar", "identificar", "determinar", "evaluar", "comparar", "describir", "explicar",
    "demostrar", "proponer", "desarrollar", "establecer", "verificar", "investigar", "examinar",
    "estudiar", "conocer", "comprender",
];

const METHODOLOGY_TERMS: &[&str] = &[
    "método", "técnica", "instrumento", "población", "muestra", "análisis",
];

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

impl Default for RubricConfig {
    fn default() -> Self {
        Self {
            general_info: GeneralInfoRubric::default(),
            sections: SectionRubric::default(),
            references: ReferenceRubric::default(),
            citations: CitationRubric::default(),
            coherence: CoherenceRubric::default(),
            levels: LevelThresholds::default(),
            heuristics: vec![
                SectionHeuristic::RequiredKeyword {
                    section_id: "objetivos".to_string(),
                    keywords: strings(OBJECTIVE_VERBS),
                    message: "Los objetivos deben usar verbos en infinitivo (analizar, identificar, etc.)"
                        .to_string(),
                },
                SectionHeuristic::RequiresCitation {
                    section_id: "marco_teorico".to_string(),
                    message: "Marco teórico debería incluir citas de fuentes".to_string(),
                },
                SectionHeuristic::MinTermCount {
                    section_id: "metodologia".to_string(),
                    terms: strings(METHODOLOGY_TERMS),
                    min: 2,
                    message: "Metodología podría incluir más términos técnicos específicos"
                        .to_string(),
                },
            ],
        }
    }
}

impl Default for GeneralInfoRubric {
    fn default() -> Self {
        Self {
            fields: vec![
                FieldCriterion {
                    field: GeneralField::Title.key().to_string(),
                    required: true,
                    weight: 10,
                    rule: FieldRule::WordRange {
                        min_words: 3,
                        max_words: 20,
                    },
                },
                FieldCriterion {
                    field: GeneralField::Students.key().to_string(),
                    required: true,
                    weight: 8,
                    rule: FieldRule::NameList { min_chars: 5 },
                },
                FieldCriterion {
                    field: GeneralField::Tutors.key().to_string(),
                    required: true,
                    weight: 8,
                    rule: FieldRule::NameList { min_chars: 5 },
                },
                FieldCriterion {
                    field: GeneralField::Institution.key().to_string(),
                    required: false,
                    weight: 5,
                    rule: FieldRule::Presence,
                },
            ],
        }
    }
}

impl GeneralInfoRubric {
    pub fn max_score(&self) -> u32 {
        self.fields
            .iter()
            .fold(0u32, |total, field| total.saturating_add(field.weight))
    }
}

impl Default for SectionRubric {
    fn default() -> Self {
        Self {
            min_characters: 100,
            min_words: 20,
            weight_per_section: 15,
            optional_min_words: 10,
        }
    }
}

impl Default for ReferenceRubric {
    fn default() -> Self {
        Self {
            min_references: 3,
            weight: 20,
            recent_years: 5,
            duplicate_title_similarity: 0.91,
        }
    }
}

impl Default for CitationRubric {
    fn default() -> Self {
        Self {
            weight: 15,
            theory_section_id: "marco_teorico".to_string(),
            min_citations_in_theory: 2,
        }
    }
}

impl Default for CoherenceRubric {
    fn default() -> Self {
        Self {
            weight: 10,
            repetition_threshold: 0.02,
            min_repeat_count: 3,
            min_keyword_length: 4,
            repetition_penalty: 2,
            diversity_bonus: 2,
            diversity_bonus_threshold: 0.30,
            low_diversity_threshold: 0.20,
            top_words: 10,
            stop_words: strings(DEFAULT_STOP_WORDS),
        }
    }
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            basic: 60.0,
            standard: 80.0,
            strict: 95.0,
        }
    }
}

// ─── Load / Save ───────────────────────────────────────────

impl RubricConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.check()?;
        Ok(config)
    }

    /// Load a rubric override. `.toml` files are read as TOML, anything else as JSON.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = if is_toml(path) {
            Self::from_toml_str(&contents)?
        } else {
            Self::from_json_str(&contents)?
        };
        tracing::debug!(path = %path.display(), "rubric loaded");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = if is_toml(path) {
            self.to_toml_string()?
        } else {
            serde_json::to_string_pretty(self)?
        };
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject values that would make scoring meaningless.
    pub fn check(&self) -> Result<()> {
        for (name, threshold) in [
            ("basic", self.levels.basic),
            ("standard", self.levels.standard),
            ("strict", self.levels.strict),
        ] {
            if !(0.0..=100.0).contains(&threshold) {
                return Err(RubricaError::Config(format!(
                    "level threshold '{name}' must be within 0..=100, got {threshold}"
                )));
            }
        }

        let repetition = self.coherence.repetition_threshold;
        if !(repetition > 0.0 && repetition <= 1.0) {
            return Err(RubricaError::Config(format!(
                "coherence.repetition_threshold must be within (0, 1], got {repetition}"
            )));
        }

        let similarity = self.references.duplicate_title_similarity;
        if !(0.0..=1.0).contains(&similarity) {
            return Err(RubricaError::Config(format!(
                "references.duplicate_title_similarity must be within 0..=1, got {similarity}"
            )));
        }

        let weights = self
            .general_info
            .fields
            .iter()
            .map(|criterion| (criterion.field.as_str(), criterion.weight))
            .chain([
                ("sections.weight_per_section", self.sections.weight_per_section),
                ("references.weight", self.references.weight),
                ("citations.weight", self.citations.weight),
                ("coherence.weight", self.coherence.weight),
            ]);
        for (name, weight) in weights {
            if weight > MAX_WEIGHT {
                return Err(RubricaError::Config(format!(
                    "weight '{name}' must be at most {MAX_WEIGHT}, got {weight}"
                )));
            }
        }

        for criterion in &self.general_info.fields {
            if criterion.field.trim().is_empty() {
                return Err(RubricaError::Config(
                    "general_info field criterion with an empty name".to_string(),
                ));
            }
            if let FieldRule::WordRange {
                min_words,
                max_words,
            } = criterion.rule
            {
                if min_words > max_words {
                    return Err(RubricaError::Config(format!(
                        "field '{}': min_words {min_words} exceeds max_words {max_words}",
                        criterion.field
                    )));
                }
            }
        }

        Ok(())
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_rubric_mirrors_source_weights() {
        let rubric = RubricConfig::default();
        assert_eq!(rubric.general_info.max_score(), 31);
        assert_eq!(rubric.sections.weight_per_section, 15);
        assert_eq!(rubric.references.weight, 20);
        assert_eq!(rubric.citations.weight, 15);
        assert_eq!(rubric.coherence.weight, 10);
        assert_eq!(rubric.heuristics.len(), 3);
        assert!(rubric.check().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let rubric =
            RubricConfig::from_json_str(r#"{"references": {"min_references": 5}}"#).unwrap();
        assert_eq!(rubric.references.min_references, 5);
        assert_eq!(rubric.references.weight, 20);
        assert_eq!(rubric.citations.theory_section_id, "marco_teorico");
    }

    #[test]
    fn heuristics_are_tagged_by_kind() {
        let json = r#"{"heuristics": [
            {"kind": "requires_citation", "section_id": "discusion", "message": "Cita algo"}
        ]}"#;
        let rubric = RubricConfig::from_json_str(json).unwrap();
        assert_eq!(rubric.heuristics.len(), 1);
        assert_eq!(rubric.heuristics[0].section_id(), "discusion");
    }

    #[test]
    fn unknown_heuristic_kind_is_rejected() {
        let json = r#"{"heuristics": [{"kind": "vibes", "section_id": "x"}]}"#;
        assert!(RubricConfig::from_json_str(json).is_err());
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let err = RubricConfig::from_json_str(r#"{"levels": {"strict": 120.0}}"#).unwrap_err();
        assert!(matches!(err, RubricaError::Config(_)));
    }

    #[test]
    fn oversized_weight_is_rejected() {
        let err = RubricConfig::from_json_str(r#"{"sections": {"weight_per_section": 4000000000}}"#)
            .unwrap_err();
        assert!(matches!(err, RubricaError::Config(ref msg) if msg.contains("weight_per_section")));
        assert!(
            RubricConfig::from_json_str(r#"{"coherence": {"weight": 1000}}"#).is_ok()
        );
    }

    #[test]
    fn max_score_saturates() {
        let mut rubric = GeneralInfoRubric::default();
        for criterion in &mut rubric.fields {
            criterion.weight = u32::MAX;
        }
        assert_eq!(rubric.max_score(), u32::MAX);
    }

    #[test]
    fn toml_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rubric.toml");

        let mut rubric = RubricConfig::default();
        rubric.levels.basic = 55.0;
        rubric.save_to(&path).unwrap();

        let loaded = RubricConfig::load_from(&path).unwrap();
        assert_eq!(loaded, rubric);
    }

    #[test]
    fn level_parsing_accepts_spanish_names() {
        assert_eq!("basico".parse::<ValidationLevel>().unwrap(), ValidationLevel::Basic);
        assert_eq!("STRICT".parse::<ValidationLevel>().unwrap(), ValidationLevel::Strict);
        assert!("lenient".parse::<ValidationLevel>().is_err());

        let levels = LevelThresholds::default();
        assert_eq!(ValidationLevel::Basic.threshold(&levels), 60.0);
        assert_eq!(ValidationLevel::default().threshold(&levels), 80.0);
    }
}
