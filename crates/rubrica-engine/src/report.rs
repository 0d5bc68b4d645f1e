//! Aggregating category results into the final report.

use chrono::{DateTime, Utc};
use rubrica_core::{
    CategoryKey, CategoryResult, CoherenceAnalysis, Issue, LevelThresholds, RubricaError,
    Statistics, ValidationLevel, ValidationResult,
};

/// Categories scoring under this share of their budget get targeted advice.
const ADVICE_RATIO: f64 = 0.8;

pub struct ReportBuilder {
    level: ValidationLevel,
    threshold: f64,
    created_at: DateTime<Utc>,
    statistics: Statistics,
}

impl ReportBuilder {
    pub fn new(level: ValidationLevel, levels: &LevelThresholds, created_at: DateTime<Utc>) -> Self {
        Self {
            level,
            threshold: level.threshold(levels),
            created_at,
            statistics: Statistics::default(),
        }
    }

    pub fn statistics(mut self, statistics: Statistics) -> Self {
        self.statistics = statistics;
        self
    }

    /// Orphan-citation warnings land in the citations category without
    /// touching its score.
    pub fn build(
        self,
        mut categories: Vec<CategoryResult>,
        orphans: Vec<Issue>,
        coherence: CoherenceAnalysis,
    ) -> ValidationResult {
        let mut statistics = self.statistics;
        statistics.cross_references.orphan_count = orphans.len();
        statistics.coherence = coherence;

        if let Some(citations) = categories
            .iter_mut()
            .find(|category| category.key == CategoryKey::Citations)
        {
            citations.issues.extend(orphans);
        }

        let total_score = categories
            .iter()
            .fold(0u32, |total, c| total.saturating_add(c.score));
        let max_score = categories
            .iter()
            .fold(0u32, |total, c| total.saturating_add(c.max_score));
        let percentage = percentage(total_score, max_score);
        let recommendations = recommendations(&categories, &statistics, percentage);

        ValidationResult {
            total_score,
            max_score,
            percentage,
            passed: percentage >= self.threshold,
            level: self.level,
            threshold: self.threshold,
            categories,
            recommendations,
            statistics,
            created_at: self.created_at,
        }
    }
}

/// `100 × total / max`, 0 for an empty rubric.
pub fn percentage(total: u32, max: u32) -> f64 {
    if max == 0 {
        0.0
    } else {
        f64::from(total) * 100.0 / f64::from(max)
    }
}

/// Advice in fixed order: outstanding errors, weak categories, overall tier.
pub fn recommendations(
    categories: &[CategoryResult],
    statistics: &Statistics,
    percentage: f64,
) -> Vec<String> {
    let mut advice = Vec::new();

    if categories.iter().flat_map(|c| &c.issues).any(Issue::is_error) {
        advice.push("Corrige primero todos los errores marcados".to_string());
    }

    for category in categories {
        if category.max_score == 0 || category.ratio() >= ADVICE_RATIO {
            continue;
        }
        advice.push(category_advice(category.key, statistics));
    }

    advice.push(tier_message(percentage).to_string());
    advice
}

fn category_advice(key: CategoryKey, statistics: &Statistics) -> String {
    match key {
        CategoryKey::GeneralInfo => {
            "Completa y mejora la información general del proyecto".to_string()
        }
        CategoryKey::SectionContent => match statistics.sections.empty_sections {
            0 => "Amplía el contenido de las secciones para cumplir la extensión mínima"
                .to_string(),
            1 => "Completa la sección vacía".to_string(),
            n => format!("Completa las {n} secciones vacías"),
        },
        CategoryKey::References => {
            "Agrega más referencias bibliográficas para fortalecer el marco teórico".to_string()
        }
        CategoryKey::Citations => {
            "Incluye más citas en el texto para respaldar tus afirmaciones".to_string()
        }
        CategoryKey::Coherence => {
            "Revisa la redacción: evita repeticiones y varía el vocabulario".to_string()
        }
        CategoryKey::Input => "Corrige la estructura del documento de entrada".to_string(),
    }
}

fn tier_message(percentage: f64) -> &'static str {
    if percentage < 50.0 {
        "El proyecto necesita trabajo significativo antes de presentación"
    } else if percentage < 70.0 {
        "El proyecto está en desarrollo, continúa mejorando las áreas marcadas"
    } else if percentage < 90.0 {
        "Buen progreso, refina los detalles para alcanzar excelencia"
    } else {
        "¡Excelente trabajo! El proyecto cumple con altos estándares de calidad"
    }
}

/// The single issue reported when the input cannot be read as a snapshot.
pub fn malformed_input_issue(error: &RubricaError) -> Issue {
    Issue::error(format!("Documento no válido: {error}"), "input")
}

/// Report for input that never reached the rubric: zero everywhere, one error.
pub fn malformed_input_report(
    error: &RubricaError,
    level: ValidationLevel,
    levels: &LevelThresholds,
    created_at: DateTime<Utc>,
) -> ValidationResult {
    let mut input = CategoryResult::new(CategoryKey::Input, 0);
    input.issues.push(malformed_input_issue(error));
    let threshold = level.threshold(levels);

    ValidationResult {
        total_score: 0,
        max_score: 0,
        percentage: 0.0,
        passed: false,
        level,
        threshold,
        categories: vec![input],
        recommendations: vec!["Corrige primero todos los errores marcados".to_string()],
        statistics: Statistics::default(),
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn category(key: CategoryKey, score: u32, max: u32) -> CategoryResult {
        let mut category = CategoryResult::new(key, max);
        category.score = score;
        category
    }

    fn full_marks() -> Vec<CategoryResult> {
        CategoryKey::ALL
            .iter()
            .map(|key| category(*key, 10, 10))
            .collect()
    }

    #[test]
    fn totals_and_threshold() {
        let mut categories = full_marks();
        categories[4].score = 0;
        let result = ReportBuilder::new(ValidationLevel::Standard, &LevelThresholds::default(), at())
            .build(categories, Vec::new(), CoherenceAnalysis::default());

        assert_eq!(result.total_score, 40);
        assert_eq!(result.max_score, 50);
        assert!((result.percentage - 80.0).abs() < f64::EPSILON);
        assert!(result.passed);
        assert_eq!(result.created_at, at());
    }

    #[test]
    fn strict_level_rejects_same_score() {
        let mut categories = full_marks();
        categories[4].score = 0;
        let result = ReportBuilder::new(ValidationLevel::Strict, &LevelThresholds::default(), at())
            .build(categories, Vec::new(), CoherenceAnalysis::default());
        assert!(!result.passed);
        assert!((result.threshold - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn huge_budgets_do_not_overflow() {
        let categories = CategoryKey::ALL
            .iter()
            .map(|key| category(*key, u32::MAX, u32::MAX))
            .collect();
        let result = ReportBuilder::new(ValidationLevel::Basic, &LevelThresholds::default(), at())
            .build(categories, Vec::new(), CoherenceAnalysis::default());
        assert_eq!(result.total_score, u32::MAX);
        assert_eq!(result.max_score, u32::MAX);
        assert!((result.percentage - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_rubric_scores_zero_percent() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 10), 50.0);
    }

    #[test]
    fn orphans_attach_to_citations_without_score_change() {
        let orphans = vec![Issue::warning("Cita sin referencia", "intro")];
        let result = ReportBuilder::new(ValidationLevel::Basic, &LevelThresholds::default(), at())
            .build(full_marks(), orphans, CoherenceAnalysis::default());

        let citations = result.category(CategoryKey::Citations).unwrap();
        assert_eq!(citations.issues.len(), 1);
        assert_eq!(citations.score, 10);
        assert_eq!(result.statistics.cross_references.orphan_count, 1);
    }

    #[test]
    fn recommendations_follow_fixed_order() {
        let mut categories = full_marks();
        categories[0].error("Campo 'titulo' es obligatorio", "titulo");
        categories[0].score = 0;
        categories[2].score = 5;
        let mut statistics = Statistics::default();
        statistics.sections.empty_sections = 2;
        categories[1].score = 0;

        let advice = recommendations(&categories, &statistics, 50.0);
        assert_eq!(
            advice,
            vec![
                "Corrige primero todos los errores marcados",
                "Completa y mejora la información general del proyecto",
                "Completa las 2 secciones vacías",
                "Agrega más referencias bibliográficas para fortalecer el marco teórico",
                "El proyecto está en desarrollo, continúa mejorando las áreas marcadas",
            ]
        );
    }

    #[test]
    fn tier_boundaries() {
        assert!(tier_message(49.9).starts_with("El proyecto necesita"));
        assert!(tier_message(50.0).starts_with("El proyecto está en desarrollo"));
        assert!(tier_message(89.9).starts_with("Buen progreso"));
        assert!(tier_message(90.0).starts_with("¡Excelente"));
    }

    #[test]
    fn malformed_input_has_exactly_one_error() {
        let error = RubricaError::InvalidSnapshot("missing field `sections`".into());
        let result = malformed_input_report(
            &error,
            ValidationLevel::Standard,
            &LevelThresholds::default(),
            at(),
        );
        assert_eq!(result.errors().count(), 1);
        assert_eq!(result.issues().count(), 1);
        assert!(!result.passed);
        assert_eq!(result.errors().next().unwrap().location, "input");
        assert_eq!(result.categories.len(), 1);
        assert_eq!(result.categories[0].key, CategoryKey::Input);
        assert_eq!(result.categories[0].name, "Documento de Entrada");
        assert!(result.category(CategoryKey::GeneralInfo).is_none());
    }
}
