use rubrica_core::{CategoryKey, CategoryResult, CoherenceAnalysis, CoherenceRubric};

/// Score lexical quality: the base weight, minus a penalty per over-repeated
/// keyword (at most half the weight), plus a bonus for a varied vocabulary.
/// The result is kept within `0..=weight`.
pub fn score_coherence(analysis: &CoherenceAnalysis, rubric: &CoherenceRubric) -> CategoryResult {
    const LOCATION: &str = "coherencia";
    let mut category = CategoryResult::new(CategoryKey::Coherence, rubric.weight);

    if analysis.is_empty() {
        category.warning("No hay suficiente contenido para analizar coherencia", LOCATION);
        return category;
    }

    let weight = i64::from(rubric.weight);
    let repeated = analysis.over_repeated.len() as i64;
    let penalty = (repeated * i64::from(rubric.repetition_penalty)).min(weight / 2);
    let bonus = if analysis.vocabulary_diversity > rubric.diversity_bonus_threshold {
        i64::from(rubric.diversity_bonus)
    } else {
        0
    };
    category.score = (weight - penalty + bonus).clamp(0, weight) as u32;

    for word in &analysis.over_repeated {
        category.warning(
            format!(
                "Palabra '{}' se repite excesivamente ({} veces, {:.1}%)",
                word.word, word.count, word.percentage
            ),
            LOCATION,
        );
    }
    if analysis.vocabulary_diversity < rubric.low_diversity_threshold {
        category.warning(
            "Vocabulario limitado, considera usar sinónimos y variedad de términos",
            LOCATION,
        );
    }

    category
}
