use rubrica_core::{CategoryKey, CategoryResult, CitationRubric, CitationStats, CitationToken};

use super::references::proportional;

/// Score the in-text citations: `weight × well_formed / total`, plus a
/// minimum number of citations in the theoretical-framework section.
pub fn score_citations(
    tokens: &[CitationToken],
    rubric: &CitationRubric,
) -> (CategoryResult, CitationStats) {
    let mut category = CategoryResult::new(CategoryKey::Citations, rubric.weight);
    let mut stats = CitationStats {
        total: tokens.len(),
        ..CitationStats::default()
    };

    for token in tokens {
        *stats
            .by_kind
            .entry(token.kind.keyword().to_string())
            .or_default() += 1;
        *stats.by_section.entry(token.section_id.clone()).or_default() += 1;

        if token.well_formed {
            stats.well_formed += 1;
        } else {
            stats.malformed += 1;
            category.warning(
                format!(
                    "Cita inválida en {}: {} ({})",
                    token.section_id,
                    token.raw_text,
                    token.problems.join(", ")
                ),
                &token.section_id,
            );
        }
    }

    let in_theory = stats
        .by_section
        .get(&rubric.theory_section_id)
        .copied()
        .unwrap_or(0);
    if in_theory < rubric.min_citations_in_theory {
        category.warning(
            format!(
                "Marco teórico tiene pocas citas ({in_theory}/{} mínimas)",
                rubric.min_citations_in_theory
            ),
            &rubric.theory_section_id,
        );
    }

    category.score = proportional(rubric.weight, stats.well_formed, stats.total);
    (category, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citations::parse_marker;

    fn tokens(markers: &[(&str, &str)]) -> Vec<CitationToken> {
        markers
            .iter()
            .map(|(section, raw)| parse_marker(raw, section))
            .collect()
    }

    #[test]
    fn no_citations_scores_zero() {
        let (category, stats) = score_citations(&[], &CitationRubric::default());
        assert_eq!(category.score, 0);
        assert_eq!(stats.total, 0);
        assert!(category.issues[0].message.contains("0/2"));
    }

    #[test]
    fn malformed_citation_reduces_score_proportionally() {
        let tokens = tokens(&[
            ("marco_teorico", "[CITA:textual:García:2020:45]"),
            ("marco_teorico", "[CITA:parafraseo:López:2019]"),
            ("intro", "[CITA:foo:Bar]"),
        ]);
        let (category, stats) = score_citations(&tokens, &CitationRubric::default());
        assert_eq!(category.score, 10);
        assert_eq!(stats.well_formed, 2);
        assert_eq!(stats.malformed, 1);
        assert_eq!(category.issues.len(), 1);
        assert!(category.issues[0].message.contains("[CITA:foo:Bar]"));
        assert_eq!(category.issues[0].location, "intro");
    }

    #[test]
    fn counts_long_quotes_separately() {
        let tokens = tokens(&[
            ("marco_teorico", "[CITA:textual:García:2020]"),
            ("marco_teorico", "[CITA:larga:García:2020:12]"),
            ("discusion", "[CITA:larga:López:2019:3]"),
        ]);
        let (category, stats) = score_citations(&tokens, &CitationRubric::default());
        assert_eq!(category.score, 15);
        assert_eq!(stats.by_kind["textual"], 1);
        assert_eq!(stats.by_kind["larga"], 2);
        assert_eq!(stats.by_section["marco_teorico"], 2);
        assert!(category.issues.is_empty());
    }
}
