use std::collections::HashSet;

use rubrica_core::{
    CategoryKey, CategoryResult, DocumentSnapshot, Section, SectionHeuristic, SectionRubric,
    SectionStats,
};

use crate::citations::contains_marker;
use crate::coherence::words;

/// Score every non-chapter section of the snapshot.
///
/// Each section is worth `weight_per_section`. Required sections need both
/// the minimum character and word counts; optional sections earn half the
/// weight once they reach `optional_min_words`.
pub fn score_sections(
    snapshot: &DocumentSnapshot,
    rubric: &SectionRubric,
    heuristics: &[SectionHeuristic],
) -> (CategoryResult, SectionStats) {
    let content_sections: Vec<&Section> = snapshot
        .sections
        .iter()
        .filter(|section| !section.is_chapter_heading)
        .collect();

    let counted = u32::try_from(content_sections.len()).unwrap_or(u32::MAX);
    let max_score = rubric.weight_per_section.saturating_mul(counted);
    let mut category = CategoryResult::new(CategoryKey::SectionContent, max_score);
    let mut stats = SectionStats {
        total_sections: content_sections.len(),
        ..SectionStats::default()
    };

    for section in content_sections {
        if section.is_required {
            stats.required_sections += 1;
        }

        let body = section.body.trim();
        let title = section.display_title();
        if body.is_empty() {
            stats.empty_sections += 1;
            if section.is_required {
                category.error(format!("Sección requerida '{title}' está vacía"), &section.id);
            } else {
                category.warning(format!("Sección '{title}' está vacía"), &section.id);
            }
            continue;
        }

        let characters = body.chars().count();
        let word_count = body.split_whitespace().count();
        stats.sections_with_content += 1;
        stats.total_characters += characters;
        stats.total_words += word_count;

        if section.is_required {
            if characters < rubric.min_characters {
                category.error(
                    format!(
                        "Sección '{title}' muy corta (mínimo {} caracteres)",
                        rubric.min_characters
                    ),
                    &section.id,
                );
            } else if word_count < rubric.min_words {
                category.error(
                    format!(
                        "Sección '{title}' muy corta (mínimo {} palabras)",
                        rubric.min_words
                    ),
                    &section.id,
                );
            } else {
                category.score = category.score.saturating_add(rubric.weight_per_section);
            }
        } else if word_count >= rubric.optional_min_words {
            category.score = category.score.saturating_add(rubric.weight_per_section / 2);
        } else {
            category.warning(format!("Sección '{title}' muy breve"), &section.id);
        }

        for heuristic in heuristics
            .iter()
            .filter(|heuristic| heuristic.section_id() == section.id)
        {
            if let Some(message) = check_heuristic(heuristic, body) {
                category.warning(message, &section.id);
            }
        }
    }

    (category, stats)
}

/// The heuristic's message when `body` fails it.
fn check_heuristic(heuristic: &SectionHeuristic, body: &str) -> Option<String> {
    let passed = match heuristic {
        SectionHeuristic::RequiredKeyword { keywords, .. } => {
            let present: HashSet<String> = words(body).into_iter().collect();
            keywords
                .iter()
                .any(|keyword| present.contains(&keyword.to_lowercase()))
        }
        SectionHeuristic::MinTermCount { terms, min, .. } => {
            let lowered = body.to_lowercase();
            let found = terms
                .iter()
                .filter(|term| lowered.contains(&term.to_lowercase()))
                .count();
            found >= *min
        }
        SectionHeuristic::RequiresCitation { .. } => contains_marker(body),
    };

    if passed {
        return None;
    }
    let message = match heuristic {
        SectionHeuristic::RequiredKeyword { message, .. }
        | SectionHeuristic::MinTermCount { message, .. }
        | SectionHeuristic::RequiresCitation { message, .. } => message,
    };
    Some(message.clone())
}
