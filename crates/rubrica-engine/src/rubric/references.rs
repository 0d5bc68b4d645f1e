use std::collections::BTreeSet;

use rubrica_core::{CategoryKey, CategoryResult, Reference, ReferenceRubric, ReferenceStats};

/// Score the bibliography.
///
/// Below `min_references` countable entries the category earns nothing.
/// Otherwise it earns `weight × valid / total`, rounded down.
pub fn score_references(references: &[Reference], rubric: &ReferenceRubric) -> CategoryResult {
    let mut category = CategoryResult::new(CategoryKey::References, rubric.weight);
    let total = references.len();
    let countable = references.iter().filter(|r| r.is_countable()).count();
    let valid = references.iter().filter(|r| r.is_complete()).count();

    if countable < rubric.min_references {
        category.error(
            format!(
                "Muy pocas referencias ({countable}/{} mínimas)",
                rubric.min_references
            ),
            "referencias",
        );
    } else if total > 0 {
        category.score = proportional(rubric.weight, valid, total);
    }

    for (idx, reference) in references.iter().enumerate() {
        let location = format!("referencia #{}", idx + 1);

        let missing = missing_fields(reference);
        if !missing.is_empty() {
            category.warning(
                format!("Referencia #{}: {}", idx + 1, missing.join(", ")),
                &location,
            );
        }

        if !reference.author.trim().is_empty() && !reference.has_apa_author_format() {
            category.warning(
                format!(
                    "Referencia #{}: autor '{}' no sigue el formato APA (Apellido, N.)",
                    idx + 1,
                    reference.author.trim()
                ),
                &location,
            );
        }

        if !reference.year.trim().is_empty() && !reference.has_valid_year_format() {
            category.warning(
                format!(
                    "Referencia #{}: año '{}' con formato inválido (use AAAA o 'Sin fecha')",
                    idx + 1,
                    reference.year.trim()
                ),
                &location,
            );
        }
    }

    for (duplicate, original, exact) in find_duplicates(references, rubric.duplicate_title_similarity) {
        let message = if exact {
            format!("Referencia #{} duplica a la referencia #{}", duplicate + 1, original + 1)
        } else {
            format!(
                "Referencia #{} parece duplicar a la referencia #{} (títulos casi idénticos)",
                duplicate + 1,
                original + 1
            )
        };
        category.warning(message, format!("referencia #{}", duplicate + 1));
    }

    category
}

/// Figures about the bibliography, relative to `as_of_year`.
pub fn reference_statistics(
    references: &[Reference],
    as_of_year: i32,
    rubric: &ReferenceRubric,
) -> ReferenceStats {
    let mut stats = ReferenceStats {
        total: references.len(),
        valid: references.iter().filter(|r| r.is_complete()).count(),
        ..ReferenceStats::default()
    };
    let mut authors = BTreeSet::new();

    for reference in references {
        *stats
            .by_kind
            .entry(reference.source_kind.label().to_string())
            .or_default() += 1;

        let author = reference.author.trim();
        if !author.is_empty() {
            authors.insert(author.to_lowercase());
        }

        if let Some(year) = reference.numeric_year() {
            *stats.by_year.entry(year.to_string()).or_default() += 1;
            if year >= as_of_year - rubric.recent_years {
                stats.recent += 1;
            }
            stats.oldest_year = Some(stats.oldest_year.map_or(year, |oldest| oldest.min(year)));
            stats.newest_year = Some(stats.newest_year.map_or(year, |newest| newest.max(year)));
        }
    }

    stats.unique_authors = authors.len();
    stats
}

pub(crate) fn proportional(weight: u32, part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (u64::from(weight) * part as u64 / whole as u64) as u32
}

fn missing_fields(reference: &Reference) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if reference.author.trim().is_empty() {
        missing.push("Sin autor");
    }
    if reference.year.trim().is_empty() {
        missing.push("Sin año");
    }
    if reference.title.trim().is_empty() {
        missing.push("Sin título");
    }
    missing
}

/// `(duplicate, original, exact)` index triples; each entry is reported
/// against the first earlier entry it repeats.
fn find_duplicates(references: &[Reference], threshold: f64) -> Vec<(usize, usize, bool)> {
    let normalized: Vec<(String, String, String)> = references
        .iter()
        .map(|r| {
            (
                r.author.trim().to_lowercase(),
                r.year.trim().to_string(),
                normalize_title(&r.title),
            )
        })
        .collect();

    let mut duplicates = Vec::new();
    for j in 1..normalized.len() {
        let (author_j, year_j, title_j) = &normalized[j];
        if title_j.is_empty() {
            continue;
        }
        for i in 0..j {
            let (author_i, year_i, title_i) = &normalized[i];
            if title_i.is_empty() || year_i != year_j {
                continue;
            }
            if author_i == author_j && title_i == title_j {
                duplicates.push((j, i, true));
                break;
            }
            if similar_titles(title_i, title_j, threshold) {
                duplicates.push((j, i, false));
                break;
            }
        }
    }
    duplicates
}

fn normalize_title(title: &str) -> String {
    let lowercase = title.to_lowercase();
    let cleaned: String = lowercase
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn similar_titles(a: &str, b: &str, threshold: f64) -> bool {
    if a == b {
        return true;
    }
    if a.len() < 5 || b.len() < 5 {
        return false;
    }
    strsim::normalized_levenshtein(a, b) >= threshold
}
