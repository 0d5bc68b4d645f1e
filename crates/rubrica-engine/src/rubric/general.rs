use rubrica_core::{CategoryKey, CategoryResult, DocumentSnapshot, FieldRule, GeneralInfoRubric};

/// Score the `generalInfo` fields (title, students, tutors, institution).
pub fn score_general_info(snapshot: &DocumentSnapshot, rubric: &GeneralInfoRubric) -> CategoryResult {
    let mut category = CategoryResult::new(CategoryKey::GeneralInfo, rubric.max_score());

    for criterion in &rubric.fields {
        let field = criterion.field.as_str();
        let value = snapshot.general(field);

        if value.is_empty() {
            if criterion.required {
                category.error(format!("Campo '{field}' es obligatorio"), field);
            }
            continue;
        }

        match criterion.rule {
            FieldRule::Presence => category.score = category.score.saturating_add(criterion.weight),
            FieldRule::WordRange {
                min_words,
                max_words,
            } => {
                let words = value.split_whitespace().count();
                if words < min_words {
                    category.error(
                        format!("Campo '{field}' muy corto (mínimo {min_words} palabras)"),
                        field,
                    );
                } else if words > max_words {
                    category.warning(
                        format!(
                            "Campo '{field}' muy largo (máximo {max_words} palabras recomendadas)"
                        ),
                        field,
                    );
                } else {
                    category.score = category.score.saturating_add(criterion.weight);
                }
            }
            FieldRule::NameList { min_chars } => {
                if value.chars().count() < min_chars {
                    category.error(
                        format!("Campo '{field}' muy corto (mínimo {min_chars} caracteres)"),
                        field,
                    );
                    continue;
                }
                category.score = category.score.saturating_add(criterion.weight);
                if has_incomplete_names(value) {
                    category.warning(
                        format!("Algunos nombres en '{field}' no tienen formato completo (Nombre Apellido)"),
                        field,
                    );
                }
            }
        }
    }

    category
}

/// Some entry of a comma separated list has fewer than two words.
fn has_incomplete_names(list: &str) -> bool {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .any(|name| name.split_whitespace().count() < 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubrica_core::{GeneralField, Severity};

    fn snapshot(pairs: &[(GeneralField, &str)]) -> DocumentSnapshot {
        let mut snapshot = DocumentSnapshot::default();
        for (field, value) in pairs {
            snapshot
                .general_info
                .insert(field.key().to_string(), value.to_string());
        }
        snapshot
    }

    #[test]
    fn complete_info_earns_full_score() {
        let snapshot = snapshot(&[
            (GeneralField::Title, "Impacto del riego por goteo en cultivos andinos"),
            (GeneralField::Students, "Ana Torres, Luis Quispe"),
            (GeneralField::Tutors, "María Fernández"),
            (GeneralField::Institution, "Universidad Nacional"),
        ]);
        let category = score_general_info(&snapshot, &GeneralInfoRubric::default());
        assert_eq!(category.score, 31);
        assert_eq!(category.max_score, 31);
        assert!(category.issues.is_empty());
    }

    #[test]
    fn missing_required_fields_are_errors() {
        let category = score_general_info(&DocumentSnapshot::default(), &GeneralInfoRubric::default());
        assert_eq!(category.score, 0);
        let errors: Vec<&str> = category
            .issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
            .map(|issue| issue.location.as_str())
            .collect();
        assert_eq!(errors, vec!["titulo", "estudiantes", "tutores"]);
    }

    #[test]
    fn title_word_bounds() {
        let rubric = GeneralInfoRubric::default();

        let short = score_general_info(&snapshot(&[(GeneralField::Title, "Dos palabras")]), &rubric);
        assert!(short.issues.iter().any(|i| i.location == "titulo" && i.is_error()));

        let long_title = vec!["palabra"; 21].join(" ");
        let long = score_general_info(&snapshot(&[(GeneralField::Title, long_title.as_str())]), &rubric);
        let issue = long.issues.iter().find(|i| i.location == "titulo").unwrap();
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(long.score, 0);

        let exact = vec!["palabra"; 20].join(" ");
        let ok = score_general_info(&snapshot(&[(GeneralField::Title, exact.as_str())]), &rubric);
        assert_eq!(ok.score, 10);
    }

    #[test]
    fn incomplete_names_only_warn() {
        let snapshot = snapshot(&[(GeneralField::Students, "Ana Torres, Quispe")]);
        let category = score_general_info(&snapshot, &GeneralInfoRubric::default());
        assert_eq!(category.score, 8);
        let issue = category
            .issues
            .iter()
            .find(|i| i.location == "estudiantes")
            .unwrap();
        assert_eq!(issue.severity, Severity::Warning);
    }

    #[test]
    fn short_name_list_is_an_error() {
        let snapshot = snapshot(&[(GeneralField::Tutors, "Ana")]);
        let category = score_general_info(&snapshot, &GeneralInfoRubric::default());
        assert!(category.issues.iter().any(|i| i.location == "tutores" && i.is_error()));
    }
}
