use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rubrica_core::{DocumentSnapshot, Reference, Section, ValidationLevel};
use rubrica_engine::{Validator, parse};

fn body() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-záéíóúñ]{1,12}",
            Just("[CITA:parafraseo:García:2020]".to_string()),
            Just("[CITA:foo:Bar]".to_string()),
            Just("[CITA:larga:López:2019:12]".to_string()),
        ],
        0..60,
    )
    .prop_map(|words| words.join(" "))
}

fn snapshot() -> impl Strategy<Value = DocumentSnapshot> {
    let sections = prop::collection::vec((body(), any::<bool>(), any::<bool>()), 0..6);
    let references = prop::collection::vec(
        (
            "[A-Z][a-z]{0,8}, [A-Z]\\.",
            prop_oneof![
                "(19|20)[0-9]{2}",
                Just("Sin fecha".to_string()),
                Just(String::new()),
            ],
            "[a-z ]{0,30}",
        ),
        0..6,
    );
    let title = "[a-z ]{0,80}";

    (sections, references, title).prop_map(|(sections, references, title)| {
        let mut snapshot = DocumentSnapshot::default();
        snapshot.general_info.insert("titulo".into(), title);
        snapshot.sections = sections
            .into_iter()
            .enumerate()
            .map(|(idx, (body, required, chapter))| {
                let mut section = Section::new(&format!("s{idx}"), "", &body);
                section.is_required = required;
                section.is_chapter_heading = chapter;
                section
            })
            .collect();
        snapshot.references = references
            .into_iter()
            .map(|(author, year, title)| Reference::new(&author, &year, &title))
            .collect();
        snapshot
    })
}

proptest! {
    #[test]
    fn percentage_stays_within_bounds(snapshot in snapshot()) {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let result = Validator::default().validate_at(&snapshot, ValidationLevel::Standard, at);

        prop_assert!((0.0..=100.0).contains(&result.percentage));
        prop_assert!(result.total_score <= result.max_score);
        prop_assert_eq!(
            result.percentage == 0.0,
            result.total_score == 0 || result.max_score == 0
        );
        for category in &result.categories {
            prop_assert!(category.score <= category.max_score, "{:?}", category.key);
        }
    }

    #[test]
    fn text_without_markers_has_no_citations(text in "[^\\[]{0,200}") {
        let sections = vec![Section::new("intro", "Introducción", &text)];
        prop_assert!(parse(&sections).is_empty());
    }

    #[test]
    fn validation_has_no_hidden_state(snapshot in snapshot()) {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let validator = Validator::default();
        let first = validator.validate_at(&snapshot, ValidationLevel::Basic, at);
        let second = validator.validate_at(&snapshot, ValidationLevel::Basic, at);
        prop_assert_eq!(first, second);
    }
}
