//! Matching in-text citations against the bibliography.

use rubrica_core::{CitationToken, Issue, Reference};

use crate::references::{ReferenceIndex, authors_match};

/// One warning per well-formed citation whose author resolves to no reference.
///
/// A single reference may satisfy any number of citations. Malformed tokens
/// are skipped; they are already reported by the citation rubric.
pub fn find_orphans(tokens: &[CitationToken], index: &ReferenceIndex) -> Vec<Issue> {
    tokens
        .iter()
        .filter(|token| token.well_formed && !index.lookup(&token.author))
        .map(|token| {
            Issue::warning(
                format!(
                    "Cita sin referencia correspondiente: {} (autor '{}')",
                    token.raw_text, token.author
                ),
                &token.section_id,
            )
        })
        .collect()
}

/// Author strings of references no well-formed citation points to.
/// Informational only; never scored.
pub fn unused_references(tokens: &[CitationToken], references: &[Reference]) -> Vec<String> {
    let cited: Vec<&str> = tokens
        .iter()
        .filter(|token| token.well_formed)
        .map(|token| token.author.as_str())
        .collect();

    references
        .iter()
        .filter(|reference| !reference.author.trim().is_empty())
        .filter(|reference| {
            let surname = reference.surname();
            !cited.iter().any(|author| authors_match(author, surname))
        })
        .map(|reference| reference.author.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citations::parse_marker;

    fn refs() -> Vec<Reference> {
        vec![
            Reference::new("García, J.", "2020", "Redes"),
            Reference::new("López, M.", "2019", "Suelos"),
        ]
    }

    #[test]
    fn cited_author_with_reference_is_not_orphan() {
        let tokens = vec![parse_marker("[CITA:parafraseo:García:2020]", "intro")];
        let index = ReferenceIndex::build(&refs());
        assert!(find_orphans(&tokens, &index).is_empty());
    }

    #[test]
    fn missing_reference_is_reported_once_per_citation() {
        let tokens = vec![
            parse_marker("[CITA:parafraseo:Pérez:2018]", "intro"),
            parse_marker("[CITA:textual:García:2020:4]", "intro"),
            parse_marker("[CITA:web:Pérez:2018]", "marco_teorico"),
        ];
        let orphans = find_orphans(&tokens, &ReferenceIndex::build(&refs()));
        assert_eq!(orphans.len(), 2);
        assert_eq!(orphans[0].location, "intro");
        assert_eq!(orphans[1].location, "marco_teorico");
        assert!(orphans[0].message.contains("[CITA:parafraseo:Pérez:2018]"));
    }

    #[test]
    fn malformed_tokens_are_ignored() {
        let tokens = vec![parse_marker("[CITA:foo:Nadie]", "intro")];
        assert!(find_orphans(&tokens, &ReferenceIndex::default()).is_empty());
    }

    #[test]
    fn multiple_author_citation_resolves_through_substring() {
        let tokens = vec![parse_marker("[CITA:multiple:García y López:2020]", "intro")];
        assert!(find_orphans(&tokens, &ReferenceIndex::build(&refs())).is_empty());
        assert!(unused_references(&tokens, &refs()).is_empty());
    }

    #[test]
    fn lists_uncited_references() {
        let tokens = vec![parse_marker("[CITA:parafraseo:García:2020]", "intro")];
        assert_eq!(unused_references(&tokens, &refs()), vec!["López, M."]);
    }
}
