use once_cell::sync::Lazy;
use regex::Regex;
use rubrica_core::{CitationKind, CitationToken, Section};

static CITATION_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[CITA:[^\]]+\]").expect("valid citation marker regex"));

const MARKER_PREFIX: &str = "[CITA:";

/// Scan every section body, in document order, for `[CITA:...]` markers.
///
/// Total over arbitrary text: malformed markers come back as tokens with
/// `well_formed == false` and their reasons in `problems`.
pub fn parse(sections: &[Section]) -> Vec<CitationToken> {
    sections
        .iter()
        .flat_map(|section| parse_body(&section.id, &section.body))
        .collect()
}

pub fn parse_body(section_id: &str, body: &str) -> Vec<CitationToken> {
    CITATION_MARKER_RE
        .find_iter(body)
        .map(|marker| parse_marker(marker.as_str(), section_id))
        .collect()
}

/// Split one raw marker such as `[CITA:textual:García:2020:45]` into its fields.
pub fn parse_marker(raw: &str, section_id: &str) -> CitationToken {
    let inner = raw
        .strip_prefix(MARKER_PREFIX)
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(raw);
    let parts: Vec<&str> = inner.split(':').map(str::trim).collect();

    let kind = CitationKind::from_keyword(parts.first().copied().unwrap_or(""));
    let author = parts.get(1).copied().unwrap_or("").to_string();
    let year = parts.get(2).copied().unwrap_or("").to_string();
    let page = parts
        .get(3)
        .copied()
        .filter(|page| !page.is_empty())
        .map(str::to_string);

    let mut problems = Vec::new();
    if parts.len() < 3 {
        problems.push("Formato incompleto (se esperaba tipo:autor:año)".to_string());
    } else {
        if !kind.is_known() {
            problems.push(format!("Tipo inválido: {}", kind.keyword()));
        }
        if author.is_empty() {
            problems.push("Sin autor".to_string());
        }
        if year.is_empty() {
            problems.push("Sin año".to_string());
        }
    }

    CitationToken {
        kind,
        author,
        year,
        page,
        section_id: section_id.to_string(),
        raw_text: raw.to_string(),
        well_formed: problems.is_empty(),
        problems,
    }
}

pub fn contains_marker(text: &str) -> bool {
    CITATION_MARKER_RE.is_match(text)
}

/// Replace every marker with the output of `render`.
pub(crate) fn replace_markers<F>(text: &str, mut render: F) -> String
where
    F: FnMut(&str) -> String,
{
    CITATION_MARKER_RE
        .replace_all(text, |caps: &regex::Captures<'_>| render(&caps[0]))
        .into_owned()
}
