use rubrica_core::{CitationKind, CitationToken};

use super::parser::{parse_marker, replace_markers};

/// APA in-text form of a citation. Malformed tokens render as their raw text.
pub fn render_citation(token: &CitationToken) -> String {
    if !token.well_formed {
        return token.raw_text.clone();
    }

    let author = token.author.as_str();
    let year = token.year.as_str();
    match &token.kind {
        CitationKind::Textual => match &token.page {
            Some(page) => format!("({author}, {year}, p. {page})"),
            None => format!("({author}, {year})"),
        },
        CitationKind::LongQuote => {
            let page = token
                .page
                .as_ref()
                .map(|page| format!(", p. {page}"))
                .unwrap_or_default();
            format!("\n\n\t({author}, {year}{page})\n\n")
        }
        CitationKind::Multiple => {
            let authors: Vec<&str> = author.split(" y ").map(str::trim).collect();
            match authors.as_slice() {
                [first, second] => format!("({first} y {second}, {year})"),
                [first, _, _, ..] => format!("({first} et al., {year})"),
                _ => format!("({author}, {year})"),
            }
        }
        CitationKind::Paraphrase | CitationKind::Web | CitationKind::Unknown(_) => {
            format!("({author}, {year})")
        }
    }
}

/// Replace every `[CITA:...]` marker in `text` with its APA form.
pub fn render_citations(text: &str) -> String {
    replace_markers(text, |raw| render_citation(&parse_marker(raw, "")))
}
