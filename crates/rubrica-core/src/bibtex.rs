//! BibTeX import: `@type{key, field = {value}, ...}` entries to `Reference`s.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::models::{Reference, SourceKind};

static ENTRY_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@(\w+)\s*\{").expect("valid bibtex entry regex"));

/// Entries that carry no bibliographic record.
const SKIPPED_ENTRY_TYPES: [&str; 3] = ["comment", "preamble", "string"];

/// Parse every entry of a BibTeX document.
///
/// `author`, `year`, `title` and the source field (`journal`, `publisher`,
/// `booktitle`, `school`, `institution` or `url`) are mapped onto the
/// reference. Entries with fewer than three of these four are skipped, as are
/// entries whose braces never close.
pub fn parse_bibtex(input: &str) -> Vec<Reference> {
    let mut references = Vec::new();
    let mut rest = input;

    while let Some(caps) = ENTRY_START_RE.captures(rest) {
        let (Some(whole), Some(kind)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let entry_type = kind.as_str().to_lowercase();
        let after_brace = &rest[whole.end()..];
        let Some((body, used)) = balanced(after_brace) else {
            break;
        };
        rest = &after_brace[used..];

        if SKIPPED_ENTRY_TYPES.contains(&entry_type.as_str()) {
            continue;
        }
        if let Some(reference) = entry_to_reference(&entry_type, body) {
            references.push(reference);
        }
    }

    references
}

/// Read and parse a `.bib` file.
pub fn load_bibtex(path: &Path) -> Result<Vec<Reference>> {
    let contents = std::fs::read_to_string(path)?;
    let references = parse_bibtex(&contents);
    tracing::debug!(path = %path.display(), references = references.len(), "bibtex loaded");
    Ok(references)
}

fn entry_to_reference(entry_type: &str, body: &str) -> Option<Reference> {
    let mut reference = Reference {
        source_kind: source_kind(entry_type),
        ..Reference::default()
    };
    let mut source_rank = usize::MAX;

    for (name, value) in parse_fields(body) {
        if value.is_empty() {
            continue;
        }
        match name.as_str() {
            "author" => reference.author = join_authors(&value),
            "year" => reference.year = value,
            "title" => reference.title = value,
            other => {
                // Lower rank wins when an entry carries several source fields.
                if let Some(rank) = SOURCE_FIELDS.iter().position(|field| *field == other) {
                    if rank < source_rank {
                        source_rank = rank;
                        reference.source_text = value;
                    }
                }
            }
        }
    }

    let mapped = [
        &reference.author,
        &reference.year,
        &reference.title,
        &reference.source_text,
    ]
    .iter()
    .filter(|value| !value.is_empty())
    .count();
    (mapped >= 3).then_some(reference)
}

const SOURCE_FIELDS: [&str; 6] = [
    "journal",
    "publisher",
    "booktitle",
    "school",
    "institution",
    "url",
];

fn source_kind(entry_type: &str) -> SourceKind {
    match entry_type {
        "article" => SourceKind::Article,
        "phdthesis" | "mastersthesis" | "thesis" => SourceKind::Thesis,
        "inproceedings" | "conference" | "proceedings" => SourceKind::Conference,
        "techreport" | "report" => SourceKind::Report,
        "online" | "electronic" | "webpage" => SourceKind::Web,
        _ => SourceKind::Book,
    }
}

/// `A and B and C` becomes `A y B y C`, the separator citations use.
fn join_authors(value: &str) -> String {
    value
        .split(" and ")
        .map(str::trim)
        .filter(|author| !author.is_empty())
        .collect::<Vec<_>>()
        .join(" y ")
}

/// `key, name = {value}, name = "value", name = 2020` after the opening brace.
fn parse_fields(body: &str) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    let Some((_, mut rest)) = body.split_once(',') else {
        return fields;
    };

    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
        let Some((name, after_eq)) = rest.split_once('=') else {
            break;
        };
        let name = name.trim().to_lowercase();
        let after_eq = after_eq.trim_start();

        let (raw, remaining) = if let Some(inner) = after_eq.strip_prefix('{') {
            let Some((value, used)) = balanced(inner) else {
                break;
            };
            (value, &inner[used..])
        } else if let Some(inner) = after_eq.strip_prefix('"') {
            let Some(end) = inner.find('"') else {
                break;
            };
            (&inner[..end], &inner[end + 1..])
        } else {
            let end = after_eq.find(',').unwrap_or(after_eq.len());
            (&after_eq[..end], &after_eq[end..])
        };

        fields.push((name, clean_value(raw)));
        rest = remaining;
    }

    fields
}

/// Text up to the brace closing an already opened `{`, and the byte length
/// consumed including that brace.
fn balanced(text: &str) -> Option<(&str, usize)> {
    let mut depth = 1usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&text[..idx], idx + 1));
                }
            }
            _ => {}
        }
    }
    None
}

/// Drop grouping braces, undo LaTeX escapes and collapse whitespace.
fn clean_value(raw: &str) -> String {
    let unescaped = raw
        .replace("\\&", "&")
        .replace("\\_", "_")
        .replace("\\$", "$")
        .replace("\\%", "%")
        .replace("\\#", "#");
    unescaped
        .chars()
        .filter(|c| *c != '{' && *c != '}')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
