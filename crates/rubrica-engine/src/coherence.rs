use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use rubrica_core::{CoherenceAnalysis, CoherenceRubric, RepeatedWord, Section, WordFrequency};

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("valid word regex"));

/// Lower-cased words of `text`, split on Unicode word boundaries.
pub(crate) fn words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|word| word.as_str().to_string())
        .collect()
}

/// Lexical repetition and vocabulary statistics over a whole document.
#[derive(Debug, Clone)]
pub struct CoherenceAnalyzer<'a> {
    rubric: &'a CoherenceRubric,
    stop_words: HashSet<&'a str>,
}

impl<'a> CoherenceAnalyzer<'a> {
    pub fn new(rubric: &'a CoherenceRubric) -> Self {
        Self {
            rubric,
            stop_words: rubric.stop_words.iter().map(String::as_str).collect(),
        }
    }

    /// Analyze the trimmed, non-empty bodies joined by a space. Citation
    /// markers stay in: their words count like any other.
    pub fn analyze(&self, sections: &[Section]) -> CoherenceAnalysis {
        let text = sections
            .iter()
            .map(|section| section.body.trim())
            .filter(|body| !body.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        self.analyze_text(&text)
    }

    pub fn analyze_text(&self, text: &str) -> CoherenceAnalysis {
        let words = words(text);
        let total_words = words.len();
        if total_words == 0 {
            return CoherenceAnalysis::default();
        }

        let unique_words = words.iter().collect::<HashSet<_>>().len();

        let mut frequencies: HashMap<&str, usize> = HashMap::new();
        for word in &words {
            if self.is_keyword(word) {
                *frequencies.entry(word.as_str()).or_default() += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = frequencies.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        let limit = total_words as f64 * self.rubric.repetition_threshold;
        let over_repeated = ranked
            .iter()
            .filter(|(_, count)| *count as f64 > limit && *count > self.rubric.min_repeat_count)
            .map(|(word, count)| RepeatedWord {
                word: word.to_string(),
                count: *count,
                percentage: *count as f64 / total_words as f64 * 100.0,
            })
            .collect();

        let top_words = ranked
            .iter()
            .take(self.rubric.top_words)
            .map(|(word, count)| WordFrequency {
                word: word.to_string(),
                count: *count,
            })
            .collect();

        CoherenceAnalysis {
            total_words,
            unique_words,
            top_words,
            over_repeated,
            vocabulary_diversity: unique_words as f64 / total_words as f64,
        }
    }

    fn is_keyword(&self, word: &str) -> bool {
        word.chars().count() >= self.rubric.min_keyword_length && !self.stop_words.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(text: &str) -> CoherenceAnalysis {
        let rubric = CoherenceRubric::default();
        CoherenceAnalyzer::new(&rubric).analyze_text(text)
    }

    #[test]
    fn empty_text_has_no_words() {
        let analysis = analyze("  ¿? ... ");
        assert!(analysis.is_empty());
        assert_eq!(analysis.vocabulary_diversity, 0.0);
        assert!(analysis.top_words.is_empty());
    }

    #[test]
    fn tokenizes_unicode_words_lowercase() {
        assert_eq!(words("Análisis, PEDAGOGÍA y niño."), vec!["análisis", "pedagogía", "y", "niño"]);
    }

    #[test]
    fn diversity_is_unique_over_total() {
        let analysis = analyze("agua agua fuego tierra");
        assert_eq!(analysis.total_words, 4);
        assert_eq!(analysis.unique_words, 3);
        assert!((analysis.vocabulary_diversity - 0.75).abs() < 1e-9);
    }

    #[test]
    fn stop_words_and_short_words_are_not_keywords() {
        let analysis = analyze("para para para para para sol sol sol sol sol");
        assert!(analysis.top_words.is_empty());
        assert!(analysis.over_repeated.is_empty());
    }

    #[test]
    fn small_counts_never_count_as_repetition() {
        // 3 of 6 words is 50 %, but three occurrences is within the guard.
        let analysis = analyze("modelo modelo modelo datos datos otros");
        assert!(analysis.over_repeated.is_empty());
        assert_eq!(analysis.top_words[0].word, "modelo");
        assert_eq!(analysis.top_words[0].count, 3);
    }

    #[test]
    fn flags_words_above_threshold() {
        let mut text = "modelo ".repeat(5);
        for i in 0..95 {
            text.push_str(&format!("palabra{i} "));
        }
        let analysis = analyze(&text);
        assert_eq!(analysis.total_words, 100);
        assert_eq!(analysis.over_repeated.len(), 1);
        let repeated = &analysis.over_repeated[0];
        assert_eq!(repeated.word, "modelo");
        assert_eq!(repeated.count, 5);
        assert!((repeated.percentage - 5.0).abs() < 1e-9);
    }

    #[test]
    fn ties_rank_alphabetically() {
        let analysis = analyze("zorro zorro ardilla ardilla");
        let ranked: Vec<&str> = analysis.top_words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(ranked, vec!["ardilla", "zorro"]);
    }

    #[test]
    fn citation_marker_words_are_counted() {
        let rubric = CoherenceRubric::default();
        let sections = vec![Section::new(
            "marco",
            "Marco",
            "Teoría [CITA:textual:García:2020] teoría [CITA:textual:García:2020]",
        )];
        let analysis = CoherenceAnalyzer::new(&rubric).analyze(&sections);
        assert_eq!(analysis.total_words, 10);
    }

    #[test]
    fn repeated_markers_can_be_over_repeated() {
        let rubric = CoherenceRubric::default();
        let mut body = "[CITA:parafraseo:García:2020] ".repeat(5);
        for i in 0..95 {
            body.push_str(&format!("termino{i} "));
        }
        let sections = vec![Section::new("marco_teorico", "Marco Teórico", &body)];
        let analysis = CoherenceAnalyzer::new(&rubric).analyze(&sections);

        assert_eq!(analysis.total_words, 115);
        let repeated: Vec<&str> = analysis
            .over_repeated
            .iter()
            .map(|word| word.word.as_str())
            .collect();
        assert_eq!(repeated, vec!["2020", "cita", "garcía", "parafraseo"]);
    }
}
