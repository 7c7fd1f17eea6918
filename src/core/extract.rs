/// Keyword extraction — tokenizing prose into a bounded, deduplicated set
/// of candidate terms.

use log::debug;
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::core::config::QuizConfig;
use crate::core::context::split_sentences;
use crate::schema::keyword::Keyword;

/// A word is a run of letters/digits, optionally joined by apostrophes or
/// hyphens ("light-dependent", "cell's").
const WORD_PATTERN: &str = r"[\p{L}\p{N}]+(?:['’-][\p{L}\p{N}]+)*";

/// Turns raw text into keywords.
///
/// Dedup is case-insensitive and keeps the first occurrence, so the order
/// of the result follows the text and the same input always yields the
/// same set.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    min_len: usize,
    max_keywords: usize,
    detect_phrases: bool,
    stop_words: FxHashSet<String>,
    word_re: Regex,
}

impl KeywordExtractor {
    pub fn new(config: &QuizConfig) -> Self {
        Self {
            min_len: config.min_keyword_len,
            max_keywords: config.max_keywords,
            detect_phrases: config.detect_phrases,
            stop_words: config.stop_words.iter().map(|w| w.to_lowercase()).collect(),
            word_re: Regex::new(WORD_PATTERN).expect("word pattern is a valid regex"),
        }
    }

    /// Extract at most `max_keywords` keywords from `text`.
    pub fn extract(&self, text: &str) -> Vec<Keyword> {
        let mut keywords = Vec::new();
        if self.max_keywords == 0 {
            return keywords;
        }

        let mut seen = FxHashSet::default();
        'sentences: for sentence in split_sentences(text) {
            for candidate in self.candidates(sentence) {
                if seen.insert(candidate.to_lowercase()) {
                    keywords.push(Keyword::new(candidate));
                    if keywords.len() == self.max_keywords {
                        break 'sentences;
                    }
                }
            }
        }

        debug!("extracted {} keywords: {:?}", keywords.len(), keywords);
        keywords
    }

    /// Every candidate term in one sentence, in order, before dedup or
    /// capping. Phrases replace the words they are made of.
    pub fn candidates(&self, sentence: &str) -> Vec<String> {
        let words: Vec<regex::Match<'_>> = self.word_re.find_iter(sentence).collect();
        let mut out = Vec::new();
        let mut i = 0;

        while i < words.len() {
            if self.detect_phrases {
                let run_end = self.capitalized_run_end(sentence, &words, i);
                if run_end - i >= 2 {
                    let phrase = words[i..run_end]
                        .iter()
                        .map(|m| m.as_str())
                        .collect::<Vec<_>>()
                        .join(" ");
                    if phrase.chars().count() > self.min_len {
                        out.push(phrase);
                    }
                    i = run_end;
                    continue;
                }
            }

            let word = words[i].as_str();
            if self.is_keyword(word) {
                out.push(word.to_string());
            }
            i += 1;
        }

        out
    }

    /// Long enough, contains a letter, and not a stop word.
    pub fn is_keyword(&self, word: &str) -> bool {
        word.chars().count() > self.min_len
            && word.chars().any(char::is_alphabetic)
            && !self.is_stop_word(word)
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }

    /// Index one past the last word of the capitalized run starting at
    /// `start`. Words in a run are separated by a single space, so the
    /// joined phrase is always a substring of the sentence.
    fn capitalized_run_end(&self, sentence: &str, words: &[regex::Match<'_>], start: usize) -> usize {
        let mut end = start;
        while end < words.len() && self.is_capitalized_term(words[end].as_str()) {
            if end > start {
                let gap = &sentence[words[end - 1].end()..words[end].start()];
                if gap != " " {
                    break;
                }
            }
            end += 1;
        }
        end
    }

    fn is_capitalized_term(&self, word: &str) -> bool {
        word.chars().next().is_some_and(char::is_uppercase) && !self.is_stop_word(word)
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(&QuizConfig::default())
    }
}

/// Extract keywords with the default configuration.
pub fn extract_keywords(text: &str) -> Vec<Keyword> {
    KeywordExtractor::default().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_extractor() -> KeywordExtractor {
        KeywordExtractor::new(&QuizConfig {
            detect_phrases: false,
            ..QuizConfig::default()
        })
    }

    fn strings(keywords: &[Keyword]) -> Vec<&str> {
        keywords.iter().map(Keyword::as_str).collect()
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   \n\t ").is_empty());
        assert!(extract_keywords("...!?").is_empty());
    }

    #[test]
    fn drops_short_words_and_stop_words() {
        let kws = plain_extractor().extract("The cell is full of water and with ions.");
        assert_eq!(strings(&kws), vec!["cell", "full", "water", "ions"]);
    }

    #[test]
    fn stop_words_are_case_insensitive() {
        let kws = plain_extractor().extract("THESE WITHIN Those enzymes");
        assert_eq!(strings(&kws), vec!["enzymes"]);
    }

    #[test]
    fn dedup_is_case_insensitive_and_keeps_first() {
        let kws = plain_extractor().extract("Enzyme activity rises. The enzyme ACTIVITY falls.");
        assert_eq!(strings(&kws), vec!["Enzyme", "activity", "rises", "falls"]);
    }

    #[test]
    fn caps_at_max_keywords() {
        let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima mike";
        let kws = plain_extractor().extract(text);
        assert_eq!(kws.len(), 10);
        assert_eq!(kws[0].as_str(), "alpha");
        assert_eq!(kws[9].as_str(), "juliet");
    }

    #[test]
    fn punctuation_is_stripped() {
        let kws = plain_extractor().extract("(glucose), \"oxygen\"; [water]");
        assert_eq!(strings(&kws), vec!["glucose", "oxygen", "water"]);
    }

    #[test]
    fn hyphens_and_apostrophes_stay_inside_words() {
        let kws = plain_extractor().extract("light-dependent reactions power the cell's engine");
        assert_eq!(
            strings(&kws),
            vec!["light-dependent", "reactions", "power", "cell's", "engine"]
        );
    }

    #[test]
    fn numbers_alone_are_not_keywords() {
        let kws = plain_extractor().extract("In 1905 about 3000 samples were taken");
        assert_eq!(strings(&kws), vec!["samples", "taken"]);
    }

    #[test]
    fn non_ascii_text_is_handled() {
        let kws = plain_extractor().extract("Die Photosynthese erzeugt Glukose und Sauerstoff. 光合作用");
        assert!(kws.iter().any(|k| k.as_str() == "Photosynthese"));
        assert!(kws.iter().any(|k| k.as_str() == "Sauerstoff"));
        assert!(kws.iter().any(|k| k.as_str() == "光合作用"));
    }

    #[test]
    fn capitalized_runs_become_phrases() {
        let kws = extract_keywords(
            "The Calvin Cycle converts carbon dioxide into sugar using ATP and NADPH.",
        );
        assert_eq!(
            strings(&kws),
            vec!["Calvin Cycle", "converts", "carbon", "dioxide", "sugar", "NADPH"]
        );
    }

    #[test]
    fn phrases_break_on_punctuation() {
        let kws = extract_keywords("Visit Paris, France soon");
        assert_eq!(strings(&kws), vec!["Visit Paris", "France", "soon"]);
    }

    #[test]
    fn phrases_break_on_line_breaks() {
        let kws = extract_keywords("Guard Cells\nOpen wide");
        assert_eq!(strings(&kws), vec!["Guard Cells", "Open", "wide"]);
    }

    #[test]
    fn phrase_detection_can_be_disabled() {
        let kws = plain_extractor().extract("The Calvin Cycle runs");
        assert_eq!(strings(&kws), vec!["Calvin", "Cycle", "runs"]);
    }

    #[test]
    fn order_is_stable_across_calls() {
        let text = "Mitochondria produce energy. Ribosomes build proteins.";
        assert_eq!(extract_keywords(text), extract_keywords(text));
    }
}
