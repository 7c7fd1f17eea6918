/// Quiz configuration — extraction thresholds, quiz size, and fallback text.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::question::OPTION_COUNT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "is", "are", "and", "or", "in", "to", "of", "by", "from", "with", "a", "an", "as",
    "at", "on", "for", "be", "was", "were", "been", "being", "it", "its", "this", "that",
    "these", "those", "which", "while", "where", "when", "what", "into", "onto", "than", "then",
    "there", "their", "they", "them", "have", "has", "had", "also", "such", "each", "both",
    "other", "some", "many", "most", "more", "very", "can", "could", "would", "should", "will",
    "using", "used", "through", "during", "about", "between", "within", "without",
];

const DEFAULT_FILLER_OPTIONS: &[&str] = &[
    "It is a key concept related to the topic.",
    "It is a minor detail in the text.",
    "It is an unrelated term.",
    "It is a synonym for another term.",
];

/// Every tunable of the pipeline. Missing RON fields fall back to
/// [`QuizConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// Keywords must be strictly longer than this many characters.
    pub min_keyword_len: usize,
    /// Cap on the extracted keyword set.
    pub max_keywords: usize,
    /// Cap on questions per generated quiz.
    pub quiz_size: usize,
    /// Merge runs of capitalized words into phrase keywords.
    pub detect_phrases: bool,
    /// Cap on terms returned by the related-term lookup.
    pub max_related_terms: usize,
    /// Compared case-insensitively.
    pub stop_words: Vec<String>,
    /// Correct-answer text when a keyword has no grounding in the text.
    pub fallback_answer: String,
    /// Stands in for "another keyword" when a quiz has only one keyword.
    pub fallback_term: String,
    /// Generic options that replace duplicated distractors.
    pub filler_options: Vec<String>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            min_keyword_len: 3,
            max_keywords: 10,
            quiz_size: 5,
            detect_phrases: true,
            max_related_terms: 3,
            stop_words: DEFAULT_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
            fallback_answer: "A main concept of the text.".to_string(),
            fallback_term: "another concept".to_string(),
            filler_options: DEFAULT_FILLER_OPTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl QuizConfig {
    /// Load a configuration from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<QuizConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse and validate a configuration from a RON string.
    pub fn parse_ron(input: &str) -> Result<QuizConfig, ConfigError> {
        let config: QuizConfig = ron::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the synthesizer relies on.
    ///
    /// Filler options must hold at least `OPTION_COUNT` distinct entries:
    /// the correct answer can collide with at most one of them, which still
    /// leaves enough to complete any option list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quiz_size == 0 {
            return Err(ConfigError::Invalid("quiz_size must be at least 1".to_string()));
        }
        if self.max_keywords < self.quiz_size {
            return Err(ConfigError::Invalid(format!(
                "max_keywords ({}) must not be smaller than quiz_size ({})",
                self.max_keywords, self.quiz_size
            )));
        }
        if self.fallback_answer.trim().is_empty() || self.fallback_term.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "fallback_answer and fallback_term must not be blank".to_string(),
            ));
        }

        let mut distinct: Vec<&str> = self.filler_options.iter().map(String::as_str).collect();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() < OPTION_COUNT {
            return Err(ConfigError::Invalid(format!(
                "filler_options needs at least {} distinct entries, got {}",
                OPTION_COUNT,
                distinct.len()
            )));
        }
        Ok(())
    }
}
