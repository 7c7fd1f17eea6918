use serde::{Deserialize, Serialize};

use super::keyword::Keyword;
use crate::core::shape::QuestionShape;

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// A single multiple-choice question anchored on one keyword.
///
/// `correct_answer` is stored by value and always equals exactly one entry
/// of `options`. Scoring compares submitted text against it, so the
/// position of the correct option carries no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub keyword: Keyword,
    pub shape: QuestionShape,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl Question {
    /// Exact string comparison against the correct answer.
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_answer == option
    }

    /// Position of the correct answer in the (shuffled) option list.
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.correct_answer)
    }

    /// Any option other than the correct one. Handy for driving a session
    /// down the wrong-answer path.
    pub fn first_incorrect(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|o| **o != self.correct_answer)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_question() -> Question {
        Question {
            keyword: Keyword::from("chlorophyll"),
            shape: QuestionShape::Significance,
            prompt: "What is the significance of \"chlorophyll\" in the context of the text?"
                .to_string(),
            options: vec![
                "It is a minor detail about stomata.".to_string(),
                "It is a key concept: Chlorophyll absorbs light".to_string(),
                "It is a synonym for stomata.".to_string(),
                "It is an unrelated term borrowed from glucose.".to_string(),
            ],
            correct_answer: "It is a key concept: Chlorophyll absorbs light".to_string(),
        }
    }

    #[test]
    fn correctness_is_by_value() {
        let q = sample_question();
        assert!(q.is_correct("It is a key concept: Chlorophyll absorbs light"));
        assert!(!q.is_correct("It is a synonym for stomata."));
        assert!(!q.is_correct("it is a key concept: chlorophyll absorbs light"));
    }

    #[test]
    fn correct_index_tracks_position() {
        let q = sample_question();
        assert_eq!(q.correct_index(), Some(1));
    }

    #[test]
    fn first_incorrect_skips_answer() {
        let q = sample_question();
        let wrong = q.first_incorrect().unwrap();
        assert!(!q.is_correct(wrong));
    }
}
