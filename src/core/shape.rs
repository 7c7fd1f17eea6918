/// Question shapes — the fixed set of templates a question can take.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::schema::keyword::Keyword;

/// Number of wrong options every shape produces.
pub const DISTRACTOR_COUNT: usize = 3;

/// What the text says about a keyword: the sentence that mentions it and
/// the other terms that sentence contains.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grounding {
    pub sentence: String,
    pub related: Vec<String>,
}

/// A question template pairing a prompt with correct and incorrect answer
/// generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionShape {
    /// "What is the significance of ...?" answered with the grounding sentence.
    Significance,
    /// "Which statement mentions ...?" answered with the sentence itself.
    Context,
    /// "Which terms appear alongside ...?" answered with co-occurring terms.
    Association,
}

impl QuestionShape {
    pub const ALL: [QuestionShape; 3] = [
        QuestionShape::Significance,
        QuestionShape::Context,
        QuestionShape::Association,
    ];

    /// Pick a shape uniformly at random.
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> QuestionShape {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Significance => "significance",
            Self::Context => "context",
            Self::Association => "association",
        }
    }

    pub fn prompt(&self, keyword: &Keyword) -> String {
        match self {
            Self::Significance => format!(
                "What is the significance of \"{}\" in the context of the text?",
                keyword
            ),
            Self::Context => format!("Which statement from the text mentions \"{}\"?", keyword),
            Self::Association => format!("Which terms appear alongside \"{}\" in the text?", keyword),
        }
    }

    /// The correct answer, or `fallback` when the text offers nothing to
    /// ground it in.
    pub fn correct_answer(&self, grounding: &Grounding, fallback: &str) -> String {
        match self {
            Self::Significance if !grounding.sentence.is_empty() => {
                format!("It is a key concept in: \"{}\"", grounding.sentence)
            }
            Self::Context if !grounding.sentence.is_empty() => grounding.sentence.clone(),
            Self::Association if !grounding.related.is_empty() => grounding.related.join(", "),
            _ => fallback.to_string(),
        }
    }

    /// Three wrong answers, each naming a randomly chosen keyword from
    /// `others`, or `fallback_term` when there are no others.
    pub fn distractors<R: Rng + ?Sized>(
        &self,
        keyword: &Keyword,
        others: &[&Keyword],
        fallback_term: &str,
        rng: &mut R,
    ) -> [String; DISTRACTOR_COUNT] {
        let mut other = || -> String {
            if others.is_empty() {
                fallback_term.to_string()
            } else {
                others[rng.gen_range(0..others.len())].to_string()
            }
        };

        match self {
            Self::Significance => [
                format!("It is a minor detail about {}.", other()),
                format!("It is an unrelated term borrowed from {}.", other()),
                format!("It is a synonym for {}.", other()),
            ],
            Self::Context => [
                format!("A statement that only discusses {}.", other()),
                format!("A claim that {} replaces {}.", other(), keyword),
                format!("A definition of {} with no mention of {}.", other(), keyword),
            ],
            Self::Association => [
                format!("Only {}", other()),
                format!("{}, but never {}", other(), keyword),
                format!("Terms unrelated to {}", other()),
            ],
        }
    }
}
