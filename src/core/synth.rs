/// Question synthesis — keywords in, shuffled multiple-choice questions out.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::config::{ConfigError, QuizConfig};
use crate::core::context::{find_context, find_related_terms};
use crate::core::extract::KeywordExtractor;
use crate::core::shape::{Grounding, QuestionShape};
use crate::schema::keyword::Keyword;
use crate::schema::question::{Question, OPTION_COUNT};

/// Builds quizzes from text. All randomness comes from the caller's RNG,
/// so a seeded generator reproduces a quiz exactly.
#[derive(Debug, Clone)]
pub struct QuestionSynthesizer {
    config: QuizConfig,
    extractor: KeywordExtractor,
}

impl QuestionSynthesizer {
    pub fn new(config: QuizConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let extractor = KeywordExtractor::new(&config);
        Ok(Self { config, extractor })
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn extractor(&self) -> &KeywordExtractor {
        &self.extractor
    }

    /// Generate up to `quiz_size` questions from `text`.
    ///
    /// Keywords are shuffled before the quiz-size cut, each question gets a
    /// uniformly chosen shape, and option order is shuffled. Text with no
    /// keywords yields an empty quiz.
    pub fn generate<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Vec<Question> {
        let mut keywords = self.extractor.extract(text);
        keywords.shuffle(rng);
        keywords.truncate(self.config.quiz_size);

        let mut questions = Vec::with_capacity(keywords.len());
        for (i, keyword) in keywords.iter().enumerate() {
            let others: Vec<&Keyword> = keywords
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, k)| k)
                .collect();
            let shape = QuestionShape::choose(rng);
            questions.push(self.build_question(shape, keyword, &others, text, rng));
        }

        debug!(
            "generated {} questions (shapes: {:?})",
            questions.len(),
            questions.iter().map(|q| q.shape.name()).collect::<Vec<_>>()
        );
        questions
    }

    /// Build one question of the given shape.
    pub fn build_question<R: Rng + ?Sized>(
        &self,
        shape: QuestionShape,
        keyword: &Keyword,
        others: &[&Keyword],
        text: &str,
        rng: &mut R,
    ) -> Question {
        let grounding = Grounding {
            sentence: find_context(keyword.as_str(), text),
            related: find_related_terms(
                &self.extractor,
                keyword.as_str(),
                text,
                self.config.max_related_terms,
            ),
        };

        let correct_answer = shape.correct_answer(&grounding, &self.config.fallback_answer);
        let distractors = shape.distractors(keyword, others, &self.config.fallback_term, rng);
        let options = assemble_options(
            &correct_answer,
            distractors,
            &self.config.filler_options,
            rng,
        );

        Question {
            keyword: keyword.clone(),
            shape,
            prompt: shape.prompt(keyword),
            options,
            correct_answer,
        }
    }
}

/// Correct answer plus distractors, with duplicates swapped for filler
/// options, in shuffled order.
fn assemble_options<R: Rng + ?Sized>(
    correct: &str,
    distractors: impl IntoIterator<Item = String>,
    fillers: &[String],
    rng: &mut R,
) -> Vec<String> {
    let mut options = Vec::with_capacity(OPTION_COUNT);
    options.push(correct.to_string());

    for candidate in distractors.into_iter().chain(fillers.iter().cloned()) {
        if options.len() == OPTION_COUNT {
            break;
        }
        if !options.contains(&candidate) {
            options.push(candidate);
        }
    }

    options.shuffle(rng);
    options
}
