/// Quiz session state machine — linear progression through one generated
/// quiz, with scoring.

use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::synth::QuestionSynthesizer;
use crate::schema::question::Question;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("quiz already completed; generate or reset before answering again")]
    Completed,
    #[error("no active question (session is {0:?})")]
    NoActiveQuestion(SessionPhase),
}

/// Where a session is in its lifecycle. Derived from the session fields,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No text, no questions.
    Empty,
    /// Text present, no questions to show.
    Ready,
    /// Questions generated and at least one unanswered.
    Active,
    /// Every question answered.
    Completed,
}

impl SessionPhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Ready => "ready",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// "Question N of M", 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub number: usize,
    pub total: usize,
}

/// The result of one answer submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_answer: String,
    pub score: usize,
    pub completed: bool,
}

/// One learner's progress through one generated quiz.
///
/// Invariants: `current_index <= questions.len()`,
/// `score <= current_index`, and `completed` holds exactly when a
/// non-empty quiz has been answered through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizSession {
    source_text: String,
    questions: Vec<Question>,
    current_index: usize,
    score: usize,
    completed: bool,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.questions.is_empty() {
            if self.source_text.is_empty() {
                SessionPhase::Empty
            } else {
                SessionPhase::Ready
            }
        } else if self.completed {
            SessionPhase::Completed
        } else {
            SessionPhase::Active
        }
    }

    /// Replace the source text. A different text discards the current quiz;
    /// the same text changes nothing. Returns whether a reset happened.
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.source_text == text {
            return false;
        }
        *self = Self {
            source_text: text.to_string(),
            ..Self::default()
        };
        true
    }

    /// Build a fresh quiz from the current text.
    ///
    /// Blank text is a no-op and returns `false`. Otherwise any previous
    /// quiz is replaced and progress restarts at the first question; a text
    /// without keywords leaves the session `Ready` with no questions.
    pub fn generate<R: Rng + ?Sized>(&mut self, synth: &QuestionSynthesizer, rng: &mut R) -> bool {
        if self.source_text.trim().is_empty() {
            return false;
        }
        self.questions = synth.generate(&self.source_text, rng);
        self.current_index = 0;
        self.score = 0;
        self.completed = false;
        info!("quiz generated with {} questions", self.questions.len());
        true
    }

    /// Score `option` against the active question and advance.
    ///
    /// An option that is not among the question's options is simply
    /// incorrect. Outside the `Active` phase the call is rejected and the
    /// session is left untouched.
    pub fn submit_answer(&mut self, option: &str) -> Result<AnswerOutcome, SessionError> {
        let phase = self.phase();
        let question = match phase {
            SessionPhase::Active => &self.questions[self.current_index],
            SessionPhase::Completed => {
                warn!("answer submitted after quiz completion");
                return Err(SessionError::Completed);
            }
            other => {
                warn!("answer submitted with no active question ({})", other.name());
                return Err(SessionError::NoActiveQuestion(other));
            }
        };

        let correct = question.is_correct(option);
        let correct_answer = question.correct_answer.clone();
        if correct {
            self.score += 1;
        }
        self.current_index += 1;
        if self.current_index == self.questions.len() {
            self.completed = true;
            info!("quiz completed: {} of {}", self.score, self.questions.len());
        }

        Ok(AnswerOutcome {
            correct,
            correct_answer,
            score: self.score,
            completed: self.completed,
        })
    }

    /// Discard everything, including the text.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// The question awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&Question> {
        if self.completed {
            return None;
        }
        self.questions.get(self.current_index)
    }

    pub fn progress(&self) -> Option<Progress> {
        self.current_question().map(|_| Progress {
            number: self.current_index + 1,
            total: self.questions.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::QuizConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TEXT: &str = "The Calvin Cycle converts carbon dioxide into sugar using ATP and NADPH.";

    fn synth() -> QuestionSynthesizer {
        QuestionSynthesizer::new(QuizConfig::default()).unwrap()
    }

    fn active_session(seed: u64) -> QuizSession {
        let mut session = QuizSession::new();
        session.set_text(TEXT);
        assert!(session.generate(&synth(), &mut StdRng::seed_from_u64(seed)));
        session
    }

    #[test]
    fn new_session_is_empty() {
        let session = QuizSession::new();
        assert_eq!(session.phase(), SessionPhase::Empty);
        assert!(session.current_question().is_none());
        assert!(session.progress().is_none());
    }

    #[test]
    fn set_text_moves_to_ready() {
        let mut session = QuizSession::new();
        assert!(session.set_text(TEXT));
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.source_text(), TEXT);
    }

    #[test]
    fn set_same_text_keeps_quiz() {
        let mut session = active_session(1);
        session.submit_answer("anything").unwrap();
        let before = session.clone();
        assert!(!session.set_text(TEXT));
        assert_eq!(session, before);
    }

    #[test]
    fn set_different_text_discards_quiz() {
        let mut session = active_session(1);
        session.submit_answer("anything").unwrap();
        assert!(session.set_text("Ribosomes assemble proteins."));
        assert!(session.questions().is_empty());
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert!(!session.is_completed());
        assert_eq!(session.phase(), SessionPhase::Ready);
    }

    #[test]
    fn clearing_text_returns_to_empty() {
        let mut session = active_session(1);
        session.set_text("");
        assert_eq!(session.phase(), SessionPhase::Empty);
    }

    #[test]
    fn generate_on_blank_text_is_noop() {
        let mut session = QuizSession::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(!session.generate(&synth(), &mut rng));
        assert_eq!(session, QuizSession::new());

        session.set_text("   ");
        assert!(!session.generate(&synth(), &mut rng));
        assert!(session.questions().is_empty());
    }

    #[test]
    fn generate_without_keywords_stays_ready() {
        let mut session = QuizSession::new();
        session.set_text("It is what it is.");
        assert!(session.generate(&synth(), &mut StdRng::seed_from_u64(0)));
        assert!(session.questions().is_empty());
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert!(matches!(
            session.submit_answer("x"),
            Err(SessionError::NoActiveQuestion(SessionPhase::Ready))
        ));
    }

    #[test]
    fn generate_activates_and_restarts_progress() {
        let mut session = active_session(3);
        assert_eq!(session.phase(), SessionPhase::Active);
        session.submit_answer("anything").unwrap();

        assert!(session.generate(&synth(), &mut StdRng::seed_from_u64(4)));
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(
            session.progress(),
            Some(Progress {
                number: 1,
                total: session.questions().len()
            })
        );
    }

    #[test]
    fn correct_answer_scores() {
        let mut session = active_session(5);
        let answer = session.current_question().unwrap().correct_answer.clone();
        let outcome = session.submit_answer(&answer).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.score, 1);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn stale_option_is_just_incorrect() {
        let mut session = active_session(5);
        let outcome = session.submit_answer("an option from a previous render").unwrap();
        assert!(!outcome.correct);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn answering_through_completes() {
        let mut session = active_session(6);
        let total = session.questions().len();
        for n in 0..total {
            assert_eq!(session.progress().unwrap().number, n + 1);
            let answer = session.current_question().unwrap().correct_answer.clone();
            let outcome = session.submit_answer(&answer).unwrap();
            assert_eq!(outcome.completed, n + 1 == total);
        }
        assert_eq!(session.phase(), SessionPhase::Completed);
        assert_eq!(session.score(), total);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn submit_after_completion_rejected_without_mutation() {
        let mut session = active_session(7);
        while session.phase() == SessionPhase::Active {
            session.submit_answer("wrong").unwrap();
        }
        let before = session.clone();
        assert_eq!(session.submit_answer("wrong"), Err(SessionError::Completed));
        assert_eq!(session, before);
    }

    #[test]
    fn reset_returns_to_empty() {
        let mut session = active_session(8);
        session.submit_answer("anything").unwrap();
        session.reset();
        assert_eq!(session, QuizSession::default());
        assert_eq!(session.phase(), SessionPhase::Empty);
        assert_eq!(session.source_text(), "");
    }

    #[test]
    fn ron_round_trip() {
        let mut session = active_session(9);
        session.submit_answer("anything").unwrap();
        let serialized = ron::to_string(&session).unwrap();
        let restored: QuizSession = ron::from_str(&serialized).unwrap();
        assert_eq!(restored, session);
    }
}
