/// The quiz engine: the four operations a presentation layer drives,
/// keyed by session id.
///
/// Wires together configuration, question synthesis, the session state
/// machine, and session persistence.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use thiserror::Error;

use crate::core::config::{ConfigError, QuizConfig};
use crate::core::session::{QuizSession, SessionError};
use crate::core::store::{MemoryStore, RonDirStore, SessionStore, StoreError};
use crate::core::synth::QuestionSynthesizer;
use crate::schema::session_id::SessionId;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("session error: {0}")]
    Session(#[from] SessionError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// The top-level quiz engine. Built via `QuizEngine::builder()`.
pub struct QuizEngine {
    synthesizer: QuestionSynthesizer,
    store: Box<dyn SessionStore>,
    seed: u64,
    generation_count: u64,
}

/// Builder for constructing a `QuizEngine`.
pub struct QuizEngineBuilder {
    config_path: Option<String>,
    sessions_dir: Option<String>,
    seed: Option<u64>,
    /// Directly provided config (for testing without files).
    config: Option<QuizConfig>,
    /// Directly provided store; takes precedence over `sessions_dir`.
    store: Option<Box<dyn SessionStore>>,
}

impl QuizEngine {
    pub fn builder() -> QuizEngineBuilder {
        QuizEngineBuilder {
            config_path: None,
            sessions_dir: None,
            seed: None,
            config: None,
            store: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &QuizConfig {
        self.synthesizer.config()
    }

    pub fn synthesizer(&self) -> &QuestionSynthesizer {
        &self.synthesizer
    }

    /// Current state of a session; unknown ids read as a fresh session.
    pub fn session(&self, id: SessionId) -> Result<QuizSession, EngineError> {
        Ok(self.store.load(id)?.unwrap_or_default())
    }

    /// Store new source text. Changing the text discards the quiz built
    /// from the old text; resubmitting the same text changes nothing.
    pub fn set_text(&mut self, id: SessionId, text: &str) -> Result<(), EngineError> {
        let mut session = self.session(id)?;
        if session.set_text(text) {
            debug!("session {}: source text replaced ({} bytes)", id.0, text.len());
            self.store.save(id, &session)?;
        }
        Ok(())
    }

    /// Generate a quiz from the session's current text. Blank text leaves
    /// the session as it was.
    pub fn generate(&mut self, id: SessionId) -> Result<QuizSession, EngineError> {
        let mut session = self.session(id)?;
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(self.generation_count));

        if session.generate(&self.synthesizer, &mut rng) {
            self.generation_count += 1;
            info!(
                "session {}: generated {} questions",
                id.0,
                session.questions().len()
            );
            self.store.save(id, &session)?;
        } else {
            debug!("session {}: generate ignored, no source text", id.0);
        }
        Ok(session)
    }

    /// Score an answer for the active question and advance. Rejected once
    /// the quiz is complete; the stored session is left untouched.
    pub fn submit_answer(&mut self, id: SessionId, option: &str) -> Result<QuizSession, EngineError> {
        let mut session = self.session(id)?;
        let outcome = session.submit_answer(option)?;
        debug!(
            "session {}: answer {} (score {})",
            id.0,
            if outcome.correct { "correct" } else { "incorrect" },
            outcome.score
        );
        self.store.save(id, &session)?;
        Ok(session)
    }

    /// Start over: clears text, questions, and score.
    pub fn reset(&mut self, id: SessionId) -> Result<QuizSession, EngineError> {
        self.store.remove(id)?;
        info!("session {}: reset", id.0);
        Ok(QuizSession::default())
    }
}

impl QuizEngineBuilder {
    pub fn config_path(mut self, path: &str) -> Self {
        self.config_path = Some(path.to_string());
        self
    }

    pub fn sessions_dir(mut self, path: &str) -> Self {
        self.sessions_dir = Some(path.to_string());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Provide a config directly (for testing without files).
    pub fn with_config(mut self, config: QuizConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Provide a session store directly.
    pub fn with_store(mut self, store: Box<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the engine. A config file, when given, overrides a directly
    /// provided config; an unset seed is drawn from entropy.
    pub fn build(self) -> Result<QuizEngine, EngineError> {
        let config = match self.config_path {
            Some(ref path) => QuizConfig::load_from_ron(Path::new(path))?,
            None => self.config.unwrap_or_default(),
        };
        let synthesizer = QuestionSynthesizer::new(config)?;

        let store: Box<dyn SessionStore> = match (self.store, self.sessions_dir) {
            (Some(store), _) => store,
            (None, Some(dir)) => Box::new(RonDirStore::new(dir)),
            (None, None) => Box::new(MemoryStore::new()),
        };

        let seed = self.seed.unwrap_or_else(rand::random);
        debug!("quiz engine built with seed {}", seed);

        Ok(QuizEngine {
            synthesizer,
            store,
            seed,
            generation_count: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::SessionPhase;

    const TEXT: &str = "Photosynthesis happens inside chloroplasts. \
        Chlorophyll absorbs sunlight and releases oxygen. \
        The Calvin Cycle converts carbon dioxide into sugar.";

    fn build_test_engine() -> QuizEngine {
        QuizEngine::builder().seed(42).build().unwrap()
    }

    #[test]
    fn builder_with_seed() {
        let engine = QuizEngine::builder().seed(12345).build().unwrap();
        assert_eq!(engine.seed(), 12345);
    }

    #[test]
    fn builder_loads_config_file() {
        let engine = QuizEngine::builder()
            .config_path("tests/fixtures/small_quiz.ron")
            .build()
            .unwrap();
        assert_eq!(engine.config().quiz_size, 2);
    }

    #[test]
    fn builder_reports_missing_config() {
        let result = QuizEngine::builder()
            .config_path("tests/fixtures/does_not_exist.ron")
            .build();
        assert!(matches!(result, Err(EngineError::Config(ConfigError::Io(_)))));
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let result = QuizEngine::builder()
            .with_config(QuizConfig {
                quiz_size: 0,
                ..QuizConfig::default()
            })
            .build();
        assert!(matches!(result, Err(EngineError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn unknown_session_reads_empty() {
        let engine = build_test_engine();
        assert_eq!(engine.session(SessionId(9)).unwrap().phase(), SessionPhase::Empty);
    }

    #[test]
    fn generate_persists_between_calls() {
        let mut engine = build_test_engine();
        let id = SessionId(1);
        engine.set_text(id, TEXT).unwrap();
        let generated = engine.generate(id).unwrap();
        assert_eq!(generated.phase(), SessionPhase::Active);
        assert_eq!(engine.session(id).unwrap(), generated);
    }

    #[test]
    fn same_seed_same_quiz() {
        let id = SessionId(1);
        let mut a = build_test_engine();
        let mut b = build_test_engine();
        a.set_text(id, TEXT).unwrap();
        b.set_text(id, TEXT).unwrap();
        assert_eq!(a.generate(id).unwrap(), b.generate(id).unwrap());
    }

    #[test]
    fn regeneration_draws_fresh_randomness() {
        let mut engine = build_test_engine();
        let id = SessionId(1);
        engine.set_text(id, TEXT).unwrap();
        let first = engine.generate(id).unwrap();
        let varied = (0..20).any(|_| engine.generate(id).unwrap() != first);
        assert!(varied);
    }

    #[test]
    fn sessions_do_not_leak() {
        let mut engine = build_test_engine();
        engine.set_text(SessionId(1), TEXT).unwrap();
        engine.generate(SessionId(1)).unwrap();
        assert_eq!(engine.session(SessionId(2)).unwrap().phase(), SessionPhase::Empty);
    }

    #[test]
    fn rejected_submit_leaves_store_untouched() {
        let mut engine = build_test_engine();
        let id = SessionId(3);
        engine.set_text(id, "Osmosis!").unwrap();
        engine.generate(id).unwrap();
        engine.submit_answer(id, "wrong").unwrap();
        let stored = engine.session(id).unwrap();
        assert!(stored.is_completed());

        let err = engine.submit_answer(id, "wrong").unwrap_err();
        assert!(matches!(err, EngineError::Session(SessionError::Completed)));
        assert_eq!(engine.session(id).unwrap(), stored);
    }

    #[test]
    fn reset_clears_session() {
        let mut engine = build_test_engine();
        let id = SessionId(4);
        engine.set_text(id, TEXT).unwrap();
        engine.generate(id).unwrap();
        let reset = engine.reset(id).unwrap();
        assert_eq!(reset.phase(), SessionPhase::Empty);
        assert_eq!(engine.session(id).unwrap(), QuizSession::default());
    }

    #[test]
    fn ron_dir_store_backs_engine() {
        let dir = "target/test_sessions_engine";
        let id = SessionId(77);
        {
            let mut engine = QuizEngine::builder().seed(1).sessions_dir(dir).build().unwrap();
            engine.reset(id).unwrap();
            engine.set_text(id, TEXT).unwrap();
            engine.generate(id).unwrap();
        }
        let engine = QuizEngine::builder().seed(1).sessions_dir(dir).build().unwrap();
        let restored = engine.session(id).unwrap();
        assert_eq!(restored.source_text(), TEXT);
        assert!(!restored.questions().is_empty());

        // Cleanup
        let _ = std::fs::remove_file(format!("{}/session_77.ron", dir));
    }
}
