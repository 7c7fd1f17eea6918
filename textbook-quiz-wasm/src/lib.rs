//! WASM bindings for textbook-quiz — powers the in-browser quiz page.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use textbook_quiz::core::config::QuizConfig;
use textbook_quiz::core::engine::QuizEngine;
use textbook_quiz::core::session::{QuizSession, SessionPhase};
use textbook_quiz::schema::session_id::SessionId;

// ---------------------------------------------------------------------------
// Embedded configuration — compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.ron");
}

/// A page hosts exactly one quiz.
const PAGE_SESSION: SessionId = SessionId(0);

// ---------------------------------------------------------------------------
// JSON view model handed to the page after every call
// ---------------------------------------------------------------------------
#[derive(Debug, Serialize)]
struct QuestionView {
    number: usize,
    total: usize,
    prompt: String,
    options: Vec<String>,
}

#[derive(Debug, Serialize)]
struct QuizView {
    phase: &'static str,
    source_text: String,
    can_generate: bool,
    question: Option<QuestionView>,
    score: usize,
    total: usize,
    completed: bool,
    summary: Option<String>,
}

impl QuizView {
    fn from_session(session: &QuizSession) -> Self {
        let question = session
            .current_question()
            .zip(session.progress())
            .map(|(q, progress)| QuestionView {
                number: progress.number,
                total: progress.total,
                prompt: q.prompt.clone(),
                options: q.options.clone(),
            });

        let total = session.questions().len();
        let summary = session
            .is_completed()
            .then(|| format!("Your score: {} out of {}", session.score(), total));

        QuizView {
            phase: session.phase().name(),
            source_text: session.source_text().to_string(),
            can_generate: !session.source_text().trim().is_empty(),
            question,
            score: session.score(),
            total,
            completed: session.is_completed(),
            summary,
        }
    }
}

fn render(session: &QuizSession) -> Result<String, JsError> {
    serde_json::to_string(&QuizView::from_session(session))
        .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

// ---------------------------------------------------------------------------
// QuizApp — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct QuizApp {
    engine: QuizEngine,
}

#[wasm_bindgen]
impl QuizApp {
    /// Create a quiz app with the built-in configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<QuizApp, JsError> {
        QuizApp::with_config(data::DEFAULT_CONFIG, seed)
    }

    /// Create a quiz app from a RON configuration string.
    pub fn with_config(config_ron: &str, seed: u64) -> Result<QuizApp, JsError> {
        let config = QuizConfig::parse_ron(config_ron)
            .map_err(|e| JsError::new(&format!("Config error: {e}")))?;
        let engine = QuizEngine::builder()
            .seed(seed)
            .with_config(config)
            .build()
            .map_err(|e| JsError::new(&format!("Engine build error: {e}")))?;
        Ok(QuizApp { engine })
    }

    /// Store the text area contents. A changed text discards the quiz.
    /// Returns the view as JSON.
    pub fn set_text(&mut self, text: &str) -> Result<String, JsError> {
        self.engine
            .set_text(PAGE_SESSION, text)
            .map_err(|e| JsError::new(&format!("Session error: {e}")))?;
        self.view()
    }

    /// Generate a quiz from the current text. Returns the view as JSON.
    pub fn generate(&mut self) -> Result<String, JsError> {
        let session = self
            .engine
            .generate(PAGE_SESSION)
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))?;
        render(&session)
    }

    /// Submit the selected option text. Returns the view as JSON.
    pub fn submit_answer(&mut self, option: &str) -> Result<String, JsError> {
        let session = self
            .engine
            .submit_answer(PAGE_SESSION, option)
            .map_err(|e| JsError::new(&format!("Answer rejected: {e}")))?;
        render(&session)
    }

    /// Submit the option at `index` of the active question, as a radio
    /// group reports it. An out-of-range index counts as a wrong answer.
    pub fn submit_choice(&mut self, index: usize) -> Result<String, JsError> {
        let session = self
            .engine
            .session(PAGE_SESSION)
            .map_err(|e| JsError::new(&format!("Session error: {e}")))?;
        let option = session
            .current_question()
            .and_then(|q| q.options.get(index))
            .cloned()
            .unwrap_or_default();
        self.submit_answer(&option)
    }

    /// Start a new quiz. Returns the (empty) view as JSON.
    pub fn reset(&mut self) -> Result<String, JsError> {
        let session = self
            .engine
            .reset(PAGE_SESSION)
            .map_err(|e| JsError::new(&format!("Reset error: {e}")))?;
        render(&session)
    }

    /// The current view as JSON.
    pub fn view(&self) -> Result<String, JsError> {
        let session = self
            .engine
            .session(PAGE_SESSION)
            .map_err(|e| JsError::new(&format!("Session error: {e}")))?;
        render(&session)
    }

    /// Return JSON array of session phase names.
    pub fn phases() -> String {
        let names: Vec<&str> = [
            SessionPhase::Empty,
            SessionPhase::Ready,
            SessionPhase::Active,
            SessionPhase::Completed,
        ]
        .iter()
        .map(SessionPhase::name)
        .collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }
}
