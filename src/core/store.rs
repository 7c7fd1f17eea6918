/// Session persistence — keeps one quiz session per interaction stream
/// between calls.

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::session::QuizSession;
use crate::schema::session_id::SessionId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON serialization error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Where sessions live between user actions. Implementations must never
/// hand one id's session to another id.
pub trait SessionStore {
    fn load(&self, id: SessionId) -> Result<Option<QuizSession>, StoreError>;
    fn save(&mut self, id: SessionId, session: &QuizSession) -> Result<(), StoreError>;
    fn remove(&mut self, id: SessionId) -> Result<(), StoreError>;
}

/// Process-local store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sessions: FxHashMap<SessionId, QuizSession>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, id: SessionId) -> Result<Option<QuizSession>, StoreError> {
        Ok(self.sessions.get(&id).cloned())
    }

    fn save(&mut self, id: SessionId, session: &QuizSession) -> Result<(), StoreError> {
        self.sessions.insert(id, session.clone());
        Ok(())
    }

    fn remove(&mut self, id: SessionId) -> Result<(), StoreError> {
        self.sessions.remove(&id);
        Ok(())
    }
}

/// One pretty-printed RON file per session, `session_<id>.ron`, in a
/// directory that is created on first save.
#[derive(Debug, Clone)]
pub struct RonDirStore {
    dir: PathBuf,
}

impl RonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: SessionId) -> PathBuf {
        self.dir.join(format!("session_{}.ron", id.0))
    }
}

impl SessionStore for RonDirStore {
    fn load(&self, id: SessionId) -> Result<Option<QuizSession>, StoreError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)?;
        Ok(Some(ron::from_str(&contents)?))
    }

    fn save(&mut self, id: SessionId, session: &QuizSession) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let serialized = ron::ser::to_string_pretty(session, ron::ser::PrettyConfig::default())?;
        std::fs::write(self.path_for(id), serialized)?;
        Ok(())
    }

    fn remove(&mut self, id: SessionId) -> Result<(), StoreError> {
        let path = self.path_for(id);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}
