use serde::{Deserialize, Serialize};

/// Newtype wrapper for the identity of one interaction stream.
///
/// A browser tab, a terminal shell, or any other caller that drives a quiz
/// owns exactly one session id; the session store keys state by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_compare_by_value() {
        assert_eq!(SessionId(7), SessionId(7));
        assert_ne!(SessionId(7), SessionId(8));
        assert!(SessionId(1) < SessionId(2));
    }
}
