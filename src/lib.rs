//! Textbook Quiz — multiple-choice quizzes generated from pasted prose.
//!
//! Extracts salient keywords from a passage, grounds each one in the
//! sentence it came from, wraps it in one of a few question templates with
//! plausible distractors, and walks a learner through the result one
//! question at a time while keeping score.

pub mod core;
pub mod schema;
