/// Context lookup — grounding a keyword in the sentence it came from.
///
/// Matching is a case-insensitive substring test, so a short keyword can
/// match inside a longer word ("ion" inside "conversion"). That is a known
/// approximation; tightening it would change which sentence grounds an
/// answer.

use rustc_hash::FxHashSet;

use crate::core::extract::KeywordExtractor;

/// Characters that end a sentence.
pub const SENTENCE_ENDERS: &[char] = &['.', '!', '?'];

/// Split text into trimmed, non-empty sentences at sentence-ending
/// punctuation. The punctuation itself is dropped.
pub fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(SENTENCE_ENDERS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Return the first sentence of `text` that mentions `keyword`, or an empty
/// string when none does.
pub fn find_context(keyword: &str, text: &str) -> String {
    let needle = keyword.to_lowercase();
    if needle.is_empty() {
        return String::new();
    }
    split_sentences(text)
        .find(|sentence| sentence.to_lowercase().contains(&needle))
        .map(str::to_string)
        .unwrap_or_default()
}

/// Up to `limit` distinct candidate terms that share the keyword's context
/// sentence, excluding the keyword itself.
pub fn find_related_terms(
    extractor: &KeywordExtractor,
    keyword: &str,
    text: &str,
    limit: usize,
) -> Vec<String> {
    let sentence = find_context(keyword, text);
    if sentence.is_empty() || limit == 0 {
        return Vec::new();
    }

    let own = keyword.to_lowercase();
    let mut seen = FxHashSet::default();
    extractor
        .candidates(&sentence)
        .into_iter()
        .filter(|term| {
            let folded = term.to_lowercase();
            folded != own && seen.insert(folded)
        })
        .take(limit)
        .collect()
}
