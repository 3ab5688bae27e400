//! Type-ahead search.
//!
//! A burst of typed characters accumulates in a search buffer. Each new
//! character re-resolves the whole buffer to an option:
//!
//! - the first option whose name starts with the buffer wins;
//! - failing that, if the buffer is one letter repeated (`"aaa"`), the first
//!   option starting with that letter wins, which lets repeated taps cycle
//!   through every option sharing an initial;
//! - otherwise there is no match.
//!
//! Both lookups take the candidates from [`ComboboxModel::filter_prefix`]
//! and pick the first one at or after `start`, wrapping around. The
//! controller passes the index just past the current selection, so the
//! current option is only offered again once every other candidate has been.
//!
//! Matching lowercases both sides with [`str::to_lowercase`]; there is no
//! locale-aware collation.
//!
//! This module is time-unaware. Whether the buffer has expired is decided by
//! the controller, which owns the timer.

use crate::logging::targets;
use crate::model::ComboboxModel;
use unicode_segmentation::UnicodeSegmentation;

/// The outcome of feeding one character to type-ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAheadResult {
    /// The buffer after appending the typed character.
    pub buffer: String,
    /// The option the buffer resolved to, if any.
    pub match_index: Option<usize>,
}

/// Append `typed` to the buffer and resolve it against `model`.
///
/// When `buffer_expired` is set the previous buffer is discarded first.
pub fn resolve(
    typed: &str,
    model: &dyn ComboboxModel,
    buffer: &str,
    buffer_expired: bool,
    start: usize,
) -> TypeAheadResult {
    let mut next = if buffer_expired {
        String::new()
    } else {
        buffer.to_string()
    };
    next.push_str(typed);

    let match_index = find_match(model, &next, start);
    tracing::trace!(
        target: targets::TYPE_AHEAD,
        buffer = %next,
        start,
        ?match_index,
        "resolved type-ahead buffer"
    );

    TypeAheadResult {
        buffer: next,
        match_index,
    }
}

/// Resolve a complete search string to an option index.
pub fn find_match(model: &dyn ComboboxModel, search: &str, start: usize) -> Option<usize> {
    let needle = search.to_lowercase();
    let initial = needle.graphemes(true).next()?;
    let start = match model.row_count() {
        0 => return None,
        len => start % len,
    };

    if let Some(index) = first_from(&model.filter_prefix(&needle), start) {
        return Some(index);
    }

    if is_repeated_letter(&needle) {
        return first_from(&model.filter_prefix(initial), start);
    }

    None
}

/// Whether every character of `buffer` is the same, ignoring case.
///
/// Characters are grapheme clusters, so `"e\u{301}e\u{301}"` counts as one
/// letter typed twice.
pub fn is_repeated_letter(buffer: &str) -> bool {
    let lower = buffer.to_lowercase();
    let mut graphemes = lower.graphemes(true);
    match graphemes.next() {
        Some(first) => graphemes.all(|g| g == first),
        None => false,
    }
}

/// The first candidate at or after `start`, wrapping to the lowest one.
fn first_from(candidates: &[usize], start: usize) -> Option<usize> {
    candidates
        .iter()
        .copied()
        .find(|&i| i >= start)
        .or_else(|| candidates.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OptionList;

    fn fruit() -> OptionList {
        OptionList::from_names(["Apple", "Banana", "Avocado", "Apricot"])
    }

    #[test]
    fn test_first_prefix_match_from_start() {
        let model = OptionList::from_names(["Viet Nam", "Venezuela"]);
        let result = resolve("v", &model, "", false, 0);
        assert_eq!(result.buffer, "v");
        assert_eq!(result.match_index, Some(0));
    }

    #[test]
    fn test_search_starts_past_selection() {
        let model = OptionList::from_names(["Viet Nam", "Venezuela"]);
        assert_eq!(resolve("v", &model, "", false, 1).match_index, Some(1));
    }

    #[test]
    fn test_repeated_letter_cycles() {
        let model = fruit();

        let first = resolve("a", &model, "", false, 1);
        assert_eq!(first.match_index, Some(2));

        let second = resolve("a", &model, &first.buffer, false, 3);
        assert_eq!(second.buffer, "aa");
        assert_eq!(second.match_index, Some(3));

        let third = resolve("a", &model, &second.buffer, false, 4);
        assert_eq!(third.buffer, "aaa");
        assert_eq!(third.match_index, Some(0));
    }

    #[test]
    fn test_multi_letter_prefix_beats_cycling() {
        let model = OptionList::from_names(["Aardvark", "Apple", "Aaron"]);
        // "aa" is a real prefix, so the exact branch answers.
        assert_eq!(find_match(&model, "aa", 1), Some(2));
        assert_eq!(find_match(&model, "aa", 0), Some(0));
    }

    #[test]
    fn test_expired_buffer_restarts() {
        let model = fruit();
        let result = resolve("b", &model, "ap", true, 0);
        assert_eq!(result.buffer, "b");
        assert_eq!(result.match_index, Some(1));
    }

    #[test]
    fn test_no_match() {
        let model = fruit();
        let result = resolve("x", &model, "ap", false, 0);
        assert_eq!(result.buffer, "apx");
        assert_eq!(result.match_index, None);
    }

    #[test]
    fn test_case_insensitive() {
        let model = fruit();
        assert_eq!(find_match(&model, "BAN", 0), Some(1));
        assert_eq!(find_match(&model, "aA", 1), Some(2));
    }

    #[test]
    fn test_empty_inputs() {
        let model = fruit();
        assert_eq!(find_match(&model, "", 0), None);
        assert_eq!(find_match(&OptionList::<()>::empty(), "a", 0), None);
    }

    #[test]
    fn test_is_repeated_letter() {
        assert!(is_repeated_letter("aaa"));
        assert!(is_repeated_letter("aA"));
        assert!(is_repeated_letter("z"));
        assert!(!is_repeated_letter("ab"));
        assert!(!is_repeated_letter(""));
        assert!(is_repeated_letter("e\u{301}E\u{301}"));
        assert!(!is_repeated_letter("e\u{301}e"));
    }

    #[test]
    fn test_combining_sequence_cycles() {
        let model = OptionList::from_names([
            "e\u{301}clair",
            "Banana",
            "e\u{301}toile",
            "e\u{301}te\u{301}",
        ]);

        let first = resolve("e\u{301}", &model, "", false, 1);
        assert_eq!(first.match_index, Some(2));

        let second = resolve("e\u{301}", &model, &first.buffer, false, 3);
        assert_eq!(second.buffer, "e\u{301}e\u{301}");
        assert_eq!(second.match_index, Some(3));

        let third = resolve("e\u{301}", &model, &second.buffer, false, 4);
        assert_eq!(third.match_index, Some(0));
    }

    #[test]
    fn test_candidates_wrap_past_end() {
        let model = fruit();
        assert_eq!(find_match(&model, "ap", 3), Some(3));
        assert_eq!(find_match(&model, "ap", 4), Some(0));
        assert_eq!(find_match(&model, "b", 2), Some(1));
    }
}
