//! Index arithmetic for keyboard navigation.

use crate::action::Action;

/// Number of options skipped by `PageUp`/`PageDown`.
pub const PAGE_SIZE: usize = 10;

/// Compute the highlighted index after `action`, using [`PAGE_SIZE`].
///
/// The result is always within `0..=max_index`. Actions that do not navigate
/// return `current` unchanged.
#[inline]
pub fn next_index(current: usize, max_index: usize, action: Action) -> usize {
    next_index_paged(current, max_index, action, PAGE_SIZE)
}

/// Compute the highlighted index after `action` with a custom page size.
pub fn next_index_paged(current: usize, max_index: usize, action: Action, page_size: usize) -> usize {
    match action {
        Action::First => 0,
        Action::Last => max_index,
        Action::Previous => current.saturating_sub(1),
        Action::Next => current.saturating_add(1).min(max_index),
        Action::PageUp => current.saturating_sub(page_size),
        Action::PageDown => current.saturating_add(page_size).min(max_index),
        _ => current,
    }
}
