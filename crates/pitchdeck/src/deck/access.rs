use super::state::DeckState;

/// Whether the lock overlay covers the current slide.
///
/// The lock engages on the last preview slide itself, so that slide stays
/// visible but cannot be interacted with. It never engages when the preview
/// window already spans the whole deck.
pub fn is_locked(state: &DeckState) -> bool {
    !state.is_authenticated()
        && state.current_slide() + 1 >= state.max_preview_slides()
        && state.total_slides() > state.max_preview_slides()
}
