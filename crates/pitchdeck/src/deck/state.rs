use thiserror::Error;

use super::fullscreen::{FullscreenHost, PendingFullscreen};
use super::keys::{self, DeckAction, KeyPress};
use super::listeners::{HostEvent, ListenerKind, ListenerRegistry, Subscription};
use crate::render::transition::TransitionKind;

pub const DEFAULT_MAX_PREVIEW_SLIDES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("a deck needs at least one slide")]
    NoSlides,
    #[error("the preview window must allow at least one slide")]
    InvalidPreviewLimit,
}

/// Construction parameters for a deck session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckConfig {
    pub total_slides: usize,
    pub initial_transition: TransitionKind,
    pub max_preview_slides: usize,
    pub is_authenticated: bool,
}

impl DeckConfig {
    pub fn new(total_slides: usize) -> Self {
        Self {
            total_slides,
            initial_transition: TransitionKind::default(),
            max_preview_slides: DEFAULT_MAX_PREVIEW_SLIDES,
            is_authenticated: false,
        }
    }

    pub fn with_transition(mut self, kind: TransitionKind) -> Self {
        self.initial_transition = kind;
        self
    }

    pub fn with_max_preview_slides(mut self, max_preview_slides: usize) -> Self {
        self.max_preview_slides = max_preview_slides;
        self
    }

    pub fn authenticated(mut self, is_authenticated: bool) -> Self {
        self.is_authenticated = is_authenticated;
        self
    }
}

/// Everything the deck session knows. Only [`Deck`] can change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckState {
    current_slide: usize,
    total_slides: usize,
    transition: TransitionKind,
    is_fullscreen: bool,
    is_authenticated: bool,
    max_preview_slides: usize,
}

impl DeckState {
    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    pub fn total_slides(&self) -> usize {
        self.total_slides
    }

    pub fn transition(&self) -> TransitionKind {
        self.transition
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn max_preview_slides(&self) -> usize {
        self.max_preview_slides
    }

    /// Number of slides this viewer may reach. Recomputed on every call.
    pub fn effective_slide_count(&self) -> usize {
        if self.is_authenticated {
            self.total_slides
        } else {
            self.max_preview_slides.min(self.total_slides)
        }
    }

    pub fn last_reachable(&self) -> usize {
        self.effective_slide_count().saturating_sub(1)
    }

    /// Slides that exist beyond the preview window for this viewer.
    pub fn locked_slide_count(&self) -> usize {
        self.total_slides - self.effective_slide_count()
    }
}

/// The deck state container.
///
/// Owns [`DeckState`] plus the two host subscriptions it needs for its whole
/// lifetime: keyboard input and fullscreen-change notifications. Both are
/// released when the deck is dropped, together with any fullscreen request
/// still in flight.
pub struct Deck {
    state: DeckState,
    host: Box<dyn FullscreenHost>,
    pending_fullscreen: Option<PendingFullscreen>,
    keyboard: Subscription,
    fullscreen_changes: Subscription,
}

impl Deck {
    pub fn mount(
        config: DeckConfig,
        host: Box<dyn FullscreenHost>,
        registry: &ListenerRegistry,
    ) -> Result<Self, DeckError> {
        if config.total_slides == 0 {
            return Err(DeckError::NoSlides);
        }
        if config.max_preview_slides == 0 {
            return Err(DeckError::InvalidPreviewLimit);
        }

        let state = DeckState {
            current_slide: 0,
            total_slides: config.total_slides,
            transition: config.initial_transition,
            is_fullscreen: false,
            is_authenticated: config.is_authenticated,
            max_preview_slides: config.max_preview_slides,
        };
        tracing::debug!(
            total = state.total_slides,
            reachable = state.effective_slide_count(),
            authenticated = state.is_authenticated,
            "deck mounted"
        );

        let deck = Self {
            state,
            host,
            pending_fullscreen: None,
            keyboard: registry.subscribe(ListenerKind::Keyboard),
            fullscreen_changes: registry.subscribe(ListenerKind::FullscreenChange),
        };
        tracing::trace!(
            keyboard = registry.listener_count(ListenerKind::Keyboard),
            fullscreen = registry.listener_count(ListenerKind::FullscreenChange),
            "host listeners attached"
        );
        Ok(deck)
    }

    pub fn state(&self) -> &DeckState {
        &self.state
    }

    pub fn effective_slide_count(&self) -> usize {
        self.state.effective_slide_count()
    }

    pub fn is_fullscreen_pending(&self) -> bool {
        self.pending_fullscreen.is_some()
    }

    /// Jump to `index` if this viewer may reach it; ignored otherwise.
    pub fn go_to_slide(&mut self, index: usize) {
        if index < self.state.effective_slide_count() {
            self.set_current(index);
        } else {
            tracing::debug!(
                index,
                reachable = self.state.effective_slide_count(),
                "ignored out-of-range slide request"
            );
        }
    }

    pub fn next_slide(&mut self) {
        let next = (self.state.current_slide + 1).min(self.state.last_reachable());
        self.set_current(next);
    }

    pub fn prev_slide(&mut self) {
        self.set_current(self.state.current_slide.saturating_sub(1));
    }

    pub fn go_to_first(&mut self) {
        self.set_current(0);
    }

    pub fn go_to_last(&mut self) {
        self.set_current(self.state.last_reachable());
    }

    fn set_current(&mut self, index: usize) {
        if index != self.state.current_slide {
            tracing::debug!(from = self.state.current_slide, to = index, "navigate");
            self.state.current_slide = index;
        }
    }

    /// Takes effect on the next navigation.
    pub fn set_transition(&mut self, kind: TransitionKind) {
        self.state.transition = kind;
    }

    /// Ask the host to flip fullscreen. Fire-and-forget: a rejection leaves
    /// the state untouched and is never reported to the caller.
    pub fn toggle_fullscreen(&mut self) {
        let target = !self.state.is_fullscreen;
        if self.pending_fullscreen.take().is_some() {
            tracing::debug!("superseding unanswered fullscreen request");
        }
        let request = self.host.request(target);
        self.pending_fullscreen = Some(PendingFullscreen::new(target, request));
        self.poll_fullscreen();
    }

    fn poll_fullscreen(&mut self) {
        let Some(pending) = self.pending_fullscreen.as_mut() else {
            return;
        };
        let Some(result) = pending.poll() else {
            return;
        };
        let target = pending.target;
        self.pending_fullscreen = None;
        match result {
            Ok(()) => self.state.is_fullscreen = target,
            Err(e) => tracing::debug!(enter = target, "fullscreen request dropped: {e}"),
        }
    }

    /// Mirror the host's fullscreen status, whoever changed it.
    pub fn sync_fullscreen(&mut self, is_fullscreen: bool) {
        self.state.is_fullscreen = is_fullscreen;
    }

    /// Update authorization from the surrounding application.
    ///
    /// Gaining access unlocks the rest of the deck in place. Losing it pulls
    /// the current slide back inside the preview window.
    pub fn set_authenticated(&mut self, is_authenticated: bool) {
        if self.state.is_authenticated == is_authenticated {
            return;
        }
        self.state.is_authenticated = is_authenticated;
        tracing::info!(
            authenticated = is_authenticated,
            reachable = self.state.effective_slide_count(),
            "deck authorization changed"
        );
        if self.state.current_slide > self.state.last_reachable() {
            self.set_current(self.state.last_reachable());
        }
    }

    pub fn handle_key(&mut self, press: &KeyPress) {
        let Some(binding) = keys::resolve(press) else {
            return;
        };
        match binding.action {
            DeckAction::Next => self.next_slide(),
            DeckAction::Previous => self.prev_slide(),
            DeckAction::First => self.go_to_first(),
            DeckAction::Last => self.go_to_last(),
            DeckAction::ToggleFullscreen => self.toggle_fullscreen(),
        }
    }

    /// Drain host events and poll any fullscreen request. Call once per frame.
    pub fn process_events(&mut self) {
        for event in self.fullscreen_changes.drain() {
            if let HostEvent::FullscreenChanged(is_fullscreen) = event {
                self.sync_fullscreen(is_fullscreen);
            }
        }
        for event in self.keyboard.drain() {
            if let HostEvent::Key(press) = event {
                self.handle_key(&press);
            }
        }
        self.poll_fullscreen();
    }
}
