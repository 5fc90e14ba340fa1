//! Deck navigation and access control.
//!
//! [`Deck`] is the single owner of [`DeckState`]. Views read the state and
//! dispatch back through the deck's operations; nothing else mutates it.

pub mod access;
pub mod fullscreen;
pub mod keys;
pub mod listeners;
pub mod state;

pub use access::is_locked;
pub use fullscreen::ViewportFullscreen;
pub use keys::{DeckKey, KeyModifiers, KeyPress};
pub use listeners::{HostEvent, ListenerRegistry};
pub use state::{Deck, DeckConfig, DeckError, DeckState};
