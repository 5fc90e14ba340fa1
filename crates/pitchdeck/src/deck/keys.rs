/// Keys the deck reacts to. Everything else maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckKey {
    ArrowRight,
    ArrowLeft,
    Space,
    Enter,
    Backspace,
    Home,
    End,
    F,
    F11,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
    /// Cmd on macOS, Ctrl elsewhere.
    pub command: bool,
}

impl KeyModifiers {
    pub const NONE: KeyModifiers = KeyModifiers {
        alt: false,
        ctrl: false,
        shift: false,
        command: false,
    };

    /// Shift alone does not count; it only changes the letter's case.
    fn any_chord(&self) -> bool {
        self.alt || self.ctrl || self.command
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: DeckKey,
    pub modifiers: KeyModifiers,
    /// A text field had keyboard focus when the key went down.
    pub in_text_input: bool,
}

impl KeyPress {
    pub fn new(key: DeckKey) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            in_text_input: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn in_text_input(mut self) -> Self {
        self.in_text_input = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckAction {
    Next,
    Previous,
    First,
    Last,
    ToggleFullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub action: DeckAction,
    /// The host must not also run its own handler for this key.
    pub prevent_default: bool,
}

impl KeyBinding {
    const fn plain(action: DeckAction) -> Self {
        Self {
            action,
            prevent_default: false,
        }
    }
}

/// Resolve a key press to a deck action. Presses inside text inputs never
/// resolve.
pub fn resolve(press: &KeyPress) -> Option<KeyBinding> {
    if press.in_text_input {
        return None;
    }
    match press.key {
        DeckKey::ArrowRight | DeckKey::Space | DeckKey::Enter => {
            Some(KeyBinding::plain(DeckAction::Next))
        }
        DeckKey::ArrowLeft | DeckKey::Backspace => Some(KeyBinding::plain(DeckAction::Previous)),
        DeckKey::Home => Some(KeyBinding::plain(DeckAction::First)),
        DeckKey::End => Some(KeyBinding::plain(DeckAction::Last)),
        DeckKey::F if !press.modifiers.any_chord() => {
            Some(KeyBinding::plain(DeckAction::ToggleFullscreen))
        }
        DeckKey::F11 => Some(KeyBinding {
            action: DeckAction::ToggleFullscreen,
            prevent_default: true,
        }),
        DeckKey::F | DeckKey::Other => None,
    }
}
