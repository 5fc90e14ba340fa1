//! Host event subscriptions scoped to the lifetime of their owner.
//!
//! The window loop dispatches raw host events into a [`ListenerRegistry`].
//! Each [`Subscription`] owns a private mailbox that the subscriber drains
//! on its own schedule. Dropping the subscription unregisters it, so a
//! subscriber can never leak a listener or receive events after teardown.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use super::keys::KeyPress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    Keyboard,
    FullscreenChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Key(KeyPress),
    /// The host's fullscreen status changed, for whatever reason.
    FullscreenChanged(bool),
}

impl HostEvent {
    pub fn kind(&self) -> ListenerKind {
        match self {
            Self::Key(_) => ListenerKind::Keyboard,
            Self::FullscreenChanged(_) => ListenerKind::FullscreenChange,
        }
    }
}

struct Listener {
    id: u64,
    kind: ListenerKind,
    mailbox: VecDeque<HostEvent>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<Listener>,
}

/// Per-session bus of host events. Cloning shares the same bus.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    inner: Rc<RefCell<Registry>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, kind: ListenerKind) -> Subscription {
        let mut registry = self.inner.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push(Listener {
            id,
            kind,
            mailbox: VecDeque::new(),
        });
        tracing::trace!(id, ?kind, "listener attached");
        Subscription {
            id,
            kind,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver an event to every live listener of its kind. Returns how many
    /// listeners received it.
    pub fn dispatch(&self, event: HostEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for listener in self
            .inner
            .borrow_mut()
            .listeners
            .iter_mut()
            .filter(|l| l.kind == kind)
        {
            listener.mailbox.push_back(event);
            delivered += 1;
        }
        delivered
    }

    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == kind)
            .count()
    }
}

/// Guard for one registered listener. Unregisters on drop.
pub struct Subscription {
    id: u64,
    kind: ListenerKind,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Take every event queued since the last drain, oldest first.
    pub fn drain(&self) -> Vec<HostEvent> {
        let Some(registry) = self.registry.upgrade() else {
            return Vec::new();
        };
        let mut registry = registry.borrow_mut();
        registry
            .listeners
            .iter_mut()
            .find(|l| l.id == self.id)
            .map(|l| l.mailbox.drain(..).collect())
            .unwrap_or_default()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().listeners.retain(|l| l.id != self.id);
            tracing::trace!(id = self.id, kind = ?self.kind, "listener detached");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_released_on_drop() {
        let registry = ListenerRegistry::new();
        let sub = registry.subscribe(ListenerKind::Keyboard);
        assert_eq!(registry.listener_count(ListenerKind::Keyboard), 1);

        drop(sub);
        assert_eq!(registry.listener_count(ListenerKind::Keyboard), 0);
        assert_eq!(registry.dispatch(HostEvent::FullscreenChanged(true)), 0);
    }

    #[test]
    fn test_dispatch_routes_by_kind() {
        let registry = ListenerRegistry::new();
        let keys = registry.subscribe(ListenerKind::Keyboard);
        let fullscreen = registry.subscribe(ListenerKind::FullscreenChange);

        assert_eq!(registry.dispatch(HostEvent::FullscreenChanged(true)), 1);
        assert!(keys.drain().is_empty());
        assert_eq!(fullscreen.drain(), vec![HostEvent::FullscreenChanged(true)]);
        assert!(fullscreen.drain().is_empty());
    }

    #[test]
    fn test_drain_preserves_order() {
        let registry = ListenerRegistry::new();
        let sub = registry.subscribe(ListenerKind::FullscreenChange);
        registry.dispatch(HostEvent::FullscreenChanged(true));
        registry.dispatch(HostEvent::FullscreenChanged(false));
        assert_eq!(
            sub.drain(),
            vec![
                HostEvent::FullscreenChanged(true),
                HostEvent::FullscreenChanged(false)
            ]
        );
    }

    #[test]
    fn test_subscription_outlives_registry() {
        let registry = ListenerRegistry::new();
        let sub = registry.subscribe(ListenerKind::Keyboard);
        drop(registry);
        assert!(sub.drain().is_empty());
        drop(sub);
    }
}
