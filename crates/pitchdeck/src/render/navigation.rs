use eframe::egui::{self, Pos2, Sense, Stroke};

use crate::deck::{Deck, DeckState};
use crate::theme::Theme;

/// Which previous/next triggers are live for the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavAffordance {
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl NavAffordance {
    pub fn for_state(state: &DeckState) -> Self {
        Self {
            prev_enabled: state.current_slide() != 0,
            next_enabled: state.current_slide() != state.last_reachable(),
        }
    }

    pub fn activate_prev(&self, deck: &mut Deck) {
        if self.prev_enabled {
            deck.prev_slide();
        }
    }

    pub fn activate_next(&self, deck: &mut Deck) {
        if self.next_enabled {
            deck.next_slide();
        }
    }
}

/// Edge hit-zones for previous/next plus the fullscreen toggle.
pub fn show(ui: &egui::Ui, deck: &mut Deck, theme: &Theme, rect: egui::Rect, scale: f32) {
    let affordance = NavAffordance::for_state(deck.state());
    let zone_width = rect.width() * 0.12;
    let zone_height = rect.height() * 0.7;

    let prev_zone = egui::Rect::from_center_size(
        Pos2::new(rect.left() + zone_width / 2.0, rect.center().y),
        egui::vec2(zone_width, zone_height),
    );
    let next_zone = egui::Rect::from_center_size(
        Pos2::new(rect.right() - zone_width / 2.0, rect.center().y),
        egui::vec2(zone_width, zone_height),
    );

    let prev = ui.interact(prev_zone, ui.id().with("nav_prev"), Sense::click());
    draw_chevron(ui, theme, prev_zone, scale, false, affordance.prev_enabled, prev.hovered());
    if prev.clicked() {
        affordance.activate_prev(deck);
    }

    let next = ui.interact(next_zone, ui.id().with("nav_next"), Sense::click());
    draw_chevron(ui, theme, next_zone, scale, true, affordance.next_enabled, next.hovered());
    if next.clicked() {
        affordance.activate_next(deck);
    }

    fullscreen_toggle(ui, deck, theme, rect, scale);
}

fn draw_chevron(
    ui: &egui::Ui,
    theme: &Theme,
    zone: egui::Rect,
    scale: f32,
    pointing_right: bool,
    enabled: bool,
    hovered: bool,
) {
    let opacity = match (enabled, hovered) {
        (false, _) => 0.08,
        (true, true) => 0.8,
        (true, false) => 0.25,
    };
    let color = Theme::with_opacity(theme.foreground, opacity);
    let half = 22.0 * scale;
    let c = zone.center();
    let (tip_x, tail_x) = if pointing_right {
        (c.x + half / 2.0, c.x - half / 2.0)
    } else {
        (c.x - half / 2.0, c.x + half / 2.0)
    };
    ui.painter().add(egui::Shape::line(
        vec![
            Pos2::new(tail_x, c.y - half),
            Pos2::new(tip_x, c.y),
            Pos2::new(tail_x, c.y + half),
        ],
        Stroke::new(4.0 * scale, color),
    ));
}

fn fullscreen_toggle(ui: &egui::Ui, deck: &mut Deck, theme: &Theme, rect: egui::Rect, scale: f32) {
    let size = 36.0 * scale;
    let button = egui::Rect::from_min_size(
        Pos2::new(rect.right() - size - 16.0 * scale, rect.top() + 16.0 * scale),
        egui::vec2(size, size),
    );
    let response = ui
        .interact(button, ui.id().with("fullscreen_toggle"), Sense::click())
        .on_hover_text(if deck.state().is_fullscreen() {
            "Exit fullscreen (F)"
        } else {
            "Fullscreen (F)"
        });

    let opacity = if deck.is_fullscreen_pending() {
        0.15
    } else if response.hovered() {
        0.8
    } else {
        0.3
    };
    let stroke = Stroke::new(2.5 * scale, Theme::with_opacity(theme.foreground, opacity));
    let arm = size * 0.3;
    let inner = button.shrink(size * 0.15);
    // Corner brackets point outwards to enter, inwards to leave.
    let inward = deck.state().is_fullscreen();
    for (corner, dx, dy) in [
        (inner.left_top(), 1.0, 1.0),
        (inner.right_top(), -1.0, 1.0),
        (inner.left_bottom(), 1.0, -1.0),
        (inner.right_bottom(), -1.0, -1.0),
    ] {
        let (dx, dy) = if inward { (-dx, -dy) } else { (dx, dy) };
        let anchor = if inward {
            corner + egui::vec2(-dx * arm, -dy * arm)
        } else {
            corner
        };
        ui.painter().add(egui::Shape::line(
            vec![
                anchor + egui::vec2(dx * arm, 0.0),
                anchor,
                anchor + egui::vec2(0.0, dy * arm),
            ],
            stroke,
        ));
    }

    if response.clicked() {
        deck.toggle_fullscreen();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::fullscreen::{FullscreenHost, FullscreenRequest};
    use crate::deck::{DeckConfig, ListenerRegistry};
    use futures::FutureExt;
    use futures::future;

    struct GrantAll;

    impl FullscreenHost for GrantAll {
        fn request(&mut self, _enter: bool) -> FullscreenRequest {
            future::ready(Ok(())).boxed_local()
        }
    }

    fn deck() -> (Deck, ListenerRegistry) {
        let registry = ListenerRegistry::new();
        let config = DeckConfig::new(10).with_max_preview_slides(3);
        let deck = Deck::mount(config, Box::new(GrantAll), &registry).unwrap();
        (deck, registry)
    }

    #[test]
    fn test_prev_disabled_on_first_slide() {
        let (mut deck, _registry) = deck();
        let nav = NavAffordance::for_state(deck.state());
        assert!(!nav.prev_enabled);
        assert!(nav.next_enabled);

        nav.activate_prev(&mut deck);
        assert_eq!(deck.state().current_slide(), 0);
    }

    #[test]
    fn test_next_disabled_at_preview_boundary() {
        let (mut deck, _registry) = deck();
        deck.go_to_last();
        let nav = NavAffordance::for_state(deck.state());
        assert!(nav.prev_enabled);
        assert!(!nav.next_enabled);

        nav.activate_next(&mut deck);
        assert_eq!(deck.state().current_slide(), 2);
    }

    #[test]
    fn test_stale_affordance_does_not_dispatch() {
        let (mut deck, _registry) = deck();
        deck.go_to_slide(1);
        // Captured before a rapid jump; its disabled flag must still hold.
        let stale = NavAffordance {
            prev_enabled: false,
            next_enabled: false,
        };
        stale.activate_prev(&mut deck);
        stale.activate_next(&mut deck);
        assert_eq!(deck.state().current_slide(), 1);
    }

    #[test]
    fn test_enabled_affordances_navigate() {
        let (mut deck, _registry) = deck();
        NavAffordance::for_state(deck.state()).activate_next(&mut deck);
        assert_eq!(deck.state().current_slide(), 1);
        NavAffordance::for_state(deck.state()).activate_prev(&mut deck);
        assert_eq!(deck.state().current_slide(), 0);
    }

    #[test]
    fn test_single_slide_disables_both() {
        let registry = ListenerRegistry::new();
        let deck = Deck::mount(DeckConfig::new(1), Box::new(GrantAll), &registry).unwrap();
        let nav = NavAffordance::for_state(deck.state());
        assert!(!nav.prev_enabled);
        assert!(!nav.next_enabled);
    }
}
