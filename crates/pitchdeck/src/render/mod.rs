pub mod lock;
pub mod navigation;
pub mod progress;
pub mod slides;
pub mod transition;

use std::time::Instant;

use eframe::egui::{self, FontId, Pos2, Sense};

use crate::auth::AuthCollaborator;
use crate::deck::{self, Deck};
use crate::theme::Theme;

use slides::SlideContent;
use transition::TransitionBoundary;

/// Composition root of the deck: slides behind the transition boundary, the
/// lock overlay, and the navigation chrome on top.
pub struct DeckView {
    slides: Vec<Box<dyn SlideContent>>,
    boundary: TransitionBoundary,
    footer: Option<String>,
}

impl DeckView {
    pub fn new(slides: Vec<Box<dyn SlideContent>>, initial_slide: usize) -> Self {
        Self {
            slides,
            boundary: TransitionBoundary::new(initial_slide),
            footer: None,
        }
    }

    pub fn with_footer(mut self, footer: Option<String>) -> Self {
        self.footer = footer;
        self
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        deck: &mut Deck,
        theme: &Theme,
        auth: &mut dyn AuthCollaborator,
    ) {
        let rect = ui.max_rect();
        let scale = compute_scale(rect);
        let now = Instant::now();
        let locked = deck::is_locked(deck.state());

        self.boundary
            .update(deck.state().current_slide(), deck.state().transition(), now);
        for layer in self.boundary.layers(now) {
            let Some(slide) = self.slides.get(layer.index) else {
                continue;
            };
            let mut child = ui.new_child(
                egui::UiBuilder::new()
                    .max_rect(rect)
                    .id_salt(("slide", layer.index)),
            );
            if !layer.interactive || locked {
                child.disable();
            }
            slide.render(
                &child,
                theme,
                layer.motion.apply(rect),
                layer.motion.opacity,
                scale * layer.motion.scale,
            );
        }
        if self.boundary.is_animating() {
            ui.ctx().request_repaint();
        }

        if locked {
            let hidden = deck.state().locked_slide_count();
            lock::show(ui, theme, rect, scale, hidden, auth);
        }

        self.draw_chrome(ui, deck, theme, rect, scale);
        navigation::show(ui, deck, theme, rect, scale);
        progress::show(ui, deck, &self.slides, theme, rect, scale);
    }

    fn draw_chrome(
        &self,
        ui: &egui::Ui,
        deck: &mut Deck,
        theme: &Theme,
        rect: egui::Rect,
        scale: f32,
    ) {
        let muted = Theme::with_opacity(theme.foreground, 0.4);

        if let Some(footer) = &self.footer {
            let galley = ui.painter().layout_no_wrap(
                footer.clone(),
                FontId::proportional(14.0 * scale),
                muted,
            );
            let pos = Pos2::new(rect.left() + 24.0 * scale, rect.bottom() - 30.0 * scale);
            ui.painter().galley(pos, galley, muted);
        }

        let state = deck.state();
        let counter = format!("{} / {}", state.current_slide() + 1, state.total_slides());
        let galley =
            ui.painter()
                .layout_no_wrap(counter, FontId::monospace(14.0 * scale), muted);
        let pos = Pos2::new(
            rect.right() - galley.size().x - 24.0 * scale,
            rect.bottom() - 30.0 * scale,
        );
        ui.painter().galley(pos, galley, muted);

        // Transition picker: cycles the preset used by the next navigation.
        let label = format!("Transition: {}", state.transition().display_name());
        let galley =
            ui.painter()
                .layout_no_wrap(label, FontId::proportional(14.0 * scale), muted);
        let picker = egui::Rect::from_min_size(
            Pos2::new(rect.left() + 24.0 * scale, rect.top() + 20.0 * scale),
            galley.size(),
        )
        .expand(6.0 * scale);
        let response = ui.interact(picker, ui.id().with("transition_picker"), Sense::click());
        let color = if response.hovered() {
            theme.accent
        } else {
            muted
        };
        ui.painter()
            .galley(picker.min + egui::vec2(6.0, 6.0) * scale, galley, color);
        if response.clicked() {
            let next = deck.state().transition().cycled();
            deck.set_transition(next);
        }
    }
}

/// Slides are laid out for 1920x1080 and scaled to fit.
pub fn compute_scale(rect: egui::Rect) -> f32 {
    (rect.width() / 1920.0).min(rect.height() / 1080.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::fullscreen::{FullscreenError, FullscreenHost, FullscreenRequest};
    use crate::deck::{DeckConfig, ListenerRegistry};
    use crate::parser::Slide;
    use futures::FutureExt;
    use futures::future;

    struct Headless;

    impl FullscreenHost for Headless {
        fn request(&mut self, _enter: bool) -> FullscreenRequest {
            future::ready(Err(FullscreenError::Unsupported)).boxed_local()
        }
    }

    #[derive(Default)]
    struct CountingAuth {
        requests: usize,
    }

    impl AuthCollaborator for CountingAuth {
        fn request_sign_in(&mut self) {
            self.requests += 1;
        }
    }

    /// A 10-slide deck with a 3-slide preview, driven frame by frame.
    struct Screen {
        ctx: egui::Context,
        view: DeckView,
        deck: Deck,
        _registry: ListenerRegistry,
        theme: Theme,
        auth: CountingAuth,
        time: f64,
    }

    impl Screen {
        fn new(start: usize, authenticated: bool) -> Self {
            let registry = ListenerRegistry::new();
            let config = DeckConfig::new(10)
                .with_max_preview_slides(3)
                .authenticated(authenticated);
            let mut deck = Deck::mount(config, Box::new(Headless), &registry).unwrap();
            deck.go_to_slide(start);
            let slides: Vec<Box<dyn SlideContent>> = (1..=10)
                .map(|n| {
                    Box::new(Slide {
                        heading: format!("Slide {n}"),
                        ..Default::default()
                    }) as Box<dyn SlideContent>
                })
                .collect();
            Self {
                ctx: egui::Context::default(),
                view: DeckView::new(slides, deck.state().current_slide()),
                deck,
                _registry: registry,
                theme: Theme::dark(),
                auth: CountingAuth::default(),
                time: 0.0,
            }
        }

        fn frame(&mut self, events: Vec<egui::Event>) {
            self.time += 1.0 / 60.0;
            let input = egui::RawInput {
                screen_rect: Some(egui::Rect::from_min_size(
                    Pos2::ZERO,
                    egui::vec2(1920.0, 1080.0),
                )),
                time: Some(self.time),
                events,
                ..Default::default()
            };
            let Self {
                ctx,
                view,
                deck,
                theme,
                auth,
                ..
            } = self;
            let _ = ctx.run(input, |ctx| {
                egui::CentralPanel::default()
                    .frame(egui::Frame::new().inner_margin(0.0))
                    .show(ctx, |ui| view.show(ui, deck, theme, auth));
            });
        }

        fn click(&mut self, pos: Pos2) {
            let button = |pressed| egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                modifiers: egui::Modifiers::NONE,
            };
            self.frame(vec![egui::Event::PointerMoved(pos)]);
            self.frame(vec![button(true)]);
            self.frame(vec![button(false)]);
        }

        /// Click down the vertical center line of the lock card until a
        /// sign-in request arrives.
        fn find_sign_in_button(&mut self) -> Option<Pos2> {
            self.frame(Vec::new());
            (390..=690).step_by(10).find_map(|y| {
                let pos = Pos2::new(960.0, y as f32);
                self.click(pos);
                (self.auth.requests > 0).then_some(pos)
            })
        }
    }

    #[test]
    fn test_lock_card_requests_sign_in() {
        let mut locked = Screen::new(2, false);
        assert!(deck::is_locked(locked.deck.state()));
        let button = locked
            .find_sign_in_button()
            .expect("lock card offers a sign-in button");
        assert_eq!(locked.auth.requests, 1);
        assert_eq!(locked.deck.state().current_slide(), 2);

        let mut preview = Screen::new(1, false);
        preview.frame(Vec::new());
        preview.click(button);
        assert_eq!(preview.auth.requests, 0);
        assert_eq!(preview.deck.state().current_slide(), 1);

        let mut signed_in = Screen::new(2, true);
        assert!(!deck::is_locked(signed_in.deck.state()));
        assert_eq!(signed_in.find_sign_in_button(), None);
        assert_eq!(signed_in.auth.requests, 0);
    }

    #[test]
    fn test_lock_scrim_swallows_clicks_on_the_slide() {
        let mut locked = Screen::new(2, false);
        locked.frame(Vec::new());
        locked.click(Pos2::new(960.0, 200.0));
        locked.click(Pos2::new(600.0, 800.0));
        assert_eq!(locked.auth.requests, 0);
        assert_eq!(locked.deck.state().current_slide(), 2);
        assert!(deck::is_locked(locked.deck.state()));
    }

    #[test]
    fn test_compute_scale_fits_smaller_axis() {
        let full_hd = egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(1920.0, 1080.0));
        assert_eq!(compute_scale(full_hd), 1.0);

        let tall = egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(960.0, 1080.0));
        assert_eq!(compute_scale(tall), 0.5);
    }
}
