use eframe::egui::{self, FontId, Pos2, Sense};

use super::slides::SlideContent;
use crate::deck::{Deck, DeckState};
use crate::theme::Theme;

/// What the progress strip shows for the current viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressModel {
    /// One dot per reachable slide.
    pub dots: usize,
    pub current: usize,
    /// Slides hidden beyond the preview window, if any.
    pub locked: Option<usize>,
}

impl ProgressModel {
    pub fn for_state(state: &DeckState) -> Self {
        let locked = state.locked_slide_count();
        Self {
            dots: state.effective_slide_count(),
            current: state.current_slide(),
            locked: (!state.is_authenticated() && locked > 0).then_some(locked),
        }
    }
}

pub fn show(
    ui: &egui::Ui,
    deck: &mut Deck,
    slides: &[Box<dyn SlideContent>],
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) {
    let model = ProgressModel::for_state(deck.state());
    let spacing = 22.0 * scale;
    let radius = 5.0 * scale;
    let hit = egui::vec2(spacing, spacing);
    let y = rect.bottom() - 36.0 * scale;

    let label = model.locked.map(|n| {
        let text = if n == 1 {
            "+1 locked slide".to_string()
        } else {
            format!("+{n} locked slides")
        };
        ui.painter().layout_no_wrap(
            text,
            FontId::proportional(14.0 * scale),
            Theme::with_opacity(theme.foreground, 0.45),
        )
    });
    let label_width = label
        .as_ref()
        .map(|g| g.size().x + 16.0 * scale)
        .unwrap_or(0.0);
    let strip_width = model.dots as f32 * spacing + label_width;
    let mut x = rect.center().x - strip_width / 2.0 + spacing / 2.0;

    let mut clicked = None;
    for i in 0..model.dots {
        let center = Pos2::new(x, y);
        let response = ui.interact(
            egui::Rect::from_center_size(center, hit),
            ui.id().with(("progress_dot", i)),
            Sense::click(),
        );
        let response = match slides.get(i).map(|s| s.title()) {
            Some(title) if !title.is_empty() => response.on_hover_text(title),
            _ => response,
        };
        let (r, color) = if i == model.current {
            (radius * 1.4, theme.accent)
        } else if response.hovered() {
            (radius, Theme::with_opacity(theme.foreground, 0.7))
        } else {
            (radius, Theme::with_opacity(theme.foreground, 0.3))
        };
        ui.painter().circle_filled(center, r, color);
        if response.clicked() {
            clicked = Some(i);
        }
        x += spacing;
    }

    if let Some(galley) = label {
        let pos = Pos2::new(x - spacing / 2.0 + 16.0 * scale, y - galley.size().y / 2.0);
        ui.painter().galley(pos, galley, theme.foreground);
    }

    if let Some(index) = clicked {
        deck.go_to_slide(index);
    }
}
