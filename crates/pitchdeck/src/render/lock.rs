use eframe::egui::{self, FontId, Pos2, Sense};

use crate::auth::AuthCollaborator;
use crate::theme::Theme;

/// Cover the slide with a scrim that swallows pointer input and offers
/// sign-in.
pub fn show(
    ui: &mut egui::Ui,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
    locked_slides: usize,
    auth: &mut dyn AuthCollaborator,
) {
    // Registered before the card so the button stays clickable on top.
    let _blocker = ui.interact(rect, ui.id().with("lock_overlay"), Sense::click_and_drag());
    ui.painter().rect_filled(rect, 0.0, theme.lock_scrim);

    let card = egui::Rect::from_center_size(rect.center(), egui::vec2(720.0, 300.0) * scale);
    ui.painter().rect_filled(card, 16.0 * scale, theme.panel_background);

    let heading = ui.painter().layout(
        "You've reached the end of the preview".to_string(),
        FontId::proportional(34.0 * scale),
        theme.heading_color,
        card.width() - 80.0 * scale,
    );
    let detail = ui.painter().layout(
        match locked_slides {
            1 => "Sign in to see the last slide.".to_string(),
            n => format!("Sign in to see the remaining {n} slides."),
        },
        FontId::proportional(22.0 * scale),
        Theme::with_opacity(theme.foreground, 0.8),
        card.width() - 80.0 * scale,
    );

    let mut y = card.top() + 48.0 * scale;
    let heading_pos = Pos2::new(card.center().x - heading.size().x / 2.0, y);
    y += heading.size().y + 20.0 * scale;
    let detail_pos = Pos2::new(card.center().x - detail.size().x / 2.0, y);
    y += detail.size().y + 40.0 * scale;
    ui.painter().galley(heading_pos, heading, theme.heading_color);
    ui.painter().galley(detail_pos, detail, theme.foreground);

    let button_rect = egui::Rect::from_center_size(
        Pos2::new(card.center().x, y + 24.0 * scale),
        egui::vec2(260.0, 52.0) * scale,
    );
    let button = egui::Button::new(
        egui::RichText::new("Sign in to continue")
            .size(20.0 * scale)
            .color(theme.background),
    )
    .fill(theme.accent)
    .corner_radius(10.0 * scale);
    if ui.put(button_rect, button).clicked() {
        tracing::debug!("sign-in requested from lock overlay");
        auth.request_sign_in();
    }
}
