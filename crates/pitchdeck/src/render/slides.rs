use std::sync::Arc;

use eframe::egui::{self, FontId, Galley, Pos2};

use crate::parser::Slide;
use crate::theme::Theme;

/// One self-contained slide. The deck only ever draws it by position.
pub trait SlideContent {
    fn title(&self) -> &str;

    fn render(&self, ui: &egui::Ui, theme: &Theme, rect: egui::Rect, opacity: f32, scale: f32);
}

struct Line {
    galley: Arc<Galley>,
    color: egui::Color32,
    bullet: bool,
    gap_after: f32,
}

impl SlideContent for Slide {
    fn title(&self) -> &str {
        &self.heading
    }

    fn render(&self, ui: &egui::Ui, theme: &Theme, rect: egui::Rect, opacity: f32, scale: f32) {
        let painter = ui.painter_at(rect);
        let padding = 80.0 * scale;
        let content = rect.shrink(padding);
        if content.width() <= 0.0 || content.height() <= 0.0 {
            return;
        }

        // A slide with only a heading and subheading is laid out as a cover.
        let is_cover = self.body.is_none() && self.bullets.is_empty();
        let heading_color = Theme::with_opacity(theme.heading_color, opacity);
        let text_color = Theme::with_opacity(theme.foreground, opacity);
        let accent = Theme::with_opacity(theme.accent, opacity);
        let bullet_indent = 48.0 * scale;
        let bullet_size = theme.body_size * 0.9 * scale;

        let mut lines: Vec<Line> = Vec::new();
        let mut push = |text: &str, size: f32, color, wrap: f32, bullet: bool, gap: f32| {
            lines.push(Line {
                galley: painter.layout(text.to_string(), FontId::proportional(size), color, wrap),
                color,
                bullet,
                gap_after: gap * scale,
            });
        };

        if !self.heading.trim().is_empty() {
            let size = if is_cover { theme.h1_size } else { theme.h2_size };
            push(&self.heading, size * scale, heading_color, content.width(), false, 36.0);
        }
        if let Some(sub) = self.subheading.as_deref() {
            let size = theme.body_size * 1.1 * scale;
            push(sub, size, accent, content.width(), false, 28.0);
        }
        if let Some(body) = self.body.as_deref() {
            let size = theme.body_size * scale;
            push(body, size, text_color, content.width(), false, 28.0);
        }
        for bullet in &self.bullets {
            let wrap = content.width() - bullet_indent;
            push(bullet, bullet_size, text_color, wrap, true, 16.0);
        }

        let total: f32 = lines.iter().map(|l| l.galley.size().y + l.gap_after).sum();
        let mut y = if is_cover {
            content.center().y - total / 2.0
        } else {
            content.top()
        };

        for line in lines {
            let size = line.galley.size();
            let x = if is_cover {
                content.center().x - size.x / 2.0
            } else if line.bullet {
                content.left() + bullet_indent
            } else {
                content.left()
            };
            if line.bullet {
                let center = Pos2::new(content.left() + 16.0 * scale, y + bullet_size * 0.6);
                painter.circle_filled(center, 6.0 * scale, accent);
            }
            painter.galley(Pos2::new(x, y), line.galley, line.color);
            y += size.y + line.gap_after;
        }
    }
}
