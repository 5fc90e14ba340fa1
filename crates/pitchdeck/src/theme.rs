use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub panel_background: Color32,
    /// Scrim drawn over a locked slide.
    pub lock_scrim: Color32,
    pub h1_size: f32,
    pub h2_size: f32,
    pub body_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x12, 0x14, 0x1C),
            foreground: Color32::from_rgb(0xC8, 0xCC, 0xD6),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x5C, 0xB8, 0xFF),
            panel_background: Color32::from_rgb(0x22, 0x26, 0x33),
            lock_scrim: Color32::from_rgba_unmultiplied(0x08, 0x0A, 0x10, 0xD0),
            h1_size: 96.0,
            h2_size: 56.0,
            body_size: 40.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::WHITE,
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            heading_color: Color32::from_rgb(0x16, 0x21, 0x3E),
            accent: Color32::from_rgb(0x0F, 0x5F, 0xC0),
            panel_background: Color32::from_rgb(0xF2, 0xF4, 0xF8),
            lock_scrim: Color32::from_rgba_unmultiplied(0xFF, 0xFF, 0xFF, 0xC8),
            h1_size: 96.0,
            h2_size: 56.0,
            body_size: 40.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn is_known(name: &str) -> bool {
        matches!(name, "light" | "dark")
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        let alpha = (color.a() as f32 * opacity.clamp(0.0, 1.0)) as u8;
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
    }
}
