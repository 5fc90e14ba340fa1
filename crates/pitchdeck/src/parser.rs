//! YAML deck files.
//!
//! ```yaml
//! title: Acme Seed Round
//! theme: dark
//! transition: slide
//! max_preview_slides: 3
//! slides:
//!   - heading: The Problem
//!     body: Teams lose a day a week to status meetings.
//!     bullets:
//!       - 42% of meetings have no agenda
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::render::transition::TransitionKind;
use crate::theme::Theme;

#[derive(Debug, Clone, Deserialize)]
pub struct Presentation {
    #[serde(flatten)]
    pub meta: PresentationMeta,
    #[serde(default)]
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PresentationMeta {
    pub title: Option<String>,
    pub theme: Option<String>,
    pub transition: Option<TransitionKind>,
    pub max_preview_slides: Option<usize>,
    pub footer: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Slide {
    #[serde(default)]
    pub heading: String,
    pub subheading: Option<String>,
    pub body: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

impl Slide {
    fn is_blank(&self) -> bool {
        self.heading.trim().is_empty()
            && self.subheading.as_deref().is_none_or(|s| s.trim().is_empty())
            && self.body.as_deref().is_none_or(|s| s.trim().is_empty())
            && self.bullets.iter().all(|b| b.trim().is_empty())
    }
}

pub fn parse(content: &str) -> Result<Presentation> {
    let mut presentation: Presentation =
        serde_yaml::from_str(content).context("Failed to parse deck file")?;

    if let Some(theme) = presentation.meta.theme.as_deref() {
        if !Theme::is_known(theme) {
            anyhow::bail!("Invalid theme: {theme}. Must be 'light' or 'dark'.");
        }
    }
    if presentation.meta.max_preview_slides == Some(0) {
        anyhow::bail!("max_preview_slides must be at least 1");
    }

    presentation.slides.retain(|s| !s.is_blank());
    Ok(presentation)
}
