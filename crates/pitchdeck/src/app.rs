use std::path::PathBuf;

use anyhow::Context as _;
use eframe::egui;

use crate::auth::PassphraseLogin;
use crate::config::Config;
use crate::deck::keys;
use crate::deck::{
    Deck, DeckConfig, DeckKey, HostEvent, KeyModifiers, KeyPress, ListenerRegistry,
    ViewportFullscreen,
};
use crate::parser::{self, Presentation, PresentationMeta};
use crate::render::DeckView;
use crate::render::slides::SlideContent;
use crate::render::transition::TransitionKind;
use crate::theme::Theme;

/// Flags given on the command line. Each one overrides the deck file and the
/// user config.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub windowed: bool,
    /// 1-indexed.
    pub start_slide: Option<usize>,
    pub transition: Option<TransitionKind>,
    pub max_preview_slides: Option<usize>,
    pub unlocked: bool,
}

/// Everything needed to start a session, after merging all sources.
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    theme: String,
    transition: TransitionKind,
    max_preview_slides: usize,
    /// 0-indexed, clamped to the reachable range after mount.
    start_slide: usize,
    authenticated: bool,
    allow_fullscreen: bool,
    passphrase: Option<String>,
}

fn resolve_settings(options: &LaunchOptions, meta: &PresentationMeta, config: &Config) -> Settings {
    let defaults = config.defaults.clone().unwrap_or_default();

    let config_transition = defaults.transition.as_deref().and_then(|name| {
        let kind = TransitionKind::from_name(name);
        if kind.is_none() {
            tracing::warn!("ignoring invalid defaults.transition in config: {name}");
        }
        kind
    });

    let config_theme = defaults.theme.filter(|name| {
        let known = Theme::is_known(name);
        if !known {
            tracing::warn!("ignoring invalid defaults.theme in config: {name}");
        }
        known
    });

    let start_slide = match options.start_slide {
        Some(n) => n.saturating_sub(1),
        None => match defaults.start_mode.as_deref() {
            Some("first") | None => 0,
            Some(n) => n
                .parse::<usize>()
                .map(|n| n.saturating_sub(1))
                .unwrap_or_else(|_| {
                    tracing::warn!("ignoring invalid defaults.start_mode in config: {n}");
                    0
                }),
        },
    };

    Settings {
        theme: meta
            .theme
            .clone()
            .or(config_theme)
            .unwrap_or_else(|| "dark".to_string()),
        transition: options
            .transition
            .or(meta.transition)
            .or(config_transition)
            .unwrap_or_default(),
        max_preview_slides: options
            .max_preview_slides
            .or(meta.max_preview_slides)
            .or(defaults.max_preview_slides)
            .unwrap_or(crate::deck::state::DEFAULT_MAX_PREVIEW_SLIDES),
        start_slide,
        authenticated: options.unlocked,
        allow_fullscreen: config.allow_fullscreen(),
        passphrase: config.resolve_passphrase(),
    }
}

fn deck_key(key: egui::Key) -> DeckKey {
    match key {
        egui::Key::ArrowRight => DeckKey::ArrowRight,
        egui::Key::ArrowLeft => DeckKey::ArrowLeft,
        egui::Key::Space => DeckKey::Space,
        egui::Key::Enter => DeckKey::Enter,
        egui::Key::Backspace => DeckKey::Backspace,
        egui::Key::Home => DeckKey::Home,
        egui::Key::End => DeckKey::End,
        egui::Key::F => DeckKey::F,
        egui::Key::F11 => DeckKey::F11,
        _ => DeckKey::Other,
    }
}

struct PresentationApp {
    deck: Deck,
    view: DeckView,
    registry: ListenerRegistry,
    theme: Theme,
    login: PassphraseLogin,
    /// Last fullscreen status reported by the window, for change detection.
    observed_fullscreen: Option<bool>,
}

impl PresentationApp {
    fn new(
        ctx: &egui::Context,
        presentation: Presentation,
        settings: Settings,
    ) -> Result<Self, crate::deck::DeckError> {
        let registry = ListenerRegistry::new();
        let config = DeckConfig::new(presentation.slides.len())
            .with_transition(settings.transition)
            .with_max_preview_slides(settings.max_preview_slides)
            .authenticated(settings.authenticated);
        let host = ViewportFullscreen::new(ctx.clone(), settings.allow_fullscreen);
        let mut deck = Deck::mount(config, Box::new(host), &registry)?;
        deck.go_to_slide(settings.start_slide.min(deck.state().last_reachable()));

        let slides: Vec<Box<dyn SlideContent>> = presentation
            .slides
            .into_iter()
            .map(|s| Box::new(s) as Box<dyn SlideContent>)
            .collect();
        let view = DeckView::new(slides, deck.state().current_slide())
            .with_footer(presentation.meta.footer);
        debug_assert_eq!(view.slide_count(), deck.state().total_slides());
        let theme = Theme::from_name(&settings.theme);
        tracing::debug!(theme = %theme.name, "theme selected");

        Ok(Self {
            deck,
            view,
            registry,
            theme,
            login: PassphraseLogin::new(settings.passphrase),
            observed_fullscreen: None,
        })
    }

    /// Translate this frame's window input into host events for the deck.
    fn forward_host_events(&mut self, ctx: &egui::Context) {
        let in_text_input = ctx.wants_keyboard_input();
        let (presses, fullscreen) = ctx.input(|i| {
            let presses: Vec<(egui::Key, KeyPress)> = i
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => {
                        let press = KeyPress::new(deck_key(*key)).with_modifiers(KeyModifiers {
                            alt: modifiers.alt,
                            ctrl: modifiers.ctrl,
                            shift: modifiers.shift,
                            command: modifiers.command,
                        });
                        let press = if in_text_input {
                            press.in_text_input()
                        } else {
                            press
                        };
                        Some((*key, press))
                    }
                    _ => None,
                })
                .collect();
            (presses, i.viewport().fullscreen)
        });

        for (key, press) in presses {
            if keys::resolve(&press).is_some_and(|b| b.prevent_default) {
                ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, key));
            }
            if !press.in_text_input {
                self.handle_window_shortcut(ctx, key);
            }
            self.registry.dispatch(HostEvent::Key(press));
        }

        if fullscreen.is_some() && fullscreen != self.observed_fullscreen {
            self.observed_fullscreen = fullscreen;
            if let Some(is_fullscreen) = fullscreen {
                self.registry
                    .dispatch(HostEvent::FullscreenChanged(is_fullscreen));
            }
        }
    }

    /// Window-level keys that belong to the host, not the deck.
    fn handle_window_shortcut(&self, ctx: &egui::Context, key: egui::Key) {
        match key {
            egui::Key::Escape if self.observed_fullscreen == Some(true) => {
                // Leaving this way bypasses the deck; it learns of it through
                // the fullscreen-change notification.
                ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
            }
            egui::Key::Q if !self.login.is_open() => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close)
            }
            _ => {}
        }
    }
}

impl eframe::App for PresentationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.forward_host_events(ctx);
        self.deck.process_events();

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                self.view
                    .show(ui, &mut self.deck, &self.theme, &mut self.login);
            });

        if self.login.show(ctx) {
            self.deck.set_authenticated(true);
        }
    }
}

pub fn run(file: PathBuf, options: LaunchOptions) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let presentation =
        parser::parse(&content).with_context(|| format!("Invalid deck file {}", file.display()))?;

    if presentation.slides.is_empty() {
        anyhow::bail!("No slides found in {}", file.display());
    }

    let config = Config::load_or_default();
    let settings = resolve_settings(&options, &presentation.meta, &config);
    tracing::info!(
        slides = presentation.slides.len(),
        transition = %settings.transition,
        preview = settings.max_preview_slides,
        unlocked = settings.authenticated,
        "starting presentation"
    );

    let title = presentation.meta.title.clone().unwrap_or_else(|| {
        format!(
            "pitchdeck - {}",
            file.file_name().unwrap_or_default().to_string_lossy()
        )
    });

    let viewport = if options.windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| {
            let app = PresentationApp::new(&cc.egui_ctx, presentation, settings)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
