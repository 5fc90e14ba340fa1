use eframe::egui;

/// Entry point into whatever sign-in flow the application uses.
///
/// The deck only asks for sign-in. When it succeeds the application reports
/// the new authorization back through `Deck::set_authenticated`.
pub trait AuthCollaborator {
    fn request_sign_in(&mut self);
}

/// Modal passphrase prompt.
pub struct PassphraseLogin {
    passphrase: Option<String>,
    open: bool,
    focus_pending: bool,
    input: String,
    error: Option<String>,
}

impl PassphraseLogin {
    pub fn new(passphrase: Option<String>) -> Self {
        Self {
            passphrase: passphrase.filter(|p| !p.is_empty()),
            open: false,
            focus_pending: false,
            input: String::new(),
            error: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        self.open = false;
        self.input.clear();
        self.error = None;
    }

    /// Check the typed passphrase. Returns `true` when it matches.
    fn submit(&mut self) -> bool {
        let Some(expected) = self.passphrase.as_deref() else {
            self.error = Some("Sign-in is not configured for this deck".to_string());
            return false;
        };
        if self.input == expected {
            tracing::info!("viewer signed in");
            self.close();
            true
        } else {
            tracing::debug!("rejected passphrase");
            self.input.clear();
            // Enter has released the field; keep the next attempt inside it.
            self.focus_pending = true;
            self.error = Some("Incorrect passphrase".to_string());
            false
        }
    }

    /// Draw the modal if open. Returns `true` on the frame sign-in succeeds.
    pub fn show(&mut self, ctx: &egui::Context) -> bool {
        if !self.open {
            return false;
        }

        let mut signed_in = false;
        let mut cancelled = false;
        egui::Window::new("Sign in")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                if self.passphrase.is_none() {
                    ui.label("Sign-in is not configured. Set access.passphrase in the config.");
                    if ui.button("Close").clicked() {
                        cancelled = true;
                    }
                    return;
                }

                ui.label("Enter the access passphrase to view the full deck.");
                let field = ui.add(
                    egui::TextEdit::singleline(&mut self.input)
                        .password(true)
                        .hint_text("Passphrase"),
                );
                if self.focus_pending {
                    field.request_focus();
                    self.focus_pending = false;
                }
                let entered = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                if let Some(error) = &self.error {
                    ui.colored_label(ui.visuals().error_fg_color, error);
                }

                ui.horizontal(|ui| {
                    if ui.button("Sign in").clicked() || entered {
                        signed_in = self.submit();
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if cancelled {
            self.close();
        }
        signed_in
    }
}

impl AuthCollaborator for PassphraseLogin {
    fn request_sign_in(&mut self) {
        self.open = true;
        self.focus_pending = true;
        self.error = None;
    }
}
