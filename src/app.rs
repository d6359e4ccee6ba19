//! Text-to-video window — egui/eframe application.
//!
//! # Architecture
//!
//! [`TextToVideoApp`] is the top-level [`eframe::App`].  It owns the
//! [`SubmissionForm`] buffers and reads the orchestrator's [`SharedState`]
//! every frame.  Submitting claims the in-flight slot via
//! [`Orchestrator::begin`] and sends the ticket plus payload over
//! `command_tx` to the orchestrator task.
//!
//! # Panels
//!
//! | State | Visual |
//! |-------|--------|
//! | nothing yet | form only |
//! | in flight | form disabled, spinner + animation caption |
//! | failed | red error box |
//! | succeeded | success banner + playback panel |

use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;

use crate::client::RequestResult;
use crate::config::{AppConfig, AppPaths};
use crate::form::{
    AnimationKind, FormMode, Language, SubmissionForm, VideoStyle, EXAMPLE_TEXTS,
};
use crate::orchestrator::{
    lock_state, Orchestrator, OrchestratorCommand, ResultView, SharedState, SubmitError,
};
use crate::render::PlaybackSurface;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(79, 70, 229);
const MUTED: egui::Color32 = egui::Color32::from_rgb(120, 120, 120);
const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(254, 242, 242);
const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);
const SUCCESS_FILL: egui::Color32 = egui::Color32::from_rgb(240, 253, 244);
const SUCCESS_TEXT: egui::Color32 = egui::Color32::from_rgb(21, 128, 61);

/// Owned copy of what the result area shows this frame, so the state lock is
/// released before drawing.
enum Panel {
    Empty,
    Busy(AnimationKind),
    Error(String),
    Video(RequestResult),
}

// ---------------------------------------------------------------------------
// TextToVideoApp
// ---------------------------------------------------------------------------

pub struct TextToVideoApp {
    // ── Form ─────────────────────────────────────────────────────────────
    pub form: SubmissionForm,

    // ── Orchestrator ─────────────────────────────────────────────────────
    orchestrator: Orchestrator,
    state: SharedState,
    command_tx: mpsc::Sender<OrchestratorCommand>,

    // ── UI state ─────────────────────────────────────────────────────────
    show_settings: bool,
    /// Highest `result_generation` already handed to the system player.
    autoplayed_generation: u64,

    // ── Configuration ────────────────────────────────────────────────────
    pub config: AppConfig,
}

impl TextToVideoApp {
    pub fn new(
        orchestrator: Orchestrator,
        command_tx: mpsc::Sender<OrchestratorCommand>,
        config: AppConfig,
    ) -> Self {
        let form = SubmissionForm::new(config.defaults.mode, config.defaults.options());
        let state = orchestrator.state();
        Self {
            form,
            orchestrator,
            state,
            command_tx,
            show_settings: false,
            autoplayed_generation: 0,
            config,
        }
    }

    fn in_flight(&self) -> bool {
        lock_state(&self.state).in_flight
    }

    // ── Actions ──────────────────────────────────────────────────────────

    /// Submit the form.  Returns `true` if a request was handed to the
    /// orchestrator.
    pub fn submit_form(&mut self) -> bool {
        let Some(payload) = self.form.submit(self.in_flight()) else {
            return false;
        };

        let ticket = match self.orchestrator.begin() {
            Ok(ticket) => ticket,
            Err(SubmitError::Busy) => return false,
        };

        match self
            .command_tx
            .try_send(OrchestratorCommand::Submit { ticket, payload })
        {
            Ok(()) => true,
            Err(e) => {
                // Dropping the returned command drops its ticket, which
                // releases the slot and records the fallback error.
                log::error!("app: orchestrator unavailable: {e}");
                false
            }
        }
    }

    /// Queue one health check.  Returns `false` if a check is already pending
    /// or the orchestrator is unavailable.
    pub fn request_health_check(&self) -> bool {
        {
            let mut st = lock_state(&self.state);
            if st.health_checking {
                return false;
            }
            st.health_checking = true;
        }

        match self.command_tx.try_send(OrchestratorCommand::CheckHealth) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("app: could not queue health check: {e}");
                lock_state(&self.state).health_checking = false;
                false
            }
        }
    }

    /// Address of a freshly arrived video that has not been auto-started yet.
    pub fn take_autoplay(&mut self) -> Option<String> {
        let st = lock_state(&self.state);
        if st.in_flight || st.result_generation <= self.autoplayed_generation {
            return None;
        }
        let surface = st
            .result
            .as_ref()
            .map(|r| PlaybackSurface::for_result(r, &self.config.service.base_url))?;
        self.autoplayed_generation = st.result_generation;
        surface.autoplay.then_some(surface.src)
    }

    fn panel(&self) -> Panel {
        let st = lock_state(&self.state);
        match st.view() {
            ResultView::Empty => Panel::Empty,
            ResultView::Busy(kind) => Panel::Busy(kind),
            ResultView::Error(message) => Panel::Error(message.to_string()),
            ResultView::Video(result) => Panel::Video(result.clone()),
        }
    }

    // ── Sections ─────────────────────────────────────────────────────────

    fn draw_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(
                egui::RichText::new("Animierter Text zu Video Konverter")
                    .color(ACCENT)
                    .strong(),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.selectable_label(self.show_settings, "Einstellungen").clicked() {
                    self.show_settings = !self.show_settings;
                }
            });
        });
    }

    fn draw_animation_picker(&mut self, ui: &mut egui::Ui, in_flight: bool) {
        let current = lock_state(&self.state).animation_kind;
        let mut selected = current;

        ui.label("Animations-Typ wählen:");
        ui.add_enabled_ui(!in_flight, |ui| {
            egui::ComboBox::from_id_salt("animation_kind")
                .selected_text(selected.label())
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    for kind in AnimationKind::ALL {
                        ui.selectable_value(&mut selected, kind, kind.label());
                    }
                });
        });

        if selected != current {
            self.orchestrator.select_animation(selected);
        }
    }

    fn draw_form(&mut self, ui: &mut egui::Ui, in_flight: bool) {
        ui.horizontal(|ui| {
            ui.add_enabled_ui(!in_flight, |ui| {
                ui.selectable_value(&mut self.form.mode, FormMode::Simple, "Einfach");
                ui.selectable_value(&mut self.form.mode, FormMode::Extended, "Erweitert");
            });
        });
        ui.add_space(6.0);

        let text_label = match self.form.mode {
            FormMode::Simple => "Dein Text für die Animation:",
            FormMode::Extended => "Text für Audio (wird gesprochen):",
        };
        ui.label(text_label);
        ui.add_enabled(
            !in_flight,
            egui::TextEdit::multiline(&mut self.form.text)
                .desired_rows(6)
                .desired_width(f32::INFINITY)
                .hint_text("Beschreibe was animiert werden soll..."),
        );
        ui.label(
            egui::RichText::new(format!(
                "Zeichen: {} | Wörter: {}",
                self.form.char_count(),
                self.form.word_count()
            ))
            .color(MUTED)
            .size(12.0),
        );

        if self.form.mode == FormMode::Extended {
            self.draw_extended_fields(ui, in_flight);
        }

        if self.config.ui.show_examples {
            ui.add_space(8.0);
            ui.label("Beispiel-Texte:");
            let mut picked = None;
            egui::Grid::new("examples").num_columns(2).show(ui, |ui| {
                for (i, example) in EXAMPLE_TEXTS.iter().enumerate() {
                    if ui
                        .add_enabled(!in_flight, egui::Button::new(*example))
                        .clicked()
                    {
                        picked = Some(i);
                    }
                    if i % 2 == 1 {
                        ui.end_row();
                    }
                }
            });
            if let Some(i) = picked {
                self.form.insert_example(i);
            }
        }

        ui.add_space(10.0);
        let can_submit = self.form.can_submit(in_flight);
        let label = if in_flight {
            "Wird animiert..."
        } else {
            "Animation erstellen"
        };
        let clicked = ui
            .vertical_centered(|ui| {
                ui.add_enabled(
                    can_submit,
                    egui::Button::new(egui::RichText::new(label).size(16.0))
                        .min_size(egui::vec2(220.0, 36.0)),
                )
                .clicked()
            })
            .inner;
        let shortcut = ui.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Enter));

        if clicked || (shortcut && can_submit) {
            self.submit_form();
        }
    }

    fn draw_extended_fields(&mut self, ui: &mut egui::Ui, in_flight: bool) {
        ui.add_space(6.0);
        ui.label("Video-Beschreibung (optional - für KI-Bilder):");
        ui.add_enabled(
            !in_flight,
            egui::TextEdit::multiline(&mut self.form.description)
                .desired_rows(3)
                .desired_width(f32::INFINITY)
                .hint_text("Beschreibe was im Video zu sehen sein soll"),
        );

        ui.add_enabled_ui(!in_flight, |ui| {
            ui.horizontal(|ui| {
                let options = &mut self.form.options;
                egui::ComboBox::from_label("Sprache")
                    .selected_text(options.language.label())
                    .show_ui(ui, |ui| {
                        for language in Language::ALL {
                            ui.selectable_value(&mut options.language, language, language.label());
                        }
                    });
                egui::ComboBox::from_label("Stil")
                    .selected_text(options.style.label())
                    .show_ui(ui, |ui| {
                        for style in VideoStyle::ALL {
                            ui.selectable_value(&mut options.style, style, style.label());
                        }
                    });
            });
        });
    }

    fn draw_result(&self, ui: &mut egui::Ui, ctx: &egui::Context) {
        match self.panel() {
            Panel::Empty => {}
            Panel::Busy(kind) => {
                ui.add_space(16.0);
                ui.vertical_centered(|ui| {
                    ui.add(egui::Spinner::new().size(32.0).color(ACCENT));
                    ui.label(egui::RichText::new(kind.progress_caption()).color(MUTED));
                });
            }
            Panel::Error(message) => {
                ui.add_space(8.0);
                egui::Frame::new()
                    .fill(ERROR_FILL)
                    .corner_radius(egui::CornerRadius::same(6))
                    .inner_margin(egui::Margin::same(10))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(egui::RichText::new(message).color(ERROR_TEXT));
                    });
            }
            Panel::Video(result) => self.draw_video(ui, ctx, &result),
        }
    }

    fn draw_video(&self, ui: &mut egui::Ui, ctx: &egui::Context, result: &RequestResult) {
        let kind = lock_state(&self.state).animation_kind;
        let surface = PlaybackSurface::for_result(result, &self.config.service.base_url);

        ui.add_space(8.0);
        if let Some(message) = &result.status_message {
            egui::Frame::new()
                .fill(SUCCESS_FILL)
                .corner_radius(egui::CornerRadius::same(6))
                .inner_margin(egui::Margin::same(10))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(egui::RichText::new(message).color(SUCCESS_TEXT));
                    ui.label(
                        egui::RichText::new(format!("Animation-Typ: {}", kind.id()))
                            .color(SUCCESS_TEXT)
                            .size(12.0),
                    );
                });
        }

        ui.add_space(8.0);
        ui.separator();
        ui.vertical_centered(|ui| {
            ui.heading("Dein generiertes Video");
        });
        ui.label(egui::RichText::new(&surface.src).monospace());
        ui.label(egui::RichText::new(surface.mime).color(MUTED).size(11.0));

        if surface.controls {
            ui.horizontal(|ui| {
                if ui.button("Abspielen").clicked() {
                    ctx.open_url(egui::OpenUrl::new_tab(&surface.src));
                }
                if ui.button("Link kopieren").clicked() {
                    ctx.copy_text(surface.src.clone());
                }
                if let Some(audio) = &surface.audio_src {
                    ui.hyperlink_to("Audiospur", audio);
                }
            });
        }

        if let Some(cost) = &result.cost_indicator {
            ui.label(egui::RichText::new(format!("Kosten: {cost}")).color(MUTED).size(11.0));
        }
        if let Some(service) = &result.service_used {
            ui.label(egui::RichText::new(format!("Dienst: {service}")).color(MUTED).size(11.0));
        }
        ui.label(
            egui::RichText::new(surface.unsupported_notice)
                .color(MUTED)
                .italics()
                .size(11.0),
        );
    }

    fn draw_settings(&self, ui: &mut egui::Ui) {
        let service = &self.config.service;
        ui.label(egui::RichText::new("Dienst").strong());
        ui.label(format!("  Adresse: {}", service.base_url));
        ui.label(format!("  Einfach: {}", service.endpoint(&service.simple_path)));
        ui.label(format!("  Erweitert: {}", service.endpoint(&service.extended_path)));
        ui.label(
            egui::RichText::new(format!(
                "  Konfiguration: {}",
                AppPaths::new().settings_file.display()
            ))
            .color(MUTED)
            .size(11.0),
        );

        ui.add_space(6.0);
        let (checking, health) = {
            let st = lock_state(&self.state);
            (st.health_checking, st.service_health.clone())
        };
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!checking, egui::Button::new("Dienst prüfen"))
                .clicked()
            {
                self.request_health_check();
            }
            if checking {
                ui.add(egui::Spinner::new());
            }
        });
        match health {
            Some(Ok(report)) => {
                let color = if report.is_healthy() { SUCCESS_TEXT } else { ERROR_TEXT };
                ui.label(egui::RichText::new(format!("Status: {}", report.status)).color(color));
                if let Some(message) = report.message {
                    ui.label(egui::RichText::new(message).color(MUTED).size(11.0));
                }
                if let Some(version) = report.version {
                    ui.label(egui::RichText::new(format!("Version {version}")).color(MUTED).size(11.0));
                }
            }
            Some(Err(message)) => {
                ui.label(egui::RichText::new(message).color(ERROR_TEXT));
            }
            None => {}
        }
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for TextToVideoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (in_flight, health_checking) = {
            let st = lock_state(&self.state);
            (st.in_flight, st.health_checking)
        };

        // Poll the shared state while the worker is busy.
        if in_flight || health_checking {
            ctx.request_repaint_after(Duration::from_millis(66));
        }

        if let Some(src) = self.take_autoplay() {
            log::info!("app: starting playback of {src}");
            ctx.open_url(egui::OpenUrl::new_tab(src));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.draw_header(ui);
                ui.separator();

                if self.show_settings {
                    self.draw_settings(ui);
                    ui.separator();
                }

                self.draw_animation_picker(ui, in_flight);
                ui.add_space(8.0);
                self.draw_form(ui, in_flight);
                self.draw_result(ui, ctx);
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("text-to-video window closing");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
