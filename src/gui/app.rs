//! Main application state and GUI logic.
//!
//! The application walks a small state machine: idle with an empty form,
//! planning while the two service calls run on a worker thread, ready
//! once the combined response arrives. The rendering core is only ever
//! handed complete, validated trip data.

use std::sync::mpsc;

use chrono::NaiveDate;
use eframe::egui;
use log::warn;

use crate::core::api::{ApiClient, ApiError};
use crate::core::config::AppSettings;
use crate::core::trip::{DutyInterval, TripDetails, TripResponse, group_by_date};

use super::log_sheet::LogSheetRenderer;
use super::route_panel::RoutePanel;
use super::trip_form::{FormAction, TripFormRenderer, TripFormState};

/// Application state for the trip planning flow.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AppState {
    /// No trip has been planned yet (initial state)
    #[default]
    Idle,
    /// The two service calls are running on the worker thread
    Planning,
    /// A trip response is loaded and the log sheets are shown
    Ready,
    /// Planning failed; the message is shown until dismissed
    Error(String),
}

impl AppState {
    /// Returns true if the form should accept input.
    pub fn form_enabled(&self) -> bool {
        !self.is_planning()
    }

    /// Returns true while the planning request is in flight.
    pub fn is_planning(&self) -> bool {
        matches!(self, AppState::Planning)
    }
}

/// Kind of status message to display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusKind {
    /// Success message (shown in green)
    Success,
    /// Error message (shown in red)
    Error,
}

/// A transient status message shown in the header.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: std::time::Instant,
}

impl StatusMessage {
    /// Duration to show status messages before auto-dismissing.
    const DISPLAY_DURATION: std::time::Duration = std::time::Duration::from_secs(5);

    /// Create a new status message.
    pub fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: std::time::Instant::now(),
        }
    }

    /// Check if the message should still be displayed.
    pub fn is_visible(&self) -> bool {
        self.created_at.elapsed() < Self::DISPLAY_DURATION
    }
}

/// Main application state and GUI logic.
pub struct TripPlannerApp {
    /// Current application state
    state: AppState,
    /// Persisted settings (service URL, palette, window size)
    settings: AppSettings,
    /// Editable trip form contents
    form: TripFormState,
    /// Last successful trip response
    trip: Option<TripResponse>,
    /// The response's duty logs, grouped per calendar day
    daily_logs: Vec<(NaiveDate, Vec<DutyInterval>)>,
    /// Transient header notification
    status_message: Option<StatusMessage>,
    /// Receiver for the in-flight planning request, if any
    pending: Option<mpsc::Receiver<Result<TripResponse, ApiError>>>,
}

impl TripPlannerApp {
    /// Create a new application instance.
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: AppSettings) -> Self {
        Self {
            state: AppState::Idle,
            settings,
            form: TripFormState::default(),
            trip: None,
            daily_logs: Vec::new(),
            status_message: None,
            pending: None,
        }
    }

    /// Kick off the planning flow on a worker thread.
    ///
    /// The worker runs the two service calls strictly in sequence and
    /// reports the combined result over the channel; the UI thread polls
    /// it every frame while in `Planning`.
    fn submit_trip(&mut self, details: TripDetails) {
        let client = ApiClient::new(&self.settings.api_base_url);
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let _ = tx.send(client.plan_trip(&details));
        });
        self.pending = Some(rx);
        self.state = AppState::Planning;
        self.status_message = None;
    }

    /// Poll the worker channel for a planning result.
    fn poll_planning(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(response)) => {
                self.daily_logs = group_by_date(&response.logs);
                self.status_message = Some(StatusMessage::new(
                    format!(
                        "Planned {} miles with {} daily log sheets",
                        response.route.distance_miles.round() as i64,
                        self.daily_logs.len()
                    ),
                    StatusKind::Success,
                ));
                self.trip = Some(response);
                self.state = AppState::Ready;
                self.pending = None;
            }
            Ok(Err(e)) => {
                self.set_error(e.to_string());
                self.pending = None;
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                self.set_error("Trip planning was interrupted".to_string());
                self.pending = None;
            }
        }
    }

    /// Set an error state and display an error message.
    fn set_error(&mut self, message: String) {
        self.state = AppState::Error(message.clone());
        self.status_message = Some(StatusMessage::new(message, StatusKind::Error));
    }

    /// Clear error state and return to the appropriate state.
    fn clear_error(&mut self) {
        if self.trip.is_some() {
            self.state = AppState::Ready;
        } else {
            self.state = AppState::Idle;
        }
    }

    /// Open a save dialog and export the loaded trip as JSON.
    fn save_logs_dialog(&mut self) {
        let Some(trip) = &self.trip else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(format!("trip-{}-logs.json", trip.id))
            .set_title("Save Trip Logs")
            .save_file()
        else {
            return;
        };

        let result = serde_json::to_string_pretty(trip)
            .map_err(|e| e.to_string())
            .and_then(|content| std::fs::write(&path, content).map_err(|e| e.to_string()));

        self.status_message = Some(match result {
            Ok(()) => StatusMessage::new(
                format!(
                    "Saved logs to {}",
                    path.file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| path.display().to_string())
                ),
                StatusKind::Success,
            ),
            Err(e) => StatusMessage::new(format!("Failed to save logs: {}", e), StatusKind::Error),
        });
    }
}

impl eframe::App for TripPlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_planning();
        if self.state.is_planning() {
            // Keep polling the worker channel while the request runs
            ctx.request_repaint();
        }

        // Remember the window size for the next start
        let size = ctx.screen_rect().size();
        self.settings.set_window_size(size.x, size.y);

        self.render_header(ctx);
        self.render_content(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.settings.save() {
            warn!("could not persist settings: {}", e);
        }
    }
}

impl TripPlannerApp {
    /// Render the top header: title, tagline, and status message.
    fn render_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("TruckLog Planner");
                ui.separator();
                ui.label("Plan routes, stay HOS compliant");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.render_status_message(ui);
                });
            });
        });
    }

    /// Render the status message if one is active.
    fn render_status_message(&mut self, ui: &mut egui::Ui) {
        let should_dismiss = self
            .status_message
            .as_ref()
            .is_some_and(|msg| !msg.is_visible());

        if should_dismiss {
            self.status_message = None;
            if matches!(self.state, AppState::Error(_)) {
                self.clear_error();
            }
            return;
        }

        let msg_info = self.status_message.as_ref().map(|msg| {
            let color = match msg.kind {
                StatusKind::Success => egui::Color32::from_rgb(34, 197, 94),
                StatusKind::Error => egui::Color32::from_rgb(220, 38, 38),
            };
            (color, msg.text.clone())
        });

        if let Some((color, text)) = msg_info {
            let mut dismiss_clicked = false;
            ui.horizontal(|ui| {
                if ui.small_button("x").clicked() {
                    dismiss_clicked = true;
                }
                ui.colored_label(color, &text);
            });
            if dismiss_clicked {
                self.status_message = None;
                if matches!(self.state, AppState::Error(_)) {
                    self.clear_error();
                }
            }
        }
    }

    /// Render the central content: form, error notice, and results.
    fn render_content(&mut self, ctx: &egui::Context) {
        let mut submit: Option<TripDetails> = None;
        let mut save_clicked = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let mut renderer = TripFormRenderer::new(
                        self.state.form_enabled(),
                        self.state.is_planning(),
                        &mut self.form,
                    );
                    if let Some(FormAction::Submit(details)) = renderer.render(ui) {
                        submit = Some(details);
                    }

                    if let AppState::Error(message) = &self.state {
                        ui.add_space(8.0);
                        ui.colored_label(egui::Color32::from_rgb(220, 38, 38), message);
                    }

                    if let Some(trip) = &self.trip {
                        ui.add_space(16.0);
                        ui.separator();
                        ui.add_space(8.0);

                        ui.horizontal(|ui| {
                            ui.heading("Trip Plan");
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.button("Save Logs...").clicked() {
                                        save_clicked = true;
                                    }
                                },
                            );
                        });
                        ui.add_space(8.0);
                        RoutePanel::new(&trip.route).render(ui);

                        ui.add_space(16.0);
                        ui.heading("Daily Logs");
                        ui.add_space(8.0);
                        for (date, logs) in &self.daily_logs {
                            LogSheetRenderer::new(*date, logs, &self.settings.colors).render(ui);
                            ui.add_space(16.0);
                        }
                    }
                });
        });

        if let Some(details) = submit {
            self.submit_trip(details);
        }
        if save_clicked {
            self.save_logs_dialog();
        }
    }
}
