//! Trip details form.
//!
//! Collects the trip parameters and hands them back to the application
//! as a [`FormAction`] when the driver submits.

use eframe::egui;

use crate::core::trip::{MAX_CYCLE_HOURS, TripDetails};

/// User actions that can be triggered from the trip form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    /// Submit the trip for planning
    Submit(TripDetails),
}

/// Editable form contents, owned by the application across frames.
#[derive(Debug, Clone, Default)]
pub struct TripFormState {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub current_cycle_used: f64,
}

impl TripFormState {
    /// Whether every required field is filled in.
    pub fn is_complete(&self) -> bool {
        !self.current_location.trim().is_empty()
            && !self.pickup_location.trim().is_empty()
            && !self.dropoff_location.trim().is_empty()
    }

    /// Build the submission payload, cycle hours clamped to [0, 70].
    pub fn to_details(&self) -> TripDetails {
        TripDetails {
            current_location: self.current_location.trim().to_string(),
            pickup_location: self.pickup_location.trim().to_string(),
            dropoff_location: self.dropoff_location.trim().to_string(),
            current_cycle_used: self.current_cycle_used,
        }
        .clamped()
    }
}

/// Renders the trip form and returns any action the user triggered.
pub struct TripFormRenderer<'a> {
    /// Whether the form accepts input (false while planning)
    enabled: bool,
    /// Whether a planning request is currently in flight
    is_planning: bool,
    form: &'a mut TripFormState,
}

impl<'a> TripFormRenderer<'a> {
    /// Create a renderer over the application's form state.
    pub fn new(enabled: bool, is_planning: bool, form: &'a mut TripFormState) -> Self {
        Self {
            enabled,
            is_planning,
            form,
        }
    }

    /// Render the form and return an action if the user submitted it.
    pub fn render(&mut self, ui: &mut egui::Ui) -> Option<FormAction> {
        let mut action = None;

        ui.heading("Enter Trip Details");
        ui.add_space(8.0);

        ui.add_enabled_ui(self.enabled, |ui| {
            location_field(
                ui,
                "Current Location",
                &mut self.form.current_location,
                "Enter city, state (e.g., Chicago, IL)",
            );
            location_field(
                ui,
                "Pickup Location",
                &mut self.form.pickup_location,
                "Enter city, state (e.g., Milwaukee, WI)",
            );
            location_field(
                ui,
                "Dropoff Location",
                &mut self.form.dropoff_location,
                "Enter city, state (e.g., Green Bay, WI)",
            );

            ui.label("Current Cycle Used (Hours)");
            ui.add(
                egui::DragValue::new(&mut self.form.current_cycle_used)
                    .range(0.0..=MAX_CYCLE_HOURS)
                    .speed(0.5)
                    .suffix(" h"),
            );
            ui.small("Hours used in the current 70-hour/8-day cycle");
            ui.add_space(12.0);

            let can_submit = self.form.is_complete() && !self.is_planning;
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(can_submit, egui::Button::new("Generate Trip Logs"))
                    .clicked()
                {
                    action = Some(FormAction::Submit(self.form.to_details()));
                }
                if self.is_planning {
                    ui.spinner();
                    ui.label("Planning trip...");
                }
            });
        });

        action
    }
}

fn location_field(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str) {
    ui.label(label);
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    );
    ui.add_space(8.0);
}
