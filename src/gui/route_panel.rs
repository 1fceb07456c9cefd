//! Route overview panel.
//!
//! Summarizes the computed route: the three waypoints, total distance,
//! estimated duration, and the required fuel stops. Map tiles are the
//! service's concern; this panel only presents the numbers.

use eframe::egui;

use crate::core::trip::RouteData;

/// Renders the route summary for a planned trip.
pub struct RoutePanel<'a> {
    route: &'a RouteData,
}

impl<'a> RoutePanel<'a> {
    /// Create a panel for the given route.
    pub fn new(route: &'a RouteData) -> Self {
        Self { route }
    }

    /// Render the stats row, the waypoints, and the fuel stop table.
    pub fn render(&self, ui: &mut egui::Ui) {
        ui.heading("Route Overview");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            stat(
                ui,
                "Total Distance",
                format!("{} miles", self.route.distance_miles.round() as i64),
            );
            ui.separator();
            stat(
                ui,
                "Estimated Duration",
                format!("{:.1} hours", self.route.duration_hours),
            );
            ui.separator();
            stat(
                ui,
                "Fuel Stops",
                format!("{}", self.route.fuel_stops.len()),
            );
        });

        ui.add_space(8.0);
        ui.label(format!(
            "{}  ->  {}  ->  {}",
            self.route.from.name, self.route.pickup.name, self.route.dropoff.name
        ));

        if !self.route.fuel_stops.is_empty() {
            ui.add_space(8.0);
            egui::Grid::new("fuel_stops")
                .striped(true)
                .num_columns(3)
                .show(ui, |ui| {
                    ui.strong("Fuel Stop");
                    ui.strong("Distance");
                    ui.strong("Est. Time");
                    ui.end_row();

                    for (i, stop) in self.route.fuel_stops.iter().enumerate() {
                        ui.label(format!("{}", i + 1));
                        ui.label(format!("{} miles", stop.distance_miles.round() as i64));
                        ui.label(format!("{:.1} hours", stop.estimated_hours));
                        ui.end_row();
                    }
                });
        }
    }
}

fn stat(ui: &mut egui::Ui, label: &str, value: String) {
    ui.vertical(|ui| {
        ui.small(label);
        ui.strong(value);
    });
}
