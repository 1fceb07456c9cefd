//! GUI module for the trip planner.
//!
//! This module contains the egui-based user interface: the main
//! application window, the trip form, the route overview, and the daily
//! log sheets.

mod app;
mod log_sheet;
mod route_panel;
mod trip_form;

pub use app::TripPlannerApp;
