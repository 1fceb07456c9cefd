//! Daily log sheet rendering.
//!
//! Draws one 24-hour driver's daily log: the static hour/lane grid, then
//! one color-coded rounded rectangle per duty interval, in input order so
//! later intervals paint over earlier ones. The sheet is repainted in
//! full every frame from the interval list, the date, and the resolved
//! [`SheetLayout`], so any change in data, viewport width, pixel ratio,
//! or palette shows up on the next frame without bookkeeping.

use chrono::NaiveDate;
use eframe::egui::{self, Align2, FontId, Painter, Pos2, Sense, Stroke, vec2};

use crate::core::config::ColorSettings;
use crate::core::sheet::{
    CORNER_RADIUS, GRID_STROKE_WIDTH, HOURS_IN_DAY, INTERVAL_STROKE_WIDTH, SheetLayout,
};
use crate::core::trip::{DutyInterval, DutyStatus};

/// Horizontal inset of hour labels from their column's left edge.
const HOUR_LABEL_INSET: f32 = 2.0;

/// Gap between the top grid line and the hour labels.
const HOUR_LABEL_GAP: f32 = 4.0;

/// Gap between the lane labels and the drawable origin.
const LANE_LABEL_GAP: f32 = 8.0;

/// Side length of a legend swatch.
const SWATCH_SIZE: f32 = 14.0;

/// Renders one day's duty intervals as a paper-style log sheet.
pub struct LogSheetRenderer<'a> {
    /// Calendar day the sheet is drawn for
    date: NaiveDate,
    /// Duty intervals of that day, in service order
    intervals: &'a [DutyInterval],
    /// Active palette
    colors: &'a ColorSettings,
}

impl<'a> LogSheetRenderer<'a> {
    /// Create a renderer for one day of duty logs.
    pub fn new(date: NaiveDate, intervals: &'a [DutyInterval], colors: &'a ColorSettings) -> Self {
        Self {
            date,
            intervals,
            colors,
        }
    }

    /// Render the heading, the sheet canvas, and the legend.
    pub fn render(&self, ui: &mut egui::Ui) {
        ui.heading(format!(
            "Driver's Daily Log - {}",
            self.date.format("%m/%d/%Y")
        ));
        ui.add_space(4.0);

        let layout = SheetLayout::new(ui.available_width());
        let (response, painter) = ui.allocate_painter(
            vec2(layout.canvas_width, layout.canvas_height),
            Sense::hover(),
        );

        // Drawable origin: x = 0 is the start of hour 0; the gutter to
        // its left holds the lane labels.
        let origin = response.rect.min + vec2(layout.gutter_width, 0.0);

        self.draw_grid(&painter, origin, &layout);
        self.draw_intervals(&painter, origin, &layout);

        ui.add_space(4.0);
        self.draw_legend(ui);
    }

    /// Draw the static 24-hour grid: lane lines, hour lines, and labels.
    fn draw_grid(&self, painter: &Painter, origin: Pos2, layout: &SheetLayout) {
        let stroke = Stroke::new(GRID_STROKE_WIDTH, self.colors.grid_line_color());
        let text_color = self.colors.text_secondary_color();
        let font = FontId::proportional(layout.label_font_size);

        let grid_top = origin.y + layout.grid_start_y;
        let grid_bottom = grid_top + layout.grid_height;

        // 4 horizontal lines bounding the 3 status lanes
        for i in 0..=3 {
            let y = grid_top + i as f32 * layout.lane_height();
            painter.line_segment(
                [
                    Pos2::new(origin.x, y),
                    Pos2::new(origin.x + layout.drawable_width(), y),
                ],
                stroke,
            );
        }

        // 25 vertical lines, one per hour boundary, plus hour labels
        for hour in 0..=HOURS_IN_DAY {
            let x = origin.x + layout.x_offset(hour as f32);
            painter.line_segment(
                [Pos2::new(x, grid_top), Pos2::new(x, grid_bottom)],
                stroke,
            );

            if hour < HOURS_IN_DAY {
                painter.text(
                    Pos2::new(x + HOUR_LABEL_INSET, grid_top - HOUR_LABEL_GAP),
                    Align2::LEFT_BOTTOM,
                    format!("{:02}", hour),
                    font.clone(),
                    text_color,
                );
            }
        }

        // Lane labels, right-aligned inside the gutter
        for status in DutyStatus::ALL {
            let lane_center = origin.y + layout.lane_y(status) + layout.lane_height() / 2.0;
            painter.text(
                Pos2::new(origin.x - LANE_LABEL_GAP, lane_center),
                Align2::RIGHT_CENTER,
                status.lane_label(),
                font.clone(),
                text_color,
            );
        }
    }

    /// Draw one rounded rectangle per interval, in input order.
    fn draw_intervals(&self, painter: &Painter, origin: Pos2, layout: &SheetLayout) {
        for interval in self.intervals {
            let rect = layout.interval_rect(interval).translate(origin.to_vec2());
            painter.rect_filled(rect, CORNER_RADIUS, self.colors.duty_fill(interval.status));
            painter.rect_stroke(
                rect,
                CORNER_RADIUS,
                Stroke::new(
                    INTERVAL_STROKE_WIDTH,
                    self.colors.duty_border(interval.status),
                ),
                egui::StrokeKind::Inside,
            );
        }
    }

    /// Draw the status legend as ordinary widgets below the canvas.
    fn draw_legend(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Legend:");
            for status in DutyStatus::ALL {
                let (swatch, _) =
                    ui.allocate_exact_size(vec2(SWATCH_SIZE, SWATCH_SIZE), Sense::hover());
                ui.painter()
                    .rect_filled(swatch, 2.0, self.colors.duty_fill(status));
                ui.painter().rect_stroke(
                    swatch,
                    2.0,
                    Stroke::new(1.0, self.colors.duty_border(status)),
                    egui::StrokeKind::Inside,
                );
                ui.label(status.label());
                ui.add_space(8.0);
            }
        });
    }
}
