//! Log-sheet geometry.
//!
//! Pure layout math for the 24-hour daily log grid: time-of-day to
//! horizontal offset, duty status to lane, interval to rectangle. All
//! coordinates are logical pixels relative to the drawable origin (the
//! left edge of hour 0, top of the sheet); the gutter to the left of the
//! origin is reserved for lane labels. Nothing here touches a painter, so
//! the whole module is testable without a display.

use eframe::egui::{Rect, pos2, vec2};

use super::trip::{DutyInterval, DutyStatus};

/// Hours on a daily log sheet.
pub const HOURS_IN_DAY: u32 = 24;

/// Minimum logical sheet width; narrower viewports scroll instead.
pub const MIN_SHEET_WIDTH: f32 = 400.0;

/// Viewport width below which the compact layout is used.
pub const COMPACT_BREAKPOINT: f32 = 600.0;

/// Corner radius for interval rectangles.
pub const CORNER_RADIUS: f32 = 4.0;

/// Stroke width for grid lines.
pub const GRID_STROKE_WIDTH: f32 = 1.0;

/// Stroke width for interval borders; thicker than the grid.
pub const INTERVAL_STROKE_WIDTH: f32 = 1.5;

const SHEET_HEIGHT: f32 = 200.0;
const COMPACT_SHEET_HEIGHT: f32 = 180.0;

const GUTTER_WIDTH: f32 = 72.0;
const COMPACT_GUTTER_WIDTH: f32 = 56.0;

const GRID_START_Y: f32 = 50.0;
const COMPACT_GRID_START_Y: f32 = 40.0;

const GRID_HEIGHT: f32 = 102.0;
const COMPACT_GRID_HEIGHT: f32 = 96.0;

const LABEL_FONT_SIZE: f32 = 10.0;
const COMPACT_LABEL_FONT_SIZE: f32 = 9.0;

/// Resolved layout for one log sheet at a given viewport width.
///
/// Rendering is a pure function of the interval list, the date, and this
/// layout; equal inputs draw pixel-identical sheets.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    /// Total logical width of the sheet, gutter included
    pub canvas_width: f32,
    /// Total logical height of the sheet
    pub canvas_height: f32,
    /// Width of the lane-label gutter left of the drawable origin
    pub gutter_width: f32,
    /// Top of the grid band, from the top of the sheet
    pub grid_start_y: f32,
    /// Height of the grid band (three lanes)
    pub grid_height: f32,
    /// Font size for hour and lane labels
    pub label_font_size: f32,
}

impl SheetLayout {
    /// Resolve the layout for a container of `viewport_width` logical
    /// pixels, using the compact variant below [`COMPACT_BREAKPOINT`].
    pub fn new(viewport_width: f32) -> Self {
        let compact = viewport_width < COMPACT_BREAKPOINT;
        Self {
            canvas_width: viewport_width.max(MIN_SHEET_WIDTH),
            canvas_height: if compact {
                COMPACT_SHEET_HEIGHT
            } else {
                SHEET_HEIGHT
            },
            gutter_width: if compact {
                COMPACT_GUTTER_WIDTH
            } else {
                GUTTER_WIDTH
            },
            grid_start_y: if compact {
                COMPACT_GRID_START_Y
            } else {
                GRID_START_Y
            },
            grid_height: if compact {
                COMPACT_GRID_HEIGHT
            } else {
                GRID_HEIGHT
            },
            label_font_size: if compact {
                COMPACT_LABEL_FONT_SIZE
            } else {
                LABEL_FONT_SIZE
            },
        }
    }

    /// Width of the 24-hour drawing area, gutter excluded.
    pub fn drawable_width(&self) -> f32 {
        self.canvas_width - self.gutter_width
    }

    /// Width of one hour column.
    pub fn hour_width(&self) -> f32 {
        self.drawable_width() / HOURS_IN_DAY as f32
    }

    /// Horizontal offset of a time of day given in fractional hours.
    ///
    /// Valid input is [0, 24]; out-of-range values are a caller error and
    /// are mapped without clamping.
    pub fn x_offset(&self, hours: f32) -> f32 {
        hours * self.hour_width()
    }

    /// Height of one status lane.
    pub fn lane_height(&self) -> f32 {
        self.grid_height / 3.0
    }

    /// Top of the lane for a duty status.
    ///
    /// Lanes run OFF DUTY, ON DUTY, DRIVING from the top, matching the
    /// paper log layout.
    pub fn lane_y(&self, status: DutyStatus) -> f32 {
        let lane = match status {
            DutyStatus::OffDuty => 0.0,
            DutyStatus::OnDuty => 1.0,
            DutyStatus::Driving => 2.0,
        };
        self.grid_start_y + lane * self.lane_height()
    }

    /// Rectangle for a duty interval, in drawable coordinates.
    ///
    /// Zero-duration intervals yield a zero-width rectangle; they are not
    /// filtered out.
    pub fn interval_rect(&self, interval: &DutyInterval) -> Rect {
        let x = self.x_offset(interval.start_hour());
        let width = self.x_offset(interval.end_hour()) - x;
        Rect::from_min_size(
            pos2(x, self.lane_y(interval.status)),
            vec2(width, self.lane_height()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    // 792 wide desktop sheet: 72 gutter + 720 drawable, 30 px per hour.
    fn layout_720() -> SheetLayout {
        SheetLayout::new(792.0)
    }

    fn interval(start: (u32, u32), end: (u32, u32), status: DutyStatus) -> DutyInterval {
        DutyInterval {
            id: 0,
            trip: 0,
            date: "2025-11-02".parse().unwrap(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            status,
            location: String::new(),
            remarks: None,
        }
    }

    #[test]
    fn test_minimum_width_enforced() {
        let layout = SheetLayout::new(150.0);
        assert_eq!(layout.canvas_width, MIN_SHEET_WIDTH);
        // A wide viewport is taken as-is
        assert_eq!(SheetLayout::new(1024.0).canvas_width, 1024.0);
    }

    #[test]
    fn test_compact_breakpoint() {
        let compact = SheetLayout::new(500.0);
        let desktop = SheetLayout::new(800.0);
        assert!(compact.gutter_width < desktop.gutter_width);
        assert!(compact.canvas_height < desktop.canvas_height);
        assert!(compact.label_font_size < desktop.label_font_size);
    }

    #[test]
    fn test_x_offset_endpoints() {
        let layout = layout_720();
        assert_eq!(layout.drawable_width(), 720.0);
        assert_eq!(layout.x_offset(0.0), 0.0);
        assert_eq!(layout.x_offset(24.0), layout.drawable_width());
    }

    #[test]
    fn test_x_offset_monotone() {
        let layout = layout_720();
        let mut prev = layout.x_offset(0.0);
        for step in 1..=96 {
            let x = layout.x_offset(step as f32 * 0.25);
            assert!(x >= prev);
            prev = x;
        }
    }

    #[test]
    fn test_lanes_partition_grid_band() {
        let layout = layout_720();
        assert_eq!(layout.lane_height(), layout.grid_height / 3.0);
        assert_eq!(layout.lane_y(DutyStatus::OffDuty), layout.grid_start_y);
        // Each lane starts exactly where the previous one ends
        assert_eq!(
            layout.lane_y(DutyStatus::OnDuty),
            layout.lane_y(DutyStatus::OffDuty) + layout.lane_height()
        );
        assert_eq!(
            layout.lane_y(DutyStatus::Driving),
            layout.lane_y(DutyStatus::OnDuty) + layout.lane_height()
        );
        // And the last lane ends at the bottom of the band
        assert_eq!(
            layout.lane_y(DutyStatus::Driving) + layout.lane_height(),
            layout.grid_start_y + layout.grid_height
        );
    }

    #[test]
    fn test_interval_width_is_duration_times_hour_width() {
        let layout = layout_720();
        let rect = layout.interval_rect(&interval((6, 0), (14, 30), DutyStatus::Driving));
        assert_eq!(rect.width(), 8.5 * layout.hour_width());
        assert_eq!(rect.height(), layout.lane_height());
    }

    #[test]
    fn test_zero_duration_interval() {
        let layout = layout_720();
        let rect = layout.interval_rect(&interval((9, 15), (9, 15), DutyStatus::OnDuty));
        assert_eq!(rect.width(), 0.0);
        assert_eq!(rect.min.x, layout.x_offset(9.25));
    }

    #[test]
    fn test_daily_log_scenario() {
        // The canonical paper-log day at 30 px per hour.
        let layout = layout_720();
        let cases = [
            (interval((0, 0), (6, 0), DutyStatus::OffDuty), 0.0, 180.0),
            (interval((6, 0), (14, 0), DutyStatus::Driving), 180.0, 420.0),
            (interval((14, 0), (15, 0), DutyStatus::OnDuty), 420.0, 450.0),
            (interval((15, 0), (23, 59), DutyStatus::OffDuty), 450.0, 719.5),
        ];
        for (log, left, right) in cases {
            let rect = layout.interval_rect(&log);
            assert_eq!(rect.min.x, left);
            assert!((rect.max.x - right).abs() < 1e-3);
            assert_eq!(rect.min.y, layout.lane_y(log.status));
        }
    }

    #[test]
    fn test_resize_scales_hours_only() {
        let narrow = SheetLayout::new(800.0);
        let wide = SheetLayout::new(1600.0);
        let ratio = wide.drawable_width() / narrow.drawable_width();
        assert!((wide.hour_width() - narrow.hour_width() * ratio).abs() < 1e-4);
        // Lane partitioning is untouched by width changes
        for status in DutyStatus::ALL {
            assert_eq!(wide.lane_y(status), narrow.lane_y(status));
        }
        assert_eq!(wide.lane_height(), narrow.lane_height());
    }
}
