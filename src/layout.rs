//! Geometry for drawing entries on the week grid.
//!
//! The grid has one row per hour and one column per weekday. An entry becomes
//! one bubble per day, anchored in the cell of its start hour and stretched to
//! its full duration, so a bubble may overflow into the rows below it.

use crate::item::{ItemId, ItemKind, ScheduleItem};
use crate::store::ScheduleStore;
use crate::weekday::day_index;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Height of one hour row in pixels.
    pub hour_height_px: f64,
    /// First hour row shown, inclusive.
    pub grid_start_hour: u32,
    /// Last hour row shown, inclusive.
    pub grid_end_hour: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            hour_height_px: 60.0,
            grid_start_hour: 6,
            grid_end_hour: 22,
        }
    }
}

impl LayoutConfig {
    pub fn pixels_per_minute(&self) -> f64 {
        self.hour_height_px / 60.0
    }

    pub fn shows_hour(&self, hour: u32) -> bool {
        (self.grid_start_hour..=self.grid_end_hour).contains(&hour)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    pub hour: u32,
    pub label: String,
}

/// 12-hour label for an hour row: `12:00 AM`, `9:00 AM`, `12:00 PM`, `5:00 PM`.
pub fn format_hour(hour: u32) -> String {
    match hour {
        0 => "12:00 AM".to_string(),
        1..=11 => format!("{hour}:00 AM"),
        12 => "12:00 PM".to_string(),
        _ => format!("{}:00 PM", hour - 12),
    }
}

pub fn grid_rows(config: &LayoutConfig) -> Vec<GridRow> {
    (config.grid_start_hour..=config.grid_end_hour)
        .map(|hour| GridRow {
            hour,
            label: format_hour(hour),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bubble {
    pub item_id: ItemId,
    pub kind: ItemKind,
    pub day: Weekday,
    /// Grid column, Monday = 0.
    pub column: usize,
    /// Hour row the bubble is anchored in.
    pub row_hour: u32,
    /// Offset from the top of the anchor cell.
    pub top_px: f64,
    pub height_px: f64,
    pub multi_hour: bool,
    pub title: String,
    pub subtitle: String,
    pub details: String,
}

/// One bubble per day of `item`. Nothing is produced when the start hour is not
/// a row of the grid.
pub fn layout_item(item: ScheduleItem<'_>, config: &LayoutConfig) -> Vec<Bubble> {
    let range = item.range();
    if !config.shows_hour(range.start_hour()) {
        return Vec::new();
    }
    let px = config.pixels_per_minute();

    item.days()
        .iter()
        .map(|day| Bubble {
            item_id: item.id(),
            kind: item.kind(),
            day: *day,
            column: day_index(*day),
            row_hour: range.start_hour(),
            top_px: f64::from(range.start_minute()) * px,
            height_px: f64::from(range.duration_minutes()) * px,
            multi_hour: range.hours_spanned() > 1,
            title: item.title().to_string(),
            subtitle: item.subtitle().to_string(),
            details: item.time().to_string(),
        })
        .collect()
}

/// Bubbles for the whole store, classes first.
pub fn layout_week(store: &ScheduleStore, config: &LayoutConfig) -> Vec<Bubble> {
    store
        .items()
        .flat_map(|item| layout_item(item, config))
        .collect()
}
