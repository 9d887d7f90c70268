use crate::item::WorkItem;
use crate::store::ScheduleStore;
use serde::Serialize;

/// Round to one decimal place, halves going up (`2.25` → `2.3`).
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Hours shown on a work session card.
pub fn hours_badge(session: &WorkItem) -> f64 {
    round_tenth(session.range.duration_hours())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationHours {
    pub location: String,
    pub hours: f64,
}

/// The statistics panel: counts plus rounded work hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleSummary {
    pub total_classes: usize,
    pub total_work_sessions: usize,
    pub total_work_hours: f64,
    /// Alphabetical by location.
    pub by_location: Vec<LocationHours>,
}

impl ScheduleSummary {
    pub fn from_store(store: &ScheduleStore) -> Self {
        let by_location = store.work_hours_by_location();
        let total: f64 = by_location.values().sum();
        Self {
            total_classes: store.total_classes(),
            total_work_sessions: store.total_work_sessions(),
            total_work_hours: round_tenth(total),
            by_location: by_location
                .into_iter()
                .map(|(location, hours)| LocationHours {
                    location,
                    hours: round_tenth(hours),
                })
                .collect(),
        }
    }

    pub fn to_cli_summary(&self) -> String {
        let mut parts = vec![
            format!("classes={}", self.total_classes),
            format!("work={}", self.total_work_sessions),
            format!("work_hours={}", self.total_work_hours),
        ];
        for row in &self.by_location {
            parts.push(format!("{}={}h", row.location, row.hours));
        }
        parts.join(", ")
    }
}
