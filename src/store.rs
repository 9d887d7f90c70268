use crate::item::{ClassItem, ItemId, ScheduleItem, WorkItem};
use crate::time_range::{TimeRange, TimeRangeError};
use crate::weekday::{lookup_day_name, lookup_full_day_name, parse_day_list, parse_days};
use chrono::Weekday;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid time '{text}': {source}")]
    InvalidTime {
        text: String,
        #[source]
        source: TimeRangeError,
    },
    #[error("no valid days in '{0}'")]
    NoValidDays(String),
    #[error("'{0}' is not a day of the week")]
    UnknownDay(String),
    #[error("{0} must be a single line")]
    LineBreak(&'static str),
}

/// How the days of an incoming entry are read.
#[derive(Debug, Clone, Copy)]
enum DayRule {
    /// Free text: lists, compact runs and single letters.
    Lenient,
    /// Comma-separated full names or short codes only.
    Strict,
}

/// In-memory classes and work sessions for one planning session.
#[derive(Debug, Clone)]
pub struct ScheduleStore {
    classes: BTreeMap<ItemId, ClassItem>,
    work: BTreeMap<ItemId, WorkItem>,
    next_id: u64,
}

impl Default for ScheduleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self {
            classes: BTreeMap::new(),
            work: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The id the next successful add will receive.
    pub fn next_id(&self) -> ItemId {
        ItemId(self.next_id)
    }

    /// Add a class. `day_spec` accepts anything [`parse_days`] understands.
    pub fn add_class(
        &mut self,
        name: &str,
        instructor: &str,
        day_spec: &str,
        time: &str,
    ) -> Result<ItemId, ValidationError> {
        self.insert_class(name, instructor, day_spec, time, DayRule::Lenient)
    }

    /// Add a class whose days are a comma-separated list of day names, the form
    /// written by the CSV export.
    pub fn add_class_strict(
        &mut self,
        name: &str,
        instructor: &str,
        day_list: &str,
        time: &str,
    ) -> Result<ItemId, ValidationError> {
        self.insert_class(name, instructor, day_list, time, DayRule::Strict)
    }

    fn insert_class(
        &mut self,
        name: &str,
        instructor: &str,
        day_spec: &str,
        time: &str,
        rule: DayRule,
    ) -> Result<ItemId, ValidationError> {
        let result = validate_class(name, instructor, day_spec, time, rule);
        let (days, range) = match result {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(class = name, days = day_spec, time, error = %err, "rejected class");
                return Err(err);
            }
        };

        let id = self.allocate_id();
        let item = ClassItem {
            id,
            name: name.trim().to_string(),
            instructor: instructor.trim().to_string(),
            days,
            time: time.trim().to_string(),
            range,
        };
        debug!(%id, class = %item.name, days = ?item.days, "added class");
        self.classes.insert(id, item);
        Ok(id)
    }

    /// Add a work session. `day_label` must be a full day name such as
    /// `Monday`; work is always on a single day.
    pub fn add_work(
        &mut self,
        day_label: &str,
        time: &str,
        location: &str,
    ) -> Result<ItemId, ValidationError> {
        self.insert_work(day_label, time, location, lookup_full_day_name)
    }

    /// Like [`add_work`](Self::add_work) but also accepts short codes (`Mon`,
    /// `Thur`).
    pub fn add_work_strict(
        &mut self,
        day_label: &str,
        time: &str,
        location: &str,
    ) -> Result<ItemId, ValidationError> {
        self.insert_work(day_label, time, location, lookup_day_name)
    }

    fn insert_work(
        &mut self,
        day_label: &str,
        time: &str,
        location: &str,
        lookup: fn(&str) -> Option<Weekday>,
    ) -> Result<ItemId, ValidationError> {
        let result = validate_work(day_label, time, location, lookup);
        let (day, range) = match result {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(day = day_label, time, location, error = %err, "rejected work session");
                return Err(err);
            }
        };

        let id = self.allocate_id();
        let item = WorkItem {
            id,
            day_label: day_label.trim().to_lowercase(),
            day,
            time: time.trim().to_string(),
            range,
            location: location.trim().to_string(),
        };
        debug!(%id, location = %item.location, day = ?item.day, "added work session");
        self.work.insert(id, item);
        Ok(id)
    }

    /// Remove an entry of either kind. Returns `false` when `id` is unknown.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let removed = self.classes.remove(&id).is_some() || self.work.remove(&id).is_some();
        if removed {
            debug!(%id, "removed item");
        }
        removed
    }

    /// Drop every entry. Ids keep counting from where they were.
    pub fn clear(&mut self) {
        info!(
            classes = self.classes.len(),
            work = self.work.len(),
            "cleared schedule"
        );
        self.classes.clear();
        self.work.clear();
    }

    pub fn total_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn total_work_sessions(&self) -> usize {
        self.work.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.work.is_empty()
    }

    pub fn class(&self, id: ItemId) -> Option<&ClassItem> {
        self.classes.get(&id)
    }

    pub fn work(&self, id: ItemId) -> Option<&WorkItem> {
        self.work.get(&id)
    }

    pub fn get(&self, id: ItemId) -> Option<ScheduleItem<'_>> {
        self.class(id)
            .map(ScheduleItem::Class)
            .or_else(|| self.work(id).map(ScheduleItem::Work))
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassItem> {
        self.classes.values()
    }

    pub fn work_sessions(&self) -> impl Iterator<Item = &WorkItem> {
        self.work.values()
    }

    /// Classes first, then work sessions, each in insertion order.
    pub fn items(&self) -> impl Iterator<Item = ScheduleItem<'_>> {
        self.classes
            .values()
            .map(ScheduleItem::Class)
            .chain(self.work.values().map(ScheduleItem::Work))
    }

    pub fn items_on(&self, day: Weekday) -> impl Iterator<Item = ScheduleItem<'_>> {
        self.items().filter(move |item| item.days().contains(&day))
    }

    /// Fractional work hours per location. Locations are compared exactly as
    /// stored (trimmed, case kept), so `Library` and `library` are separate.
    pub fn work_hours_by_location(&self) -> BTreeMap<String, f64> {
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for session in self.work.values() {
            *totals
                .entry(session.location.trim().to_string())
                .or_insert(0.0) += session.range.duration_hours();
        }
        totals
    }

    pub fn total_work_hours(&self) -> f64 {
        self.work_hours_by_location().values().sum()
    }
}

fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(value)
    }
}

/// Exports are one entry per line, so stored text may not contain line breaks.
fn single_line(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.contains(['\n', '\r']) {
        Err(ValidationError::LineBreak(field))
    } else {
        Ok(())
    }
}

fn parse_time(text: &str) -> Result<TimeRange, ValidationError> {
    TimeRange::parse(text).map_err(|source| ValidationError::InvalidTime {
        text: text.to_string(),
        source,
    })
}

fn validate_class(
    name: &str,
    instructor: &str,
    day_spec: &str,
    time: &str,
    rule: DayRule,
) -> Result<(Vec<Weekday>, TimeRange), ValidationError> {
    let name = require(name, "name")?;
    let day_spec = require(day_spec, "days")?;
    let time = require(time, "time")?;
    single_line(name, "name")?;
    single_line(instructor.trim(), "instructor")?;
    single_line(time, "time")?;

    let range = parse_time(time)?;
    let days = match rule {
        DayRule::Lenient => parse_days(day_spec),
        DayRule::Strict => parse_day_list(day_spec),
    };
    if days.is_empty() {
        return Err(ValidationError::NoValidDays(day_spec.to_string()));
    }
    Ok((days, range))
}

fn validate_work(
    day_label: &str,
    time: &str,
    location: &str,
    lookup: fn(&str) -> Option<Weekday>,
) -> Result<(Weekday, TimeRange), ValidationError> {
    let day_label = require(day_label, "day")?;
    let time = require(time, "time")?;
    let location = require(location, "location")?;
    single_line(time, "time")?;
    single_line(location, "location")?;

    let range = parse_time(time)?;
    let day = lookup(day_label).ok_or_else(|| ValidationError::UnknownDay(day_label.to_string()))?;
    Ok((day, range))
}
