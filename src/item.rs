use crate::time_range::TimeRange;
use crate::weekday::day_name;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Store-wide identifier. Ids are handed out in increasing order and are never
/// reused, so ordering by id is ordering by insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ItemId)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Class,
    Work,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Class => "class",
            ItemKind::Work => "work",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassItem {
    pub id: ItemId,
    pub name: String,
    /// Empty when no instructor was given.
    pub instructor: String,
    pub days: Vec<Weekday>,
    /// Time range as the user typed it.
    pub time: String,
    pub range: TimeRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: ItemId,
    /// Lower-case day name as entered, e.g. `monday`.
    pub day_label: String,
    pub day: Weekday,
    pub time: String,
    pub range: TimeRange,
    pub location: String,
}

impl WorkItem {
    pub fn days(&self) -> &[Weekday] {
        std::slice::from_ref(&self.day)
    }

    /// `Monday Work`: the day label with its first letter upper-cased.
    pub fn title(&self) -> String {
        let mut chars = self.day_label.chars();
        match chars.next() {
            Some(first) => format!("{}{} Work", first.to_uppercase(), chars.as_str()),
            None => "Work".to_string(),
        }
    }
}

/// A borrowed view over either kind of entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleItem<'a> {
    Class(&'a ClassItem),
    Work(&'a WorkItem),
}

impl<'a> ScheduleItem<'a> {
    pub fn id(&self) -> ItemId {
        match self {
            ScheduleItem::Class(item) => item.id,
            ScheduleItem::Work(item) => item.id,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            ScheduleItem::Class(_) => ItemKind::Class,
            ScheduleItem::Work(_) => ItemKind::Work,
        }
    }

    pub fn days(&self) -> &'a [Weekday] {
        match self {
            ScheduleItem::Class(item) => &item.days,
            ScheduleItem::Work(item) => item.days(),
        }
    }

    pub fn time(&self) -> &'a str {
        match self {
            ScheduleItem::Class(item) => &item.time,
            ScheduleItem::Work(item) => &item.time,
        }
    }

    pub fn range(&self) -> TimeRange {
        match self {
            ScheduleItem::Class(item) => item.range,
            ScheduleItem::Work(item) => item.range,
        }
    }

    /// Bubble heading: the class name, or `WORK`.
    pub fn title(&self) -> &'a str {
        match self {
            ScheduleItem::Class(item) => &item.name,
            ScheduleItem::Work(_) => "WORK",
        }
    }

    /// Instructor for classes, location for work.
    pub fn subtitle(&self) -> &'a str {
        match self {
            ScheduleItem::Class(item) => &item.instructor,
            ScheduleItem::Work(item) => &item.location,
        }
    }

    /// Full day names joined with `, `.
    pub fn days_text(&self) -> String {
        self.days()
            .iter()
            .map(|day| day_name(*day))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
