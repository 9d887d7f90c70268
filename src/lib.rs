pub mod codec;
pub mod config;
pub mod item;
pub mod layout;
pub mod store;
pub mod summary;
pub mod table;
pub mod time_range;
pub mod weekday;

pub use codec::{
    CodecError, ImportSummary, PasteSummary, RowError, RowErrorKind, decode, encode,
    export_file_name, export_to_path, import_from_path, import_pasted,
};
pub use config::{ConfigError, ImportConfig, PlannerConfig};
pub use item::{ClassItem, ItemId, ItemKind, ScheduleItem, WorkItem};
pub use layout::{Bubble, GridRow, LayoutConfig, grid_rows, layout_item, layout_week};
pub use store::{ScheduleStore, ValidationError};
pub use summary::{LocationHours, ScheduleSummary, round_tenth};
pub use time_range::{TimeRange, TimeRangeError};
pub use weekday::{day_name, lookup_day_name, lookup_full_day_name, parse_day_list, parse_days};
