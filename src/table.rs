use crate::store::ScheduleStore;
use crate::summary::round_tenth;
use polars::prelude::PlSmallStr;
use polars::prelude::*;

/// One row per entry, classes then work.
pub fn items_frame(store: &ScheduleStore) -> PolarsResult<DataFrame> {
    let mut ids: Vec<u64> = Vec::new();
    let mut kinds: Vec<&str> = Vec::new();
    let mut titles: Vec<String> = Vec::new();
    let mut descriptions: Vec<String> = Vec::new();
    let mut days: Vec<String> = Vec::new();
    let mut times: Vec<String> = Vec::new();
    let mut hours: Vec<f64> = Vec::new();

    for item in store.items() {
        ids.push(item.id().0);
        kinds.push(item.kind().as_str());
        titles.push(item.title().to_string());
        descriptions.push(item.subtitle().to_string());
        days.push(item.days_text());
        times.push(item.time().to_string());
        hours.push(round_tenth(item.range().duration_hours()));
    }

    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("id"), ids).into_column(),
        Series::new(PlSmallStr::from_static("kind"), kinds).into_column(),
        Series::new(PlSmallStr::from_static("title"), titles).into_column(),
        Series::new(PlSmallStr::from_static("description"), descriptions).into_column(),
        Series::new(PlSmallStr::from_static("days"), days).into_column(),
        Series::new(PlSmallStr::from_static("time"), times).into_column(),
        Series::new(PlSmallStr::from_static("hours"), hours).into_column(),
    ])
}

/// Rounded work hours per location, alphabetical.
pub fn location_hours_frame(store: &ScheduleStore) -> PolarsResult<DataFrame> {
    let totals = store.work_hours_by_location();
    let locations: Vec<&str> = totals.keys().map(String::as_str).collect();
    let hours: Vec<f64> = totals.values().copied().map(round_tenth).collect();

    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("location"), locations).into_column(),
        Series::new(PlSmallStr::from_static("hours"), hours).into_column(),
    ])
}

fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Boxed plain-text rendering of a frame for terminals.
pub fn render_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut cells: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| col.get(row_idx).map(|av| cell_text(&av)).unwrap_or_default())
            .collect::<Vec<_>>();
        cells.push(row);
    }

    let mut widths: Vec<usize> = names.iter().map(|n| n.chars().count()).collect();
    for row in &cells {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_line = |values: &[String]| {
        let mut line = String::from("|");
        for (ci, value) in values.iter().enumerate() {
            let pad = widths[ci].saturating_sub(value.chars().count());
            line.push(' ');
            line.push_str(value);
            line.push_str(&" ".repeat(pad));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_line(&names));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        out.push_str(&render_line(row));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}
