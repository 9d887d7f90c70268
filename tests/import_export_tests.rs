use chrono::{NaiveDate, Weekday};
use tempfile::NamedTempFile;
use week_planner::{
    RowError, RowErrorKind, ScheduleStore, decode, encode, export_file_name, export_to_path,
    import_from_path,
};

fn build_sample_store() -> ScheduleStore {
    let mut store = ScheduleStore::new();
    store
        .add_class("Calculus II", "Dr. Ada \"Ace\" Lovelace", "MWF", "9:00-9:50")
        .unwrap();
    store
        .add_class("Lab, Section B", "", "TR", "13:00 - 15:30")
        .unwrap();
    store.add_work("Saturday", "22:00-02:00", "Night Desk").unwrap();
    store.add_work("Monday", "10:00-14:00", "Library").unwrap();
    store
}

#[test]
fn encode_writes_the_exchange_format() {
    let store = build_sample_store();
    let expected = [
        "Type,Title,Description,Days,Time,Color",
        r#"class,"Calculus II","Dr. Ada ""Ace"" Lovelace","Monday, Wednesday, Friday","9:00-9:50",blue"#,
        r#"class,"Lab, Section B","","Tuesday, Thursday","13:00 - 15:30",blue"#,
        r#"work,WORK,"Night Desk","Saturday","22:00-02:00",green"#,
        r#"work,WORK,"Library","Monday","10:00-14:00",green"#,
    ]
    .join("\n");
    assert_eq!(encode(&store), expected);
}

#[test]
fn encode_of_empty_store_is_just_the_header() {
    assert_eq!(
        encode(&ScheduleStore::new()),
        "Type,Title,Description,Days,Time,Color"
    );
}

#[test]
fn csv_round_trip_preserves_entries() {
    let original = build_sample_store();
    let mut loaded = ScheduleStore::new();
    let summary = decode(&encode(&original), &mut loaded);

    assert_eq!(summary.added_classes, 2);
    assert_eq!(summary.added_work, 2);
    assert!(summary.errors.is_empty());

    let before: Vec<_> = original
        .classes()
        .map(|c| (c.name.clone(), c.instructor.clone(), c.days.clone(), c.time.clone()))
        .collect();
    let after: Vec<_> = loaded
        .classes()
        .map(|c| (c.name.clone(), c.instructor.clone(), c.days.clone(), c.time.clone()))
        .collect();
    assert_eq!(before, after);

    let before: Vec<_> = original
        .work_sessions()
        .map(|w| (w.day, w.time.clone(), w.location.clone(), w.day_label.clone()))
        .collect();
    let after: Vec<_> = loaded
        .work_sessions()
        .map(|w| (w.day, w.time.clone(), w.location.clone(), w.day_label.clone()))
        .collect();
    assert_eq!(before, after);

    assert_eq!(encode(&loaded), encode(&original));
}

#[test]
fn one_bad_row_does_not_stop_the_import() {
    let text = "Type,Title,Description,Days,Time,Color\n\
                class,\"Biology\",\"Dr. B\",\"Monday, Wednesday\",\"8:00-9:15\",blue\n\
                class,\"Broken\",\"\",\"Monday\",\"noon-ish\",blue\n\
                work,WORK,\"Cafe\",\"Tuesday\",\"16:00-20:00\",green\n\
                class,\"Art\",\"\",\"Fri\",\"14:00-16:00\",blue";
    let mut store = ScheduleStore::new();
    let summary = decode(text, &mut store);

    assert_eq!(summary.added_classes, 2);
    assert_eq!(summary.added_work, 1);
    assert_eq!(summary.rows_read, 4);
    assert_eq!(summary.errors.len(), 1);
    assert_eq!(summary.errors[0].row, 3);
    assert!(matches!(
        summary.errors[0].kind,
        RowErrorKind::InvalidClass(_)
    ));
    assert_eq!(store.total_classes(), 2);
    assert_eq!(store.total_work_sessions(), 1);
}

#[test]
fn malformed_row_between_valid_rows_is_reported() {
    let text = "Type,Title,Description,Days,Time,Color\n\
                class,\"A\",\"\",\"Monday\",\"8:00-9:00\",blue\n\
                this row is garbage\n\
                work,WORK,\"Cafe\",\"Friday\",\"16:00-20:00\",green";
    let mut store = ScheduleStore::new();
    let summary = decode(text, &mut store);

    assert_eq!(summary.added(), 2);
    assert_eq!(
        summary.errors,
        vec![RowError {
            row: 3,
            kind: RowErrorKind::InsufficientData,
        }]
    );
    assert_eq!(summary.errors[0].to_string(), "Row 3: Insufficient data");
}

#[test]
fn unknown_type_and_bad_work_day_are_row_errors() {
    let text = "Type,Title,Description,Days,Time,Color\n\
                meeting,\"Standup\",\"\",\"Monday\",\"9:00-9:15\",red\n\
                work,WORK,\"Cafe\",\"Monday, Tuesday\",\"16:00-20:00\",green\n\
                WORK,WORK,\"Cafe\",\"thur\",\"16:00-20:00\",green";
    let mut store = ScheduleStore::new();
    let summary = decode(text, &mut store);

    assert_eq!(summary.added_work, 1);
    assert_eq!(summary.errors.len(), 2);
    assert_eq!(
        summary.errors[0].kind,
        RowErrorKind::UnknownType("meeting".into())
    );
    assert_eq!(summary.errors[0].to_string(), "Row 2: Unknown type \"meeting\"");
    assert!(matches!(summary.errors[1].kind, RowErrorKind::InvalidWork(_)));

    let work = store.work_sessions().next().unwrap();
    assert_eq!(work.day, Weekday::Thu);
    assert_eq!(work.day_label, "thur");
}

#[test]
fn class_days_in_csv_do_not_accept_letter_runs() {
    let text = "Type,Title,Description,Days,Time,Color\n\
                class,\"Math\",\"\",\"MWF\",\"9:00-10:00\",blue";
    let mut store = ScheduleStore::new();
    let summary = decode(text, &mut store);
    assert_eq!(summary.added(), 0);
    assert_eq!(summary.errors.len(), 1);
}

#[test]
fn windows_line_endings_are_tolerated() {
    let text = "Type,Title,Description,Days,Time,Color\r\n\
                class,\"Math\",\"\",\"Monday\",\"9:00-10:00\",blue\r\n\
                work,WORK,\"Cafe\",\"Friday\",\"16:00-20:00\",green\r\n";
    let mut store = ScheduleStore::new();
    let summary = decode(text, &mut store);
    assert_eq!(summary.added(), 2);
    assert!(summary.errors.is_empty());
}

#[test]
fn empty_or_header_only_input_adds_nothing() {
    let mut store = ScheduleStore::new();
    for text in ["", "Type,Title,Description,Days,Time,Color\n"] {
        let summary = decode(text, &mut store);
        assert_eq!(summary.added(), 0);
        assert_eq!(summary.rows_read, 0);
        assert!(summary.errors.is_empty());
    }
    assert!(store.is_empty());
}

#[test]
fn report_truncates_long_error_lists() {
    let mut text = String::from("Type,Title,Description,Days,Time,Color");
    for _ in 0..7 {
        text.push_str("\nbogus");
    }
    text.push_str("\nwork,WORK,\"Cafe\",\"Friday\",\"16:00-20:00\",green");
    let mut store = ScheduleStore::new();
    let summary = decode(&text, &mut store);

    let report = summary.report(5);
    assert!(report.starts_with("Import completed!\nClasses added: 0\nWork sessions added: 1"));
    assert!(report.contains("Row 2: Insufficient data"));
    assert!(report.contains("Row 6: Insufficient data"));
    assert!(!report.contains("Row 7:"));
    assert!(report.ends_with("... and 2 more errors"));
}

#[test]
fn file_round_trip() {
    let store = build_sample_store();
    let file = NamedTempFile::new().unwrap();

    export_to_path(&store, file.path()).unwrap();
    let mut loaded = ScheduleStore::new();
    let summary = import_from_path(&mut loaded, file.path()).unwrap();

    assert_eq!(summary.added(), 4);
    assert_eq!(loaded.work_hours_by_location(), store.work_hours_by_location());
}

#[test]
fn missing_file_is_an_io_error() {
    let mut store = ScheduleStore::new();
    let dir = tempfile::tempdir().unwrap();
    let result = import_from_path(&mut store, dir.path().join("nope.csv"));
    assert!(result.is_err());
}

#[test]
fn export_name_uses_the_date() {
    let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    assert_eq!(export_file_name(date), "schedule_2025-01-06.csv");
}

#[test]
fn every_accepted_entry_survives_a_round_trip() {
    let mut store = ScheduleStore::new();
    assert!(store.add_class("A", "line1\nline2", "MWF", "9:00-10:00").is_err());
    store
        .add_class("Seminar, \"Advanced\"", "Prof. O'Neil", "Mon,Thu", " 18:00 - 20:30 ")
        .unwrap();
    store.add_work("Sunday", "23:00-1:00", "Front, Desk").unwrap();

    let mut loaded = ScheduleStore::new();
    let summary = decode(&encode(&store), &mut loaded);
    assert_eq!(summary.rows_read, 2);
    assert_eq!(summary.added(), 2);
    assert!(summary.errors.is_empty());
    assert_eq!(encode(&loaded), encode(&store));
}
