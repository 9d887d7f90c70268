use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use week_planner::{
    ItemId, PlannerConfig, ScheduleStore, ScheduleSummary, codec, day_name, grid_rows,
    layout_week, table,
};

#[derive(Parser)]
#[command(name = "cli", about = "Weekly class and work planner")]
struct Args {
    /// TOML config file (defaults to planner.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV export to load before the prompt opens
    #[arg(long)]
    import: Option<PathBuf>,
}

fn print_help() {
    println!(
        "Commands:\n  help                                         Show this help\n  show                                         List every entry\n  stats                                        Show totals and work hours per location\n  class <name> | <instructor> | <days> | <time>\n                                               Add a class (days like MWF, TR, Mon,Wed)\n  work <day> | <time> | <location>             Add a work session (day like Monday)\n  delete <id>                                  Delete an entry\n  clear                                        Delete every entry\n  grid                                         Show entries by hour row\n  json                                         Dump entries and statistics as JSON\n  export [path]                                Write the schedule as CSV\n  import <path>                                Load entries from a CSV export\n  paste <path>                                 Add classes from tab-separated lines\n  quit|exit                                    Exit"
    );
}

fn print_entries(store: &ScheduleStore) {
    match table::items_frame(store) {
        Ok(df) => println!("{}", table::render_text_table(&df)),
        Err(e) => println!("Error: {}", e),
    }
}

fn print_stats(store: &ScheduleStore) {
    let summary = ScheduleSummary::from_store(store);
    println!("Total classes      : {}", summary.total_classes);
    println!("Total work sessions: {}", summary.total_work_sessions);
    println!("Total work hours   : {}", summary.total_work_hours);
    if !summary.by_location.is_empty() {
        match table::location_hours_frame(store) {
            Ok(df) => println!("Work hours by location:\n{}", table::render_text_table(&df)),
            Err(e) => println!("Error: {}", e),
        }
    }
}

fn print_grid(store: &ScheduleStore, config: &PlannerConfig) {
    let bubbles = layout_week(store, &config.layout);
    for row in grid_rows(&config.layout) {
        let cells = bubbles
            .iter()
            .filter(|b| b.row_hour == row.hour)
            .map(|b| format!("{}: {} ({})", day_name(b.day), b.title, b.details))
            .collect::<Vec<_>>();
        if cells.is_empty() {
            println!("{:>8} |", row.label);
        } else {
            println!("{:>8} | {}", row.label, cells.join("; "));
        }
    }
}

fn print_json(store: &ScheduleStore) {
    let snapshot = serde_json::json!({
        "items": store.items().collect::<Vec<_>>(),
        "summary": ScheduleSummary::from_store(store),
    });
    match serde_json::to_string_pretty(&snapshot) {
        Ok(text) => println!("{}", text),
        Err(e) => println!("Error: {}", e),
    }
}

fn import_csv(store: &mut ScheduleStore, path: &str, config: &PlannerConfig) {
    match codec::import_from_path(store, path) {
        Ok(summary) if summary.rows_read == 0 => {
            println!("CSV file appears to be empty or invalid");
        }
        Ok(summary) => println!("{}", summary.report(config.import.max_reported_errors)),
        Err(e) => println!("Error reading CSV file: {}", e),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let loaded = match &args.config {
        Some(path) => PlannerConfig::load_from(path),
        None => PlannerConfig::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}. Using defaults.", e);
            PlannerConfig::default()
        }
    };

    let mut store = ScheduleStore::new();
    if let Some(path) = &args.import {
        import_csv(&mut store, &path.to_string_lossy(), &config);
    }

    println!("Week Planner (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let (cmd, rest) = match input.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (input, ""),
        };

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => print_entries(&store),
            "stats" => print_stats(&store),
            "grid" => print_grid(&store, &config),
            "json" => print_json(&store),
            "class" => {
                let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
                if fields.len() != 4 {
                    println!("Usage: class <name> | <instructor> | <days> | <time>");
                    continue;
                }
                match store.add_class(fields[0], fields[1], fields[2], fields[3]) {
                    Ok(id) => println!("Added class {}.", id),
                    Err(e) => println!("Error: {}", e),
                }
            }
            "work" => {
                let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
                if fields.len() != 3 {
                    println!("Usage: work <day> | <time> | <location>");
                    continue;
                }
                match store.add_work(fields[0], fields[1], fields[2]) {
                    Ok(id) => println!("Added work session {}.", id),
                    Err(e) => println!("Error: {}", e),
                }
            }
            "delete" => {
                let id: ItemId = match rest.parse() {
                    Ok(v) => v,
                    Err(_) => {
                        println!("Invalid id");
                        continue;
                    }
                };
                if store.remove(id) {
                    println!("Deleted entry {}.", id);
                } else {
                    println!("No entry with id {}.", id);
                }
            }
            "clear" => {
                store.clear();
                println!("All schedule data has been cleared.");
            }
            "export" => {
                let path = if rest.is_empty() {
                    codec::export_file_name(chrono::Local::now().date_naive())
                } else {
                    rest.to_string()
                };
                match codec::export_to_path(&store, &path) {
                    Ok(()) => println!("Schedule exported to {}", path),
                    Err(e) => println!("Error: {}", e),
                }
            }
            "import" => {
                if rest.is_empty() {
                    println!("Usage: import <path>");
                    continue;
                }
                import_csv(&mut store, rest, &config);
            }
            "paste" => {
                if rest.is_empty() {
                    println!("Usage: paste <path>");
                    continue;
                }
                let text = match fs::read_to_string(rest) {
                    Ok(text) => text,
                    Err(e) => {
                        println!("Error: {}", e);
                        continue;
                    }
                };
                match codec::import_pasted(&text, &mut store) {
                    Ok(summary) if summary.added > 0 => {
                        println!("Successfully added {} classes", summary.added)
                    }
                    Ok(_) => println!("No valid data found. Please check the format."),
                    Err(e) => println!("Error: {}", e),
                }
            }
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
