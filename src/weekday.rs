use chrono::Weekday;
use tracing::debug;

/// Monday-first order; the index of a day in this array is its canonical number.
pub const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const FULL_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Every token the free-text parser understands, including single letters.
/// Thursday's single letter is `r` so that `t` can stay Tuesday.
const DAY_TOKENS: [(&str, Weekday); 25] = [
    ("monday", Weekday::Mon),
    ("mon", Weekday::Mon),
    ("m", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("tue", Weekday::Tue),
    ("tu", Weekday::Tue),
    ("t", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("wed", Weekday::Wed),
    ("w", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("thur", Weekday::Thu),
    ("thu", Weekday::Thu),
    ("th", Weekday::Thu),
    ("r", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("fri", Weekday::Fri),
    ("f", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sat", Weekday::Sat),
    ("s", Weekday::Sat),
    ("sunday", Weekday::Sun),
    ("sun", Weekday::Sun),
    ("su", Weekday::Sun),
    ("u", Weekday::Sun),
];

/// Names accepted by strict lookups (imports): full names and short codes,
/// never single letters.
const STRICT_NAMES: [(&str, Weekday); 15] = [
    ("monday", Weekday::Mon),
    ("mon", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("tue", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("wed", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("thu", Weekday::Thu),
    ("thur", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("fri", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sat", Weekday::Sat),
    ("sunday", Weekday::Sun),
    ("sun", Weekday::Sun),
];

pub fn day_index(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

/// Full English name, e.g. `Monday`.
pub fn day_name(day: Weekday) -> &'static str {
    FULL_NAMES[day_index(day)]
}

/// Exact (case-insensitive) match against the seven full day names.
pub fn lookup_full_day_name(token: &str) -> Option<Weekday> {
    let token = token.trim();
    ALL_WEEKDAYS
        .iter()
        .copied()
        .find(|day| day_name(*day).eq_ignore_ascii_case(token))
}

/// Full names, three-letter codes and `thur`.
pub fn lookup_day_name(token: &str) -> Option<Weekday> {
    let token = token.trim().to_lowercase();
    STRICT_NAMES
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, day)| *day)
}

/// Comma-separated list of strictly named days, e.g. `Monday, Wednesday`.
/// Unknown names are dropped.
pub fn parse_day_list(text: &str) -> Vec<Weekday> {
    normalize(text.split(',').filter_map(lookup_day_name).collect())
}

fn lookup_token(token: &str) -> Option<Weekday> {
    DAY_TOKENS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, day)| *day)
}

/// Parse a free-text day specification into ascending, distinct weekdays.
///
/// With a comma the input is a list of names (`Mon,Wed,Fri`, `tu, th`);
/// without one it is a compact run of letters (`MWF`, `TR`, `TuTh`). In a
/// compact run `th` and `tu` are claimed first, then each remaining letter is
/// mapped on its own, and a bare `t` means Tuesday.
///
/// An empty result means nothing in `text` named a day.
pub fn parse_days(text: &str) -> Vec<Weekday> {
    let lowered: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    let days = if lowered.contains(',') {
        lowered.split(',').filter_map(lookup_token).collect()
    } else {
        parse_compact_run(lowered)
    };

    let days = normalize(days);
    debug!(input = text, ?days, "parsed day specification");
    days
}

fn parse_compact_run(mut run: String) -> Vec<Weekday> {
    let mut days = Vec::new();

    for (pair, day) in [("th", Weekday::Thu), ("tu", Weekday::Tue)] {
        if let Some(pos) = run.find(pair) {
            days.push(day);
            run.replace_range(pos..pos + pair.len(), "");
        }
    }

    for ch in run.chars() {
        let tuesday_or_thursday_seen = days.contains(&Weekday::Tue) || days.contains(&Weekday::Thu);
        if ch == 't' && !tuesday_or_thursday_seen {
            days.push(Weekday::Tue);
            continue;
        }
        let mut buf = [0u8; 4];
        if let Some(day) = lookup_token(ch.encode_utf8(&mut buf)) {
            if !days.contains(&day) {
                days.push(day);
            }
        }
    }

    days
}

fn normalize(mut days: Vec<Weekday>) -> Vec<Weekday> {
    days.sort_by_key(|day| day.num_days_from_monday());
    days.dedup();
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use Weekday::*;

    #[test]
    fn compact_runs() {
        assert_eq!(parse_days("MWF"), vec![Mon, Wed, Fri]);
        assert_eq!(parse_days("TR"), vec![Tue, Thu]);
        assert_eq!(parse_days("mtwrf"), vec![Mon, Tue, Wed, Thu, Fri]);
        assert_eq!(parse_days("TuTh"), vec![Tue, Thu]);
        assert_eq!(parse_days("su"), vec![Sat, Sun]);
    }

    #[test]
    fn bare_t_is_tuesday() {
        assert_eq!(parse_days("t"), vec![Tue]);
        assert_eq!(parse_days("Th"), vec![Thu]);
    }

    #[test]
    fn comma_lists_accept_every_form() {
        assert_eq!(parse_days("Mon,Wed,Fri"), vec![Mon, Wed, Fri]);
        assert_eq!(parse_days("monday, th ,r,u"), vec![Mon, Thu, Sun]);
        assert_eq!(parse_days("fri,bogus,,mon"), vec![Mon, Fri]);
    }

    #[test]
    fn nothing_recognized_is_empty() {
        assert!(parse_days("xyz").is_empty());
        assert!(parse_days("").is_empty());
        assert!(parse_days("foo,bar").is_empty());
    }

    #[test]
    fn strict_lookup_rejects_letters() {
        assert_eq!(lookup_day_name("Thur"), Some(Thu));
        assert_eq!(lookup_day_name(" SAT "), Some(Sat));
        assert_eq!(lookup_day_name("r"), None);
        assert_eq!(lookup_day_name("tu"), None);
    }

    #[test]
    fn full_name_lookup() {
        assert_eq!(lookup_full_day_name("wednesday"), Some(Wed));
        assert_eq!(lookup_full_day_name("wed"), None);
        assert_eq!(day_name(Sun), "Sunday");
        assert_eq!(day_index(Thu), 3);
    }

    #[test]
    fn day_list_uses_strict_names() {
        assert_eq!(parse_day_list("Friday, Monday, Monday"), vec![Mon, Fri]);
        assert_eq!(parse_day_list("M, W"), Vec::<Weekday>::new());
    }
}
