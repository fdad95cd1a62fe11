use chrono::{Datelike, NaiveDate};

pub fn month_key(date: NaiveDate) -> String {
    format!("{}-{:02}", date.year(), date.month())
}

/// Intensity glyph for a day's contribution count.
pub fn intensity_glyph(count: u32) -> &'static str {
    match count {
        0 => "░",
        1..=3 => "▒",
        4..=6 => "▓",
        _ => "█",
    }
}

/// Short month label for a "YYYY-MM" key, e.g. "2024-03" -> "Mar".
pub fn month_label(month_key: &str) -> &'static str {
    let month: u32 = month_key
        .rsplit('-')
        .next()
        .and_then(|m| m.parse().ok())
        .unwrap_or(0);
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "???",
    }
}
