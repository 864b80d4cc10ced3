use chrono::{Local, LocalResult, TimeZone};

/// Today on the viewer's clock, in the date picker's `YYYY-MM-DD` format.
pub fn today_ymd() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Slot timestamps are unix seconds; the page shows them as HH:MM on the
/// viewer's clock, like the slot buttons and the confirmation line.
pub fn unix_to_local_hhmm(unix: i64) -> String {
    hhmm_in(unix, &Local).unwrap_or_else(|| "--:--".to_string())
}

fn hhmm_in<Tz: TimeZone>(unix: i64, tz: &Tz) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    match tz.timestamp_opt(unix, 0) {
        LocalResult::Single(datetime) => Some(datetime.format("%H:%M").to_string()),
        _ => None,
    }
}
