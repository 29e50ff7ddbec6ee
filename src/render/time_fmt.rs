use std::sync::OnceLock;

use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime, UtcOffset};

pub const PLACEHOLDER: &str = "--";

/// Collector schedule: one run every three hours.
pub const NEXT_UPDATE_INTERVAL: Duration = Duration::hours(3);

fn display_format() -> &'static [BorrowedFormatItem<'static>] {
    static FMT: OnceLock<Vec<BorrowedFormatItem<'static>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse(
            "[month repr:short] [day padding:none], [year], [hour repr:12 padding:none]:[minute] [period] UTC",
        )
        .expect("valid time format")
    })
}

pub fn parse_timestamp(ts: Option<&str>) -> Option<OffsetDateTime> {
    let ts = ts?.trim();
    if ts.is_empty() {
        return None;
    }
    OffsetDateTime::parse(ts, &Rfc3339).ok()
}

pub fn format_timestamp(dt: OffsetDateTime) -> Option<String> {
    dt.to_offset(UtcOffset::UTC).format(display_format()).ok()
}

pub fn updated_label(generated_at: Option<&str>) -> String {
    parse_timestamp(generated_at)
        .and_then(format_timestamp)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn next_update_label(generated_at: Option<&str>) -> String {
    parse_timestamp(generated_at)
        .and_then(|dt| dt.checked_add(NEXT_UPDATE_INTERVAL))
        .and_then(format_timestamp)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Snapshot age for the status line: `just now`, `40m ago`, `2h 05m ago`,
/// `3d ago`. Once a full collector interval has passed the label is marked
/// `overdue`. `None` for timestamps in the future or that do not parse.
pub fn relative_age(generated_at: Option<&str>, now: OffsetDateTime) -> Option<String> {
    let age = now - parse_timestamp(generated_at)?;
    if age.is_negative() {
        return None;
    }

    let label = match (age.whole_hours(), age.whole_minutes() % 60) {
        (0, 0) => "just now".to_string(),
        (0, m) => format!("{}m ago", m),
        (h, m) if h < 24 => format!("{}h {:02}m ago", h, m),
        _ => format!("{}d ago", age.whole_days()),
    };
    if age >= NEXT_UPDATE_INTERVAL {
        Some(format!("{}, overdue", label))
    } else {
        Some(label)
    }
}
