//! Timestamp Helpers
//!
//! The service emits ISO-8601 timestamps, sometimes without a UTC designator
//! (`2024-12-13T00:00:00`). Those are read as UTC. Due dates are typed by the
//! user as `dd/mm/yyyy HH:mm` in local time and sent as UTC instants.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};

use crate::shared::error::SharedError;

/// Input shape accepted by the due-date field
pub const DUE_INPUT_FORMAT: &str = "dd/mm/yyyy HH:mm";

const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse a timestamp from the service; a missing offset means UTC
pub fn parse_server_timestamp(raw: &str) -> Result<DateTime<Utc>, SharedError> {
    let trimmed = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| SharedError::invalid_date(raw, "expected an ISO-8601 timestamp"))
}

/// Render a timestamp the way it is sent to the service
pub fn to_wire(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Serde adapter for required timestamps
pub mod lenient {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_wire(instant))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_server_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional timestamps (`null` or absent → `None`)
pub mod lenient_option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        instant: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match instant {
            Some(instant) => serializer.serialize_str(&super::to_wire(instant)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => super::parse_server_timestamp(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

fn has_due_input_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == DUE_INPUT_FORMAT.len()
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'/',
            10 => *b == b' ',
            13 => *b == b':',
            _ => b.is_ascii_digit(),
        })
}

/// Parse `dd/mm/yyyy HH:mm` typed in `tz` into a UTC instant
pub fn parse_due_date_input<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<DateTime<Utc>, SharedError> {
    let trimmed = input.trim();
    if !has_due_input_shape(trimmed) {
        return Err(SharedError::invalid_date(
            input,
            "Invalid date format. Use dd/mm/yyyy HH:mm (e.g., 16/12/2025 14:30)",
        ));
    }
    let field = |range: std::ops::Range<usize>| trimmed[range].parse::<u32>().unwrap_or(u32::MAX);
    let (day, month, year) = (field(0..2), field(3..5), field(6..10));
    let (hour, minute) = (field(11..13), field(14..16));

    let invalid_values =
        || SharedError::invalid_date(input, "Invalid date. Please check day/month/year values.");
    let date = NaiveDate::from_ymd_opt(year as i32, month, day).ok_or_else(invalid_values)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid_values)?;

    match tz.from_local_datetime(&NaiveDateTime::new(date, time)) {
        LocalResult::Single(local) => Ok(local.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        // skipped by a DST transition
        LocalResult::None => Err(invalid_values()),
    }
}

/// Render an instant in `tz` using the due-date input shape
pub fn format_due_input<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> String {
    instant
        .with_timezone(tz)
        .naive_local()
        .format("%d/%m/%Y %H:%M")
        .to_string()
}

/// How close a due date is, in local calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    Today,
    Tomorrow,
    Upcoming,
}

impl DueStatus {
    /// Overdue and due-today cards are highlighted the same way
    pub fn is_urgent(self) -> bool {
        matches!(self, DueStatus::Overdue | DueStatus::Today)
    }
}

/// Display text for a due date plus its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueLabel {
    pub text: String,
    pub status: DueStatus,
}

/// Describe `due` relative to `now`, both viewed in `tz`
pub fn describe_due<Tz: TimeZone>(due: &DateTime<Utc>, now: &DateTime<Utc>, tz: &Tz) -> DueLabel {
    let local_due = due.with_timezone(tz).naive_local();
    let local_now = now.with_timezone(tz).naive_local();
    let diff_days = (local_due.date() - local_now.date()).num_days();

    let clock = local_due.format("%H:%M");
    let full = local_due.format("%d/%m/%Y %H:%M");

    let (text, status) = match diff_days {
        d if d < 0 => (format!("Overdue ({})", full), DueStatus::Overdue),
        0 => (format!("Today {}", clock), DueStatus::Today),
        1 => (format!("Tomorrow {}", clock), DueStatus::Tomorrow),
        d if d <= 7 => (
            format!("{} days ({} {})", d, local_due.format("%d/%m"), clock),
            DueStatus::Upcoming,
        ),
        _ => (full.to_string(), DueStatus::Upcoming),
    };
    DueLabel { text, status }
}
