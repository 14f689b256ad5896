//! Date-time parsing for datetime fields.
//!
//! Inputs come from a local date-time control (`2024-05-01T13:45`, seconds
//! optional) or are pasted as RFC 3339. Control values carry no offset and are
//! read as local time; RFC 3339 values keep their own offset, so both compare
//! as instants.

use time::{
    OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

const LOCAL_MINUTES: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");
const LOCAL_SECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const SPACED_MINUTES: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");
const SPACED_SECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Placeholder shown in empty datetime inputs.
pub const TIMESTAMP_HINT: &str = "YYYY-MM-DDTHH:MM";

/// Offset of the machine's time zone, UTC when it cannot be determined.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Parse a timestamp in any accepted layout, reading offset-less input as local time.
pub fn parse_timestamp(input: &str) -> Option<OffsetDateTime> {
    parse_timestamp_in(input, local_offset())
}

/// Parse a timestamp, reading offset-less input in the `local` offset.
pub fn parse_timestamp_in(input: &str, local: UtcOffset) -> Option<OffsetDateTime> {
    let trimmed = input.trim();
    for layout in [LOCAL_MINUTES, LOCAL_SECONDS, SPACED_MINUTES, SPACED_SECONDS] {
        if let Ok(parsed) = PrimitiveDateTime::parse(trimmed, layout) {
            return Some(parsed.assume_offset(local));
        }
    }
    OffsetDateTime::parse(trimmed, &Rfc3339).ok()
}

/// Format a moment the way a local date-time control would.
pub fn format_timestamp(moment: OffsetDateTime) -> String {
    moment
        .format(LOCAL_MINUTES)
        .unwrap_or_else(|_| moment.date().to_string())
}

/// Current local time (UTC if the local offset is unavailable), minute precision.
pub fn now_local_timestamp() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format_timestamp(now)
}
