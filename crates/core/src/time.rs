#![forbid(unsafe_code)]

use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

/// Wall-clock milliseconds since the Unix epoch, as stored in `created_at_ms`.
pub fn now_ms() -> i64 {
    let ms = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    i64::try_from(ms).unwrap_or(i64::MAX)
}

/// Renders a stored `created_at_ms` value for the strategy listing. Values
/// outside the representable calendar range render as the epoch.
pub fn created_at_rfc3339(created_at_ms: i64) -> String {
    OffsetDateTime::UNIX_EPOCH
        .checked_add(Duration::milliseconds(created_at_ms))
        .and_then(|at| at.format(&Rfc3339).ok())
        .unwrap_or_else(|| String::from("1970-01-01T00:00:00Z"))
}
