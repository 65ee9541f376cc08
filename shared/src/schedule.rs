//! Reservation time slots and the reservation instant
//!
//! Bookings are taken on half-hour slots between 14:00 and 20:00. The form
//! sends a calendar date plus one slot; the backend wants a single ISO
//! instant. [`combine_with_offset`] builds that instant.
//!
//! The backend treats the instant's wall-clock digits as the local time of
//! the booking, so the local offset is folded back in before serialising:
//! a 19:00 booking is always sent as `...T19:00:00.000Z`, whatever zone the
//! client runs in.

use chrono::{
    DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Utc,
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Selectable times, in display order
pub const AVAILABLE_TIMES: [&str; 13] = [
    "14:00", "14:30", "15:00", "15:30", "16:00", "16:30", "17:00", "17:30", "18:00", "18:30",
    "19:00", "19:30", "20:00",
];

/// Wire format of the reservation instant (millisecond precision, `Z` suffix)
const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("{0} is not an available reservation time")]
    UnknownSlot(String),

    #[error("{0} does not exist in the local time zone")]
    NonexistentLocalTime(NaiveDateTime),
}

/// One of the [`AVAILABLE_TIMES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(NaiveTime);

impl TimeSlot {
    /// All slots, earliest first
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        AVAILABLE_TIMES
            .iter()
            .filter_map(|s| NaiveTime::parse_from_str(s, "%H:%M").ok())
            .map(TimeSlot)
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }
}

impl FromStr for TimeSlot {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !AVAILABLE_TIMES.contains(&s) {
            return Err(ScheduleError::UnknownSlot(s.to_string()));
        }
        NaiveTime::parse_from_str(s, "%H:%M")
            .map(TimeSlot)
            .map_err(|_| ScheduleError::UnknownSlot(s.to_string()))
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// Minutes *west* of UTC, the sign convention of a browser's
/// `getTimezoneOffset()` (UTC-5 is `300`, UTC+9 is `-540`).
pub fn timezone_offset_minutes(offset: &FixedOffset) -> i64 {
    -i64::from(offset.local_minus_utc()) / 60
}

/// Builds the reservation instant for `date` at `slot` in a zone `offset`
/// away from UTC.
///
/// The date's time-of-day is overwritten with the slot, the result is
/// resolved as a local time, then the timezone offset is subtracted from
/// its minutes before serialising as UTC.
pub fn combine_with_offset(date: NaiveDate, slot: TimeSlot, offset: FixedOffset) -> String {
    let local = date.and_time(slot.time());
    // A fixed offset maps every wall-clock time to exactly one instant.
    let instant = offset
        .from_local_datetime(&local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&local));

    let adjusted = instant - Duration::minutes(timezone_offset_minutes(&offset));
    format_instant(&adjusted)
}

/// [`combine_with_offset`] in the host's time zone.
///
/// The offset in force at the selected date and slot is used. A slot that
/// falls in a DST gap is rejected; an ambiguous one takes the earlier
/// reading.
pub fn combine_local(date: NaiveDate, slot: TimeSlot) -> Result<String, ScheduleError> {
    let local = date.and_time(slot.time());
    let resolved = Local
        .from_local_datetime(&local)
        .earliest()
        .ok_or(ScheduleError::NonexistentLocalTime(local))?;
    Ok(combine_with_offset(date, slot, resolved.offset().fix()))
}

fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.format(INSTANT_FORMAT).to_string()
}
