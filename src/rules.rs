// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Rule data the registry evaluates for a zone.
//!
//! Named zones are backed by the compiled IANA database in `chrono-tz`. Fixed
//! zones carry a single offset and never observe daylight saving time; their
//! identifier and abbreviation are `GMT±HHMM` placeholders (`GMT` for zero).

use std::borrow::Cow;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone};
use chrono_tz::{OffsetComponents, OffsetName, Tz};

use crate::clock::Instant;

/// Largest magnitude accepted for a fixed offset, in seconds.
pub const MAX_FIXED_OFFSET_SECS: i32 = 18 * SECONDS_PER_HOUR;

const SECONDS_PER_HOUR: i32 = 3600;
const SECONDS_PER_MINUTE: i32 = 60;

/// Step used when scanning forward for the next transition. No zone has two
/// transitions closer together than this.
const TRANSITION_SCAN_STEP_SECS: i64 = 12 * 3600;
/// Transitions further than this past the anchor are not reported.
const TRANSITION_SCAN_HORIZON_SECS: i64 = 400 * 86400;

/// How far on either side of an instant to look for a negative saving.
const NEGATIVE_SAVE_WINDOW_DAYS: i64 = 371;
/// Shorter than the shortest negative saving period (Ramadan in Morocco).
const NEGATIVE_SAVE_STEP_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneRules {
    /// A geopolitical zone from the IANA database
    Named(Tz),
    /// A constant offset from UTC
    Fixed(FixedOffset),
}

impl ZoneRules {
    /// Resolve an IANA identifier, e.g. `"America/Los_Angeles"`.
    pub fn named(identifier: &str) -> Option<Self> {
        Tz::from_str(identifier).ok().map(ZoneRules::Named)
    }

    /// A fixed offset in seconds east of UTC, rejected beyond ±18 hours.
    pub fn fixed(seconds: i32) -> Option<Self> {
        if seconds.unsigned_abs() > MAX_FIXED_OFFSET_SECS as u32 {
            return None;
        }
        FixedOffset::east_opt(seconds).map(ZoneRules::Fixed)
    }

    /// Resolve an IANA identifier, falling back to a `GMT±HHMM` placeholder.
    pub fn parse(identifier: &str) -> Option<Self> {
        Self::named(identifier)
            .or_else(|| parse_gmt_placeholder(identifier).and_then(Self::fixed))
    }

    /// The IANA name, or the `GMT±HHMM` placeholder of a fixed zone.
    pub fn identifier(&self) -> Cow<'static, str> {
        match self {
            ZoneRules::Named(tz) => Cow::Borrowed(tz.name()),
            ZoneRules::Fixed(offset) => Cow::Owned(gmt_placeholder(offset.local_minus_utc())),
        }
    }

    /// Seconds east of UTC in effect at `at`.
    pub fn offset_seconds(&self, at: Instant) -> i32 {
        self.offset_from_utc(&at.naive_utc()).local_minus_utc()
    }

    pub fn abbreviation(&self, at: Instant) -> Option<String> {
        match self {
            ZoneRules::Named(tz) => tz
                .offset_from_utc_datetime(&at.naive_utc())
                .abbreviation()
                .map(str::to_owned),
            ZoneRules::Fixed(offset) => Some(gmt_placeholder(offset.local_minus_utc())),
        }
    }

    pub fn is_daylight_saving_time(&self, at: Instant) -> bool {
        !self.daylight_saving_offset(at).is_zero()
    }

    /// Daylight saving adjustment in effect at `at`, zero outside of DST.
    ///
    /// Some zones, Europe/Dublin among them, are defined with a negative
    /// saving in winter. They are reported the other way around: winter is
    /// standard time and the rest of the year is daylight saving time by the
    /// same amount.
    pub fn daylight_saving_offset(&self, at: Instant) -> TimeDelta {
        let tz = match self {
            ZoneRules::Named(tz) => tz,
            ZoneRules::Fixed(_) => return TimeDelta::zero(),
        };
        let save = raw_save(tz, at);
        if save < TimeDelta::zero() {
            return TimeDelta::zero();
        }
        if !save.is_zero() {
            return save;
        }
        match (negative_save_near(tz, at, -1), negative_save_near(tz, at, 1)) {
            (Some(_), Some(next)) => -next,
            _ => TimeDelta::zero(),
        }
    }

    /// The first whole second strictly after `at` whose offset or daylight
    /// saving flag differs from the one in effect at `at`.
    pub fn next_transition_after(&self, at: Instant) -> Option<Instant> {
        if let ZoneRules::Fixed(_) = self {
            return None;
        }

        let initial = self.transition_state(at);
        let anchor = at.timestamp();
        let horizon = anchor.checked_add(TRANSITION_SCAN_HORIZON_SECS)?;

        let mut lo = anchor;
        while lo < horizon {
            let hi = lo + TRANSITION_SCAN_STEP_SECS;
            if self.transition_state_at_secs(hi)? != initial {
                return self.bisect_transition(lo, hi, initial);
            }
            lo = hi;
        }
        None
    }

    /// Narrow `(lo, hi]` down to the first second whose state is not `initial`.
    fn bisect_transition(
        &self,
        mut lo: i64,
        mut hi: i64,
        initial: (i32, bool),
    ) -> Option<Instant> {
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.transition_state_at_secs(mid)? == initial {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        DateTime::from_timestamp(hi, 0)
    }

    /// Offset and raw database DST flag. A negative saving flips the flag at
    /// the same instants as a positive one, so transitions are found either way.
    fn transition_state(&self, at: Instant) -> (i32, bool) {
        match self {
            ZoneRules::Named(tz) => {
                let offset = tz.offset_from_utc_datetime(&at.naive_utc());
                (offset.fix().local_minus_utc(), !offset.dst_offset().is_zero())
            },
            ZoneRules::Fixed(offset) => (offset.local_minus_utc(), false),
        }
    }

    fn transition_state_at_secs(&self, timestamp_secs: i64) -> Option<(i32, bool)> {
        DateTime::from_timestamp(timestamp_secs, 0).map(|at| self.transition_state(at))
    }

    pub(crate) fn offset_from_utc(&self, utc: &NaiveDateTime) -> FixedOffset {
        match self {
            ZoneRules::Named(tz) => tz.offset_from_utc_datetime(utc).fix(),
            ZoneRules::Fixed(offset) => *offset,
        }
    }

    pub(crate) fn offset_from_local(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
        match self {
            ZoneRules::Named(tz) => tz.offset_from_local_datetime(local).map(|o| o.fix()),
            ZoneRules::Fixed(offset) => LocalResult::Single(*offset),
        }
    }
}

fn raw_save(tz: &Tz, at: Instant) -> TimeDelta {
    tz.offset_from_utc_datetime(&at.naive_utc()).dst_offset()
}

/// The first negative saving found walking away from `at`, backwards for a
/// negative `direction` and forwards otherwise.
fn negative_save_near(tz: &Tz, at: Instant, direction: i64) -> Option<TimeDelta> {
    (1..=NEGATIVE_SAVE_WINDOW_DAYS / NEGATIVE_SAVE_STEP_DAYS)
        .filter_map(|step| {
            at.checked_add_signed(TimeDelta::days(direction * step * NEGATIVE_SAVE_STEP_DAYS))
        })
        .map(|sample| raw_save(tz, sample))
        .find(|save| *save < TimeDelta::zero())
}

impl Hash for ZoneRules {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            ZoneRules::Named(tz) => {
                0u8.hash(state);
                tz.name().hash(state);
            },
            ZoneRules::Fixed(offset) => {
                1u8.hash(state);
                offset.local_minus_utc().hash(state);
            },
        }
    }
}

/// Placeholder identifier for a fixed offset: `GMT`, `GMT+0530`, `GMT-0800`,
/// with trailing seconds only when the offset has them.
fn gmt_placeholder(offset_secs: i32) -> String {
    if offset_secs == 0 {
        return "GMT".to_string();
    }
    let sign = if offset_secs < 0 { '-' } else { '+' };
    let abs = offset_secs.unsigned_abs();
    let hours = abs / SECONDS_PER_HOUR as u32;
    let minutes = abs % SECONDS_PER_HOUR as u32 / SECONDS_PER_MINUTE as u32;
    let seconds = abs % SECONDS_PER_MINUTE as u32;
    if seconds == 0 {
        format!("GMT{sign}{hours:02}{minutes:02}")
    } else {
        format!("GMT{sign}{hours:02}{minutes:02}{seconds:02}")
    }
}

/// Parse `GMT+HH`, `GMT+HHMM` or `GMT+HHMMSS` (either sign) into seconds.
fn parse_gmt_placeholder(identifier: &str) -> Option<i32> {
    let rest = identifier.strip_prefix("GMT")?;
    let (sign, digits) = match rest.as_bytes().first()? {
        b'+' => (1, &rest[1..]),
        b'-' => (-1, &rest[1..]),
        _ => return None,
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let field = |range: std::ops::Range<usize>| -> Option<i32> {
        digits.get(range).and_then(|s| s.parse().ok())
    };
    let (hours, minutes, seconds) = match digits.len() {
        2 => (field(0..2)?, 0, 0),
        4 => (field(0..2)?, field(2..4)?, 0),
        6 => (field(0..2)?, field(2..4)?, field(4..6)?),
        _ => return None,
    };
    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    Some(sign * (hours * SECONDS_PER_HOUR + minutes * SECONDS_PER_MINUTE + seconds))
}
