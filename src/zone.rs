// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The time zone value type.
//!
//! A [`TimeZoneValue`] is almost always a frozen snapshot of a registry zone.
//! The one exception is the autoupdating current zone, which holds the
//! registry's shared current object and so reflects changes to the system
//! setting as they happen. All autoupdating values are equal to each other and
//! to nothing else, whatever zone they currently show.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::TimeDelta;
use tracing::debug;

use crate::clock::{Clock, Instant, SystemClock};
use crate::error::{Lookup, Result, TimeZoneError};
use crate::handle::ZoneHandle;
use crate::names::NameStyle;
use crate::registry::{Registry, SystemRegistry};
use crate::rules::ZoneRules;

/// Hash shared by every autoupdating value, whatever zone it currently shows.
const AUTOUPDATING_HASH: u64 = 1;

#[derive(Clone)]
pub struct TimeZoneValue {
    backing: Backing,
}

#[derive(Clone)]
enum Backing {
    /// Owned snapshot that nothing can mutate
    Frozen(ZoneHandle),
    /// The registry's shared current object
    Live(ZoneHandle),
}

impl TimeZoneValue {
    /// The system zone as it is right now. Later changes to the system setting
    /// are not reflected.
    pub fn current() -> Self {
        Self::current_in(SystemRegistry::global())
    }

    /// [`TimeZoneValue::current`] against `registry`.
    pub fn current_in<R: Registry + ?Sized>(registry: &R) -> Self {
        let live = registry.current();
        Self {
            backing: Backing::Frozen(registry.clone_zone(&live)),
        }
    }

    /// A view of the system zone that follows changes to the system setting.
    pub fn autoupdating_current() -> Self {
        Self::autoupdating_current_in(SystemRegistry::global())
    }

    /// [`TimeZoneValue::autoupdating_current`] following the current zone of
    /// `registry`.
    pub fn autoupdating_current_in<R: Registry + ?Sized>(registry: &R) -> Self {
        Self {
            backing: Backing::Live(registry.current()),
        }
    }

    /// Look up a geopolitical identifier such as `"America/Los_Angeles"`.
    pub fn from_identifier(identifier: &str) -> Result<Self> {
        Self::from_identifier_in(SystemRegistry::global(), identifier)
    }

    /// Look up `identifier` in `registry`. `GMT±HHMM` placeholders of fixed
    /// zones are accepted as well.
    pub fn from_identifier_in<R: Registry + ?Sized>(
        registry: &R,
        identifier: &str,
    ) -> Result<Self> {
        match registry.lookup_identifier(identifier) {
            Some(handle) => Ok(Self::from_handle_in(registry, handle)),
            None => Err(not_found(Lookup::Identifier(identifier.to_string()))),
        }
    }

    /// A zone fixed at `seconds` east of UTC that never observes daylight
    /// saving time. Its identifier is a registry placeholder.
    pub fn from_offset_seconds(seconds: i32) -> Result<Self> {
        Self::from_offset_seconds_in(SystemRegistry::global(), seconds)
    }

    /// [`TimeZoneValue::from_offset_seconds`] against `registry`.
    pub fn from_offset_seconds_in<R: Registry + ?Sized>(
        registry: &R,
        seconds: i32,
    ) -> Result<Self> {
        match registry.lookup_offset(seconds) {
            Some(handle) => Ok(Self::from_handle_in(registry, handle)),
            None => Err(not_found(Lookup::Offset(seconds))),
        }
    }

    /// Resolve an abbreviation such as `"PST"` through the abbreviation table.
    ///
    /// Abbreviations are ambiguous ("CST" is used in both North America and
    /// China); the result is whichever zone the table designates.
    pub fn from_abbreviation(abbreviation: &str) -> Result<Self> {
        Self::from_abbreviation_in(SystemRegistry::global(), abbreviation)
    }

    /// Resolve `abbreviation` through the abbreviation table of `registry`.
    pub fn from_abbreviation_in<R: Registry + ?Sized>(
        registry: &R,
        abbreviation: &str,
    ) -> Result<Self> {
        match registry.lookup_abbreviation(abbreviation) {
            Some(handle) => Ok(Self::from_handle_in(registry, handle)),
            None => Err(not_found(Lookup::Abbreviation(abbreviation.to_string()))),
        }
    }

    /// Adopt a registry handle. The registry's shared current object becomes
    /// an autoupdating value; anything else is copied so later changes to the
    /// source cannot reach this value.
    pub fn from_handle_in<R: Registry + ?Sized>(registry: &R, handle: ZoneHandle) -> Self {
        let backing = if registry.is_autoupdating(&handle) {
            Backing::Live(handle)
        } else {
            Backing::Frozen(registry.clone_zone(&handle))
        };
        Self { backing }
    }

    /// The handle backing this value.
    pub fn as_handle(&self) -> &ZoneHandle {
        match &self.backing {
            Backing::Frozen(handle) | Backing::Live(handle) => handle,
        }
    }

    /// Whether this is a live view of the system zone.
    pub fn is_autoupdating(&self) -> bool {
        matches!(self.backing, Backing::Live(_))
    }

    pub(crate) fn rules(&self) -> ZoneRules {
        self.as_handle().rules()
    }

    /// The geopolitical identifier, e.g. `"America/Los_Angeles"`.
    pub fn identifier(&self) -> String {
        self.as_handle().identifier().into_owned()
    }

    /// Seconds east of UTC in effect at `at`.
    pub fn offset_seconds(&self, at: Instant) -> i32 {
        self.as_handle().offset_seconds(at)
    }

    /// Abbreviation in effect at `at`, e.g. `"PST"` or `"PDT"`. `None` when the
    /// database has no abbreviation for the zone.
    pub fn abbreviation(&self, at: Instant) -> Option<String> {
        self.as_handle().abbreviation(at)
    }

    /// Whether daylight saving time is in effect at `at`. The season with the
    /// higher offset counts as daylight saving time, also for zones such as
    /// Europe/Dublin whose database rules give winter a negative saving.
    pub fn is_daylight_saving_time(&self, at: Instant) -> bool {
        self.as_handle().is_daylight_saving_time(at)
    }

    /// Daylight saving adjustment in effect at `at`, zero outside of DST.
    pub fn daylight_saving_offset(&self, at: Instant) -> TimeDelta {
        self.as_handle().daylight_saving_offset(at)
    }

    /// The next instant strictly after `at` at which the offset or daylight
    /// saving state changes, or `None` if the zone no longer observes daylight
    /// saving time.
    pub fn next_daylight_transition_after(&self, at: Instant) -> Option<Instant> {
        self.as_handle().next_transition_after(at)
    }

    /// [`TimeZoneValue::next_daylight_transition_after`] the current time.
    pub fn next_daylight_transition(&self) -> Option<Instant> {
        self.next_daylight_transition_with(&SystemClock)
    }

    /// The next transition after the time reported by `clock`.
    pub fn next_daylight_transition_with<C: Clock + ?Sized>(
        &self,
        clock: &C,
    ) -> Option<Instant> {
        self.next_daylight_transition_after(clock.now())
    }

    /// Display name in `style` for `locale`, e.g. `"PST"` or
    /// `"Los Angeles Time"`. Unknown locales fall back to English.
    pub fn localized_name(&self, style: NameStyle, locale: &str) -> Option<String> {
        self.localized_name_in(SystemRegistry::global(), style, locale)
    }

    /// [`TimeZoneValue::localized_name`] with the standard and daylight saving
    /// names taken from the year following `at`.
    pub fn localized_name_at(
        &self,
        style: NameStyle,
        locale: &str,
        at: Instant,
    ) -> Option<String> {
        SystemRegistry::global().localized_name_at(self.as_handle(), style, locale, at)
    }

    /// [`TimeZoneValue::localized_name`] as produced by `registry`.
    pub fn localized_name_in<R: Registry + ?Sized>(
        &self,
        registry: &R,
        style: NameStyle,
        locale: &str,
    ) -> Option<String> {
        registry.localized_name(self.as_handle(), style, locale)
    }
}

fn not_found(lookup: Lookup) -> TimeZoneError {
    debug!("Time zone lookup failed: {}", lookup);
    TimeZoneError::NotFound(lookup)
}

impl PartialEq for TimeZoneValue {
    fn eq(&self, other: &Self) -> bool {
        match (&self.backing, &other.backing) {
            (Backing::Live(_), Backing::Live(_)) => true,
            (Backing::Frozen(a), Backing::Frozen(b)) => a.rules() == b.rules(),
            _ => false,
        }
    }
}

impl Eq for TimeZoneValue {}

impl Hash for TimeZoneValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.backing {
            Backing::Live(_) => AUTOUPDATING_HASH.hash(state),
            Backing::Frozen(handle) => handle.rules().hash(state),
        }
    }
}

impl fmt::Display for TimeZoneValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_handle().identifier())
    }
}

impl fmt::Debug for TimeZoneValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeZoneValue")
            .field("identifier", &self.identifier())
            .field("autoupdating", &self.is_autoupdating())
            .finish()
    }
}

impl FromStr for TimeZoneValue {
    type Err = TimeZoneError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_identifier(s)
    }
}

impl From<TimeZoneValue> for ZoneHandle {
    fn from(value: TimeZoneValue) -> Self {
        match value.backing {
            Backing::Frozen(handle) | Backing::Live(handle) => handle,
        }
    }
}

/// Adopts the handle against the process-wide registry.
impl From<ZoneHandle> for TimeZoneValue {
    fn from(handle: ZoneHandle) -> Self {
        Self::from_handle_in(SystemRegistry::global(), handle)
    }
}
