// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! The time zone registry: the authority over known zones, their rule data,
//! the system's current zone and the abbreviation table.

use std::env;

use chrono_tz::{Tz, TZ_VARIANTS};
use once_cell::sync::Lazy;
use tracing::{debug, trace, warn};

use crate::abbreviations::{default_table, AbbreviationTable, SharedAbbreviations};
use crate::clock::{Clock, Instant, SystemClock};
use crate::environment::{ENV_TZ, FALLBACK_ZONE};
use crate::error::{Lookup, Result, TimeZoneError};
use crate::handle::{TrackingZone, ZoneHandle};
use crate::names::{self, NameStyle};
use crate::rules::ZoneRules;

/// Services a [`TimeZoneValue`](crate::TimeZoneValue) needs from a registry.
///
/// Lookups hand out fresh objects owned by the caller. [`Registry::current`]
/// is the exception: it returns the one shared object the registry keeps up
/// to date with the system setting.
pub trait Registry: Send + Sync {
    /// A fresh frozen object for an identifier, or `None` if it is unknown.
    fn lookup_identifier(&self, identifier: &str) -> Option<ZoneHandle>;

    /// A fresh frozen object for a fixed offset in seconds east of UTC, or
    /// `None` if the offset is out of range.
    fn lookup_offset(&self, seconds: i32) -> Option<ZoneHandle>;

    /// Resolve an abbreviation through [`Registry::abbreviation_table`].
    fn lookup_abbreviation(&self, abbreviation: &str) -> Option<ZoneHandle> {
        let identifier = self.abbreviation_table().get(abbreviation).cloned()?;
        self.lookup_identifier(&identifier)
    }

    /// Every identifier [`Registry::lookup_identifier`] accepts, placeholders
    /// of fixed zones aside.
    fn known_identifiers(&self) -> Vec<String>;

    /// A copy of the abbreviation table in effect.
    fn abbreviation_table(&self) -> AbbreviationTable;

    /// Replace the abbreviation table used by later lookups.
    fn set_abbreviation_table(&self, table: AbbreviationTable);

    /// Version tag of the underlying rule data.
    fn data_version(&self) -> String;

    /// The shared, autoupdating object for the system's current zone.
    ///
    /// Implementations own it through a [`TrackingZone`] and return its
    /// [`TrackingZone::handle`]; every call must return the same object.
    fn current(&self) -> ZoneHandle;

    /// Whether `handle` is this registry's shared current object.
    fn is_autoupdating(&self, handle: &ZoneHandle) -> bool {
        handle.same_object(&self.current())
    }

    /// An independently owned copy of `handle`.
    fn clone_zone(&self, handle: &ZoneHandle) -> ZoneHandle {
        handle.snapshot()
    }

    /// Display name of `handle` in `style`, with standard and daylight saving
    /// samples taken from the year following `at`.
    fn localized_name_at(
        &self,
        handle: &ZoneHandle,
        style: NameStyle,
        locale: &str,
        at: Instant,
    ) -> Option<String> {
        names::localized_name(&handle.rules(), style, locale, at)
    }

    /// [`Registry::localized_name_at`] anchored at the system clock.
    fn localized_name(
        &self,
        handle: &ZoneHandle,
        style: NameStyle,
        locale: &str,
    ) -> Option<String> {
        self.localized_name_at(handle, style, locale, SystemClock.now())
    }
}

static SYSTEM_REGISTRY: Lazy<SystemRegistry> = Lazy::new(SystemRegistry::new);

/// Registry backed by the IANA database compiled into `chrono-tz`, with the
/// current zone taken from the host.
#[derive(Debug)]
pub struct SystemRegistry {
    current: TrackingZone,
    abbreviations: SharedAbbreviations,
}

impl SystemRegistry {
    /// The process-wide registry, created on first use.
    pub fn global() -> &'static SystemRegistry {
        &SYSTEM_REGISTRY
    }

    /// A registry whose current zone is detected from the host.
    pub fn new() -> Self {
        Self::with_rules(detect_system_rules())
    }

    /// A registry whose current zone is `identifier`, ignoring the host.
    pub fn with_current_identifier(identifier: &str) -> Result<Self> {
        let rules = ZoneRules::parse(identifier)
            .ok_or_else(|| TimeZoneError::NotFound(Lookup::Identifier(identifier.to_string())))?;
        Ok(Self::with_rules(rules))
    }

    fn with_rules(rules: ZoneRules) -> Self {
        Self {
            current: TrackingZone::new(rules),
            abbreviations: SharedAbbreviations::new(default_table()),
        }
    }

    /// Detect the host zone again and update the shared current object in
    /// place. Returns the rules now in effect.
    pub fn refresh(&self) -> ZoneRules {
        let rules = detect_system_rules();
        self.switch_current(rules);
        rules
    }

    /// Point the shared current object at `identifier`.
    pub fn set_current_identifier(&self, identifier: &str) -> Result<()> {
        let rules = ZoneRules::parse(identifier)
            .ok_or_else(|| TimeZoneError::NotFound(Lookup::Identifier(identifier.to_string())))?;
        self.switch_current(rules);
        Ok(())
    }

    /// Restore the built-in abbreviation table.
    pub fn reset_abbreviation_table(&self) {
        self.abbreviations.replace(default_table());
    }

    fn switch_current(&self, rules: ZoneRules) {
        let previous = self.current.rules();
        if previous != rules {
            debug!(
                "System time zone changed from {} to {}",
                previous.identifier(),
                rules.identifier()
            );
        }
        self.current.update(rules);
    }
}

impl Default for SystemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry for SystemRegistry {
    fn lookup_identifier(&self, identifier: &str) -> Option<ZoneHandle> {
        ZoneRules::parse(identifier).map(ZoneHandle::frozen)
    }

    fn lookup_offset(&self, seconds: i32) -> Option<ZoneHandle> {
        ZoneRules::fixed(seconds).map(ZoneHandle::frozen)
    }

    fn lookup_abbreviation(&self, abbreviation: &str) -> Option<ZoneHandle> {
        let identifier = self.abbreviations.resolve(abbreviation)?;
        let handle = self.lookup_identifier(&identifier);
        if handle.is_none() {
            warn!("Abbreviation {} maps to unknown time zone {}", abbreviation, identifier);
        }
        handle
    }

    fn known_identifiers(&self) -> Vec<String> {
        TZ_VARIANTS.iter().map(|tz| tz.name().to_string()).collect()
    }

    fn abbreviation_table(&self) -> AbbreviationTable {
        self.abbreviations.get()
    }

    fn set_abbreviation_table(&self, table: AbbreviationTable) {
        self.abbreviations.replace(table)
    }

    fn data_version(&self) -> String {
        chrono_tz::IANA_TZDB_VERSION.to_string()
    }

    fn current(&self) -> ZoneHandle {
        self.current.handle()
    }
}

/// Current zone from `TZ`, then the host configuration, then UTC.
fn detect_system_rules() -> ZoneRules {
    if let Ok(value) = env::var(ENV_TZ) {
        let name = value.strip_prefix(':').unwrap_or(&value);
        if let Some(rules) = ZoneRules::parse(name) {
            trace!("Using time zone {} from {}", name, ENV_TZ);
            return rules;
        }
        if !name.is_empty() {
            warn!("Ignoring unknown time zone {:?} in {}", value, ENV_TZ);
        }
    }

    match iana_time_zone::get_timezone() {
        Ok(name) => match ZoneRules::parse(&name) {
            Some(rules) => {
                trace!("Using host time zone {}", name);
                return rules;
            },
            None => warn!("Host reported unknown time zone {}", name),
        },
        Err(err) => warn!("Unable to detect host time zone: {}", err),
    }

    debug!("Falling back to {}", FALLBACK_ZONE);
    ZoneRules::named(FALLBACK_ZONE).unwrap_or(ZoneRules::Named(Tz::UTC))
}

/// Every identifier the process-wide registry recognizes.
pub fn known_identifiers() -> Vec<String> {
    SystemRegistry::global().known_identifiers()
}

/// A copy of the process-wide abbreviation table.
pub fn abbreviation_table() -> AbbreviationTable {
    SystemRegistry::global().abbreviation_table()
}

/// Replace the process-wide abbreviation table. This changes how every later
/// abbreviation lookup resolves; it does not touch existing values.
pub fn set_abbreviation_table(table: AbbreviationTable) {
    SystemRegistry::global().set_abbreviation_table(table)
}

/// Version of the IANA database the process-wide registry was built with.
pub fn data_version() -> String {
    SystemRegistry::global().data_version()
}
