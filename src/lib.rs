// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Time zone values.
//!
//! [`TimeZoneValue`] is an immutable, hashable value naming a geopolitical
//! time zone such as `"America/Los_Angeles"`. Values are snapshots of zones
//! held by a [`Registry`], with one exception: the value returned by
//! [`TimeZoneValue::autoupdating_current`] is a live view of the system zone
//! that follows changes to the system setting.
//!
//! # Equality
//!
//! Snapshots compare by identifier and rule data. Autoupdating values compare
//! equal to each other, whatever zone they currently show, and never equal to
//! a snapshot, even one taken a moment earlier.
//!
//! # Example
//!
//! ```
//! use chrono::DateTime;
//! use zone_value::TimeZoneValue;
//!
//! let la = TimeZoneValue::from_identifier("America/Los_Angeles").unwrap();
//! let jan_2024 = DateTime::from_timestamp(1704067200, 0).unwrap();
//! assert_eq!(la.offset_seconds(jan_2024), -8 * 3600);
//! assert_eq!(la.abbreviation(jan_2024).as_deref(), Some("PST"));
//!
//! assert_eq!(
//!     TimeZoneValue::autoupdating_current(),
//!     TimeZoneValue::autoupdating_current()
//! );
//! assert_ne!(TimeZoneValue::current(), TimeZoneValue::autoupdating_current());
//! ```

mod abbreviations;
mod clock;
mod environment;
mod error;
mod handle;
mod names;
mod registry;
mod rules;
mod tz_wrapper;
mod zone;

pub use abbreviations::{default_table, AbbreviationTable};
pub use clock::{Clock, Instant, ManualClock, SystemClock};
pub use environment::ENV_TZ;
pub use error::{Lookup, Result, TimeZoneError};
pub use handle::{TrackingZone, ZoneHandle};
pub use names::NameStyle;
pub use registry::{
    abbreviation_table, data_version, known_identifiers, set_abbreviation_table, Registry,
    SystemRegistry,
};
pub use rules::{ZoneRules, MAX_FIXED_OFFSET_SECS};
pub use tz_wrapper::ZoneOffset;
pub use zone::TimeZoneValue;

#[cfg(test)]
mod tests;
