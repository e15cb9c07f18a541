// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Chrono integration.
//!
//! [`TimeZoneValue`] implements chrono's `TimeZone` trait, so it can be used
//! with `DateTime<TimeZoneValue>`. Each offset remembers the value it came
//! from, which lets an autoupdating zone round-trip through chrono unchanged.

use std::fmt;

use chrono::{FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::zone::TimeZoneValue;

/// The offset of a [`TimeZoneValue`] at one particular instant.
#[derive(Debug, Clone)]
pub struct ZoneOffset {
    zone: TimeZoneValue,
    fixed: FixedOffset,
}

impl ZoneOffset {
    pub fn zone(&self) -> &TimeZoneValue {
        &self.zone
    }

    /// Get the offset in seconds (positive = east of UTC).
    pub fn local_minus_utc(&self) -> i32 {
        self.fixed.local_minus_utc()
    }
}

impl fmt::Display for ZoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fixed, f)
    }
}

impl chrono::Offset for ZoneOffset {
    fn fix(&self) -> FixedOffset {
        self.fixed
    }
}

impl TimeZone for TimeZoneValue {
    type Offset = ZoneOffset;

    fn from_offset(offset: &Self::Offset) -> Self {
        offset.zone.clone()
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<Self::Offset> {
        self.offset_from_local_datetime(&local.and_time(NaiveTime::default()))
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<Self::Offset> {
        self.rules()
            .offset_from_local(local)
            .map(|fixed| ZoneOffset {
                zone: self.clone(),
                fixed,
            })
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> Self::Offset {
        self.offset_from_utc_datetime(&utc.and_time(NaiveTime::default()))
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> Self::Offset {
        ZoneOffset {
            zone: self.clone(),
            fixed: self.rules().offset_from_utc(utc),
        }
    }
}
