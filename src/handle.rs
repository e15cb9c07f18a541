// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Registry-owned zone objects.
//!
//! A [`ZoneHandle`] is either frozen, in which case its rule data can never
//! change, or tracking, in which case the [`TrackingZone`] that created it may
//! swap the rule data in place (this is how the system's current zone follows
//! host configuration changes). Handles are read-only; only the owning
//! [`TrackingZone`] can write. Every read copies the rule data out under a
//! single lock acquisition, so one query never observes half of an update.

use std::borrow::Cow;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::TimeDelta;

use crate::clock::Instant;
use crate::rules::ZoneRules;

#[derive(Debug, Clone)]
pub struct ZoneHandle {
    inner: Inner,
}

#[derive(Debug, Clone)]
enum Inner {
    Frozen(Arc<ZoneRules>),
    Tracking(Arc<RwLock<ZoneRules>>),
}

impl ZoneHandle {
    /// An immutable zone object.
    pub fn frozen(rules: ZoneRules) -> Self {
        Self {
            inner: Inner::Frozen(Arc::new(rules)),
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.inner, Inner::Tracking(_))
    }

    /// The rule data currently held by this object.
    pub fn rules(&self) -> ZoneRules {
        match &self.inner {
            Inner::Frozen(rules) => **rules,
            Inner::Tracking(cell) => *cell.read().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// An independently owned frozen copy. Frozen objects are shared, not copied.
    pub fn snapshot(&self) -> Self {
        match &self.inner {
            Inner::Frozen(_) => self.clone(),
            Inner::Tracking(_) => Self::frozen(self.rules()),
        }
    }

    /// Whether both handles refer to the same underlying object.
    pub fn same_object(&self, other: &Self) -> bool {
        match (&self.inner, &other.inner) {
            (Inner::Frozen(a), Inner::Frozen(b)) => Arc::ptr_eq(a, b),
            (Inner::Tracking(a), Inner::Tracking(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// The identifier of the rules currently held.
    pub fn identifier(&self) -> Cow<'static, str> {
        self.rules().identifier()
    }

    pub fn offset_seconds(&self, at: Instant) -> i32 {
        self.rules().offset_seconds(at)
    }

    pub fn abbreviation(&self, at: Instant) -> Option<String> {
        self.rules().abbreviation(at)
    }

    pub fn is_daylight_saving_time(&self, at: Instant) -> bool {
        self.rules().is_daylight_saving_time(at)
    }

    pub fn daylight_saving_offset(&self, at: Instant) -> TimeDelta {
        self.rules().daylight_saving_offset(at)
    }

    pub fn next_transition_after(&self, at: Instant) -> Option<Instant> {
        self.rules().next_transition_after(at)
    }
}

/// Owner of a tracking zone object.
///
/// Registries keep the owner to themselves and hand out [`TrackingZone::handle`]
/// views, so nothing holding a handle can change what the zone shows.
#[derive(Debug)]
pub struct TrackingZone {
    cell: Arc<RwLock<ZoneRules>>,
}

impl TrackingZone {
    pub fn new(rules: ZoneRules) -> Self {
        Self {
            cell: Arc::new(RwLock::new(rules)),
        }
    }

    /// A read-only view that follows every later [`TrackingZone::update`].
    /// All views of one owner are the same object.
    pub fn handle(&self) -> ZoneHandle {
        ZoneHandle {
            inner: Inner::Tracking(self.cell.clone()),
        }
    }

    pub fn rules(&self) -> ZoneRules {
        *self.cell.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the rules seen through every handle of this object.
    pub fn update(&self, rules: ZoneRules) {
        *self.cell.write().unwrap_or_else(PoisonError::into_inner) = rules;
    }
}
