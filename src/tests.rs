// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};

use chrono::{DateTime, TimeDelta};

use crate::{
    AbbreviationTable, Clock, Instant, Lookup, ManualClock, NameStyle, Registry, SystemRegistry,
    TimeZoneError, TimeZoneValue, ZoneHandle,
};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut state = DefaultHasher::default();
    value.hash(&mut state);
    state.finish()
}

fn at(timestamp_secs: i64) -> Instant {
    DateTime::from_timestamp(timestamp_secs, 0).unwrap()
}

/// Instants spread over several decades, including both DST seasons.
fn sample_instants() -> Vec<Instant> {
    (1970..=2040)
        .step_by(5)
        .flat_map(|year| {
            let jan = at((year - 1970) * 31_556_952);
            [jan, jan + TimeDelta::days(90), jan + TimeDelta::days(182)]
        })
        .collect()
}

fn registry(current: &str) -> SystemRegistry {
    SystemRegistry::with_current_identifier(current).unwrap()
}

#[test]
fn test_identifier_round_trip_for_all_known_zones() {
    let registry = registry("UTC");
    let ids = registry.known_identifiers();
    assert!(ids.len() > 400);
    for id in ids {
        let zone = TimeZoneValue::from_identifier_in(&registry, &id).unwrap();
        assert_eq!(zone.identifier(), id);
        assert!(!zone.is_autoupdating());
    }
}

#[test]
fn test_unknown_identifier_is_not_found() {
    let registry = registry("UTC");
    assert_eq!(
        TimeZoneValue::from_identifier_in(&registry, "not-a-real-zone"),
        Err(TimeZoneError::NotFound(Lookup::Identifier(
            "not-a-real-zone".to_string()
        )))
    );
}

#[test]
fn test_autoupdating_values_are_equal_across_updates() {
    let registry = registry("America/Los_Angeles");
    let before = TimeZoneValue::autoupdating_current_in(&registry);

    registry.set_current_identifier("Europe/Paris").unwrap();
    let after = TimeZoneValue::autoupdating_current_in(&registry);

    assert_eq!(before, after);
    assert_eq!(hash_of(&before), hash_of(&after));
    // The earlier value is a live view, not a snapshot
    assert_eq!(before.identifier(), "Europe/Paris");
}

#[test]
fn test_autoupdating_values_from_different_registries_are_equal() {
    let la = registry("America/Los_Angeles");
    let tokyo = registry("Asia/Tokyo");
    assert_eq!(
        TimeZoneValue::autoupdating_current_in(&la),
        TimeZoneValue::autoupdating_current_in(&tokyo)
    );
}

#[test]
fn test_current_snapshot_never_equals_autoupdating() {
    let registry = registry("America/Chicago");
    let snapshot = TimeZoneValue::current_in(&registry);
    let live = TimeZoneValue::autoupdating_current_in(&registry);

    assert_eq!(snapshot.identifier(), live.identifier());
    assert_ne!(snapshot, live);
    assert_ne!(live, snapshot);
    assert!(!snapshot.is_autoupdating());
    assert!(live.is_autoupdating());

    let matching = TimeZoneValue::from_identifier_in(&registry, "America/Chicago").unwrap();
    assert_ne!(matching, live);
    assert_eq!(matching, snapshot);
}

#[test]
fn test_current_snapshot_ignores_later_changes() {
    let registry = registry("America/Chicago");
    let snapshot = TimeZoneValue::current_in(&registry);
    registry.set_current_identifier("Asia/Tokyo").unwrap();
    assert_eq!(snapshot.identifier(), "America/Chicago");
    assert_eq!(snapshot.offset_seconds(at(1704067200)), -6 * 3600);
}

#[test]
fn test_equal_values_hash_equal() {
    let registry = registry("UTC");

    let live_a = TimeZoneValue::autoupdating_current_in(&registry);
    let live_b = TimeZoneValue::autoupdating_current_in(&registry);
    assert_eq!(live_a, live_b);
    assert_eq!(hash_of(&live_a), hash_of(&live_b));

    let chicago_a = TimeZoneValue::from_identifier_in(&registry, "America/Chicago").unwrap();
    let chicago_b = TimeZoneValue::from_identifier_in(&registry, "America/Chicago").unwrap();
    assert_eq!(chicago_a, chicago_b);
    assert_eq!(hash_of(&chicago_a), hash_of(&chicago_b));

    let fixed_a = TimeZoneValue::from_offset_seconds_in(&registry, 3600).unwrap();
    let fixed_b = TimeZoneValue::from_offset_seconds_in(&registry, 3600).unwrap();
    assert_eq!(fixed_a, fixed_b);
    assert_eq!(hash_of(&fixed_a), hash_of(&fixed_b));
}

#[test]
fn test_values_as_set_members() {
    let registry = registry("America/Chicago");
    let set: HashSet<TimeZoneValue> = [
        TimeZoneValue::autoupdating_current_in(&registry),
        TimeZoneValue::autoupdating_current_in(&registry),
        TimeZoneValue::current_in(&registry),
        TimeZoneValue::from_identifier_in(&registry, "America/Chicago").unwrap(),
        TimeZoneValue::from_abbreviation_in(&registry, "CST").unwrap(),
        TimeZoneValue::from_identifier_in(&registry, "Europe/Paris").unwrap(),
    ]
    .into_iter()
    .collect();
    assert_eq!(set.len(), 3);
}

#[test]
fn test_fixed_zone_never_observes_dst() {
    let registry = registry("UTC");
    for seconds in [0, 3600, -5 * 3600, 19800] {
        let zone = TimeZoneValue::from_offset_seconds_in(&registry, seconds).unwrap();
        for instant in sample_instants() {
            assert!(!zone.is_daylight_saving_time(instant));
            assert_eq!(zone.daylight_saving_offset(instant), TimeDelta::zero());
            assert_eq!(zone.offset_seconds(instant), seconds);
        }
        assert_eq!(zone.next_daylight_transition_after(at(0)), None);
    }
}

#[test]
fn test_fixed_zone_out_of_range() {
    let registry = registry("UTC");
    assert_eq!(
        TimeZoneValue::from_offset_seconds_in(&registry, 19 * 3600),
        Err(TimeZoneError::NotFound(Lookup::Offset(19 * 3600)))
    );
}

#[test]
fn test_fixed_zone_identifier_round_trip() {
    let registry = registry("UTC");
    let fixed = TimeZoneValue::from_offset_seconds_in(&registry, 19800).unwrap();
    assert_eq!(fixed.identifier(), "GMT+0530");
    let parsed = TimeZoneValue::from_identifier_in(&registry, &fixed.identifier()).unwrap();
    assert_eq!(parsed, fixed);
}

#[test]
fn test_gmt_abbreviation_has_zero_offset() {
    let registry = registry("America/Los_Angeles");
    let gmt = TimeZoneValue::from_abbreviation_in(&registry, "GMT").unwrap();
    for instant in sample_instants() {
        assert_eq!(gmt.offset_seconds(instant), 0);
    }
}

#[test]
fn test_abbreviation_table_drives_resolution() {
    let registry = registry("UTC");
    let est = TimeZoneValue::from_abbreviation_in(&registry, "EST").unwrap();
    assert_eq!(est.identifier(), "America/New_York");

    let mut table: AbbreviationTable = registry.abbreviation_table();
    table.insert("EST".to_string(), "Australia/Brisbane".to_string());
    registry.set_abbreviation_table(table);

    let est_au = TimeZoneValue::from_abbreviation_in(&registry, "EST").unwrap();
    assert_eq!(est_au.identifier(), "Australia/Brisbane");
    // Existing values are not affected
    assert_eq!(est.identifier(), "America/New_York");

    registry.set_abbreviation_table(AbbreviationTable::new());
    assert_eq!(
        TimeZoneValue::from_abbreviation_in(&registry, "EST"),
        Err(TimeZoneError::NotFound(Lookup::Abbreviation("EST".to_string())))
    );
}

#[test]
fn test_round_trip_through_handle() {
    let registry = registry("Europe/Paris");

    let frozen = TimeZoneValue::from_identifier_in(&registry, "Asia/Tokyo").unwrap();
    let handle: ZoneHandle = frozen.clone().into();
    let back = TimeZoneValue::from_handle_in(&registry, handle);
    assert_eq!(back, frozen);
    assert!(!back.is_autoupdating());

    let live = TimeZoneValue::autoupdating_current_in(&registry);
    let handle: ZoneHandle = live.clone().into();
    assert!(registry.is_autoupdating(&handle));
    let back = TimeZoneValue::from_handle_in(&registry, handle);
    assert_eq!(back, live);
    assert!(back.is_autoupdating());
}

#[test]
fn test_to_handle_does_not_copy() {
    let registry = registry("Europe/Paris");
    let live = TimeZoneValue::autoupdating_current_in(&registry);
    assert!(live.as_handle().same_object(&registry.current()));

    let frozen = TimeZoneValue::from_identifier_in(&registry, "Asia/Tokyo").unwrap();
    let handle: ZoneHandle = frozen.clone().into();
    assert!(handle.same_object(frozen.as_handle()));
}

#[test]
fn test_next_transition_is_strictly_later() {
    let registry = registry("UTC");
    for id in [
        "America/Los_Angeles",
        "Europe/London",
        "Australia/Sydney",
        "America/Santiago",
        "Pacific/Auckland",
    ] {
        let zone = TimeZoneValue::from_identifier_in(&registry, id).unwrap();
        let mut cursor = at(1704067200);
        for _ in 0..4 {
            let next = zone.next_daylight_transition_after(cursor).unwrap();
            assert!(next > cursor, "{} returned {} after {}", id, next, cursor);
            assert_ne!(
                (zone.offset_seconds(cursor), zone.is_daylight_saving_time(cursor)),
                (zone.offset_seconds(next), zone.is_daylight_saving_time(next)),
            );
            cursor = next;
        }
    }
}

#[test]
fn test_no_transition_for_zones_without_dst() {
    let registry = registry("UTC");
    for id in ["Asia/Tokyo", "UTC", "Asia/Kolkata"] {
        let zone = TimeZoneValue::from_identifier_in(&registry, id).unwrap();
        assert_eq!(zone.next_daylight_transition_after(at(1704067200)), None);
    }
}

#[test]
fn test_next_transition_anchored_at_clock() {
    let registry = registry("UTC");
    let ny = TimeZoneValue::from_identifier_in(&registry, "America/New_York").unwrap();
    let clock = ManualClock::new(at(1704067200));

    let spring = ny.next_daylight_transition_with(&clock).unwrap();
    assert_eq!(spring.timestamp(), 1710054000);

    clock.set(spring);
    let fall = ny.next_daylight_transition_with(&clock).unwrap();
    assert_eq!(fall.timestamp(), 1730613600);
    assert!(fall > clock.now());
}

#[test]
fn test_live_value_queries_track_registry() {
    let registry = registry("America/Los_Angeles");
    let live = TimeZoneValue::autoupdating_current_in(&registry);
    let jan = at(1704067200);

    assert_eq!(live.offset_seconds(jan), -8 * 3600);
    assert_eq!(live.abbreviation(jan).as_deref(), Some("PST"));

    registry.set_current_identifier("Asia/Tokyo").unwrap();
    assert_eq!(live.offset_seconds(jan), 9 * 3600);
    assert_eq!(live.abbreviation(jan).as_deref(), Some("JST"));
    assert_eq!(live.next_daylight_transition_after(jan), None);
}

#[test]
fn test_concurrent_readers_see_whole_states() {
    let registry = registry("America/Los_Angeles");
    let live = TimeZoneValue::autoupdating_current_in(&registry);
    let jan = at(1704067200);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let live = live.clone();
            scope.spawn(move || {
                for _ in 0..1000 {
                    let rules = live.as_handle().rules();
                    let offset = rules.offset_seconds(jan);
                    match &*rules.identifier() {
                        "America/Los_Angeles" => assert_eq!(offset, -8 * 3600),
                        "Asia/Tokyo" => assert_eq!(offset, 9 * 3600),
                        other => panic!("unexpected zone {}", other),
                    }
                }
            });
        }
        for i in 0..1000 {
            let id = if i % 2 == 0 { "Asia/Tokyo" } else { "America/Los_Angeles" };
            registry.set_current_identifier(id).unwrap();
        }
    });
}

#[test]
fn test_localized_name_delegates_to_registry() {
    let registry = registry("UTC");
    let zone = TimeZoneValue::from_identifier_in(&registry, "Europe/Paris").unwrap();
    assert_eq!(
        zone.localized_name_in(&registry, NameStyle::Generic, "fr_FR").as_deref(),
        Some("heure : Paris")
    );
    assert_eq!(
        zone.localized_name_in(&registry, NameStyle::ShortStandard, "en").as_deref(),
        Some("CET")
    );
}

#[test]
fn test_localized_name_at_uses_reference_year() {
    let registry = registry("UTC");
    let chicago = TimeZoneValue::from_identifier_in(&registry, "America/Chicago").unwrap();
    // 2024-04-01, early in daylight saving time
    let april = at(1711929600);
    assert_eq!(
        registry
            .localized_name_at(chicago.as_handle(), NameStyle::ShortStandard, "en", april)
            .as_deref(),
        Some("CST")
    );
    assert_eq!(
        registry
            .localized_name_at(chicago.as_handle(), NameStyle::ShortGeneric, "en", april)
            .as_deref(),
        Some("CDT")
    );
}
