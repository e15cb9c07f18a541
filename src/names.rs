// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Display names for zones.
//!
//! Only the CLDR fallback forms are produced: abbreviations for the short
//! styles, a localized GMT offset for the long styles, and the exemplar city
//! for the generic style.

use chrono::TimeDelta;

use crate::clock::Instant;
use crate::rules::ZoneRules;

/// Spacing of the samples taken when looking for each season.
const SEASON_SAMPLE_STEP_DAYS: i64 = 15;
/// Samples cover the year following the reference.
const SEASON_SAMPLES: i64 = 365 / SEASON_SAMPLE_STEP_DAYS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameStyle {
    /// e.g. "GMT-08:00"
    Standard,
    /// e.g. "PST"
    ShortStandard,
    /// e.g. "GMT-07:00"
    DaylightSaving,
    /// e.g. "PDT"
    ShortDaylightSaving,
    /// e.g. "Los Angeles Time"
    Generic,
    /// e.g. "PST" or "PDT", whichever is in effect
    ShortGeneric,
}

struct LocaleNames {
    /// Prefix of the localized GMT format
    gmt: &'static str,
    /// Region format with `{0}` standing for the exemplar city
    region: &'static str,
}

const EN: LocaleNames = LocaleNames {
    gmt: "GMT",
    region: "{0} Time",
};

const DE: LocaleNames = LocaleNames {
    gmt: "GMT",
    region: "{0} (Ortszeit)",
};

const ES: LocaleNames = LocaleNames {
    gmt: "GMT",
    region: "hora de {0}",
};

const FR: LocaleNames = LocaleNames {
    gmt: "UTC",
    region: "heure : {0}",
};

const JA: LocaleNames = LocaleNames {
    gmt: "GMT",
    region: "{0}時間",
};

/// Falls back to English for unknown locales.
fn locale_names(locale: &str) -> &'static LocaleNames {
    let locale = locale.to_lowercase().replace('_', "-");
    let language = locale.split('-').next().unwrap_or_default();
    match language {
        "de" => &DE,
        "es" => &ES,
        "fr" => &FR,
        "ja" => &JA,
        _ => &EN,
    }
}

/// Name of `rules` in `style`, using the year following `reference` to pick
/// standard and daylight saving samples.
pub fn localized_name(
    rules: &ZoneRules,
    style: NameStyle,
    locale: &str,
    reference: Instant,
) -> Option<String> {
    let names = locale_names(locale);
    let (standard, daylight) = seasonal_samples(rules, reference);

    match style {
        NameStyle::Standard => Some(gmt_format(names, rules.offset_seconds(standard))),
        NameStyle::DaylightSaving => Some(gmt_format(names, rules.offset_seconds(daylight))),
        NameStyle::ShortStandard => rules.abbreviation(standard),
        NameStyle::ShortDaylightSaving => rules.abbreviation(daylight),
        NameStyle::ShortGeneric => rules.abbreviation(reference),
        NameStyle::Generic => Some(match exemplar_city(rules) {
            Some(city) => names.region.replace("{0}", &city),
            None => gmt_format(names, rules.offset_seconds(reference)),
        }),
    }
}

/// The first standard time instant and the first daylight saving instant in
/// the year starting at `reference`. A season that never occurs is replaced
/// by `reference`.
fn seasonal_samples(rules: &ZoneRules, reference: Instant) -> (Instant, Instant) {
    let mut standard = None;
    let mut daylight = None;
    let samples = (0..=SEASON_SAMPLES).filter_map(|step| {
        reference.checked_add_signed(TimeDelta::days(step * SEASON_SAMPLE_STEP_DAYS))
    });
    for sample in samples {
        if rules.is_daylight_saving_time(sample) {
            daylight.get_or_insert(sample);
        } else {
            standard.get_or_insert(sample);
        }
        if standard.is_some() && daylight.is_some() {
            break;
        }
    }
    (standard.unwrap_or(reference), daylight.unwrap_or(reference))
}

fn exemplar_city(rules: &ZoneRules) -> Option<String> {
    match rules {
        ZoneRules::Named(tz) => {
            let name = tz.name();
            // "UTC", "GMT", "EST5EDT" and friends have no city
            let (_, city) = name.rsplit_once('/')?;
            if name.starts_with("Etc/") {
                return None;
            }
            Some(city.replace('_', " "))
        },
        ZoneRules::Fixed(_) => None,
    }
}

fn gmt_format(names: &LocaleNames, offset_secs: i32) -> String {
    if offset_secs == 0 {
        return names.gmt.to_string();
    }
    let sign = if offset_secs < 0 { '-' } else { '+' };
    let minutes = offset_secs.unsigned_abs() / 60;
    format!("{}{}{:02}:{:02}", names.gmt, sign, minutes / 60, minutes % 60)
}
