// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Process-wide abbreviation to identifier mapping.
//!
//! Abbreviations are not globally unique ("IST" is used in India, Ireland and
//! Israel). Resolution returns whatever single identifier the table names.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::trace;

pub type AbbreviationTable = HashMap<String, String>;

static DEFAULT_ABBREVIATIONS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "ADT" => "America/Halifax",
    "AKDT" => "America/Juneau",
    "AKST" => "America/Juneau",
    "ART" => "America/Argentina/Buenos_Aires",
    "AST" => "America/Halifax",
    "BDT" => "Asia/Dhaka",
    "BRST" => "America/Sao_Paulo",
    "BRT" => "America/Sao_Paulo",
    "BST" => "Europe/London",
    "CAT" => "Africa/Harare",
    "CDT" => "America/Chicago",
    "CEST" => "Europe/Paris",
    "CET" => "Europe/Paris",
    "CLST" => "America/Santiago",
    "CLT" => "America/Santiago",
    "COT" => "America/Bogota",
    "CST" => "America/Chicago",
    "EAT" => "Africa/Addis_Ababa",
    "EDT" => "America/New_York",
    "EEST" => "Europe/Athens",
    "EET" => "Europe/Athens",
    "EST" => "America/New_York",
    "GMT" => "GMT",
    "GST" => "Asia/Dubai",
    "HKT" => "Asia/Hong_Kong",
    "HST" => "Pacific/Honolulu",
    "ICT" => "Asia/Bangkok",
    "IRST" => "Asia/Tehran",
    "IST" => "Asia/Kolkata",
    "JST" => "Asia/Tokyo",
    "KST" => "Asia/Seoul",
    "MDT" => "America/Denver",
    "MSD" => "Europe/Moscow",
    "MSK" => "Europe/Moscow",
    "MST" => "America/Denver",
    "NZDT" => "Pacific/Auckland",
    "NZST" => "Pacific/Auckland",
    "PDT" => "America/Los_Angeles",
    "PET" => "America/Lima",
    "PHT" => "Asia/Manila",
    "PKT" => "Asia/Karachi",
    "PST" => "America/Los_Angeles",
    "SGT" => "Asia/Singapore",
    "UTC" => "UTC",
    "WAT" => "Africa/Lagos",
    "WEST" => "Europe/Lisbon",
    "WET" => "Europe/Lisbon",
    "WIT" => "Asia/Jakarta",
};

/// The table a fresh registry starts with.
pub fn default_table() -> AbbreviationTable {
    DEFAULT_ABBREVIATIONS
        .entries()
        .map(|(abbr, id)| (abbr.to_string(), id.to_string()))
        .collect()
}

/// Abbreviation table guarded for concurrent use.
///
/// Single reads and whole-table replacements are never torn. A caller doing
/// read-modify-write must serialize with other writers itself.
#[derive(Debug)]
pub(crate) struct SharedAbbreviations {
    table: RwLock<AbbreviationTable>,
}

impl SharedAbbreviations {
    pub fn new(table: AbbreviationTable) -> Self {
        Self {
            table: RwLock::new(table),
        }
    }

    pub fn resolve(&self, abbreviation: &str) -> Option<String> {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(abbreviation)
            .cloned()
    }

    pub fn get(&self) -> AbbreviationTable {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, table: AbbreviationTable) {
        trace!("Replacing abbreviation table ({} entries)", table.len());
        *self.table.write().unwrap_or_else(PoisonError::into_inner) = table;
    }
}
