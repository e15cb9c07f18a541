// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0
use std::fmt;

/// What a failed registry lookup was searching for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Identifier(String),
    Abbreviation(String),
    Offset(i32),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Identifier(id) => write!(f, "identifier {id:?}"),
            Lookup::Abbreviation(abbr) => write!(f, "abbreviation {abbr:?}"),
            Lookup::Offset(secs) => write!(f, "offset of {secs} seconds"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeZoneError {
    #[error("no time zone for {0}")]
    NotFound(Lookup),
}

pub type Result<T> = std::result::Result<T, TimeZoneError>;
