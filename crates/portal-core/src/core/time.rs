// crates/portal-core/src/core/time.rs
// ============================================================================
// Module: Portal Time Model
// Description: Canonical timestamp representation for schedules and lifespans.
// Purpose: Provide one ordered, RFC 3339 wire-compatible time value.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! The backing API exchanges timestamps as RFC 3339 strings (creation
//! timestamps, lifespan bounds, action schedules). [`Timestamp`] wraps
//! [`OffsetDateTime`] with that wire form so domain records order and
//! round-trip deterministically. The engines never read wall-clock time;
//! callers supply the current instant where one is needed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use time::Duration;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// Canonical timestamp used across portal records.
///
/// # Invariants
/// - Serializes as an RFC 3339 string.
/// - Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(#[serde(with = "time::serde::rfc3339")] OffsetDateTime);

impl Timestamp {
    /// Creates a timestamp from an explicit date-time value.
    #[must_use]
    pub const fn new(value: OffsetDateTime) -> Self {
        Self(value)
    }

    /// Parses an RFC 3339 string into a timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampParseError`] when the input is not valid RFC 3339.
    pub fn parse(input: &str) -> Result<Self, TimestampParseError> {
        OffsetDateTime::parse(input, &Rfc3339).map(Self).map_err(|source| TimestampParseError {
            input: input.to_string(),
            source,
        })
    }

    /// Creates a timestamp from unix seconds.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampRangeError`] when the value is outside the
    /// representable date range.
    pub fn from_unix_seconds(seconds: i64) -> Result<Self, TimestampRangeError> {
        OffsetDateTime::from_unix_timestamp(seconds).map(Self).map_err(|_| TimestampRangeError {
            seconds,
        })
    }

    /// Returns the wrapped date-time value.
    #[must_use]
    pub const fn as_datetime(&self) -> OffsetDateTime {
        self.0
    }

    /// Returns the timestamp as unix seconds.
    #[must_use]
    pub const fn unix_seconds(&self) -> i64 {
        self.0.unix_timestamp()
    }

    /// Returns this timestamp shifted by a duration.
    #[must_use]
    pub fn offset_by(&self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.format(&Rfc3339) {
            Ok(formatted) => f.write_str(&formatted),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure to parse an RFC 3339 timestamp string.
#[derive(Debug, thiserror::Error)]
#[error("invalid RFC 3339 timestamp {input:?}")]
pub struct TimestampParseError {
    /// Rejected input string.
    pub input: String,
    /// Underlying parse failure.
    #[source]
    pub source: time::error::Parse,
}

/// Failure to construct a timestamp from out-of-range unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unix seconds {seconds} outside representable range")]
pub struct TimestampRangeError {
    /// Rejected seconds value.
    pub seconds: i64,
}
