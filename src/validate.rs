// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0
//! Input validation for tool parameters. Every check runs before the first
//! AWS call is issued.

use thiserror::Error;

/// RDS identifiers are limited to 63 characters.
const MAX_IDENTIFIER_LEN: usize = 63;
/// Widest accepted lookback window, in minutes (7 days).
const MAX_TIME_RANGE_MINUTES: i64 = 10_080;
/// CloudWatch rejects periods above one day.
const MAX_GRANULARITY_SECONDS: i32 = 86_400;
/// Performance Insights caps DescribeDimensionKeys at 25 rows per group.
const MAX_RESULTS_LIMIT: i32 = 25;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("database name must not be empty")]
    EmptyDatabaseName,
    #[error("database name `{0}` is not a valid RDS identifier")]
    InvalidDatabaseName(String),
    #[error("time range must be positive, got {0} minutes")]
    NonPositiveTimeRange(i64),
    #[error("time range of {0} minutes exceeds the {MAX_TIME_RANGE_MINUTES} minute limit")]
    TimeRangeTooLarge(i64),
    #[error("granularity must be between 1 and {MAX_GRANULARITY_SECONDS} seconds, got {0}")]
    InvalidGranularity(i32),
    #[error("max results must be between 1 and {MAX_RESULTS_LIMIT}, got {0}")]
    InvalidMaxResults(i32),
    #[error("region `{0}` is not a valid AWS region name")]
    InvalidRegion(String),
}

/// RDS instance identifiers: letters, digits and hyphens, at most 63 chars.
pub fn database_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyDatabaseName);
    }
    let well_formed = name.len() <= MAX_IDENTIFIER_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !well_formed {
        return Err(ValidationError::InvalidDatabaseName(name.to_string()));
    }
    Ok(())
}

/// Region names like `us-east-1`. Only checked when the caller supplies one;
/// an absent region falls back to the server default.
pub fn region(region: Option<&str>) -> Result<(), ValidationError> {
    let Some(region) = region else {
        return Ok(());
    };
    let well_formed = !region.is_empty()
        && region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !well_formed {
        return Err(ValidationError::InvalidRegion(region.to_string()));
    }
    Ok(())
}

pub fn time_range_minutes(minutes: i64) -> Result<(), ValidationError> {
    if minutes < 1 {
        return Err(ValidationError::NonPositiveTimeRange(minutes));
    }
    if minutes > MAX_TIME_RANGE_MINUTES {
        return Err(ValidationError::TimeRangeTooLarge(minutes));
    }
    Ok(())
}

pub fn granularity_seconds(seconds: i32) -> Result<(), ValidationError> {
    if !(1..=MAX_GRANULARITY_SECONDS).contains(&seconds) {
        return Err(ValidationError::InvalidGranularity(seconds));
    }
    Ok(())
}

pub fn max_results(count: i32) -> Result<(), ValidationError> {
    if !(1..=MAX_RESULTS_LIMIT).contains(&count) {
        return Err(ValidationError::InvalidMaxResults(count));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_identifier() {
        assert_eq!(database_name("prod-orders-db1"), Ok(()));
    }

    #[test]
    fn rejects_empty_identifier() {
        assert_eq!(database_name(""), Err(ValidationError::EmptyDatabaseName));
    }

    #[test]
    fn rejects_identifier_with_invalid_characters() {
        assert!(matches!(
            database_name("prod_orders;drop"),
            Err(ValidationError::InvalidDatabaseName(_))
        ));
    }

    #[test]
    fn rejects_overlong_identifier() {
        let name = "a".repeat(64);
        assert!(matches!(
            database_name(&name),
            Err(ValidationError::InvalidDatabaseName(_))
        ));
    }

    #[test]
    fn region_is_optional() {
        assert_eq!(region(None), Ok(()));
        assert_eq!(region(Some("eu-central-1")), Ok(()));
    }

    #[test]
    fn rejects_malformed_region() {
        assert!(matches!(
            region(Some("US EAST")),
            Err(ValidationError::InvalidRegion(_))
        ));
        assert!(matches!(
            region(Some("")),
            Err(ValidationError::InvalidRegion(_))
        ));
    }

    #[test]
    fn rejects_non_positive_time_range() {
        assert_eq!(
            time_range_minutes(0),
            Err(ValidationError::NonPositiveTimeRange(0))
        );
        assert_eq!(
            time_range_minutes(-30),
            Err(ValidationError::NonPositiveTimeRange(-30))
        );
    }

    #[test]
    fn bounds_time_range_at_seven_days() {
        assert_eq!(time_range_minutes(10_080), Ok(()));
        assert_eq!(
            time_range_minutes(10_081),
            Err(ValidationError::TimeRangeTooLarge(10_081))
        );
    }

    #[test]
    fn granularity_bounds() {
        assert_eq!(granularity_seconds(60), Ok(()));
        assert_eq!(
            granularity_seconds(0),
            Err(ValidationError::InvalidGranularity(0))
        );
        assert_eq!(
            granularity_seconds(100_000),
            Err(ValidationError::InvalidGranularity(100_000))
        );
    }

    #[test]
    fn max_results_bounds() {
        assert_eq!(max_results(5), Ok(()));
        assert_eq!(max_results(0), Err(ValidationError::InvalidMaxResults(0)));
        assert_eq!(max_results(26), Err(ValidationError::InvalidMaxResults(26)));
    }
}
