use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Granularity of time-bucketed archive tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Monthly,
    Yearly,
}

impl FromStr for Period {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(Period::Monthly),
            "yearly" => Ok(Period::Yearly),
            other => Err(EngineError::InvalidPeriod(other.to_string())),
        }
    }
}

/// Name of the archive table a row dated `date` routes into: `YYYY-MM` for
/// monthly buckets, `YYYY` for yearly ones.
///
/// Table creation (and copying a template into a fresh bucket) stays with
/// the host; this only answers "which bucket".
pub fn bucket_name(period: Period, date: NaiveDate) -> String {
    match period {
        Period::Monthly => format!("{:04}-{:02}", date.year(), date.month()),
        Period::Yearly => format!("{:04}", date.year()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bucket_names() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 7).unwrap();
        assert_eq!(bucket_name(Period::Monthly, date), "2021-03");
        assert_eq!(bucket_name(Period::Yearly, date), "2021");
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Monthly".parse::<Period>().unwrap(), Period::Monthly);
        assert_eq!(" yearly ".parse::<Period>().unwrap(), Period::Yearly);
    }

    #[test]
    fn rejects_unknown_periods() {
        let err = "weekly".parse::<Period>().unwrap_err();
        assert!(matches!(err, EngineError::InvalidPeriod(p) if p == "weekly"));
    }
}
