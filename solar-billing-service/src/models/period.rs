//! Billing period (calendar month) model.

use crate::error::BillingError;
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month, written `YYYY-MM` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BillingPeriod(NaiveDate);

impl BillingPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self, BillingError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| BillingError::InvalidPeriod(format!("{:04}-{:02}", year, month)))
    }

    /// Parse a `YYYY-MM` label.
    pub fn parse(value: &str) -> Result<Self, BillingError> {
        NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| BillingError::InvalidPeriod(value.to_string()))
    }

    /// The month containing the given instant (UTC).
    pub fn containing(at: DateTime<Utc>) -> Self {
        let date = at.date_naive();
        Self(date - Days::new(u64::from(date.day0())))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl TryFrom<String> for BillingPeriod {
    type Error = BillingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BillingPeriod> for String {
    fn from(period: BillingPeriod) -> Self {
        period.to_string()
    }
}
