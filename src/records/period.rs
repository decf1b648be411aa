/// Period keys and period arithmetic.
///
/// Keys are rendered bit-exactly as `"YYYY-MM"`, `"YYYY-QN"` or `"YYYY-Annual"` so that
/// external stores can sort, parse and round-trip them.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodType {
    Monthly,
    Quarterly,
    Annual,
}

impl PeriodType {
    /// Number of sub-periods per year before the year rolls over
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PeriodType::Monthly => 12,
            PeriodType::Quarterly => 4,
            PeriodType::Annual => 1,
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodType::Monthly => write!(f, "MONTHLY"),
            PeriodType::Quarterly => write!(f, "QUARTERLY"),
            PeriodType::Annual => write!(f, "ANNUAL"),
        }
    }
}

impl FromStr for PeriodType {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "monthly" | "month" => Ok(PeriodType::Monthly),
            "quarterly" | "quarter" => Ok(PeriodType::Quarterly),
            "annual" | "annually" | "yearly" => Ok(PeriodType::Annual),
            other => Err(ForecastError::invalid_parameter(format!(
                "unknown period type '{}', expected monthly, quarterly or annual",
                other
            ))),
        }
    }
}

/// A parsed period key: the (year, sub-period) state of the period state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PeriodKey {
    Month { year: i32, month: u32 },
    Quarter { year: i32, quarter: u32 },
    Annual { year: i32 },
}

impl PeriodKey {
    pub fn period_type(&self) -> PeriodType {
        match self {
            PeriodKey::Month { .. } => PeriodType::Monthly,
            PeriodKey::Quarter { .. } => PeriodType::Quarterly,
            PeriodKey::Annual { .. } => PeriodType::Annual,
        }
    }

    pub fn year(&self) -> i32 {
        match *self {
            PeriodKey::Month { year, .. } | PeriodKey::Quarter { year, .. } | PeriodKey::Annual { year } => year,
        }
    }

    /// Calendar month (1-12) for monthly keys
    pub fn month_of_year(&self) -> Option<u32> {
        match *self {
            PeriodKey::Month { month, .. } => Some(month),
            _ => None,
        }
    }

    /// Move `offset` periods forward, rolling the sub-period over into the next year.
    ///
    /// Fails when the resulting year no longer fits the four-digit key format.
    pub fn advance(&self, offset: u32) -> Result<PeriodKey> {
        let key = match *self {
            PeriodKey::Month { year, month } => {
                let (year, month) = roll_over(year, month, offset, 12);
                check_year(year).map(|year| PeriodKey::Month { year, month })
            }
            PeriodKey::Quarter { year, quarter } => {
                let (year, quarter) = roll_over(year, quarter, offset, 4);
                check_year(year).map(|year| PeriodKey::Quarter { year, quarter })
            }
            PeriodKey::Annual { year } => {
                check_year(i64::from(year) + i64::from(offset)).map(|year| PeriodKey::Annual { year })
            }
        };

        key.ok_or_else(|| {
            ForecastError::invalid_period(format!("advancing '{}' by {} periods leaves the year range", self, offset))
        })
    }
}

const MAX_YEAR: i64 = 9999;

/// Rolls a 1-based sub-period `offset` steps forward; year arithmetic is widened to avoid overflow.
fn roll_over(year: i32, index: u32, offset: u32, per_year: u32) -> (i64, u32) {
    let steps = i64::from(index) - 1 + i64::from(offset);
    let per_year = i64::from(per_year);
    let year = i64::from(year) + steps / per_year;
    (year, (steps % per_year) as u32 + 1)
}

fn check_year(year: i64) -> Option<i32> {
    if (0..=MAX_YEAR).contains(&year) {
        i32::try_from(year).ok()
    } else {
        None
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            PeriodKey::Quarter { year, quarter } => write!(f, "{:04}-Q{}", year, quarter),
            PeriodKey::Annual { year } => write!(f, "{:04}-Annual", year),
        }
    }
}

impl FromStr for PeriodKey {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || ForecastError::invalid_period(format!("malformed period key '{}'", s));

        let (year_part, rest) = s.split_once('-').ok_or_else(malformed)?;
        if year_part.len() != 4 || !year_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let year: i32 = year_part.parse().map_err(|_| malformed())?;

        if rest == "Annual" {
            return Ok(PeriodKey::Annual { year });
        }

        if let Some(quarter) = rest.strip_prefix('Q') {
            return match quarter.parse::<u32>() {
                Ok(q @ 1..=4) if quarter.len() == 1 => Ok(PeriodKey::Quarter { year, quarter: q }),
                _ => Err(malformed()),
            };
        }

        if rest.len() == 2 && rest.bytes().all(|b| b.is_ascii_digit()) {
            return match rest.parse::<u32>() {
                Ok(m @ 1..=12) => Ok(PeriodKey::Month { year, month: m }),
                _ => Err(malformed()),
            };
        }

        Err(malformed())
    }
}

/// Compute the key `offset` periods after `last_period`.
///
/// The key must match `period_type`; a monthly key cannot be advanced quarterly.
pub fn next_period(last_period: &str, period_type: PeriodType, offset: u32) -> Result<String> {
    let key: PeriodKey = last_period.parse()?;
    if key.period_type() != period_type {
        return Err(ForecastError::invalid_period(format!(
            "period '{}' is not a {} key",
            last_period, period_type
        )));
    }
    Ok(key.advance(offset)?.to_string())
}
