//! # Seasonality
//!
//! Static demand modifiers for the twelve calendar months, and the average
//! markdown each season applies to revenue.
//!
//! ```text
//! Month      Modifier  Season   Discount
//! ─────────  ────────  ───────  ────────
//! January      0.80    low        15%
//! February     0.80    low        15%
//! March        1.00    normal     10%
//! April        1.00    normal     10%
//! May          1.00    normal     10%
//! June         0.90    low        15%
//! July         0.90    low        15%
//! August       1.15    high       30%
//! September    1.15    high       30%
//! October      1.00    normal     10%
//! November     1.50    high       30%
//! December     2.00    high       30%
//! ```
//!
//! The modifier scales both revenue and costs (volume). The discount only
//! reduces revenue (markdown pricing).

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::Rate;
use crate::MONTHS_PER_YEAR;

// =============================================================================
// Season
// =============================================================================

/// Demand season of a calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Low,
    Normal,
    High,
}

impl Season {
    /// Average revenue markdown during this season.
    pub const fn discount_rate(&self) -> Rate {
        match self {
            Season::Low => Rate::from_bps(1500),
            Season::Normal => Rate::from_bps(1000),
            Season::High => Rate::from_bps(3000),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Season::Low => "low",
            Season::Normal => "normal",
            Season::High => "high",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Calendar Month
// =============================================================================

/// One of the twelve fixed projection slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CalendarMonth {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl CalendarMonth {
    /// All months in calendar order.
    pub const ALL: [CalendarMonth; MONTHS_PER_YEAR] = [
        CalendarMonth::January,
        CalendarMonth::February,
        CalendarMonth::March,
        CalendarMonth::April,
        CalendarMonth::May,
        CalendarMonth::June,
        CalendarMonth::July,
        CalendarMonth::August,
        CalendarMonth::September,
        CalendarMonth::October,
        CalendarMonth::November,
        CalendarMonth::December,
    ];

    /// Returns the 1-based month number.
    pub const fn number(&self) -> u8 {
        *self as u8 + 1
    }

    /// Resolves a 1-based month number.
    ///
    /// ## Example
    /// ```rust
    /// use shopcalc_core::seasonality::CalendarMonth;
    ///
    /// assert_eq!(CalendarMonth::from_number(11).unwrap(), CalendarMonth::November);
    /// assert!(CalendarMonth::from_number(13).is_err());
    /// ```
    pub fn from_number(number: u8) -> CoreResult<Self> {
        number
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index as usize).copied())
            .ok_or(CoreError::MonthNotFound(number))
    }

    /// English month name.
    pub const fn name(&self) -> &'static str {
        match self {
            CalendarMonth::January => "January",
            CalendarMonth::February => "February",
            CalendarMonth::March => "March",
            CalendarMonth::April => "April",
            CalendarMonth::May => "May",
            CalendarMonth::June => "June",
            CalendarMonth::July => "July",
            CalendarMonth::August => "August",
            CalendarMonth::September => "September",
            CalendarMonth::October => "October",
            CalendarMonth::November => "November",
            CalendarMonth::December => "December",
        }
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Seasonal Month
// =============================================================================

/// One row of the seasonal table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct SeasonalMonth {
    pub month: CalendarMonth,

    #[ts(as = "String")]
    pub name: &'static str,

    /// Volume multiplier applied to revenue and costs.
    pub modifier: Rate,

    pub season: Season,
}

impl SeasonalMonth {
    /// Share of revenue kept after the seasonal markdown.
    pub const fn revenue_retention(&self) -> Rate {
        self.season.discount_rate().complement()
    }
}

/// Looks up the seasonal row for a month.
pub const fn seasonal_month(month: CalendarMonth) -> SeasonalMonth {
    let (modifier, season) = match month {
        CalendarMonth::January | CalendarMonth::February => (8000, Season::Low),
        CalendarMonth::March | CalendarMonth::April | CalendarMonth::May => {
            (10_000, Season::Normal)
        }
        CalendarMonth::June | CalendarMonth::July => (9000, Season::Low),
        CalendarMonth::August | CalendarMonth::September => (11_500, Season::High),
        CalendarMonth::October => (10_000, Season::Normal),
        CalendarMonth::November => (15_000, Season::High),
        CalendarMonth::December => (20_000, Season::High),
    };

    SeasonalMonth {
        month,
        name: month.name(),
        modifier: Rate::from_bps(modifier),
        season,
    }
}

/// Returns the full table in calendar order.
pub fn seasonal_calendar() -> [SeasonalMonth; MONTHS_PER_YEAR] {
    CalendarMonth::ALL.map(seasonal_month)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_numbers_round_trip() {
        for (index, month) in CalendarMonth::ALL.iter().enumerate() {
            assert_eq!(month.number() as usize, index + 1);
            assert_eq!(CalendarMonth::from_number(month.number()).unwrap(), *month);
        }
    }

    #[test]
    fn test_from_number_rejects_out_of_range() {
        assert_eq!(CalendarMonth::from_number(0), Err(CoreError::MonthNotFound(0)));
        assert_eq!(CalendarMonth::from_number(13), Err(CoreError::MonthNotFound(13)));
    }

    #[test]
    fn test_seasonal_table() {
        let calendar = seasonal_calendar();
        let modifiers: Vec<u32> = calendar.iter().map(|m| m.modifier.bps()).collect();
        assert_eq!(
            modifiers,
            vec![
                8000, 8000, 10_000, 10_000, 10_000, 9000, 9000, 11_500, 11_500, 10_000, 15_000,
                20_000
            ]
        );

        let seasons: Vec<Season> = calendar.iter().map(|m| m.season).collect();
        use Season::*;
        assert_eq!(
            seasons,
            vec![Low, Low, Normal, Normal, Normal, Low, Low, High, High, Normal, High, High]
        );
    }

    #[test]
    fn test_discount_applies_by_season() {
        assert_eq!(Season::Low.discount_rate().bps(), 1500);
        assert_eq!(Season::Normal.discount_rate().bps(), 1000);
        assert_eq!(Season::High.discount_rate().bps(), 3000);

        let november = seasonal_month(CalendarMonth::November);
        assert_eq!(november.name, "November");
        assert_eq!(november.revenue_retention().bps(), 7000);
    }
}
