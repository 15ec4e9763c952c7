//! Day-precise calendar dates for the business-day calendar, with a focus
//! on edge cases.
//!
//! Dates are `YYYY-MM-DD`, not a number of seconds, and provide an interface
//! for jumping by durations expressed in days, weeks, months or years. All
//! arithmetic here is timezone-blind: the schedule layer decides which fixed
//! offset these dates live in.

use std::fmt;
use std::str::FromStr;

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// A date with day-precision.
///
/// Supports years in the range 1000..=9999.
///
/// All methods execute in constant time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date {
    year: u16,
    month: Month,
    day: u8,
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month.number(), self.day)
    }
}

/// Twelve months in the year
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, PartialOrd, Ord)]
pub enum Month {
    Jan = 0,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// Convert from the usual 1..=12 numbering
    pub fn from_number(n: usize) -> Option<Self> {
        if (1..=12).contains(&n) {
            Self::from_usize(n - 1)
        } else {
            None
        }
    }

    /// The usual 1..=12 numbering
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Month directly succeeding the current one with wrapping
    pub fn next(self) -> Self {
        Self::from_isize((self as isize + 1) % 12).unwrap()
    }

    /// Month directly preceding the current one with wrapping
    pub fn prev(self) -> Self {
        Self::from_isize((self as isize + 11) % 12).unwrap()
    }

    /// Number of days in this month of the given year
    pub fn count(self, year: u16) -> u8 {
        use Month::*;
        match self {
            Jan | Mar | May | Jul | Aug | Oct | Dec => 31,
            Apr | Jun | Sep | Nov => 30,
            Feb => {
                if is_leap(year) {
                    29
                } else {
                    28
                }
            }
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Ways in which a date taken from user input can be wrong
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DateError {
    /// text that does not even look like `YYYY-MM-DD`
    BadFormat(String),
    /// month outside of 1..=12
    InvalidMonth(usize),
    /// year is outside of 1000..=9999
    UnsupportedYear(usize),
    /// Feb 29 of a non-leap year
    NotBissextile(usize),
    /// Feb 30 or Feb 31 or 31st day of a 30-day month
    MonthTooShort(Month, usize),
    /// day outside of 1..=31
    InvalidDay(usize),
}

impl Date {
    /// Validate year-month-day into date
    pub fn from(year: usize, month: Month, day: usize) -> Result<Self, DateError> {
        if !(1000..=9999).contains(&year) {
            Err(DateError::UnsupportedYear(year))
        } else if day == 0 || day > 31 {
            Err(DateError::InvalidDay(day))
        } else if day <= month.count(year as u16) as usize {
            Ok(Self { year: year as u16, month, day: day as u8 })
        } else if day >= 30 {
            Err(DateError::MonthTooShort(month, day))
        } else {
            Err(DateError::NotBissextile(year))
        }
    }

    /// `self.day` accessor
    pub fn day(&self) -> u8 {
        self.day
    }

    /// `self.month` accessor
    pub fn month(&self) -> Month {
        self.month
    }

    /// `self.year` accessor
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Biject the dates with integers
    ///
    /// This indexing is guaranteed consistent in the sense that
    /// for any date `d`,
    ///
    ///     # use divvy::date::{Date, Month};
    ///     # let d = Date::from(2024, Month::Feb, 28).unwrap();
    ///     assert_eq!(d.index() + 1, d.next().index());
    pub fn index(self) -> usize {
        let leaps = {
            let years = if self.month <= Month::Feb {
                self.year as usize - 1
            } else {
                self.year as usize
            };
            // count leap years before current
            (years / 4) - (years / 100) + (years / 400)
        };
        let mut n = self.year as usize * 365 + self.day as usize;
        // partially elapsed current year
        n += [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334][self.month as usize];
        n += leaps; // each leap year adds one day
        n
    }

    pub fn next(self) -> Self {
        if self.month.count(self.year) == self.day {
            if self.month == Month::Dec {
                Self { year: self.year + 1, month: Month::Jan, day: 1 }
            } else {
                Self { month: self.month.next(), day: 1, ..self }
            }
        } else {
            Self { day: self.day + 1, ..self }
        }
    }

    pub fn prev(self) -> Self {
        if self.day == 1 {
            if self.month == Month::Jan {
                Self { year: self.year - 1, month: Month::Dec, day: 31 }
            } else {
                let month = self.month.prev();
                Self { month, day: month.count(self.year), ..self }
            }
        } else {
            Self { day: self.day - 1, ..self }
        }
    }

    /// `count` days before/after current date
    pub fn jump_day(self, count: isize) -> Self {
        let full_count = count;
        // first rough approximation to get
        // the year and month as close as possible
        let (d, count) = if count > 30 {
            let target = self.index() as isize + count;
            let adjust_year = self.jump_year(count / 365);
            let adjust_month = adjust_year.jump_month((target - adjust_year.index() as isize) / 31);
            (adjust_month, target - adjust_month.index() as isize)
        } else {
            (self, count)
        };
        let mut d = d;
        if count > 0 {
            let mut count = count as u8;
            while count > 0 {
                let diff = (d.month.count(d.year) - d.day).min(count);
                d.day += diff;
                count -= diff;
                if count > 0 {
                    d = d.next();
                    count -= 1;
                }
            }
        } else {
            let mut count = (-count) as u8;
            while count > 0 {
                let diff = (d.day - 1).min(count);
                d.day -= diff;
                count -= diff;
                if count > 0 {
                    d = d.prev();
                    count -= 1;
                }
            }
        }
        assert_eq!(d.index() as isize, self.index() as isize + full_count);
        d
    }

    /// `count` months before/after current date
    ///
    /// Day will be truncated to fit in the new month:
    /// adding one month to `2000-01-31` makes it `2000-02-29`
    pub fn jump_month(self, count: isize) -> Self {
        let (year, month) = {
            let mut year = self.year as isize;
            let mut month = self.month as isize + count;
            while month < 0 {
                month += 12;
                year -= 1;
            }
            while month >= 12 {
                month -= 12;
                year += 1;
            }
            (year as u16, Month::from_isize(month).unwrap())
        };
        Self {
            year,
            month,
            day: self.day.min(month.count(year)),
        }
    }

    /// `count` years before/after current date
    ///
    /// Day will be truncated in the rare case it is needed:
    /// adding one year to `2000-02-29` makes it `2001-02-28`
    pub fn jump_year(self, count: isize) -> Self {
        let year = (self.year as isize + count) as u16;
        if self.month == Month::Feb && self.day == 29 && !is_leap(year) {
            Self { year, day: 28, ..self }
        } else {
            Self { year, ..self }
        }
    }
}

/// Parse a `YYYY-MM-DD` date, strictly: four, two and two digits.
impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        let bad = || DateError::BadFormat(s.to_string());
        let mut parts = s.split('-');
        let (y, m, d) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(y), Some(m), Some(d), None) => (y, m, d),
            _ => return Err(bad()),
        };
        if y.len() != 4 || m.len() != 2 || d.len() != 2 {
            return Err(bad());
        }
        let year: usize = y.parse().map_err(|_| bad())?;
        let month: usize = m.parse().map_err(|_| bad())?;
        let day: usize = d.parse().map_err(|_| bad())?;
        let month = Month::from_number(month).ok_or(DateError::InvalidMonth(month))?;
        Date::from(year, month, day)
    }
}

fn is_leap(year: u16) -> bool {
    if year % 400 == 0 {
        true
    } else if year % 100 == 0 {
        false
    } else {
        year % 4 == 0
    }
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DateError::*;
        match self {
            BadFormat(s) => write!(f, "'{}' does not match YYYY-MM-DD", s),
            InvalidMonth(m) => write!(f, "{} is not in the range 1 ..= 12", m),
            UnsupportedYear(y) => write!(f, "{} is outside of the supported range for years", y),
            NotBissextile(y) => write!(f, "{} is not bissextile, Feb 29 does not exist", y),
            MonthTooShort(m, d) => write!(
                f,
                "{} is a short month, it does not have a {}th day",
                m, d,
            ),
            InvalidDay(d) => write!(f, "{} is not a valid day", d),
        }
    }
}
