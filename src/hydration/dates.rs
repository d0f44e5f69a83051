//! Calendar helpers: ages, day bounds and validated date ranges.
//!
//! All days are UTC calendar days.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};

/// Longest range accepted by range queries, in days (inclusive).
pub const MAX_RANGE_DAYS: u64 = 366;

/// Completed years between `birth` and `on`, or `None` if `birth` is after `on`.
#[must_use]
pub fn age_on(birth: NaiveDate, on: NaiveDate) -> Option<u32> {
    if birth > on {
        return None;
    }
    let mut years = on.year() - birth.year();
    if (on.month(), on.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

/// Today's UTC calendar day.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Half-open instant range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    /// Inclusive lower bound.
    pub start: DateTime<Utc>,
    /// Exclusive upper bound.
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Returns `true` if `at` falls inside the range.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

/// Instants covering a single UTC day.
#[must_use]
pub fn day_bounds(day: NaiveDate) -> TimeRange {
    let start = day.and_time(NaiveTime::MIN).and_utc();
    let end = day
        .checked_add_days(Days::new(1))
        .map_or(DateTime::<Utc>::MAX_UTC, |next| next.and_time(NaiveTime::MIN).and_utc());
    TimeRange { start, end }
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First day.
    pub from: NaiveDate,
    /// Last day.
    pub to: NaiveDate,
}

/// Why a [`DateRange`] was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateRangeError {
    /// `from` is after `to`.
    #[error("start date {from} is after end date {to}")]
    Inverted {
        /// Requested start.
        from: NaiveDate,
        /// Requested end.
        to: NaiveDate,
    },
    /// The range spans more than [`MAX_RANGE_DAYS`].
    #[error("range spans {days} days; at most 366 allowed")]
    TooLong {
        /// Requested span in days.
        days: u64,
    },
}

impl DateRange {
    /// Builds a validated range.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError`] if the range is inverted or too long.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, DateRangeError> {
        if from > to {
            return Err(DateRangeError::Inverted { from, to });
        }
        let range = Self { from, to };
        let days = range.len_days();
        if days > MAX_RANGE_DAYS {
            return Err(DateRangeError::TooLong { days });
        }
        Ok(range)
    }

    /// The `days` days ending on (and including) `last`.
    #[must_use]
    pub fn trailing(last: NaiveDate, days: u32) -> Self {
        let from = last
            .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
            .unwrap_or(NaiveDate::MIN);
        Self { from, to: last }
    }

    /// Number of days in the range, counting both ends.
    #[must_use]
    pub fn len_days(&self) -> u64 {
        let span = (self.to - self.from).num_days();
        u64::try_from(span).map_or(0, |d| d + 1)
    }

    /// Instants covering every day in the range.
    #[must_use]
    pub fn time_range(&self) -> TimeRange {
        TimeRange {
            start: day_bounds(self.from).start,
            end: day_bounds(self.to).end,
        }
    }

    /// Returns `true` if `day` is inside the range.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }

    /// Clips the start so the range covers at most `days` days up to `today`.
    #[must_use]
    pub fn clamp_to_window(&self, today: NaiveDate, days: u32) -> Option<Self> {
        let window = Self::trailing(today, days);
        let from = self.from.max(window.from);
        let to = self.to.min(today);
        (from <= to).then_some(Self { from, to })
    }

    /// Iterates over every day in the range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let to = self.to;
        self.from.iter_days().take_while(move |d| *d <= to)
    }
}
