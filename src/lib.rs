mod calendar;
mod clock;
mod consts;
mod prelude;

pub use calendar::{days_in_month, is_leap_year, is_valid_date, is_valid_date_string};
pub use chrono::Weekday;
pub use clock::{Clock, FixedClock, SystemClock};
pub use consts::*;

use crate::calendar::{
    civil_from_day_number, day_number, days_from_sunday, normalize_month, weekday_from_sunday,
};
use crate::consts::{DAYS_PER_WEEK, FOUR_WEEKS, MONTHS_PER_YEAR};
use crate::prelude::*;
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;
use std::str::FromStr;

/// A single civil calendar day with no time-of-day or timezone.
///
/// Components are stored exactly as given. Constructors other than
/// [`IsoDate::new`] and [`FromStr`] do not check them against the calendar,
/// so `2024-01-35` is a representable value; use [`IsoDate::is_valid`] or
/// [`is_valid_date`] before trusting input. Arithmetic reads out-of-range
/// components the way a local-time moment does (day 35 of January is
/// February 4th) and always returns a real calendar day.
///
/// The canonical text form is `YYYY-MM-DD` with the year at its natural
/// width. Ordering compares canonical strings, so it is chronological only
/// while every year involved has the same number of digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{}-{:02}-{:02}", year, month, day)]
pub struct IsoDate {
    year: i32,
    month: u32,
    day: u32,
}

/// Error type for string parsing and validated construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Empty input where a date string was required.
    #[error("Empty date string")]
    EmptyInput,

    /// Input is not three `-` separated integers, or not zero-padded `YYYY-MM-DD`.
    #[error("Invalid date format: {0}")]
    InvalidFormat(String),

    #[error("Invalid year: {0} (must be {min}-{max})", min = MIN_YEAR, max = MAX_YEAR)]
    InvalidYear(i32),

    #[error("Invalid month: {0} (must be {min}-{max})", min = JANUARY, max = DECEMBER)]
    InvalidMonth(u32),

    #[error("Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },
}

impl IsoDate {
    /// Creates a date from raw components without any calendar check.
    pub const fn from_components(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Creates a date, rejecting components that do not name a real day
    /// with a four-digit year.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear`, `ParseError::InvalidMonth` or
    /// `ParseError::InvalidDay` for the first component that is out of range.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, ParseError> {
        let date = Self::from_components(year, month, day);
        date.validate().inspect_err(|err| {
            tracing::debug!(year, month, day, %err, "rejected calendar date");
        })?;
        Ok(date)
    }

    /// Decomposes a platform moment into its local year, month and day.
    pub fn from_moment<D: Datelike>(moment: &D) -> Self {
        Self::from_components(moment.year(), moment.month(), moment.day())
    }

    /// Splits `s` on `-` into year, month and day.
    ///
    /// Each part must be an integer, but nothing is range checked and no
    /// width is enforced: `"2024-13-40"` and `"24-1-5"` both succeed.
    ///
    /// # Errors
    /// Returns `ParseError::EmptyInput` for an empty string and
    /// `ParseError::InvalidFormat` when there are not exactly three integer parts.
    pub fn from_iso_str(s: &str) -> Result<Self, ParseError> {
        if s.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let mut parts = s.split(DATE_SEPARATOR);
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(year), Some(month), Some(day), None) => Ok(Self::from_components(
                Self::parse_i32(year, s)?,
                Self::parse_u32(month, s)?,
                Self::parse_u32(day, s)?,
            )),
            _ => Err(ParseError::InvalidFormat(s.to_owned())),
        }
    }

    /// Like [`IsoDate::from_iso_str`], but an absent or empty string means today.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidFormat` for a non-empty string that
    /// `from_iso_str` rejects.
    pub fn from_optional_str(s: Option<&str>, clock: &impl Clock) -> Result<Self, ParseError> {
        match s {
            None | Some("") => Ok(Self::today(clock)),
            Some(s) => Self::from_iso_str(s),
        }
    }

    /// The current local day as reported by `clock`.
    pub fn today(clock: &impl Clock) -> Self {
        Self::from_moment(&clock.today())
    }

    /// Returns the stored year component
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the stored month component (not normalized, may exceed 12)
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Returns the stored day component (not normalized, may exceed the month's length)
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Returns the stored (year, month, day), unnormalized.
    pub const fn to_components(&self) -> (i32, u32, u32) {
        (self.year, self.month, self.day)
    }

    /// Returns true if the stored components pass [`is_valid_date`].
    pub fn is_valid(&self) -> bool {
        is_valid_date(self.year, self.month, self.day)
    }

    /// See [`is_valid_date`].
    pub fn is_valid_date(year: i32, month: u32, day: u32) -> bool {
        is_valid_date(year, month, day)
    }

    /// See [`is_valid_date_string`].
    pub fn is_valid_date_string(s: &str) -> bool {
        is_valid_date_string(s)
    }

    /// See [`days_in_month`].
    pub const fn days_in_month(month: u32, year: i32) -> u32 {
        days_in_month(month, year)
    }

    /// See [`is_leap_year`].
    pub const fn is_leap_year(year: i32) -> bool {
        is_leap_year(year)
    }

    /// Converts to a `chrono::NaiveDate`, rolling out-of-range components
    /// into neighbouring months.
    ///
    /// Built from the numeric components directly, never by parsing the
    /// canonical string. Returns `None` when the day lies outside chrono's
    /// supported range.
    pub fn to_moment(&self) -> Option<NaiveDate> {
        let (year, month, day) = civil_from_day_number(self.day_number());
        let moment = i32::try_from(year)
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, month, day));
        if moment.is_none() {
            tracing::warn!(date = %self, "date outside the representable moment range");
        }
        moment
    }

    /// Returns the day of the week, after normalizing out-of-range components
    pub fn weekday(&self) -> Weekday {
        weekday_from_sunday(days_from_sunday(self.day_number()))
    }

    /// True if `self` sorts before `other` by canonical string.
    pub fn before(&self, other: &Self) -> bool {
        self.to_string() < other.to_string()
    }

    /// True if `self` sorts after `other` by canonical string.
    pub fn after(&self, other: &Self) -> bool {
        self.to_string() > other.to_string()
    }

    /// Replaces the day of month. A day past the end of the month rolls into
    /// the next month; it is not clamped.
    pub fn set_day_of_month(&self, day: u32) -> Self {
        Self::from_day_number(day_number(
            i64::from(self.year),
            i64::from(self.month),
            i64::from(day),
        ))
    }

    /// The most recent `week_start` on or before this date.
    pub fn first_day_of_week(&self, week_start: Weekday) -> Self {
        let n = self.day_number();
        let weekday = days_from_sunday(n);
        let week_start = i64::from(week_start.num_days_from_sunday());
        Self::from_day_number(n - (DAYS_PER_WEEK + weekday - week_start) % DAYS_PER_WEEK)
    }

    /// The last day of the week that starts on `week_start`, on or after this date.
    pub fn last_day_of_week(&self, week_start: Weekday) -> Self {
        let n = self.day_number();
        let weekday = days_from_sunday(n);
        let week_start = i64::from(week_start.num_days_from_sunday());
        Self::from_day_number(n + (week_start + 6 - weekday) % DAYS_PER_WEEK)
    }

    /// Moves `count` days; negative counts move backward.
    ///
    /// Results saturate at the first day of year `i32::MIN` and the last day
    /// of year `i32::MAX`.
    pub fn increment(&self, count: i64) -> Self {
        Self::from_day_number(self.day_number().saturating_add(count))
    }

    /// Returns the following day
    pub fn next_day(&self) -> Self {
        self.increment(1)
    }

    /// Returns the preceding day
    pub fn previous_day(&self) -> Self {
        self.increment(-1)
    }

    /// Same month one year earlier, clamping the day to that month's length
    /// (February 29th becomes February 28th in a common year).
    pub fn previous_year(&self) -> Self {
        self.step_months_clamped(-MONTHS_PER_YEAR)
    }

    /// Same month one year later, clamping the day to that month's length.
    pub fn next_year(&self) -> Self {
        self.step_months_clamped(MONTHS_PER_YEAR)
    }

    /// Same day in the following month, clamped to that month's last day.
    pub fn next_month_same_day_of_month(&self) -> Self {
        self.step_months_clamped(1)
    }

    /// Same day in the preceding month, clamped to that month's last day.
    pub fn previous_month_same_day_of_month(&self) -> Self {
        self.step_months_clamped(-1)
    }

    /// Four weeks later, or five if four stays inside the starting month.
    pub fn next_month_same_day_of_week(&self) -> Self {
        self.step_weeks_into_other_month(1)
    }

    /// Four weeks earlier, or five if four stays inside the starting month.
    pub fn previous_month_same_day_of_week(&self) -> Self {
        self.step_weeks_into_other_month(-1)
    }

    /// Returns true on Saturday and Sunday
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Returns true if this date equals the current day reported by `clock`
    pub fn is_today(&self, clock: &impl Clock) -> bool {
        *self == Self::today(clock)
    }

    /// Returns true if this date falls on `week_start`
    pub fn is_first_day_of_week(&self, week_start: Weekday) -> bool {
        self.weekday() == week_start
    }
}

impl FromStr for IsoDate {
    type Err = ParseError;

    /// Strict parse: succeeds exactly when [`is_valid_date_string`] holds.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = Self::from_iso_str(s)?;
        if !is_valid_date_string(s) {
            // Out-of-range components win over width errors
            date.validate()?;
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        Ok(date)
    }
}

impl IsoDate {
    fn parse_i32(part: &str, input: &str) -> Result<i32, ParseError> {
        part.parse::<i32>()
            .map_err(|_| ParseError::InvalidFormat(input.to_owned()))
    }

    fn parse_u32(part: &str, input: &str) -> Result<u32, ParseError> {
        part.parse::<u32>()
            .map_err(|_| ParseError::InvalidFormat(input.to_owned()))
    }

    fn validate(&self) -> Result<(), ParseError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(ParseError::InvalidYear(self.year));
        }
        if !(JANUARY..=DECEMBER).contains(&self.month) {
            return Err(ParseError::InvalidMonth(self.month));
        }
        if !(MIN_DAY..=days_in_month(self.month, self.year)).contains(&self.day) {
            return Err(ParseError::InvalidDay {
                year: self.year,
                month: self.month,
                day: self.day,
            });
        }
        Ok(())
    }

    const fn day_number(&self) -> i64 {
        day_number(self.year as i64, self.month as i64, self.day as i64)
    }

    fn from_day_number(n: i64) -> Self {
        let (year, month, day) = civil_from_day_number(n);
        Self::from_components(clamp_year(year), month, day)
    }

    /// Moves by whole months, clamping the day to the target month's length.
    fn step_months_clamped(&self, months: i64) -> Self {
        let (year, month) = normalize_month(i64::from(self.year), i64::from(self.month) + months);
        let end_of_month = days_in_month(month as u32, clamp_year(year));
        let day = self.day.min(end_of_month);
        Self::from_day_number(day_number(year, month, i64::from(day)))
    }

    /// Moves four weeks in `direction`, adding a fifth if still in the same month.
    fn step_weeks_into_other_month(&self, direction: i64) -> Self {
        let start = self.day_number();
        let (_, start_month, _) = civil_from_day_number(start);
        let mut n = start + direction * FOUR_WEEKS;
        if civil_from_day_number(n).1 == start_month {
            n += direction * DAYS_PER_WEEK;
        }
        Self::from_day_number(n)
    }
}

fn clamp_year(year: i64) -> i32 {
    i32::try_from(year).unwrap_or(if year < 0 { i32::MIN } else { i32::MAX })
}

impl Default for IsoDate {
    /// Today in local time.
    fn default() -> Self {
        Self::today(&SystemClock)
    }
}

impl From<NaiveDate> for IsoDate {
    fn from(moment: NaiveDate) -> Self {
        Self::from_moment(&moment)
    }
}

impl From<(i32, u32, u32)> for IsoDate {
    fn from((year, month, day): (i32, u32, u32)) -> Self {
        Self::from_components(year, month, day)
    }
}

impl PartialOrd for IsoDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IsoDate {
    // Must agree with `before`/`after`
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_string().cmp(&other.to_string())
    }
}

impl serde::Serialize for IsoDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for IsoDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
