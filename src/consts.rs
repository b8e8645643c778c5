/// Minimum year accepted by the validity predicates (inclusive)
pub const MIN_YEAR: i32 = 1000;
/// Maximum year accepted by the validity predicates (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Month number for January
pub const JANUARY: u32 = 1;
/// Month number for December
pub const DECEMBER: u32 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u32 = 1;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u32 = 29;
/// Days in February for common years
pub const FEBRUARY_DAYS: u32 = 28;

pub(crate) const MONTHS_PER_YEAR: i64 = 12;
pub(crate) const DAYS_PER_WEEK: i64 = 7;
/// Four whole weeks, the first step tried when moving by month on the same weekday
pub(crate) const FOUR_WEEKS: i64 = 28;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
