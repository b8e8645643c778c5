use chrono::{Local, NaiveDate};

/// Source of the current local calendar day.
///
/// Passed to [`IsoDate::today`](crate::IsoDate::today) and
/// [`IsoDate::is_today`](crate::IsoDate::is_today) so callers decide where
/// "today" comes from.
pub trait Clock {
    /// Returns the current civil day in local time.
    fn today(&self) -> NaiveDate;
}

/// Reads the process wall clock in the local timezone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        let today = Local::now().date_naive();
        tracing::trace!(%today, "read local wall clock");
        today
    }
}

/// Always reports the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_its_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        assert_eq!(FixedClock(date).today(), date);
    }

    #[test]
    fn test_clock_through_reference() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        fn read(clock: impl Clock) -> NaiveDate {
            clock.today()
        }

        let clock = FixedClock(date);
        assert_eq!(read(&clock), date);
        assert_eq!(read(&clock as &dyn Clock), date);
    }

    #[test]
    fn test_system_clock_matches_local_date() {
        let before = Local::now().date_naive();
        let today = SystemClock.today();
        let after = Local::now().date_naive();
        assert!(before <= today && today <= after);
    }
}
