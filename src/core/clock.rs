use crate::core::Clock;
use crate::domain::model::TimeOfDay;
use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Earliest bookable start on `date`: the current minute when `date` is
/// today, no floor for later dates.
pub fn today_floor(clock: &dyn Clock, date: NaiveDate) -> Option<TimeOfDay> {
    let now = clock.now();
    (now.date() == date).then(|| TimeOfDay::from_naive_time(now.time()))
}

/// The date picker's lower bound, `YYYY-MM-DD`.
pub fn min_date(clock: &dyn Clock) -> String {
    clock.today().format("%Y-%m-%d").to_string()
}
