//! Clock pinned to a local calendar day.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

/// Reports midday of `today` in the local time zone.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Local>,
}

impl FixedClock {
    pub fn on(today: NaiveDate) -> Self {
        let midday = today.and_hms_opt(12, 0, 0).expect("valid midday");
        let now = Local
            .from_local_datetime(&midday)
            .earliest()
            .expect("midday exists in the local zone");
        Self { now }
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now.with_timezone(&Utc)
    }
}
