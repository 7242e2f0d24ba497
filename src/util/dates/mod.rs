use chrono::{DateTime, Local, Utc};

pub(crate) trait DateTimeExt {
    /// Floors this timestamp to the start of the day (midnight UTC).
    fn floor_day(&self) -> DateTime<Utc>;

    /// Returns `true` if this timestamp is exactly at midnight UTC.
    fn is_round_day(&self) -> bool;

    fn format_local_millis(&self) -> String;
}

impl DateTimeExt for DateTime<Utc> {
    fn floor_day(&self) -> DateTime<Utc> {
        self.date_naive()
            .and_hms_opt(0, 0, 0)
            .expect("valid time")
            .and_utc()
    }

    fn is_round_day(&self) -> bool {
        *self == self.floor_day()
    }

    fn format_local_millis(&self) -> String {
        let local_time = self.with_timezone(&Local);
        local_time.format("%Y-%m-%d %H:%M:%S.%3f (%Z)").to_string()
    }
}

#[cfg(test)]
mod tests;
