use chrono::{NaiveDate, NaiveTime, Timelike};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationDate(NaiveDate);

impl ReservationDate {
    /// Parses a `YYYY-MM-DD` date. Today is accepted, anything earlier is not.
    pub fn parse(value: &str, today: NaiveDate) -> Result<ReservationDate, String>{
        let date = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
            .map_err(|_| format!("{} is not a valid date, expected YYYY-MM-DD", value))?;

        if date < today {
            return Err("reservation date cannot be in the past".to_string())
        }

        Ok(Self(date))
    }

    pub fn get(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationTime(NaiveTime);

impl ReservationTime {
    /// Parses an `H:MM` or `HH:MM` time of day, minute precision.
    pub fn parse(value: &str) -> Result<ReservationTime, String>{
        let value = value.trim();
        let invalid = || format!("{} is not a valid time, expected HH:MM", value);

        let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

        if !all_digits(hours) || hours.len() > 2 || !all_digits(minutes) || minutes.len() != 2 {
            return Err(invalid())
        }

        let time = hours.parse::<u32>()
            .ok()
            .zip(minutes.parse::<u32>().ok())
            .and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0))
            .ok_or_else(invalid)?;

        Ok(Self(time))
    }

    pub fn get(&self) -> NaiveTime {
        self.0
    }
}

pub fn format_time(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}
