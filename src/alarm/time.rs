//! # Alarm time
//! Time-of-day values for the alarms, the timestamps sampled from the wall clock, and the
//! 12-hour strings shown on the display.
//!
//! The canonical display form is `H:MM AM` / `H:MM PM` without a leading zero on the hour,
//! e.g. `7:30 AM`, `12:05 AM` (five past midnight) or `11:50 PM`.

use crate::config::{DEFAULT_SLEEP_TIME, DEFAULT_WAKE_TIME};
use crate::error::{Error, TimeParseError};
use core::fmt::{self, Write};
use core::str::FromStr;
use heapless::String;

/// Number of selectable hours.
pub const HOURS_PER_DAY: u8 = 24;

/// Number of selectable minutes.
pub const MINUTES_PER_HOUR: u8 = 60;

/// Minutes in one day, the modulus for time-of-day arithmetic.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Capacity of the `H:MM AM` form, the longest being `12:59 PM`.
pub const DISPLAY_CAPACITY: usize = 8;

/// Capacity of the ringing screen form `AM  07:30`.
pub const RINGING_CAPACITY: usize = 9;

/// Morning or afternoon half of the 12-hour clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Meridiem {
    /// Midnight up to noon
    Am,
    /// Noon up to midnight
    Pm,
}

impl Meridiem {
    /// The marker as printed on the display.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }

    /// Parses `AM` or `PM`, ignoring ASCII case.
    fn parse(s: &str) -> Result<Self, TimeParseError> {
        if s.eq_ignore_ascii_case("AM") {
            Ok(Self::Am)
        } else if s.eq_ignore_ascii_case("PM") {
            Ok(Self::Pm)
        } else {
            Err(TimeParseError::Meridiem)
        }
    }
}

/// A wall-clock time of day with minute resolution. Always holds a valid hour and minute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmTime {
    /// Hour, 0..=23
    hour: u8,
    /// Minute, 0..=59
    minute: u8,
}

impl AlarmTime {
    /// Default time of the sleep alarm.
    pub const DEFAULT_SLEEP: Self = Self {
        hour: DEFAULT_SLEEP_TIME.0,
        minute: DEFAULT_SLEEP_TIME.1,
    };

    /// Default time of the wake alarm.
    pub const DEFAULT_WAKE: Self = Self {
        hour: DEFAULT_WAKE_TIME.0,
        minute: DEFAULT_WAKE_TIME.1,
    };

    /// Midnight.
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Creates a new `AlarmTime`, rejecting an hour outside 0..=23 or a minute outside 0..=59.
    pub const fn new(hour: u8, minute: u8) -> Result<Self, Error> {
        if hour >= HOURS_PER_DAY || minute >= MINUTES_PER_HOUR {
            return Err(Error::InvalidTime { hour, minute });
        }
        Ok(Self { hour, minute })
    }

    /// Get the hour (0..=23)
    pub const fn hour(self) -> u8 {
        self.hour
    }

    /// Get the minute (0..=59)
    pub const fn minute(self) -> u8 {
        self.minute
    }

    /// Minutes since midnight.
    pub const fn minute_of_day(self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Minutes from `self` forward to `later`, going over midnight if needed. Equal times give 0.
    pub const fn minutes_until(self, later: Self) -> u16 {
        (later.minute_of_day() + MINUTES_PER_DAY - self.minute_of_day()) % MINUTES_PER_DAY
    }

    /// The hour on a 12-hour dial, 1..=12.
    pub const fn hour_12(self) -> u8 {
        match self.hour % 12 {
            0 => 12,
            h => h,
        }
    }

    /// Whether this is a morning or an afternoon time.
    pub const fn meridiem(self) -> Meridiem {
        if self.hour < 12 { Meridiem::Am } else { Meridiem::Pm }
    }

    /// Same minute, next hour. 23 wraps to 0.
    pub const fn next_hour(self) -> Self {
        Self {
            hour: (self.hour + 1) % HOURS_PER_DAY,
            minute: self.minute,
        }
    }

    /// Same hour, next minute. 59 wraps to 0 without carrying into the hour.
    pub const fn next_minute(self) -> Self {
        Self {
            hour: self.hour,
            minute: (self.minute + 1) % MINUTES_PER_HOUR,
        }
    }

    /// The canonical `H:MM AM` form.
    pub fn to_display(self) -> String<DISPLAY_CAPACITY> {
        let mut s = String::new();
        // capacity covers the longest value, `12:59 PM`
        let _ = write!(s, "{self}");
        s
    }

    /// The form used on the ringing screen: meridiem first, two spaces, zero-padded hour,
    /// e.g. `AM  07:30`.
    pub fn to_ringing_clock(self) -> String<RINGING_CAPACITY> {
        let mut s = String::new();
        let _ = write!(
            s,
            "{}  {:02}:{:02}",
            self.meridiem().as_str(),
            self.hour_12(),
            self.minute
        );
        s
    }
}

impl Default for AlarmTime {
    fn default() -> Self {
        Self::MIDNIGHT
    }
}

impl fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02} {}",
            self.hour_12(),
            self.minute,
            self.meridiem().as_str()
        )
    }
}

impl FromStr for AlarmTime {
    type Err = Error;

    /// Parses `H:MM AM` or `HH:MM PM`. The hour is 1..=12 with an optional leading zero,
    /// the minute is exactly two digits, and the marker is `AM` or `PM` in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (clock, marker) = s.split_once(' ').ok_or(TimeParseError::Layout)?;
        let meridiem = Meridiem::parse(marker)?;
        let (hour, minute) = clock.split_once(':').ok_or(TimeParseError::Layout)?;

        let hour_12 = parse_digits(hour, 1..=2).ok_or(TimeParseError::Hour)?;
        if !(1..=12).contains(&hour_12) {
            return Err(TimeParseError::Hour.into());
        }
        let minute = parse_digits(minute, 2..=2).ok_or(TimeParseError::Minute)?;
        if minute >= MINUTES_PER_HOUR {
            return Err(TimeParseError::Minute.into());
        }

        let hour = match (meridiem, hour_12) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Am, h) => h,
            (Meridiem::Pm, h) => h + 12,
        };
        Self::new(hour, minute)
    }
}

/// Parses an unsigned number made only of ASCII digits whose length lies in `len`.
fn parse_digits(s: &str, len: core::ops::RangeInclusive<usize>) -> Option<u8> {
    if !len.contains(&s.len()) || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Gregorian leap year.
const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1..=12) of `year`.
const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// A wall-clock reading as delivered by the tick source.
///
/// The fields are raw values straight from the clock; use [`Timestamp::validate`] or
/// [`Timestamp::time_of_day`] before trusting them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp {
    /// Calendar year
    pub year: u16,
    /// Month, 1..=12
    pub month: u8,
    /// Day of month, 1..=28 up to 1..=31 depending on month and year
    pub day: u8,
    /// Hour, 0..=23
    pub hour: u8,
    /// Minute, 0..=59
    pub minute: u8,
    /// Second, 0..=59
    pub second: u8,
}

impl Timestamp {
    /// Create a new `Timestamp` from raw clock fields.
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Checks that every field lies in its range, including the length of the month.
    pub const fn validate(&self) -> Result<(), TimeParseError> {
        if self.month < 1 || self.month > 12 {
            return Err(TimeParseError::Month);
        }
        if self.day < 1 || self.day > days_in_month(self.year, self.month) {
            return Err(TimeParseError::Day);
        }
        if self.hour >= HOURS_PER_DAY {
            return Err(TimeParseError::Hour);
        }
        if self.minute >= MINUTES_PER_HOUR {
            return Err(TimeParseError::Minute);
        }
        if self.second >= 60 {
            return Err(TimeParseError::Second);
        }
        Ok(())
    }

    /// The time of day of this reading, seconds discarded.
    pub const fn time_of_day(&self) -> Result<AlarmTime, Error> {
        match self.validate() {
            Ok(()) => Ok(AlarmTime {
                hour: self.hour,
                minute: self.minute,
            }),
            Err(e) => Err(Error::TimeParse(e)),
        }
    }
}
