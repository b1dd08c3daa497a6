//! Error types of the alarm core.
//!
//! All variants carry only fixed-size data so they can be passed around on the device
//! without allocation. With the `defmt` feature they implement `defmt::Format`.

use core::fmt;

/// Top-level error type of the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// An alarm time was set with an hour outside 0..=23 or a minute outside 0..=59.
    InvalidTime {
        /// The rejected hour
        hour: u8,
        /// The rejected minute
        minute: u8,
    },

    /// A sampled timestamp or a time string could not be interpreted.
    TimeParse(TimeParseError),

    /// The sleep detector returned something other than asleep (1) or awake (0).
    InvalidDetection(u8),

    /// No sleep sensor is attached.
    SensorUnavailable,
}

/// The part of a time value that failed to parse or validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeParseError {
    /// The overall shape was wrong, e.g. a missing `:` or space.
    Layout,
    /// Hour missing, not numeric or out of range.
    Hour,
    /// Minute missing, not two digits or out of range.
    Minute,
    /// Second out of range.
    Second,
    /// Month out of range.
    Month,
    /// Day of month out of range.
    Day,
    /// Neither `AM` nor `PM`.
    Meridiem,
}

impl From<TimeParseError> for Error {
    fn from(e: TimeParseError) -> Self {
        Self::TimeParse(e)
    }
}

impl fmt::Display for TimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = match self {
            Self::Layout => "layout",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Month => "month",
            Self::Day => "day",
            Self::Meridiem => "AM/PM marker",
        };
        write!(f, "invalid {part}")
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTime { hour, minute } => {
                write!(f, "invalid alarm time {hour:02}:{minute:02}")
            }
            Self::TimeParse(e) => write!(f, "time parse error: {e}"),
            Self::InvalidDetection(raw) => write!(f, "invalid sleep detection result {raw}"),
            Self::SensorUnavailable => f.write_str("sleep sensor unavailable"),
        }
    }
}

impl core::error::Error for Error {}
