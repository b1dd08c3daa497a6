//! # Blinds and sleep detection
//! The boundary to the blind motor controller and the sleep sensor. Neither is implemented here:
//! the controller is a sink for advisory calls and the detector a source of raw readings. This
//! module keeps the brightness target and turns detector readings into controller calls.

use crate::alarm::AlarmKind;
use crate::config::{BRIGHTNESS_DEFAULT, BRIGHTNESS_MAX, BRIGHTNESS_STEP};
use crate::error::Error;

/// Receives advisory signals for the blinds.
pub trait BlindController {
    /// The sleeper fell asleep
    fn sleep_detected(&mut self);
    /// The sleeper woke up
    fn wake_detected(&mut self);
    /// An alarm is about to ring
    fn pre_wake(&mut self, kind: AlarmKind);
    /// The brightness target changed, in percent
    fn brightness_changed(&mut self, level: u8);
}

/// A controller that ignores every signal, for hardware without a blind motor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoopBlind;

impl BlindController for NoopBlind {
    fn sleep_detected(&mut self) {}
    fn wake_detected(&mut self) {}
    fn pre_wake(&mut self, _kind: AlarmKind) {}
    fn brightness_changed(&mut self, _level: u8) {}
}

/// Delivers raw sleep readings: 1 for asleep, 0 for awake.
pub trait SleepDetector {
    /// Takes one reading
    fn detect(&mut self) -> Result<u8, Error>;
}

/// A detector for hardware without a sleep sensor. Every reading fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoSensor;

impl SleepDetector for NoSensor {
    fn detect(&mut self) -> Result<u8, Error> {
        Err(Error::SensorUnavailable)
    }
}

/// An interpreted sleep reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SleepReading {
    /// Asleep (raw 1)
    Asleep,
    /// Awake (raw 0)
    Awake,
}

impl SleepReading {
    /// Interprets a raw detector value.
    pub const fn from_raw(raw: u8) -> Result<Self, Error> {
        match raw {
            1 => Ok(Self::Asleep),
            0 => Ok(Self::Awake),
            other => Err(Error::InvalidDetection(other)),
        }
    }
}

/// Forwards sleep readings to a blind controller and remembers the last valid one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SleepMonitor {
    /// Last valid reading
    last: Option<SleepReading>,
}

impl SleepMonitor {
    /// Create a new `SleepMonitor` that has seen no reading yet.
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Last valid reading
    pub const fn last(&self) -> Option<SleepReading> {
        self.last
    }

    /// Handles one raw reading. Invalid values reach no controller method.
    pub fn report(
        &mut self,
        raw: u8,
        controller: &mut impl BlindController,
    ) -> Result<SleepReading, Error> {
        let reading = SleepReading::from_raw(raw).inspect_err(|e| {
            warn!("sleep detection: {}", e);
        })?;
        match reading {
            SleepReading::Asleep => controller.sleep_detected(),
            SleepReading::Awake => controller.wake_detected(),
        }
        self.last = Some(reading);
        Ok(reading)
    }

    /// Runs one detection round: read the detector, then report.
    pub fn poll(
        &mut self,
        detector: &mut impl SleepDetector,
        controller: &mut impl BlindController,
    ) -> Result<SleepReading, Error> {
        let raw = detector.detect()?;
        self.report(raw, controller)
    }
}

/// Brightness target for the blinds, in percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Brightness(u8);

impl Default for Brightness {
    fn default() -> Self {
        Self(BRIGHTNESS_DEFAULT)
    }
}

impl Brightness {
    /// The target in percent
    pub const fn level(self) -> u8 {
        self.0
    }

    /// One step brighter, at most [`BRIGHTNESS_MAX`]. Returns the new level.
    pub fn increase(&mut self) -> u8 {
        self.0 = self.0.saturating_add(BRIGHTNESS_STEP).min(BRIGHTNESS_MAX);
        self.0
    }

    /// One step darker, at least 0. Returns the new level.
    pub const fn decrease(&mut self) -> u8 {
        self.0 = self.0.saturating_sub(BRIGHTNESS_STEP);
        self.0
    }
}
