//! # Configuration
//! Compile-time settings of the alarm clock. Timing, defaults and input tuning live here
//! so they can be adjusted in one place.

// Alarms

/// Default sleep alarm as (hour, minute), 11:50 PM.
pub const DEFAULT_SLEEP_TIME: (u8, u8) = (23, 50);

/// Default wake alarm as (hour, minute), 7:30 AM.
pub const DEFAULT_WAKE_TIME: (u8, u8) = (7, 30);

/// How many minutes ahead of the wake alarm the pre-alarm advisory is raised.
pub const PRE_ALARM_LEAD_MINUTES: u16 = 5;

/// Second of the minute at which the compatibility re-arm policy clears triggered flags.
pub const REARM_SECOND: u8 = 1;

// Ticking

/// Interval of the clock tick that drives the scheduler (seconds). Must be at most 1.
pub const TICK_PERIOD_SECS: u64 = 1;

/// Interval between two sleep detection rounds (seconds).
pub const SLEEP_POLL_INTERVAL_SECS: u64 = 300;

// Blinds

/// Brightness target the panel starts with (percent).
pub const BRIGHTNESS_DEFAULT: u8 = 50;

/// Brightness change per button press (percent).
pub const BRIGHTNESS_STEP: u8 = 5;

/// Upper bound of the brightness target (percent).
pub const BRIGHTNESS_MAX: u8 = 100;

// Input and display

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 80;

/// Interval between repeated events while a button is held (ms).
pub const BUTTON_HOLD_INTERVAL_MS: u64 = 150;

/// A press longer than this counts as a hold (ms).
pub const BUTTON_HOLD_THRESHOLD_MS: u64 = 1000;

/// I²C bus frequency for the OLED (Hz).
pub const DISPLAY_I2C_FREQUENCY: u32 = 400_000;

const _: () = assert!(DEFAULT_SLEEP_TIME.0 < 24 && DEFAULT_SLEEP_TIME.1 < 60);
const _: () = assert!(DEFAULT_WAKE_TIME.0 < 24 && DEFAULT_WAKE_TIME.1 < 60);
const _: () = assert!(TICK_PERIOD_SECS <= 1);
const _: () = assert!(BRIGHTNESS_DEFAULT <= BRIGHTNESS_MAX);
