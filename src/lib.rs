//! # Blind alarm clock
//! The logic of the alarm clock, kept free of any hardware so it can be tested on the host.
//!
//! - [`alarm`]: alarm times, wall-clock timestamps and the scheduler that fires the alarms
//! - [`picker`]: hour and minute selection for the alarms and the clock
//! - [`ringing`]: the single ringing notification on screen
//! - [`blinds`]: brightness target, blind controller and sleep detector boundaries
//! - [`panel`]: the complete clock state driven by ticks and button presses
//!
//! The firmware in `main.rs` feeds a [`panel::Panel`] from the RTC and the buttons.
//! Run the tests with `cargo test`.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod alarm;
pub mod blinds;
pub mod config;
pub mod error;
pub mod panel;
pub mod picker;
pub mod ringing;

pub use alarm::{AlarmKind, AlarmScheduler, AlarmTime, ReArm, SchedulerEvent, Timestamp};
pub use error::{Error, TimeParseError};
