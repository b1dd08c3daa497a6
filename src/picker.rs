//! # Time picker
//! Editing state behind the hour and minute selectors. The picker starts from the current value
//! of whatever it edits and only applies the selection on confirm.

use crate::alarm::{AlarmKind, AlarmScheduler, AlarmTime};
use crate::alarm::time::{HOURS_PER_DAY, MINUTES_PER_HOUR};
use crate::error::Error;

/// Number of values offered by the hour selector.
pub const HOUR_CHOICES: u8 = HOURS_PER_DAY;

/// Number of values offered by the minute selector.
pub const MINUTE_CHOICES: u8 = MINUTES_PER_HOUR;

/// What the picker edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PickerTarget {
    /// One of the alarms
    Alarm(AlarmKind),
    /// The wall clock itself
    Clock,
}

/// The applied result of a confirmed picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Confirmed {
    /// The alarm has been updated in the scheduler
    Alarm(AlarmKind, AlarmTime),
    /// The clock must be set to this time by the owner of the clock. `None` when the selection
    /// was left as opened, the clock keeps running untouched then.
    Clock(Option<AlarmTime>),
}

/// Hour and minute selection for one target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimePicker {
    /// What is being edited
    target: PickerTarget,
    /// The current selection
    selection: AlarmTime,
    /// The value the picker was opened on
    opened: AlarmTime,
}

impl TimePicker {
    /// Opens the picker on an alarm, starting from its configured time.
    pub const fn open_alarm(kind: AlarmKind, scheduler: &AlarmScheduler) -> Self {
        let current = scheduler.alarm_time(kind);
        Self {
            target: PickerTarget::Alarm(kind),
            selection: current,
            opened: current,
        }
    }

    /// Opens the picker on the wall clock, starting from `current`.
    pub const fn open_clock(current: AlarmTime) -> Self {
        Self {
            target: PickerTarget::Clock,
            selection: current,
            opened: current,
        }
    }

    /// What is being edited
    pub const fn target(&self) -> PickerTarget {
        self.target
    }

    /// The current selection
    pub const fn selection(&self) -> AlarmTime {
        self.selection
    }

    /// Whether the selection differs from the value the picker was opened on
    pub fn is_changed(&self) -> bool {
        self.selection != self.opened
    }

    /// Selects an hour from the hour selector.
    pub fn select_hour(&mut self, hour: u8) -> Result<(), Error> {
        self.selection = AlarmTime::new(hour, self.selection.minute())?;
        Ok(())
    }

    /// Selects a minute from the minute selector.
    pub fn select_minute(&mut self, minute: u8) -> Result<(), Error> {
        self.selection = AlarmTime::new(self.selection.hour(), minute)?;
        Ok(())
    }

    /// Steps the hour forward, 23 wraps to 0.
    pub const fn increment_hour(&mut self) {
        self.selection = self.selection.next_hour();
    }

    /// Steps the minute forward, 59 wraps to 0.
    pub const fn increment_minute(&mut self) {
        self.selection = self.selection.next_minute();
    }

    /// Applies the selection. Alarm targets are written to `scheduler`, which re-arms them. The
    /// clock target only hands out a new time if the selection was changed, so confirming an
    /// untouched clock does not set it back to the minute the picker was opened on.
    pub fn confirm(self, scheduler: &mut AlarmScheduler) -> Confirmed {
        match self.target {
            PickerTarget::Alarm(kind) => {
                scheduler.set_alarm(kind, self.selection);
                Confirmed::Alarm(kind, self.selection)
            }
            PickerTarget::Clock => Confirmed::Clock(self.is_changed().then_some(self.selection)),
        }
    }
}
