//! # Alarm scheduler
//! Decides on every clock tick whether an alarm fires, exactly once per occurrence.
//!
//! The scheduler owns the sleep and the wake alarm. Each alarm runs through
//!
//! ```text
//! Idle -> Firing -> Suppressed (triggered, time still matches) -> Idle
//! ```
//!
//! where the way back to `Idle` is either the re-arm rule ([`ReArm`]) once the clock has left the
//! alarm minute, or a new alarm time being set. Only the wake alarm fires; the sleep alarm keeps
//! its flag bookkeeping but raises nothing.

use crate::alarm::time::{AlarmTime, Timestamp};
use crate::config::{PRE_ALARM_LEAD_MINUTES, REARM_SECOND};
use crate::error::Error;

/// The two alarms of the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmKind {
    /// Time to go to bed
    Sleep,
    /// Time to get up
    Wake,
}

impl AlarmKind {
    /// Slot of this kind in the scheduler's alarm table.
    const fn index(self) -> usize {
        match self {
            Self::Sleep => 0,
            Self::Wake => 1,
        }
    }

    /// Short label for the display.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sleep => "Sleep",
            Self::Wake => "Wake",
        }
    }
}

/// When the triggered flags are cleared after the clock leaves the alarm minute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReArm {
    /// Clear on a tick sampled at second 1 of a minute. A tick source that skips that second
    /// delays re-arming by a whole minute.
    SecondOne,
    /// Clear on the first tick whose minute differs from the previous tick's, whatever its second.
    #[default]
    MinuteChange,
}

/// What a tick produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerEvent {
    /// The alarm time has been reached, ring.
    Fire(AlarmKind),
    /// The alarm is [`PRE_ALARM_LEAD_MINUTES`] away. Advisory only, does not arm anything.
    PreAlarm(AlarmKind),
}

/// Per-alarm record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct AlarmState {
    /// The configured time of day
    time: AlarmTime,
    /// Set when the alarm fired in the current occurrence
    triggered: bool,
}

impl AlarmState {
    /// A fresh, untriggered alarm at `time`.
    const fn new(time: AlarmTime) -> Self {
        Self {
            time,
            triggered: false,
        }
    }
}

/// Owns both alarms and evaluates them against the clock.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmScheduler {
    /// Indexed by [`AlarmKind::index`]
    alarms: [AlarmState; 2],
    /// Flag reset policy
    rearm: ReArm,
    /// Minute of day seen on the previous valid tick
    last_minute: Option<u16>,
    /// Minute of day in which the pre-alarm was last raised
    pre_alarm_minute: Option<u16>,
}

impl Default for AlarmScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl AlarmScheduler {
    /// Create a new `AlarmScheduler` with the default alarm times and minute-change re-arming.
    pub const fn new() -> Self {
        Self::with_rearm(ReArm::MinuteChange)
    }

    /// Create a new `AlarmScheduler` with the default alarm times and the given re-arm policy.
    pub const fn with_rearm(rearm: ReArm) -> Self {
        Self {
            alarms: [
                AlarmState::new(AlarmTime::DEFAULT_SLEEP),
                AlarmState::new(AlarmTime::DEFAULT_WAKE),
            ],
            rearm,
            last_minute: None,
            pre_alarm_minute: None,
        }
    }

    /// The re-arm policy in use
    pub const fn rearm(&self) -> ReArm {
        self.rearm
    }

    /// The configured time of one alarm
    pub const fn alarm_time(&self, kind: AlarmKind) -> AlarmTime {
        self.alarms[kind.index()].time
    }

    /// Whether one alarm has fired and not been re-armed yet
    pub const fn is_triggered(&self, kind: AlarmKind) -> bool {
        self.alarms[kind.index()].triggered
    }

    /// Validates `hour` and `minute` and stores them as the new time of `kind`.
    ///
    /// On error nothing changes.
    pub fn set_alarm_time(&mut self, kind: AlarmKind, hour: u8, minute: u8) -> Result<(), Error> {
        let time = AlarmTime::new(hour, minute).inspect_err(|e| {
            warn!("rejected {} alarm time: {}", kind, e);
        })?;
        self.set_alarm(kind, time);
        Ok(())
    }

    /// Stores a new time for `kind` and re-arms it immediately, whatever the current second.
    pub fn set_alarm(&mut self, kind: AlarmKind, time: AlarmTime) {
        let alarm = &mut self.alarms[kind.index()];
        alarm.time = time;
        alarm.triggered = false;
        if kind == AlarmKind::Wake {
            self.pre_alarm_minute = None;
        }
        info!("{} alarm set to {}:{}", kind, time.hour(), time.minute());
    }

    /// Evaluates one clock tick. A malformed timestamp is logged and treated as a tick on which
    /// nothing matches; the scheduler state is left untouched.
    pub fn on_tick(&mut self, now: &Timestamp) -> Option<SchedulerEvent> {
        match self.try_tick(now) {
            Ok(event) => event,
            Err(e) => {
                warn!("tick skipped: {}", e);
                None
            }
        }
    }

    /// Evaluates one clock tick, returning an error for a malformed timestamp.
    pub fn try_tick(&mut self, now: &Timestamp) -> Result<Option<SchedulerEvent>, Error> {
        let current = now.time_of_day()?;
        let event = self.check_wake(current);
        self.rearm_flags(current, now.second);
        self.last_minute = Some(current.minute_of_day());
        Ok(event)
    }

    /// Firing and pre-alarm logic of the wake alarm.
    fn check_wake(&mut self, current: AlarmTime) -> Option<SchedulerEvent> {
        let minute = current.minute_of_day();
        if self.pre_alarm_minute != Some(minute) {
            self.pre_alarm_minute = None;
        }

        let wake = &mut self.alarms[AlarmKind::Wake.index()];
        if current == wake.time {
            if wake.triggered {
                // already rang in this minute
                return None;
            }
            wake.triggered = true;
            info!("wake alarm fired at {}:{}", current.hour(), current.minute());
            return Some(SchedulerEvent::Fire(AlarmKind::Wake));
        }

        if !wake.triggered
            && self.pre_alarm_minute.is_none()
            && current.minutes_until(wake.time) == PRE_ALARM_LEAD_MINUTES
        {
            self.pre_alarm_minute = Some(minute);
            debug!("pre-alarm, wake in {} minutes", PRE_ALARM_LEAD_MINUTES);
            return Some(SchedulerEvent::PreAlarm(AlarmKind::Wake));
        }
        None
    }

    /// Clears the triggered flag of every alarm the clock has moved away from, if the re-arm
    /// policy says this tick is the one to do it on.
    fn rearm_flags(&mut self, current: AlarmTime, second: u8) {
        let due = match self.rearm {
            ReArm::SecondOne => second == REARM_SECOND,
            ReArm::MinuteChange => self.last_minute != Some(current.minute_of_day()),
        };
        if !due {
            return;
        }
        for alarm in &mut self.alarms {
            if alarm.time != current && alarm.triggered {
                alarm.triggered = false;
                debug!("re-armed alarm at {}:{}", alarm.time.hour(), alarm.time.minute());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimeParseError;

    fn at(day: u8, hour: u8, minute: u8, second: u8) -> Timestamp {
        Timestamp::new(2024, 6, day, hour, minute, second)
    }

    fn compat() -> AlarmScheduler {
        AlarmScheduler::with_rearm(ReArm::SecondOne)
    }

    #[test]
    fn defaults() {
        let scheduler = AlarmScheduler::new();
        assert_eq!(scheduler.alarm_time(AlarmKind::Sleep).to_display(), "11:50 PM");
        assert_eq!(scheduler.alarm_time(AlarmKind::Wake).to_display(), "7:30 AM");
        assert!(!scheduler.is_triggered(AlarmKind::Sleep));
        assert!(!scheduler.is_triggered(AlarmKind::Wake));
        assert_eq!(scheduler.rearm(), ReArm::MinuteChange);
    }

    #[test]
    fn wake_fires_once_per_minute() {
        let mut scheduler = compat();
        assert_eq!(
            scheduler.on_tick(&at(1, 7, 30, 0)),
            Some(SchedulerEvent::Fire(AlarmKind::Wake))
        );
        assert!(scheduler.is_triggered(AlarmKind::Wake));
        assert_eq!(scheduler.on_tick(&at(1, 7, 30, 30)), None);
        assert!(scheduler.is_triggered(AlarmKind::Wake));
    }

    #[test]
    fn tick_at_second_one_inside_the_alarm_minute_keeps_the_flag() {
        let mut scheduler = compat();
        scheduler.on_tick(&at(1, 7, 30, 0));
        assert_eq!(scheduler.on_tick(&at(1, 7, 30, 1)), None);
        assert!(scheduler.is_triggered(AlarmKind::Wake));
    }

    #[test]
    fn pre_alarm_five_minutes_ahead() {
        let mut scheduler = compat();
        assert_eq!(
            scheduler.on_tick(&at(1, 7, 25, 0)),
            Some(SchedulerEvent::PreAlarm(AlarmKind::Wake))
        );
        assert!(!scheduler.is_triggered(AlarmKind::Wake));
        // raised once per pre-alarm minute
        assert_eq!(scheduler.on_tick(&at(1, 7, 25, 1)), None);
        assert_eq!(scheduler.on_tick(&at(1, 7, 26, 0)), None);
        // and does not stand in the way of the alarm itself
        assert_eq!(
            scheduler.on_tick(&at(1, 7, 30, 0)),
            Some(SchedulerEvent::Fire(AlarmKind::Wake))
        );
    }

    #[test]
    fn pre_alarm_across_midnight() {
        let mut scheduler = AlarmScheduler::new();
        scheduler.set_alarm_time(AlarmKind::Wake, 0, 2).unwrap();
        assert_eq!(
            scheduler.on_tick(&at(1, 23, 57, 10)),
            Some(SchedulerEvent::PreAlarm(AlarmKind::Wake))
        );
    }

    #[test]
    fn pre_alarm_not_raised_while_triggered() {
        let mut scheduler = compat();
        scheduler.set_alarm_time(AlarmKind::Wake, 7, 30).unwrap();
        scheduler.alarms[AlarmKind::Wake.index()].triggered = true;
        assert_eq!(scheduler.on_tick(&at(1, 7, 25, 0)), None);
    }

    #[test]
    fn compat_rearms_at_second_one_and_fires_next_day() {
        let mut scheduler = compat();
        scheduler.on_tick(&at(1, 7, 30, 0));
        // no tick at second 1 yet, so the flag stays
        scheduler.on_tick(&at(1, 7, 31, 0));
        assert!(scheduler.is_triggered(AlarmKind::Wake));
        scheduler.on_tick(&at(1, 7, 31, 1));
        assert!(!scheduler.is_triggered(AlarmKind::Wake));
        assert_eq!(
            scheduler.on_tick(&at(2, 7, 30, 0)),
            Some(SchedulerEvent::Fire(AlarmKind::Wake))
        );
    }

    #[test]
    fn compat_misses_rearm_when_second_one_is_skipped() {
        let mut scheduler = compat();
        scheduler.on_tick(&at(1, 7, 30, 0));
        scheduler.on_tick(&at(1, 7, 31, 0));
        scheduler.on_tick(&at(1, 7, 31, 2));
        assert!(scheduler.is_triggered(AlarmKind::Wake));
        scheduler.on_tick(&at(1, 7, 32, 1));
        assert!(!scheduler.is_triggered(AlarmKind::Wake));
    }

    #[test]
    fn minute_change_rearms_without_second_one() {
        let mut scheduler = AlarmScheduler::new();
        scheduler.on_tick(&at(1, 7, 30, 0));
        assert!(scheduler.is_triggered(AlarmKind::Wake));
        scheduler.on_tick(&at(1, 7, 30, 59));
        assert!(scheduler.is_triggered(AlarmKind::Wake));
        scheduler.on_tick(&at(1, 7, 31, 3));
        assert!(!scheduler.is_triggered(AlarmKind::Wake));
        assert_eq!(
            scheduler.on_tick(&at(2, 7, 30, 4)),
            Some(SchedulerEvent::Fire(AlarmKind::Wake))
        );
    }

    #[test]
    fn set_alarm_time_rearms_mid_minute() {
        let mut scheduler = compat();
        scheduler.on_tick(&at(1, 7, 30, 0));
        assert!(scheduler.is_triggered(AlarmKind::Wake));
        scheduler.on_tick(&at(1, 7, 30, 45));
        scheduler.set_alarm_time(AlarmKind::Wake, 8, 0).unwrap();
        assert!(!scheduler.is_triggered(AlarmKind::Wake));
        assert_eq!(scheduler.alarm_time(AlarmKind::Wake), AlarmTime::new(8, 0).unwrap());
    }

    #[test]
    fn setting_the_same_minute_again_rings_again() {
        let mut scheduler = compat();
        scheduler.on_tick(&at(1, 7, 30, 0));
        scheduler.set_alarm_time(AlarmKind::Wake, 7, 30).unwrap();
        assert_eq!(
            scheduler.on_tick(&at(1, 7, 30, 10)),
            Some(SchedulerEvent::Fire(AlarmKind::Wake))
        );
    }

    #[test]
    fn invalid_alarm_time_leaves_state_unchanged() {
        let mut scheduler = compat();
        scheduler.on_tick(&at(1, 7, 30, 0));
        let before = scheduler.clone();
        assert_eq!(
            scheduler.set_alarm_time(AlarmKind::Wake, 24, 0),
            Err(Error::InvalidTime { hour: 24, minute: 0 })
        );
        assert_eq!(
            scheduler.set_alarm_time(AlarmKind::Sleep, 10, 60),
            Err(Error::InvalidTime { hour: 10, minute: 60 })
        );
        assert_eq!(scheduler, before);
    }

    #[test]
    fn sleep_alarm_never_fires() {
        let mut scheduler = compat();
        assert_eq!(scheduler.on_tick(&at(1, 23, 45, 0)), None);
        assert_eq!(scheduler.on_tick(&at(1, 23, 50, 0)), None);
        assert!(!scheduler.is_triggered(AlarmKind::Sleep));
    }

    #[test]
    fn malformed_tick_fails_closed() {
        let mut scheduler = compat();
        scheduler.on_tick(&at(1, 7, 30, 0));
        let before = scheduler.clone();
        let broken = Timestamp::new(0, 0, 0, 0, 0, 1);
        assert_eq!(
            scheduler.try_tick(&broken),
            Err(Error::TimeParse(TimeParseError::Month))
        );
        assert_eq!(scheduler.on_tick(&broken), None);
        assert_eq!(scheduler, before);
        assert_eq!(scheduler.on_tick(&at(1, 25, 0, 1)), None);
        assert!(scheduler.is_triggered(AlarmKind::Wake));
    }

    #[test]
    fn wake_alarm_at_midnight() {
        let mut scheduler = AlarmScheduler::new();
        scheduler.set_alarm_time(AlarmKind::Wake, 0, 0).unwrap();
        assert_eq!(
            scheduler.on_tick(&at(1, 0, 0, 0)),
            Some(SchedulerEvent::Fire(AlarmKind::Wake))
        );
    }
}
