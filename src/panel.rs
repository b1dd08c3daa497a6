//! # Control panel
//! The state of the whole alarm clock and the operations that can be performed on it.
//!
//! A `Panel` owns the scheduler together with everything that sits around it on the device: the
//! time picker, the ringing slot, the brightness target and the blind controller. It is fed clock
//! ticks, button presses and sleep readings, all from the same caller, and hands back what the
//! caller has to do next (redraw, set the clock).

use crate::alarm::{AlarmKind, AlarmScheduler, AlarmTime, SchedulerEvent, Timestamp};
use crate::blinds::{BlindController, Brightness, SleepDetector, SleepMonitor, SleepReading};
use crate::error::Error;
use crate::picker::{Confirmed, TimePicker};
use crate::ringing::{NotificationId, Presented, RingingSlot};

/// The buttons of the clock
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Green button
    Green,
    /// Blue button
    Blue,
    /// Yellow button
    Yellow,
}

impl Button {
    /// Whether holding the button repeats the press. Green and yellow step values and repeat;
    /// blue confirms and acts once per press, so a long press cannot run through several screens.
    pub const fn repeats(self) -> bool {
        match self {
            Self::Green | Self::Yellow => true,
            Self::Blue => false,
        }
    }
}

/// The operation mode of the clock
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperationMode {
    /// The regular operation mode.
    ///
    /// Displays the time and both alarms. Green and yellow move the brightness target, blue
    /// starts editing the alarms.
    Clock,
    /// Editing an alarm time. Green steps the hour, yellow the minute, blue confirms.
    SetAlarm(AlarmKind),
    /// Editing the wall clock, with the same buttons as for the alarms.
    SetClock,
    /// An alarm is ringing. Any button dismisses it.
    Ringing,
}

/// What the caller has to do after a button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelAction {
    /// Redraw the display
    Redraw,
    /// Set the wall clock to this time of day, then redraw
    SetClock(AlarmTime),
}

/// What a clock tick caused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// Event from the scheduler, if any
    pub event: Option<SchedulerEvent>,
    /// Ringing notification put on screen by this tick
    pub presented: Option<Presented>,
}

/// Everything the display needs to draw one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelView {
    /// Current operation mode
    pub mode: OperationMode,
    /// Time of day of the last valid tick
    pub clock: Option<AlarmTime>,
    /// Sleep alarm time
    pub sleep_alarm: AlarmTime,
    /// Wake alarm time
    pub wake_alarm: AlarmTime,
    /// Picker selection while editing
    pub selection: Option<AlarmTime>,
    /// Brightness target in percent
    pub brightness: u8,
    /// Alarm of the ringing notification on screen
    pub ringing: Option<AlarmKind>,
}

/// All the state of the clock is kept in this struct.
pub struct Panel<B: BlindController> {
    /// Current operation mode
    mode: OperationMode,
    /// Mode to go back to once the ringing notification is dismissed
    resume: OperationMode,
    /// The alarms
    scheduler: AlarmScheduler,
    /// Open picker while in `SetAlarm` or `SetClock`
    picker: Option<TimePicker>,
    /// The ringing notification on screen
    ringing: RingingSlot,
    /// Brightness target of the blinds
    brightness: Brightness,
    /// Sleep readings
    sleep: SleepMonitor,
    /// Blind motor controller
    blinds: B,
    /// Time of day of the last valid tick
    clock: Option<AlarmTime>,
}

impl<B: BlindController> Panel<B> {
    /// Create a new `Panel` around a scheduler and a blind controller.
    pub fn new(scheduler: AlarmScheduler, blinds: B) -> Self {
        Self {
            mode: OperationMode::Clock,
            resume: OperationMode::Clock,
            scheduler,
            picker: None,
            ringing: RingingSlot::new(),
            brightness: Brightness::default(),
            sleep: SleepMonitor::new(),
            blinds,
            clock: None,
        }
    }

    /// Current operation mode
    pub const fn mode(&self) -> OperationMode {
        self.mode
    }

    /// The alarms
    pub const fn scheduler(&self) -> &AlarmScheduler {
        &self.scheduler
    }

    /// Open picker, if editing
    pub const fn picker(&self) -> Option<&TimePicker> {
        self.picker.as_ref()
    }

    /// The ringing slot
    pub const fn ringing(&self) -> &RingingSlot {
        &self.ringing
    }

    /// Brightness target in percent
    pub const fn brightness(&self) -> u8 {
        self.brightness.level()
    }

    /// Last valid sleep reading
    pub const fn last_sleep_reading(&self) -> Option<SleepReading> {
        self.sleep.last()
    }

    /// The blind controller
    pub const fn blinds(&self) -> &B {
        &self.blinds
    }

    /// Snapshot for the display
    pub fn view(&self) -> PanelView {
        PanelView {
            mode: self.mode,
            clock: self.clock,
            sleep_alarm: self.scheduler.alarm_time(AlarmKind::Sleep),
            wake_alarm: self.scheduler.alarm_time(AlarmKind::Wake),
            selection: self.picker.map(|p| p.selection()),
            brightness: self.brightness.level(),
            ringing: self.ringing.active(),
        }
    }

    /// Feeds one clock tick to the scheduler and reacts to what it reports.
    pub fn tick(&mut self, now: &Timestamp) -> TickOutcome {
        if let Ok(time) = now.time_of_day() {
            self.clock = Some(time);
        }

        let event = self.scheduler.on_tick(now);
        let presented = match event {
            Some(SchedulerEvent::Fire(kind)) => Some(self.ring(kind)),
            Some(SchedulerEvent::PreAlarm(kind)) => {
                self.blinds.pre_wake(kind);
                None
            }
            None => None,
        };
        TickOutcome { event, presented }
    }

    /// Runs one sleep detection round and forwards the reading to the blinds.
    pub fn poll_sleep(
        &mut self,
        detector: &mut impl SleepDetector,
    ) -> Result<SleepReading, Error> {
        self.sleep.poll(detector, &mut self.blinds)
    }

    /// The notification `id` was closed from outside, e.g. by a timeout of the display.
    pub fn dismiss(&mut self, id: NotificationId) {
        if self.ringing.dismissed(id) && self.mode == OperationMode::Ringing {
            self.mode = self.resume;
        }
    }

    /// Handle state changes when a button is pressed
    pub fn press(&mut self, button: Button) -> PanelAction {
        match self.mode {
            OperationMode::Clock => self.press_in_clock(button),
            OperationMode::SetAlarm(_) | OperationMode::SetClock => self.press_in_picker(button),
            OperationMode::Ringing => {
                if let Some(id) = self.ringing.active_id() {
                    info!("ringing dismissed by {}", button);
                    self.dismiss(id);
                } else {
                    self.mode = self.resume;
                }
                PanelAction::Redraw
            }
        }
    }

    /// Puts a ringing notification for `kind` on screen, replacing any previous one.
    fn ring(&mut self, kind: AlarmKind) -> Presented {
        let presented = self.ringing.present(kind);
        if let Some(replaced) = presented.replaced {
            debug!("replacing ringing notification {}", replaced);
        }
        if self.mode != OperationMode::Ringing {
            self.resume = self.mode;
            self.mode = OperationMode::Ringing;
        }
        presented
    }

    /// Buttons in the regular operation mode
    fn press_in_clock(&mut self, button: Button) -> PanelAction {
        match button {
            Button::Blue => {
                self.picker = Some(TimePicker::open_alarm(AlarmKind::Wake, &self.scheduler));
                self.mode = OperationMode::SetAlarm(AlarmKind::Wake);
            }
            Button::Green => {
                let level = self.brightness.increase();
                self.blinds.brightness_changed(level);
            }
            Button::Yellow => {
                let level = self.brightness.decrease();
                self.blinds.brightness_changed(level);
            }
        }
        PanelAction::Redraw
    }

    /// Buttons while a picker is open
    fn press_in_picker(&mut self, button: Button) -> PanelAction {
        let Some(mut picker) = self.picker.take() else {
            warn!("picker missing in {}", self.mode);
            self.mode = OperationMode::Clock;
            return PanelAction::Redraw;
        };

        match button {
            Button::Green => picker.increment_hour(),
            Button::Yellow => picker.increment_minute(),
            Button::Blue => return self.confirm(picker),
        }
        self.picker = Some(picker);
        PanelAction::Redraw
    }

    /// Applies the picker and moves on: wake alarm, then sleep alarm, then the clock.
    fn confirm(&mut self, picker: TimePicker) -> PanelAction {
        match picker.confirm(&mut self.scheduler) {
            Confirmed::Alarm(AlarmKind::Wake, _) => {
                self.picker = Some(TimePicker::open_alarm(AlarmKind::Sleep, &self.scheduler));
                self.mode = OperationMode::SetAlarm(AlarmKind::Sleep);
                PanelAction::Redraw
            }
            Confirmed::Alarm(AlarmKind::Sleep, _) => {
                self.picker = Some(TimePicker::open_clock(self.clock.unwrap_or_default()));
                self.mode = OperationMode::SetClock;
                PanelAction::Redraw
            }
            Confirmed::Clock(time) => {
                self.mode = OperationMode::Clock;
                time.map_or(PanelAction::Redraw, PanelAction::SetClock)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::ReArm;
    use crate::blinds::{NoSensor, NoopBlind};

    /// Hands out the given raw readings in order.
    struct Replay(&'static [u8]);

    impl SleepDetector for Replay {
        fn detect(&mut self) -> Result<u8, Error> {
            let readings = self.0;
            let (first, rest) = readings.split_first().ok_or(Error::SensorUnavailable)?;
            self.0 = rest;
            Ok(*first)
        }
    }

    /// Counts the advisory calls.
    #[derive(Default)]
    struct Recorder {
        pre_wake: u32,
        brightness: Option<u8>,
        asleep: u32,
    }

    impl BlindController for Recorder {
        fn sleep_detected(&mut self) {
            self.asleep += 1;
        }
        fn wake_detected(&mut self) {}
        fn pre_wake(&mut self, _kind: AlarmKind) {
            self.pre_wake += 1;
        }
        fn brightness_changed(&mut self, level: u8) {
            self.brightness = Some(level);
        }
    }

    fn at(hour: u8, minute: u8, second: u8) -> Timestamp {
        Timestamp::new(2024, 6, 26, hour, minute, second)
    }

    #[test]
    fn fire_switches_to_ringing_and_any_button_dismisses() {
        let mut panel = Panel::new(AlarmScheduler::new(), NoopBlind);
        let outcome = panel.tick(&at(7, 30, 0));
        assert_eq!(outcome.event, Some(SchedulerEvent::Fire(AlarmKind::Wake)));
        assert!(outcome.presented.is_some());
        assert_eq!(panel.mode(), OperationMode::Ringing);
        assert_eq!(panel.view().ringing, Some(AlarmKind::Wake));

        assert_eq!(panel.press(Button::Yellow), PanelAction::Redraw);
        assert_eq!(panel.mode(), OperationMode::Clock);
        assert_eq!(panel.ringing().active(), None);
        // brightness untouched by the dismissing press
        assert_eq!(panel.brightness(), 50);
    }

    #[test]
    fn external_dismissal_of_a_replaced_notification_keeps_ringing() {
        let mut panel = Panel::new(AlarmScheduler::with_rearm(ReArm::SecondOne), NoopBlind);
        let first = panel.tick(&at(7, 30, 0)).presented.unwrap();
        // move the alarm to the same minute again so it rings a second time
        let mut rescheduled = panel.scheduler().clone();
        rescheduled.set_alarm_time(AlarmKind::Wake, 7, 30).unwrap();
        panel.scheduler = rescheduled;
        let second = panel.tick(&at(7, 30, 5)).presented.unwrap();
        assert_eq!(second.replaced, Some(first.id));

        panel.dismiss(first.id);
        assert_eq!(panel.mode(), OperationMode::Ringing);
        panel.dismiss(second.id);
        assert_eq!(panel.mode(), OperationMode::Clock);
    }

    #[test]
    fn pre_alarm_reaches_the_blinds() {
        let mut panel = Panel::new(AlarmScheduler::new(), Recorder::default());
        let outcome = panel.tick(&at(7, 25, 0));
        assert_eq!(outcome.event, Some(SchedulerEvent::PreAlarm(AlarmKind::Wake)));
        assert_eq!(outcome.presented, None);
        assert_eq!(panel.blinds().pre_wake, 1);
        assert_eq!(panel.mode(), OperationMode::Clock);
    }

    #[test]
    fn brightness_buttons() {
        let mut panel = Panel::new(AlarmScheduler::new(), Recorder::default());
        panel.press(Button::Green);
        assert_eq!(panel.brightness(), 55);
        assert_eq!(panel.blinds().brightness, Some(55));
        panel.press(Button::Yellow);
        panel.press(Button::Yellow);
        assert_eq!(panel.brightness(), 45);
        assert_eq!(panel.blinds().brightness, Some(45));
    }

    #[test]
    fn editing_walks_through_wake_sleep_and_clock() {
        let mut panel = Panel::new(AlarmScheduler::new(), NoopBlind);
        panel.tick(&at(6, 10, 0));

        panel.press(Button::Blue);
        assert_eq!(panel.mode(), OperationMode::SetAlarm(AlarmKind::Wake));
        assert_eq!(panel.view().selection, Some(AlarmTime::DEFAULT_WAKE));
        panel.press(Button::Green);
        panel.press(Button::Yellow);
        panel.press(Button::Blue);
        assert_eq!(
            panel.scheduler().alarm_time(AlarmKind::Wake),
            AlarmTime::new(8, 31).unwrap()
        );

        assert_eq!(panel.mode(), OperationMode::SetAlarm(AlarmKind::Sleep));
        panel.press(Button::Green);
        panel.press(Button::Blue);
        assert_eq!(
            panel.scheduler().alarm_time(AlarmKind::Sleep),
            AlarmTime::new(0, 50).unwrap()
        );

        assert_eq!(panel.mode(), OperationMode::SetClock);
        assert_eq!(panel.view().selection, Some(AlarmTime::new(6, 10).unwrap()));
        panel.press(Button::Yellow);
        assert_eq!(
            panel.press(Button::Blue),
            PanelAction::SetClock(AlarmTime::new(6, 11).unwrap())
        );
        assert_eq!(panel.mode(), OperationMode::Clock);
        assert_eq!(panel.picker(), None);
    }

    #[test]
    fn alarm_while_editing_resumes_the_picker() {
        let mut panel = Panel::new(AlarmScheduler::new(), NoopBlind);
        panel.press(Button::Blue);
        panel.press(Button::Blue);
        assert_eq!(panel.mode(), OperationMode::SetAlarm(AlarmKind::Sleep));

        panel.tick(&at(7, 30, 0));
        assert_eq!(panel.mode(), OperationMode::Ringing);
        panel.press(Button::Green);
        assert_eq!(panel.mode(), OperationMode::SetAlarm(AlarmKind::Sleep));
        assert_eq!(panel.view().selection, Some(AlarmTime::DEFAULT_SLEEP));
    }

    #[test]
    fn malformed_tick_keeps_the_last_clock() {
        let mut panel = Panel::new(AlarmScheduler::new(), NoopBlind);
        panel.tick(&at(6, 0, 0));
        let outcome = panel.tick(&Timestamp::new(2024, 6, 26, 24, 0, 0));
        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(panel.view().clock, Some(AlarmTime::new(6, 0).unwrap()));
    }

    #[test]
    fn sleep_readings() {
        let mut panel = Panel::new(AlarmScheduler::new(), Recorder::default());
        let mut detector = Replay(&[1, 2]);
        assert_eq!(panel.poll_sleep(&mut detector), Ok(SleepReading::Asleep));
        assert_eq!(panel.poll_sleep(&mut detector), Err(Error::InvalidDetection(2)));
        assert_eq!(panel.blinds().asleep, 1);
        assert_eq!(panel.last_sleep_reading(), Some(SleepReading::Asleep));
    }

    #[test]
    fn missing_sensor_changes_nothing() {
        let mut panel = Panel::new(AlarmScheduler::new(), Recorder::default());
        assert_eq!(panel.poll_sleep(&mut NoSensor), Err(Error::SensorUnavailable));
        assert_eq!(panel.blinds().asleep, 0);
        assert_eq!(panel.last_sleep_reading(), None);
    }

    #[test]
    fn leaving_the_clock_untouched_does_not_set_it() {
        let mut panel = Panel::new(AlarmScheduler::new(), NoopBlind);
        panel.tick(&at(6, 10, 0));
        panel.press(Button::Blue);
        panel.press(Button::Blue);
        panel.press(Button::Blue);
        assert_eq!(panel.mode(), OperationMode::SetClock);

        // time passes while the picker is open
        panel.tick(&at(6, 12, 40));
        assert_eq!(panel.press(Button::Blue), PanelAction::Redraw);
        assert_eq!(panel.mode(), OperationMode::Clock);
    }

    #[test]
    fn only_the_step_buttons_repeat_when_held() {
        assert!(Button::Green.repeats());
        assert!(Button::Yellow.repeats());
        assert!(!Button::Blue.repeats());
    }
}
