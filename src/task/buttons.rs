//! # Button Tasks
//! This module contains the tasks for the buttons. Each button has its own task.

use crate::event::{Event, send_event};
use blind_alarm::config::{BUTTON_DEBOUNCE_MS, BUTTON_HOLD_INTERVAL_MS, BUTTON_HOLD_THRESHOLD_MS};
use blind_alarm::panel::Button;
use defmt::info;
use embassy_rp::gpio::{Input, Level};
use embassy_time::{Duration, Instant, Timer, with_deadline};

/// Handles button press and hold, debounced
pub struct ButtonManager<'a> {
    /// The input pin for the button, pulled up, low while pressed
    input: Input<'a>,
    /// The debounce duration
    debounce_duration: Duration,
    /// The button being managed
    button: Button,
    /// The interval between repeated events while held
    hold_event_interval: Duration,
}

impl<'a> ButtonManager<'a> {
    /// Create a new `ButtonManager`
    pub const fn new(input: Input<'a>, button: Button) -> Self {
        Self {
            input,
            debounce_duration: Duration::from_millis(BUTTON_DEBOUNCE_MS),
            button,
            hold_event_interval: Duration::from_millis(BUTTON_HOLD_INTERVAL_MS),
        }
    }

    /// Waits for presses forever. A short press sends one event. Holding a repeating button sends
    /// one event per hold interval, which lets the hour and minute run while the picker is open;
    /// holding any other button sends a single event.
    pub async fn handle_button_press(&mut self) {
        'mainloop: loop {
            // the pin idles high, a press pulls it low
            if self.debounce().await != Level::Low {
                continue 'mainloop;
            }

            let released = with_deadline(
                Instant::now() + Duration::from_millis(BUTTON_HOLD_THRESHOLD_MS),
                self.debounce(),
            )
            .await;

            if let Ok(level) = released {
                if level == Level::High {
                    send_event(Event::Button(self.button)).await;
                }
                continue 'mainloop;
            }

            // held
            if !self.button.repeats() {
                send_event(Event::Button(self.button)).await;
                while self.input.get_level() == Level::Low
                    && self.debounce().await != Level::High
                {}
                continue 'mainloop;
            }
            loop {
                let edge = with_deadline(
                    Instant::now() + self.hold_event_interval,
                    self.input.wait_for_any_edge(),
                )
                .await;

                if edge.is_ok() || self.input.get_level() == Level::High {
                    continue 'mainloop;
                }
                send_event(Event::Button(self.button)).await;
            }
        }
    }

    /// Waits until the level changed and stayed changed for the debounce duration, then returns
    /// the new level.
    pub async fn debounce(&mut self) -> Level {
        loop {
            let l1 = self.input.get_level();

            self.input.wait_for_any_edge().await;

            Timer::after(self.debounce_duration).await;

            let l2 = self.input.get_level();
            if l1 != l2 {
                break l2;
            }
        }
    }
}

/// One instance per button.
#[embassy_executor::task(pool_size = 3)]
pub async fn button_handler(input: Input<'static>, button: Button) {
    let mut btn = ButtonManager::new(input, button);
    info!("{} button task started", button);
    btn.handle_button_press().await;
}
