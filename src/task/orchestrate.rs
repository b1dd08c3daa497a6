//! # Orchestrate Tasks
//! Task to orchestrate the state transitions of the system.
use crate::event::{Event, receive_event};
use crate::task::{clock::signal_clock_set, display::signal_display_update};
use blind_alarm::AlarmScheduler;
use blind_alarm::blinds::{BlindController, NoSensor, NoopBlind, SleepDetector};
use blind_alarm::panel::{Panel, PanelAction};
use defmt::{info, warn};

/// This task is responsible for the state transitions of the system. It acts as the main task of the system.
/// It owns the panel and receives events from the other tasks one at a time, so the alarms are never
/// changed from two places at once.
#[embassy_executor::task]
pub async fn orchestrator() {
    info!("Orchestrate task starting");
    let mut panel = Panel::new(AlarmScheduler::new(), NoopBlind);
    // this board has no sleep sensor
    let mut detector = NoSensor;
    signal_display_update(panel.view());

    loop {
        // receive the events, halting the task until an event is received
        let event = receive_event().await;
        handle_event(event, &mut panel, &mut detector);
    }
}

/// Handles a single event by updating the panel and signaling appropriate tasks.
fn handle_event<B: BlindController>(
    event: Event,
    panel: &mut Panel<B>,
    detector: &mut impl SleepDetector,
) {
    match event {
        Event::Tick(now) => {
            let outcome = panel.tick(&now);
            if let Some(presented) = outcome.presented {
                if let Some(replaced) = presented.replaced {
                    info!("Taking down ringing notification {}", replaced);
                }
                info!("Ringing for the {} alarm", presented.kind);
            }
            signal_display_update(panel.view());
        }
        Event::Button(button) => {
            info!("{} button pressed", button);
            if let PanelAction::SetClock(time) = panel.press(button) {
                signal_clock_set(time);
            }
            signal_display_update(panel.view());
        }
        Event::SleepPoll => match panel.poll_sleep(detector) {
            Ok(reading) => info!("Sleep reading: {}", reading),
            Err(e) => warn!("No sleep reading: {}", e),
        },
    }
}
