//! Events and system channel for sending and receiving events.
//!
//! Everything that changes the clock state goes through this one channel, so the orchestrator
//! handles ticks, button presses and sleep polls strictly one after the other.

use blind_alarm::Timestamp;
use blind_alarm::panel::Button;
use defmt::Format;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// System event channel for sending and receiving events
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, Event, EVENT_CHANNEL_CAPACITY> =
    Channel::new();

/// The capacity of the event channel
const EVENT_CHANNEL_CAPACITY: usize = 10;

/// Sends an event to the system channel
pub async fn send_event(event: Event) {
    EVENT_CHANNEL.sender().send(event).await;
}

/// Receives the next event from the system channel
pub async fn receive_event() -> Event {
    EVENT_CHANNEL.receiver().receive().await
}

/// The event type used in the system, representing various system events
#[derive(PartialEq, Eq, Debug, Format, Clone, Copy)]
pub enum Event {
    /// A button was pressed, or is being held
    Button(Button),
    /// The clock ticked, the data is the RTC reading
    Tick(Timestamp),
    /// Time for a sleep detection round
    SleepPoll,
}
