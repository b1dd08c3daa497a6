//! # Sleep poll task
//! Asks the orchestrator for a sleep detection round every few minutes.
use crate::event::{Event, send_event};
use blind_alarm::config::SLEEP_POLL_INTERVAL_SECS;
use defmt::info;
use embassy_time::{Duration, Ticker};

#[embassy_executor::task]
pub async fn sleep_poll() {
    info!("Sleep poll task started");
    let mut ticker = Ticker::every(Duration::from_secs(SLEEP_POLL_INTERVAL_SECS));
    loop {
        ticker.next().await;
        send_event(Event::SleepPoll).await;
    }
}
