//! # Clock task
//! Owns the RTC. Sends a tick with the current time once per second and applies the time set on the
//! panel.
use crate::RtcResources;
use crate::event::{Event, send_event};
use blind_alarm::config::TICK_PERIOD_SECS;
use blind_alarm::{AlarmTime, Timestamp};
use defmt::{Debug2Format, info, warn};
use embassy_futures::select::{Either, select};
use embassy_rp::rtc::{DateTime, DayOfWeek, Rtc};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};

/// Signal for a new time of day, set on the panel
static CLOCK_SET_SIGNAL: Signal<CriticalSectionRawMutex, AlarmTime> = Signal::new();

/// Signals the clock task to set the RTC to `time`, seconds start at zero
pub fn signal_clock_set(time: AlarmTime) {
    CLOCK_SET_SIGNAL.signal(time);
}

/// The RTC starts from this date after power loss, until the clock is set on the panel
const POWER_ON_DATETIME: DateTime = DateTime {
    year: 2024,
    month: 1,
    day: 1,
    day_of_week: DayOfWeek::Monday,
    hour: 0,
    minute: 0,
    second: 0,
};

/// Converts an RTC reading into the timestamp the scheduler consumes
const fn to_timestamp(dt: &DateTime) -> Timestamp {
    Timestamp::new(dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second)
}

#[embassy_executor::task]
pub async fn clock(r: RtcResources) {
    info!("Clock task started");
    let mut rtc = Rtc::new(r.rtc);

    if !rtc.is_running() {
        info!("RTC not running, starting it at the power-on date");
        if let Err(e) = rtc.set_datetime(POWER_ON_DATETIME) {
            warn!("Failed to start RTC: {:?}", Debug2Format(&e));
        }
    }

    let mut ticker = Ticker::every(Duration::from_secs(TICK_PERIOD_SECS));
    loop {
        match select(ticker.next(), CLOCK_SET_SIGNAL.wait()).await {
            Either::First(()) => {
                // an unreadable RTC is passed on as an invalid timestamp, the scheduler skips it
                let now = match rtc.now() {
                    Ok(dt) => to_timestamp(&dt),
                    Err(e) => {
                        warn!("RTC not running: {:?}", Debug2Format(&e));
                        Timestamp::new(0, 0, 0, 0, 0, 0)
                    }
                };
                send_event(Event::Tick(now)).await;
            }
            Either::Second(time) => {
                let mut dt = rtc.now().unwrap_or(POWER_ON_DATETIME);
                dt.hour = time.hour();
                dt.minute = time.minute();
                dt.second = 0;
                match rtc.set_datetime(dt) {
                    Ok(()) => info!("Clock set to {}", time),
                    Err(e) => warn!("Failed to set RTC: {:?}", Debug2Format(&e)),
                }
                ticker.reset();
            }
        }
    }
}
