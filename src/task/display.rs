//! # Display task
//! This module contains the task that displays information on the OLED display.
//!
//! The orchestrator signals a snapshot of the panel after every change, the task draws it and
//! flushes the buffer to the display.
use crate::{DisplayResources, Irqs};
use blind_alarm::config::DISPLAY_I2C_FREQUENCY;
use blind_alarm::panel::{OperationMode, PanelView};
use blind_alarm::{AlarmKind, AlarmTime};
use core::fmt::Write;
use defmt::{Debug2Format, error, info};
use embassy_rp::i2c::{Config, I2c};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embedded_graphics::{
    mono_font::{
        MonoTextStyle,
        ascii::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use heapless::String;
use ssd1306_async::{I2CDisplayInterface, Ssd1306, prelude::*};

/// Signal carrying the next frame for the display
static DISPLAY_SIGNAL: Signal<CriticalSectionRawMutex, PanelView> = Signal::new();

/// Hands a new frame to the display task, an undrawn older frame is replaced
pub fn signal_display_update(view: PanelView) {
    DISPLAY_SIGNAL.signal(view);
}

/// Capacity of one line of text on the display
const LINE_CAPACITY: usize = 24;

/// Position of the headline
const HEADLINE_POSITION: Point = Point::new(0, 0);
/// Position of the large time
const TIME_POSITION: Point = Point::new(0, 14);
/// Position of the first small line below the time
const FIRST_LINE_POSITION: Point = Point::new(0, 38);
/// Position of the second small line below the time
const SECOND_LINE_POSITION: Point = Point::new(0, 50);

#[embassy_executor::task]
pub async fn display(r: DisplayResources) {
    info!("Display task started");

    let mut config = Config::default();
    config.frequency = DISPLAY_I2C_FREQUENCY;
    let i2c = I2c::new_async(r.i2c0, r.scl, r.sda, Irqs, config);

    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if let Err(e) = display.init().await {
        error!("Failed to initialize display: {}", Debug2Format(&e));
        return;
    }

    loop {
        let view = DISPLAY_SIGNAL.wait().await;

        // nothing is sent to the display before flush()
        display.clear();
        if let Err(e) = draw_view(&mut display, &view) {
            error!("Failed to draw frame: {}", Debug2Format(&e));
            continue;
        }
        if let Err(e) = display.flush().await {
            error!("Failed to flush display: {}", Debug2Format(&e));
        }
    }
}

/// Draws one frame of the panel onto `target`.
fn draw_view<D>(target: &mut D, view: &PanelView) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let small = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let large = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);

    let mut headline: String<LINE_CAPACITY> = String::new();
    let mut time: String<LINE_CAPACITY> = String::new();
    let mut first: String<LINE_CAPACITY> = String::new();
    let mut second: String<LINE_CAPACITY> = String::new();

    // a line that does not fit is cut short, which is all we can do on this screen
    match view.mode {
        OperationMode::Clock => {
            let _ = write!(headline, "Blinds {}%", view.brightness);
            match view.clock {
                Some(clock) => {
                    let _ = time.push_str(&clock.to_display());
                }
                None => {
                    let _ = time.push_str("--:--");
                }
            }
            let _ = write_alarm(&mut first, AlarmKind::Sleep, view.sleep_alarm);
            let _ = write_alarm(&mut second, AlarmKind::Wake, view.wake_alarm);
        }
        OperationMode::SetAlarm(kind) => {
            let _ = write!(headline, "Set {} alarm", kind.label());
            write_selection(&mut time, &mut first, view.selection);
        }
        OperationMode::SetClock => {
            let _ = headline.push_str("Set clock");
            write_selection(&mut time, &mut first, view.selection);
        }
        OperationMode::Ringing => {
            let kind = view.ringing.unwrap_or(AlarmKind::Wake);
            let _ = write!(headline, "{} alarm", kind.label());
            let ringing_at = match kind {
                AlarmKind::Sleep => view.sleep_alarm,
                AlarmKind::Wake => view.wake_alarm,
            };
            let _ = time.push_str(&ringing_at.to_ringing_clock());
            let _ = first.push_str("Wake up");
            let _ = second.push_str("Any button to dismiss");
        }
    }

    Text::with_baseline(&headline, HEADLINE_POSITION, small, Baseline::Top).draw(target)?;
    Text::with_baseline(&time, TIME_POSITION, large, Baseline::Top).draw(target)?;
    Text::with_baseline(&first, FIRST_LINE_POSITION, small, Baseline::Top).draw(target)?;
    Text::with_baseline(&second, SECOND_LINE_POSITION, small, Baseline::Top).draw(target)?;
    Ok(())
}

/// Writes "Wake  7:30 AM" style lines
fn write_alarm(
    line: &mut String<LINE_CAPACITY>,
    kind: AlarmKind,
    time: AlarmTime,
) -> core::fmt::Result {
    write!(line, "{:<6}{}", kind.label(), time)
}

/// Writes the picker selection and the button hint
fn write_selection(
    time: &mut String<LINE_CAPACITY>,
    hint: &mut String<LINE_CAPACITY>,
    selection: Option<AlarmTime>,
) {
    if let Some(selection) = selection {
        let _ = time.push_str(&selection.to_display());
    }
    let _ = hint.push_str("G hour Y min B ok");
}
