//! Firmware for the Raspberry Pi Pico: a clock with a sleep and a wake alarm that drives the blinds.
// we are in an environment with constrained resources, so we do not use the standard library and we define a different entry point.
#![no_std]
#![no_main]

use crate::task::{
    buttons::button_handler, clock::clock, display::display, orchestrate::orchestrator,
    sleep_poll::sleep_poll,
};
use assign_resources::assign_resources;
use blind_alarm::panel::Button;
use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::InterruptHandler as I2cInterruptHandler;
use embassy_rp::peripherals::I2C0;
use embassy_rp::{bind_interrupts, peripherals};
use {defmt_rtt as _, panic_probe as _}; // global logger and panic handler

mod event;
mod task;

// group the peripherals into resources, to be used in the tasks
assign_resources! {
    buttons: ButtonResources {
        green: PIN_20,
        blue: PIN_21,
        yellow: PIN_22,
    },
    rtc: RtcResources {
        rtc: RTC,
    },
    display: DisplayResources {
        scl: PIN_13,
        sda: PIN_12,
        i2c0: I2C0,
    },
}

// bind the interrupts, on a global scope
bind_interrupts!(pub struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Program start");

    // Initialize the peripherals for the RP2040
    let p = embassy_rp::init(Default::default());
    let r = split_resources!(p);

    // the orchestrator owns the panel, start it first so no event is lost
    spawner.must_spawn(orchestrator());

    // buttons are pulled up, a press pulls the pin low
    spawner.must_spawn(button_handler(
        Input::new(r.buttons.green, Pull::Up),
        Button::Green,
    ));
    spawner.must_spawn(button_handler(
        Input::new(r.buttons.blue, Pull::Up),
        Button::Blue,
    ));
    spawner.must_spawn(button_handler(
        Input::new(r.buttons.yellow, Pull::Up),
        Button::Yellow,
    ));

    spawner.must_spawn(clock(r.rtc));
    spawner.must_spawn(display(r.display));
    spawner.must_spawn(sleep_poll());
}
