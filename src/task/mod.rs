//! Tasks that make up the firmware.
pub mod buttons;
pub mod clock;
pub mod display;
pub mod orchestrate;
pub mod sleep_poll;
