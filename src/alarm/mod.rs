//! The alarm core: time-of-day values and the scheduler that fires the alarms.
pub mod scheduler;
pub mod time;

pub use scheduler::{AlarmKind, AlarmScheduler, ReArm, SchedulerEvent};
pub use time::{AlarmTime, Meridiem, Timestamp};
