//! Session command handlers.

mod cancel_session;
mod schedule_session;

pub use cancel_session::{CancelSessionCommand, CancelSessionHandler, CancelSessionResult};
pub use schedule_session::{
    ScheduleSessionCommand, ScheduleSessionHandler, ScheduleSessionResult,
};
