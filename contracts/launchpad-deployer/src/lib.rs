pub mod contract;
pub mod environment;
mod error;
pub mod msg;
pub mod schedule;
pub mod sequencer;
pub mod state;

pub use crate::error::{ContractError, ScheduleError};
