pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use error::{InputError, SchedError};
pub use scheduler::Scheduler;
pub use sim::{Algorithm, Process, ProcessSet, Schedule, Segment, schedule};
