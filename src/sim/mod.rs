pub mod driver;
pub mod metrics;
pub mod process;
pub mod schedule;
pub mod workload;

pub use driver::{Algorithm, Sim, schedule, validate};
pub use metrics::{Metrics, ProcessStats, completion_time};
pub use process::{ParseProcessError, Pid, Priority, Process, ProcessSet, Segment};
pub use schedule::Schedule;
pub use workload::{WorkloadConfig, bernoulli_processes};
