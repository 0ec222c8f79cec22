use std::ops::RangeInclusive;

use rand::prelude::*;

use super::process::{Pid, Priority, Process, ProcessSet};
use crate::core::state::Ticks;

/// Parameters for a synthetic workload: on every tick in `0..ticks` a
/// process arrives with probability `p_arrival`, and its burst is
/// `short_burst` with probability `p_short`, `long_burst` otherwise.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_burst: Ticks,
    pub long_burst: Ticks,
    // Must not be empty
    pub priorities: RangeInclusive<Priority>,
    pub seed: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            ticks: 100,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
            priorities: 0..=4,
            seed: 0,
        }
    }
}

/// Seeded, so the same config always yields the same set. Pids are assigned
/// in arrival order starting at 1.
pub fn bernoulli_processes(config: &WorkloadConfig) -> ProcessSet {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut processes = ProcessSet::new();

    for t in 0..config.ticks {
        if rng.random::<f64>() < config.p_arrival {
            let burst_time = if rng.random::<f64>() < config.p_short {
                config.short_burst
            } else {
                config.long_burst
            };
            let priority = rng.random_range(config.priorities.clone());

            processes.push(Process::with_priority(
                processes.len() as Pid + 1,
                t,
                burst_time,
                priority,
            ));
        }
    }

    processes
}
