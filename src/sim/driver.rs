use std::fmt;

use log::debug;
use rustc_hash::FxHashSet;

use super::{
    metrics::{checked_completion_time, completion_time},
    process::{ProcessSet, Segment},
    schedule::Schedule,
};
use crate::{
    core::{Observer, SchedCore, state::Ticks},
    error::{InputError, SchedError},
    scheduler::{FcfsScheduler, PriorityScheduler, RoundRobinScheduler, Scheduler, SjfScheduler},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Fcfs,
    SjfPreemptive,
    SjfNonPreemptive,
    PriorityPreemptive,
    PriorityNonPreemptive,
    RoundRobin { quantum: Ticks },
}

impl Algorithm {
    /// Numeric selectors 1..=6, in declaration order. `quantum` is only
    /// consulted for Round-Robin.
    pub fn from_code(code: u8, quantum: Option<Ticks>) -> Result<Self, SchedError> {
        Ok(match code {
            1 => Self::Fcfs,
            2 => Self::SjfPreemptive,
            3 => Self::SjfNonPreemptive,
            4 => Self::PriorityPreemptive,
            5 => Self::PriorityNonPreemptive,
            6 => Self::RoundRobin {
                quantum: quantum.ok_or(InputError::MissingQuantum)?,
            },
            _ => return Err(SchedError::UnsupportedAlgorithm(code.to_string())),
        })
    }

    pub fn parse(name: &str, quantum: Option<Ticks>) -> Result<Self, SchedError> {
        Ok(match name.trim().to_ascii_lowercase().as_str() {
            "fcfs" | "fifo" => Self::Fcfs,
            "srtf" | "sjf-preemptive" => Self::SjfPreemptive,
            "sjf" | "sjf-nonpreemptive" => Self::SjfNonPreemptive,
            "priority-preemptive" => Self::PriorityPreemptive,
            "priority" | "priority-nonpreemptive" => Self::PriorityNonPreemptive,
            "rr" | "round-robin" => Self::RoundRobin {
                quantum: quantum.ok_or(InputError::MissingQuantum)?,
            },
            _ => return Err(SchedError::UnsupportedAlgorithm(name.to_owned())),
        })
    }

    pub fn code(&self) -> u8 {
        match self {
            Self::Fcfs => 1,
            Self::SjfPreemptive => 2,
            Self::SjfNonPreemptive => 3,
            Self::PriorityPreemptive => 4,
            Self::PriorityNonPreemptive => 5,
            Self::RoundRobin { .. } => 6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => FcfsScheduler::NAME,
            Self::SjfPreemptive => SjfScheduler::<true>::NAME,
            Self::SjfNonPreemptive => SjfScheduler::<false>::NAME,
            Self::PriorityPreemptive => PriorityScheduler::<true>::NAME,
            Self::PriorityNonPreemptive => PriorityScheduler::<false>::NAME,
            Self::RoundRobin { .. } => RoundRobinScheduler::NAME,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin { quantum } => write!(f, "{} (q={quantum})", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(processes: &ProcessSet, config: S::Config) -> Self {
        // Sequential completion over (arrival, burst) order bounds the run
        let mut ordered = processes.as_slice().to_vec();
        ordered.sort_by_key(|p| (p.arrival_time, p.burst_time));
        let horizon = match ordered.len() {
            0 => 0,
            len => completion_time(&ordered, len - 1),
        };

        Self {
            core: SchedCore::new(processes, config, horizon),
        }
    }

    pub fn run(mut self) -> (Vec<Segment>, Observer) {
        self.core.run();
        let (ctx, observer) = self.core.into_parts();
        (ctx.segments, observer)
    }

    pub fn all_tasks_completed(&self) -> bool {
        self.core.ctx.all_completed()
    }
}

pub fn validate(processes: &ProcessSet, algorithm: Algorithm) -> Result<(), InputError> {
    if processes.is_empty() {
        return Err(InputError::EmptyProcessSet);
    }
    if algorithm == (Algorithm::RoundRobin { quantum: 0 }) {
        return Err(InputError::ZeroQuantum);
    }

    let mut seen = FxHashSet::default();
    for process in processes {
        if process.burst_time == 0 {
            return Err(InputError::ZeroBurst { pid: process.id });
        }
        if !seen.insert(process.id) {
            return Err(InputError::DuplicatePid { pid: process.id });
        }
    }

    // Every run ends at the sequential completion time, so it must fit
    let mut ordered = processes.as_slice().to_vec();
    ordered.sort_by_key(|p| (p.arrival_time, p.burst_time));
    checked_completion_time(&ordered).ok_or(InputError::TimeOverflow)?;
    Ok(())
}

/// Simulates `algorithm` over `processes`; the input set is only read.
pub fn schedule(processes: &ProcessSet, algorithm: Algorithm) -> Result<Schedule, SchedError> {
    validate(processes, algorithm)?;
    debug!("scheduling {} processes with {algorithm}", processes.len());

    let (segments, observer) = match algorithm {
        Algorithm::Fcfs => Sim::<FcfsScheduler>::new(processes, ()).run(),
        Algorithm::SjfPreemptive => Sim::<SjfScheduler<true>>::new(processes, ()).run(),
        Algorithm::SjfNonPreemptive => Sim::<SjfScheduler<false>>::new(processes, ()).run(),
        Algorithm::PriorityPreemptive => Sim::<PriorityScheduler<true>>::new(processes, ()).run(),
        Algorithm::PriorityNonPreemptive => {
            Sim::<PriorityScheduler<false>>::new(processes, ()).run()
        }
        Algorithm::RoundRobin { quantum } => {
            Sim::<RoundRobinScheduler>::new(processes, quantum).run()
        }
    };

    Ok(Schedule::new(algorithm, processes, segments, &observer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Process;

    #[test]
    fn numeric_codes_round_trip() {
        for code in 1..=6 {
            let algorithm = Algorithm::from_code(code, Some(3)).unwrap();
            assert_eq!(algorithm.code(), code);
        }
    }

    #[test]
    fn unknown_selector_is_unsupported() {
        assert_eq!(
            Algorithm::from_code(7, None),
            Err(SchedError::UnsupportedAlgorithm("7".to_owned()))
        );
        assert_eq!(
            Algorithm::parse("lottery", None),
            Err(SchedError::UnsupportedAlgorithm("lottery".to_owned()))
        );
    }

    #[test]
    fn round_robin_needs_quantum() {
        assert_eq!(
            Algorithm::parse("rr", None),
            Err(SchedError::InvalidInput(InputError::MissingQuantum))
        );
        assert_eq!(
            Algorithm::parse("Round-Robin", Some(4)),
            Ok(Algorithm::RoundRobin { quantum: 4 })
        );
    }

    #[test]
    fn rejects_invalid_input_before_running() {
        let empty = ProcessSet::new();
        assert_eq!(
            schedule(&empty, Algorithm::Fcfs).unwrap_err(),
            SchedError::InvalidInput(InputError::EmptyProcessSet)
        );

        let zero_burst: ProcessSet = vec![Process::new(1, 0, 2), Process::new(2, 1, 0)]
            .into_iter()
            .collect();
        assert_eq!(
            schedule(&zero_burst, Algorithm::SjfPreemptive).unwrap_err(),
            SchedError::InvalidInput(InputError::ZeroBurst { pid: 2 })
        );

        let duplicate: ProcessSet = vec![Process::new(1, 0, 2), Process::new(1, 1, 2)]
            .into_iter()
            .collect();
        assert_eq!(
            schedule(&duplicate, Algorithm::Fcfs).unwrap_err(),
            SchedError::InvalidInput(InputError::DuplicatePid { pid: 1 })
        );

        let single: ProcessSet = vec![Process::new(1, 0, 2)].into_iter().collect();
        assert_eq!(
            schedule(&single, Algorithm::RoundRobin { quantum: 0 }).unwrap_err(),
            SchedError::InvalidInput(InputError::ZeroQuantum)
        );
    }

    #[test]
    fn huge_quantum_runs_each_process_to_completion() {
        let processes: ProcessSet = vec![Process::new(1, 1, 3), Process::new(2, 2, 2)]
            .into_iter()
            .collect();
        let schedule = schedule(&processes, Algorithm::RoundRobin { quantum: u64::MAX }).unwrap();

        let spans: Vec<(u64, u64, u64)> = schedule
            .segments()
            .iter()
            .map(|s| (s.pid, s.start, s.end()))
            .collect();
        assert_eq!(spans, vec![(1, 1, 4), (2, 4, 6)]);
    }

    #[test]
    fn rejects_times_past_end_of_clock() {
        let processes: ProcessSet = vec![Process::new(1, 0, 3), Process::new(2, u64::MAX - 1, 2)]
            .into_iter()
            .collect();
        for algorithm in [Algorithm::Fcfs, Algorithm::RoundRobin { quantum: u64::MAX }] {
            assert_eq!(
                schedule(&processes, algorithm).unwrap_err(),
                SchedError::InvalidInput(InputError::TimeOverflow)
            );
        }

        // Exactly reaching the top of the range is fine
        let at_limit: ProcessSet = vec![Process::new(1, u64::MAX - 2, 2)].into_iter().collect();
        let schedule = schedule(&at_limit, Algorithm::SjfPreemptive).unwrap();
        assert_eq!(schedule.completion_time(1), Some(u64::MAX));
    }

    #[test]
    fn sim_horizon_matches_last_completion() {
        let processes: ProcessSet = vec![Process::new(1, 3, 2), Process::new(2, 0, 1)]
            .into_iter()
            .collect();
        let mut sim = Sim::<FcfsScheduler>::new(&processes, ());
        sim.core.run();
        assert!(sim.all_tasks_completed());
        assert_eq!(sim.core.now(), 5);
        assert_eq!(sim.core.observer().idle_ticks, 2);
    }
}
