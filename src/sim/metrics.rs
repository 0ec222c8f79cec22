use average::Estimate;
use rustc_hash::FxHashMap;

use super::process::{Pid, Process, ProcessSet, Segment};
use crate::core::state::Ticks;

/// Completion time of `processes[index]` when the slice runs strictly in
/// order without preemption: the clock starts at the first arrival, jumps
/// over idle gaps and advances by each full burst.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn completion_time(processes: &[Process], index: usize) -> Ticks {
    let mut clock = processes[0].arrival_time;
    for process in &processes[..=index] {
        clock = clock.max(process.arrival_time) + process.burst_time;
    }
    clock
}

// `None` if the sequential walk runs past `Ticks::MAX`
pub fn checked_completion_time(processes: &[Process]) -> Option<Ticks> {
    let mut clock = processes.first()?.arrival_time;
    for process in processes {
        clock = clock.max(process.arrival_time).checked_add(process.burst_time)?;
    }
    Some(clock)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStats {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub first_run: Ticks,
    pub completion_time: Ticks,
}

impl ProcessStats {
    pub fn turnaround(&self) -> Ticks {
        self.completion_time - self.arrival_time
    }

    pub fn waiting(&self) -> Ticks {
        self.turnaround() - self.burst_time
    }

    pub fn response(&self) -> Ticks {
        self.first_run - self.arrival_time
    }
}

/// One entry per input process, in input order. A process's completion is
/// the end of its last segment, however many segments it was split into.
pub fn process_stats(processes: &ProcessSet, segments: &[Segment]) -> Vec<ProcessStats> {
    // pid -> (first start, last end)
    let mut spans: FxHashMap<Pid, (Ticks, Ticks)> = FxHashMap::default();
    for segment in segments {
        spans
            .entry(segment.pid)
            .and_modify(|(first, last)| {
                *first = (*first).min(segment.start);
                *last = (*last).max(segment.end());
            })
            .or_insert((segment.start, segment.end()));
    }

    let stats: Vec<ProcessStats> = processes
        .iter()
        .filter_map(|process| {
            let &(first_run, completion_time) = spans.get(&process.id)?;
            Some(ProcessStats {
                pid: process.id,
                arrival_time: process.arrival_time,
                burst_time: process.burst_time,
                first_run,
                completion_time,
            })
        })
        .collect();

    debug_assert_eq!(stats.len(), processes.len(), "process never ran");
    stats
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub average_turnaround: f64,
    pub average_waiting: f64,
    pub average_response: f64,
    // Completion time of the last process
    pub makespan: Ticks,
    // Busy share of [first arrival, makespan]
    pub utilization: f64,
    pub preemptions: u64,
}

impl Metrics {
    pub fn new(stats: &[ProcessStats], segments: &[Segment], preemptions: u64) -> Self {
        let first_arrival = stats.iter().map(|s| s.arrival_time).min().unwrap_or(0);
        let makespan = stats.iter().map(|s| s.completion_time).max().unwrap_or(0);
        let busy: Ticks = segments.iter().map(|s| s.duration).sum();
        let span = makespan - first_arrival;

        Self {
            average_turnaround: avg(stats.iter().map(|s| s.turnaround() as f64)),
            average_waiting: avg(stats.iter().map(|s| s.waiting() as f64)),
            average_response: avg(stats.iter().map(|s| s.response() as f64)),
            makespan,
            utilization: if span == 0 {
                0.0
            } else {
                busy as f64 / span as f64
            },
            preemptions,
        }
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<average::Mean>().estimate()
}
