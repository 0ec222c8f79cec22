use super::{
    driver::Algorithm,
    metrics::{Metrics, ProcessStats, process_stats},
    process::{Pid, ProcessSet, Segment},
};
use crate::core::{Observer, state::Ticks};

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    algorithm: Algorithm,
    segments: Vec<Segment>,
    stats: Vec<ProcessStats>,
    metrics: Metrics,
}

impl Schedule {
    pub(crate) fn new(
        algorithm: Algorithm,
        processes: &ProcessSet,
        segments: Vec<Segment>,
        observer: &Observer,
    ) -> Self {
        let stats = process_stats(processes, &segments);
        let metrics = Metrics::new(&stats, &segments, observer.preemptions);
        Self {
            algorithm,
            segments,
            stats,
            metrics,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn find(&self, predicate: impl FnMut(&&Segment) -> bool) -> Option<&Segment> {
        self.segments.iter().find(predicate)
    }

    pub fn segments_for(&self, pid: Pid) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter().filter(move |segment| segment.pid == pid)
    }

    pub fn stats(&self) -> &[ProcessStats] {
        &self.stats
    }

    pub fn stats_for(&self, pid: Pid) -> Option<&ProcessStats> {
        self.stats.iter().find(|stats| stats.pid == pid)
    }

    pub fn completion_time(&self, pid: Pid) -> Option<Ticks> {
        self.stats_for(pid).map(|stats| stats.completion_time)
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn average_turnaround(&self) -> f64 {
        self.metrics.average_turnaround
    }

    pub fn average_waiting(&self) -> f64 {
        self.metrics.average_waiting
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
