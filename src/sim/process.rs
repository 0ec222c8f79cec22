use std::str::FromStr;

use thiserror::Error;

use crate::core::state::Ticks;

pub type Pid = u64;
// Lower value means higher priority
pub type Priority = i32;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Process {
    pub id: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub priority: Priority,
}

impl Process {
    pub const DEFAULT_PRIORITY: Priority = 0;

    pub fn new(id: Pid, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Process::with_priority(id, arrival_time, burst_time, Process::DEFAULT_PRIORITY)
    }

    pub fn with_priority(
        id: Pid,
        arrival_time: Ticks,
        burst_time: Ticks,
        priority: Priority,
    ) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseProcessError {
    #[error("expected PID:ARRIVAL:BURST[:PRIORITY], got `{0}`")]
    Format(String),
    #[error("invalid {field} `{value}`")]
    Field { field: &'static str, value: String },
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, ParseProcessError> {
    value.trim().parse().map_err(|_| ParseProcessError::Field {
        field,
        value: value.to_owned(),
    })
}

/// Parses `PID:ARRIVAL:BURST` or `PID:ARRIVAL:BURST:PRIORITY`.
impl FromStr for Process {
    type Err = ParseProcessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(':').collect();
        let (id, arrival, burst, priority) = match fields.as_slice() {
            [id, arrival, burst] => (id, arrival, burst, None),
            [id, arrival, burst, priority] => (id, arrival, burst, Some(priority)),
            _ => return Err(ParseProcessError::Format(s.to_owned())),
        };

        Ok(Process::with_priority(
            parse_field("pid", id)?,
            parse_field("arrival time", arrival)?,
            parse_field("burst time", burst)?,
            match priority {
                Some(priority) => parse_field("priority", priority)?,
                None => Process::DEFAULT_PRIORITY,
            },
        ))
    }
}

/// "`pid` occupied the CPU for `duration` ticks starting at `start`".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub pid: Pid,
    pub start: Ticks,
    pub duration: Ticks,
}

impl Segment {
    pub fn end(&self) -> Ticks {
        self.start + self.duration
    }
}

/// Ordered collection of input processes. Cloning yields an independent
/// copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessSet {
    processes: Vec<Process>,
}

impl ProcessSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, process: Process) {
        self.processes.push(process);
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Process> {
        self.processes.iter()
    }

    pub fn as_slice(&self) -> &[Process] {
        &self.processes
    }

    /// Stable sort; equal keys keep their current relative order.
    pub fn sort_by_key<K: Ord>(&mut self, f: impl FnMut(&Process) -> K) {
        self.processes.sort_by_key(f);
    }

    pub fn find(&self, predicate: impl FnMut(&&Process) -> bool) -> Option<&Process> {
        self.processes.iter().find(predicate)
    }

    pub fn position(&self, predicate: impl FnMut(&Process) -> bool) -> Option<usize> {
        self.processes.iter().position(predicate)
    }

    pub fn remove(&mut self, pid: Pid) -> Option<Process> {
        self.position(|process| process.id == pid)
            .map(|index| self.processes.remove(index))
    }
}

impl FromIterator<Process> for ProcessSet {
    fn from_iter<I: IntoIterator<Item = Process>>(iter: I) -> Self {
        Self {
            processes: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Process>> for ProcessSet {
    fn from(processes: Vec<Process>) -> Self {
        Self { processes }
    }
}

impl<'a> IntoIterator for &'a ProcessSet {
    type Item = &'a Process;
    type IntoIter = std::slice::Iter<'a, Process>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_priority() {
        assert_eq!("3:10:4".parse::<Process>(), Ok(Process::new(3, 10, 4)));
        assert_eq!(
            "3:10:4:-2".parse::<Process>(),
            Ok(Process::with_priority(3, 10, 4, -2))
        );
    }

    #[test]
    fn rejects_malformed_process() {
        assert_eq!(
            "3:10".parse::<Process>(),
            Err(ParseProcessError::Format("3:10".to_owned()))
        );
        assert_eq!(
            "3:x:4".parse::<Process>(),
            Err(ParseProcessError::Field {
                field: "arrival time",
                value: "x".to_owned()
            })
        );
    }

    #[test]
    fn sort_is_stable() {
        let mut set: ProcessSet = vec![
            Process::new(1, 5, 1),
            Process::new(2, 0, 1),
            Process::new(3, 5, 1),
            Process::new(4, 0, 1),
        ]
        .into_iter()
        .collect();

        set.sort_by_key(|p| p.arrival_time);
        let ids: Vec<Pid> = set.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn clone_is_independent() {
        let original: ProcessSet = vec![Process::new(1, 0, 3)].into_iter().collect();
        let mut copy = original.clone();
        copy.remove(1);
        assert!(copy.is_empty());
        assert_eq!(original.len(), 1);
        assert_eq!(original.find(|p| p.id == 1), Some(&Process::new(1, 0, 3)));
    }
}
