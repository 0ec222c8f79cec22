use crate::core::{TaskId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedEvent {
    Admitted {
        task: TaskId,
        at: Ticks,
    },
    Dispatched {
        task: TaskId,
        at: Ticks,
    },
    Preempted {
        task: TaskId,
        by: TaskId,
        at: Ticks,
    },
    // Quantum ran out with work remaining
    SliceExpired {
        task: TaskId,
        at: Ticks,
    },
    Completed {
        task: TaskId,
        at: Ticks,
    },
    // Nothing runnable between `from` and `to`
    Idle {
        from: Ticks,
        to: Ticks,
    },
}

impl SchedEvent {
    pub fn at(&self) -> Ticks {
        match *self {
            Self::Admitted { at, .. }
            | Self::Dispatched { at, .. }
            | Self::Preempted { at, .. }
            | Self::SliceExpired { at, .. }
            | Self::Completed { at, .. } => at,
            Self::Idle { to, .. } => to,
        }
    }
}
