use thiserror::Error;

use crate::sim::Pid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedError {
    #[error("unsupported scheduling algorithm `{0}`")]
    UnsupportedAlgorithm(String),
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
}

/// Precondition failures, reported before any simulation state is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("process set is empty")]
    EmptyProcessSet,
    #[error("process {pid} has a zero-length burst")]
    ZeroBurst { pid: Pid },
    #[error("duplicate process id {pid}")]
    DuplicatePid { pid: Pid },
    #[error("round-robin quantum must be positive")]
    ZeroQuantum,
    #[error("round-robin requires a time quantum")]
    MissingQuantum,
    #[error("arrival and burst times overflow the simulation clock")]
    TimeOverflow,
}
