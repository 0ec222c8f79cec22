use std::collections::VecDeque;

use super::{EnqueueFlags, Scheduler};
use crate::core::{SimCtx, TaskId, Ticks};

// Expired tasks queue behind anything that arrived up to that instant
pub struct RoundRobinScheduler {
    queue: VecDeque<TaskId>,
    quantum: Ticks,
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "Round-Robin";

    type Config = Ticks;

    fn init(ctx: &SimCtx, quantum: Ticks) -> Self {
        debug_assert!(quantum > 0, "Round-Robin requires a positive quantum");
        Self {
            queue: VecDeque::with_capacity(ctx.tasks.len()),
            quantum,
        }
    }

    fn enqueue(&mut self, _ctx: &SimCtx, task: TaskId, flags: EnqueueFlags) {
        let _ = flags;
        self.queue.push_back(task);
    }

    fn dispatch(&mut self, _ctx: &SimCtx) -> Option<TaskId> {
        self.queue.pop_front()
    }

    fn slice(&self, _ctx: &SimCtx, _task: TaskId) -> Option<Ticks> {
        Some(self.quantum)
    }
}
