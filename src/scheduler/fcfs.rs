use std::collections::VecDeque;

use super::{EnqueueFlags, SCHED_ENQ_WAKEUP, Scheduler};
use crate::core::{SimCtx, TaskId};

/// Runs tasks to completion in arrival order. Arrivals are admitted in
/// (arrival time, input position) order, so a plain FIFO is enough.
pub struct FcfsScheduler {
    queue: VecDeque<TaskId>,
}

impl Scheduler for FcfsScheduler {
    const NAME: &'static str = "FCFS";

    type Config = ();

    fn init(ctx: &SimCtx, _config: ()) -> Self {
        Self {
            queue: VecDeque::with_capacity(ctx.tasks.len()),
        }
    }

    fn enqueue(&mut self, _ctx: &SimCtx, task: TaskId, flags: EnqueueFlags) {
        debug_assert_eq!(flags, SCHED_ENQ_WAKEUP, "FCFS never re-enqueues task {task}");
        self.queue.push_back(task);
    }

    fn dispatch(&mut self, _ctx: &SimCtx) -> Option<TaskId> {
        self.queue.pop_front()
    }
}
