use super::{EnqueueFlags, Priq, SCHED_ENQ_PREEMPT, Scheduler};
use crate::{
    core::{SimCtx, Task, TaskId, Ticks},
    sim::Priority,
};

// (priority, arrival time, input position); lower wins
type PrioKey = (Priority, Ticks, TaskId);

/// Static-priority scheduling. Lower numeric priority runs first; with
/// `PREEMPT`, an arrival displaces the running task only when its priority
/// is strictly better.
pub struct PriorityScheduler<const PREEMPT: bool> {
    ready: Priq<PrioKey>,
}

fn key(task: &Task) -> PrioKey {
    (task.priority, task.arrival_time, task.id)
}

impl<const PREEMPT: bool> Scheduler for PriorityScheduler<PREEMPT> {
    const NAME: &'static str = if PREEMPT {
        "Priority (preemptive)"
    } else {
        "Priority (non-preemptive)"
    };

    type Config = ();

    fn init(_ctx: &SimCtx, _config: ()) -> Self {
        Self { ready: Priq::new() }
    }

    fn enqueue(&mut self, ctx: &SimCtx, task: TaskId, flags: EnqueueFlags) {
        debug_assert!(
            PREEMPT || flags & SCHED_ENQ_PREEMPT == 0,
            "non-preemptive priority scheduler preempted task {task}"
        );
        self.ready.push(task, key(ctx.task(task)));
    }

    fn dispatch(&mut self, _ctx: &SimCtx) -> Option<TaskId> {
        self.ready.pop()
    }

    fn should_preempt(&self, ctx: &SimCtx, running: TaskId, woken: TaskId) -> bool {
        PREEMPT && ctx.task(woken).priority < ctx.task(running).priority
    }
}
