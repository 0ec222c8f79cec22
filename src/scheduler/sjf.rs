use super::{EnqueueFlags, Priq, SCHED_ENQ_PREEMPT, Scheduler};
use crate::core::{SimCtx, Task, TaskId, Ticks};

// (remaining burst, arrival time, input position)
type SjfKey = (Ticks, Ticks, TaskId);

/// Shortest-job-first. With `PREEMPT` this is shortest-remaining-time-first:
/// an arrival takes the CPU only if its burst is strictly shorter than what
/// the running task has left.
pub struct SjfScheduler<const PREEMPT: bool> {
    ready: Priq<SjfKey>,
}

fn key(task: &Task) -> SjfKey {
    (task.remaining, task.arrival_time, task.id)
}

impl<const PREEMPT: bool> Scheduler for SjfScheduler<PREEMPT> {
    const NAME: &'static str = if PREEMPT {
        "SJF (preemptive)"
    } else {
        "SJF (non-preemptive)"
    };

    type Config = ();

    fn init(_ctx: &SimCtx, _config: ()) -> Self {
        Self { ready: Priq::new() }
    }

    fn enqueue(&mut self, ctx: &SimCtx, task: TaskId, flags: EnqueueFlags) {
        debug_assert!(
            PREEMPT || flags & SCHED_ENQ_PREEMPT == 0,
            "non-preemptive SJF preempted task {task}"
        );
        self.ready.push(task, key(ctx.task(task)));
    }

    fn dispatch(&mut self, _ctx: &SimCtx) -> Option<TaskId> {
        self.ready.pop()
    }

    fn should_preempt(&self, ctx: &SimCtx, running: TaskId, woken: TaskId) -> bool {
        PREEMPT && ctx.task(woken).remaining < ctx.task(running).remaining
    }
}
