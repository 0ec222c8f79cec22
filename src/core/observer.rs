use log::trace;

use super::{
    event::SchedEvent,
    state::{SimCtx, TaskState, Ticks},
};

#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
    last_at: Ticks,
    pub dispatches: u64,
    pub preemptions: u64,
    pub idle_ticks: Ticks,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, ctx: &SimCtx, event: &SchedEvent) {
        self.step += 1;
        trace!("#{} t={} {:?}", self.step, ctx.now, event);

        debug_assert!(
            event.at() >= self.last_at,
            "{event:?} moves time backwards from t={}",
            self.last_at
        );
        self.last_at = event.at();

        match *event {
            SchedEvent::Admitted { task, .. } => {
                debug_assert_eq!(
                    ctx.task(task).state,
                    TaskState::Runnable,
                    "Admitted task {task} must be Runnable"
                );
            }
            SchedEvent::Dispatched { task, .. } => {
                self.dispatches += 1;
                debug_assert_eq!(
                    ctx.current(),
                    Some(task),
                    "Dispatched task {task} does not hold the CPU"
                );
                debug_assert_eq!(ctx.task(task).state, TaskState::Running);
            }
            SchedEvent::Preempted { task, by, .. } => {
                self.preemptions += 1;
                debug_assert!(ctx.cpu_is_idle(), "Preempted task {task} still holds the CPU");
                debug_assert_eq!(ctx.task(task).state, TaskState::Runnable);
                debug_assert_eq!(
                    ctx.task(by).state,
                    TaskState::Runnable,
                    "Preempting task {by} must be waiting"
                );
            }
            SchedEvent::SliceExpired { task, .. } => {
                debug_assert!(
                    ctx.task(task).remaining > 0,
                    "Slice expiry reported for finished task {task}"
                );
            }
            SchedEvent::Completed { task, at } => {
                let task = ctx.task(task);
                debug_assert_eq!(task.state, TaskState::Completed);
                debug_assert!(
                    at >= task.arrival_time + task.burst_time,
                    "Task {} completed at {at} before arrival + burst",
                    task.id
                );
            }
            SchedEvent::Idle { from, to } => {
                debug_assert!(ctx.cpu_is_idle(), "CPU reported idle while running");
                self.idle_ticks += to - from;
            }
        }
    }
}
