pub mod fcfs;
pub mod priority;
pub mod priq;
pub mod round_robin;
pub mod sjf;

use crate::core::{SimCtx, TaskId, Ticks};
pub use fcfs::FcfsScheduler;
pub use priority::PriorityScheduler;
pub use priq::{MinKey, Priq};
pub use round_robin::RoundRobinScheduler;
pub use sjf::SjfScheduler;

pub type EnqueueFlags = u64;

// Task just arrived
pub const SCHED_ENQ_WAKEUP: EnqueueFlags = 1 << 0;
// Task lost the CPU to a better candidate
pub const SCHED_ENQ_PREEMPT: EnqueueFlags = 1 << 1;
// Task used up its slice
pub const SCHED_ENQ_REENQ: EnqueueFlags = 1 << 2;

// Ready-set policy; the core owns the clock and the task table
pub trait Scheduler {
    const NAME: &'static str;

    type Config;

    fn init(ctx: &SimCtx, config: Self::Config) -> Self;

    fn enqueue(&mut self, ctx: &SimCtx, task: TaskId, flags: EnqueueFlags);

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<TaskId>;

    // None: run until completion or preemption
    fn slice(&self, _ctx: &SimCtx, _task: TaskId) -> Option<Ticks> {
        None
    }

    fn should_preempt(&self, _ctx: &SimCtx, _running: TaskId, _woken: TaskId) -> bool {
        false
    }
}
