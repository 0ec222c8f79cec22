use log::debug;

use super::{
    event::SchedEvent,
    observer::Observer,
    state::{SimCtx, TaskId, Ticks},
};
use crate::{
    scheduler::{
        EnqueueFlags, SCHED_ENQ_PREEMPT, SCHED_ENQ_REENQ, SCHED_ENQ_WAKEUP, Scheduler,
    },
    sim::ProcessSet,
};

// Jumps from event to event (arrival, completion, slice expiry) instead of per tick
pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    observer: Observer,
    horizon: Ticks,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(processes: &ProcessSet, config: S::Config, horizon: Ticks) -> Self {
        let ctx = SimCtx::new(processes);
        let scheduler = S::init(&ctx, config);
        Self {
            ctx,
            scheduler,
            observer: Observer::new(),
            horizon,
        }
    }

    // Horizon is the last completion under any work-conserving policy
    pub fn run(&mut self) {
        debug!(
            "{}: {} tasks, t={}..{}",
            S::NAME,
            self.ctx.tasks.len(),
            self.ctx.now,
            self.horizon
        );

        self.admit();
        while self.ctx.now < self.horizon {
            self.step();
        }

        debug_assert!(
            self.ctx.all_completed(),
            "{} reached horizon t={} with unfinished tasks",
            S::NAME,
            self.horizon
        );
        debug!(
            "{}: finished at t={} after {} dispatches, {} preemptions",
            S::NAME,
            self.ctx.now,
            self.observer.dispatches,
            self.observer.preemptions
        );
    }

    fn step(&mut self) {
        let Some(task) = self.scheduler.dispatch(&self.ctx) else {
            self.idle();
            return;
        };

        self.ctx.set_running(task);
        self.emit(SchedEvent::Dispatched {
            task,
            at: self.ctx.now,
        });

        let slice_end = self
            .scheduler
            .slice(&self.ctx, task)
            .map(|slice| self.ctx.now.saturating_add(slice));

        loop {
            let done_at = self.ctx.now + self.ctx.task(task).remaining;
            let stop = slice_end.map_or(done_at, |end| end.min(done_at));

            let until = match self.ctx.next_arrival() {
                Some(arrival) if arrival < stop => arrival,
                _ => stop,
            };
            self.ctx.run_until(until);

            // Arrivals at `stop` are queued ahead of the outgoing task
            let woken = self.admit();
            if until == stop {
                break;
            }

            if let Some(by) = woken
                .into_iter()
                .find(|&woken| self.scheduler.should_preempt(&self.ctx, task, woken))
            {
                self.deschedule(task, SCHED_ENQ_PREEMPT);
                self.emit(SchedEvent::Preempted {
                    task,
                    by,
                    at: self.ctx.now,
                });
                return;
            }
        }

        if self.ctx.task(task).remaining == 0 {
            self.ctx.clear_cpu();
            self.ctx.mark_completed(task);
            self.emit(SchedEvent::Completed {
                task,
                at: self.ctx.now,
            });
        } else {
            self.deschedule(task, SCHED_ENQ_REENQ);
            self.emit(SchedEvent::SliceExpired {
                task,
                at: self.ctx.now,
            });
        }
    }

    fn deschedule(&mut self, task: TaskId, flags: EnqueueFlags) {
        self.ctx.clear_cpu();
        self.ctx.mark_runnable(task);
        self.scheduler.enqueue(&self.ctx, task, flags);
    }

    // Nothing runnable: jump to the next arrival
    fn idle(&mut self) {
        let from = self.ctx.now;
        let to = match self.ctx.next_arrival() {
            Some(arrival) => arrival,
            // Only reachable if the horizon was wrong; stop the loop
            None => self.horizon,
        };
        self.ctx.advance_time(to);
        self.emit(SchedEvent::Idle { from, to });
        self.admit();
    }

    fn admit(&mut self) -> Vec<TaskId> {
        let admitted = self.ctx.admit_arrivals();
        for &task in &admitted {
            self.scheduler.enqueue(&self.ctx, task, SCHED_ENQ_WAKEUP);
            self.emit(SchedEvent::Admitted {
                task,
                at: self.ctx.now,
            });
        }
        admitted
    }

    fn emit(&mut self, event: SchedEvent) {
        self.observer.observe(&self.ctx, &event);
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn into_parts(self) -> (SimCtx, Observer) {
        (self.ctx, self.observer)
    }
}
