use crate::sim::{Pid, Priority, ProcessSet, Segment};

// Index into Task Vec; equal to the process's position in the input set
pub type TaskId = usize;
pub type Ticks = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    // Not yet arrived
    Pending,
    Runnable,
    Running,
    Completed,
}

// Private working copy of one input process; only `remaining` and `state` change
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub pid: Pid,
    pub state: TaskState,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub remaining: Ticks,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy)]
struct OpenSegment {
    task: TaskId,
    start: Ticks,
}

#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub tasks: Vec<Task>,
    pub segments: Vec<Segment>,

    // TaskIds ordered by arrival time, ties by input position
    arrival_order: Vec<TaskId>,
    arrival_cursor: usize,
    current: Option<OpenSegment>,
}

impl SimCtx {
    pub fn new(processes: &ProcessSet) -> Self {
        let tasks: Vec<Task> = processes
            .iter()
            .enumerate()
            .map(|(id, process)| Task {
                id,
                pid: process.id,
                state: TaskState::Pending,
                arrival_time: process.arrival_time,
                burst_time: process.burst_time,
                remaining: process.burst_time,
                priority: process.priority,
            })
            .collect();

        // Stable, so equal arrivals keep input order
        let mut arrival_order: Vec<TaskId> = (0..tasks.len()).collect();
        arrival_order.sort_by_key(|&id| tasks[id].arrival_time);

        let now = arrival_order
            .first()
            .map_or(0, |&id| tasks[id].arrival_time);

        Self {
            now,
            tasks,
            segments: Vec::with_capacity(processes.len()),
            arrival_order,
            arrival_cursor: 0,
            current: None,
        }
    }

    pub fn task(&self, task_id: TaskId) -> &Task {
        &self.tasks[task_id]
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> &mut Task {
        &mut self.tasks[task_id]
    }

    pub fn advance_time(&mut self, to: Ticks) {
        debug_assert!(to >= self.now, "clock moved backwards: {} -> {to}", self.now);
        self.now = to;
    }

    pub fn next_arrival(&self) -> Option<Ticks> {
        self.arrival_order
            .get(self.arrival_cursor)
            .map(|&id| self.tasks[id].arrival_time)
    }

    /// Marks every pending task whose arrival time has been reached as
    /// runnable and returns them in arrival order.
    pub fn admit_arrivals(&mut self) -> Vec<TaskId> {
        let mut admitted = Vec::new();
        while let Some(&id) = self.arrival_order.get(self.arrival_cursor) {
            let task = &mut self.tasks[id];
            if task.arrival_time > self.now {
                break;
            }
            debug_assert_eq!(task.state, TaskState::Pending);
            task.state = TaskState::Runnable;
            admitted.push(id);
            self.arrival_cursor += 1;
        }
        admitted
    }

    pub fn current(&self) -> Option<TaskId> {
        self.current.map(|open| open.task)
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.current.is_none()
    }

    // Return previous state
    pub fn set_running(&mut self, task_id: TaskId) -> TaskState {
        debug_assert!(
            self.current.is_none(),
            "CPU already running task {:?}",
            self.current()
        );

        let now = self.now;
        let task = self.task_mut(task_id);
        debug_assert_eq!(
            task.state,
            TaskState::Runnable,
            "Task {task_id} must be Runnable before it is dispatched"
        );
        let prev_state = task.state;
        task.state = TaskState::Running;

        self.current = Some(OpenSegment {
            task: task_id,
            start: now,
        });
        prev_state
    }

    /// Advances the clock to `until`, charging the elapsed time to the
    /// running task (if any).
    pub fn run_until(&mut self, until: Ticks) {
        let elapsed = until.saturating_sub(self.now);
        if let Some(open) = self.current {
            let task = &mut self.tasks[open.task];
            debug_assert!(
                elapsed <= task.remaining,
                "Task {} overran its burst by {} ticks",
                open.task,
                elapsed - task.remaining
            );
            task.remaining -= elapsed;
        }
        self.advance_time(until);
    }

    // Task stays Running until the caller marks it
    pub fn clear_cpu(&mut self) -> Option<TaskId> {
        let open = self.current.take()?;
        self.segments.push(Segment {
            pid: self.tasks[open.task].pid,
            start: open.start,
            duration: self.now - open.start,
        });
        Some(open.task)
    }

    pub fn mark_runnable(&mut self, task_id: TaskId) {
        let task = self.task_mut(task_id);
        debug_assert!(
            task.state != TaskState::Completed,
            "Completed task {task_id} cannot be runnable"
        );
        debug_assert!(task.remaining > 0, "Task {task_id} has no work left");
        task.state = TaskState::Runnable;
    }

    pub fn mark_completed(&mut self, task_id: TaskId) {
        debug_assert!(
            self.current() != Some(task_id),
            "Completing task {task_id} that still holds the CPU"
        );

        let task = self.task_mut(task_id);
        debug_assert!(
            task.state == TaskState::Running,
            "Task {task_id} must have been running before marked complete"
        );
        debug_assert_eq!(task.remaining, 0);

        task.state = TaskState::Completed;
    }

    pub fn all_completed(&self) -> bool {
        self.tasks
            .iter()
            .all(|task| task.state == TaskState::Completed)
    }
}
