use keyed_priority_queue::KeyedPriorityQueue;

use crate::core::TaskId;

#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct MinKey<K>(pub K);

// KeyedPriorityQueue is a max-heap, so we need to flip-flop the key's Ord
impl<K: Ord> PartialOrd for MinKey<K> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for MinKey<K> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.0.cmp(&self.0)
    }
}

// Keys end with the TaskId, so ties never depend on heap layout
pub struct Priq<K: Ord> {
    tasks: KeyedPriorityQueue<TaskId, MinKey<K>>,
}

impl<K: Ord> Priq<K> {
    pub fn new() -> Self {
        Self {
            tasks: KeyedPriorityQueue::new(),
        }
    }

    pub fn push(&mut self, task: TaskId, key: K) {
        let prev = self.tasks.push(task, MinKey(key));
        debug_assert!(prev.is_none(), "Task {task} already present in ready set");
    }

    pub fn pop(&mut self) -> Option<TaskId> {
        self.tasks.pop().map(|(task, _)| task)
    }

    pub fn peek(&self) -> Option<(TaskId, &K)> {
        self.tasks.peek().map(|(&task, key)| (task, &key.0))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<K: Ord> Default for Priq<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_smallest_key_first() {
        let mut priq = Priq::new();
        priq.push(0, (5, 0));
        priq.push(1, (2, 1));
        priq.push(2, (2, 0));
        priq.push(3, (9, 3));

        assert_eq!(priq.len(), 4);
        assert_eq!(priq.peek(), Some((2, &(2, 0))));
        assert_eq!(priq.pop(), Some(2));
        assert_eq!(priq.pop(), Some(1));
        assert_eq!(priq.pop(), Some(0));
        assert_eq!(priq.pop(), Some(3));
        assert_eq!(priq.pop(), None);
        assert!(priq.is_empty());
    }
}
