use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use super::scene::ElementId;

/// Deferred work the controller can schedule.
///
/// Every variant targets an element by id and is a no-op when that element
/// is already gone, so firing order between overlapping effects never matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Set an element's opacity, e.g. the overlay shimmer going 0 -> 1 -> 0.
    SetOpacity { id: ElementId, milli: u16 },
    /// Remove an element (and its children) from the scene.
    Remove(ElementId),
    /// Recurring ambient pool maintenance.
    PoolMaintenance,
}

#[derive(Debug)]
struct Timer {
    due: Duration,
    seq: u64,
    task: Task,
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Timer {}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timer {
    // Reversed: BinaryHeap is a max-heap, we want the earliest deadline first,
    // and the earliest scheduled among equal deadlines.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Single-threaded virtual clock with one-shot timers, next-frame callbacks
/// and one recurring interval.
///
/// Nothing here can be cancelled. Timers run to completion even if the
/// navigation that scheduled them has been superseded.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    seq: u64,
    timers: BinaryHeap<Timer>,
    next_frame: Vec<Task>,
    interval: Option<(Duration, Task)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the controller started.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn after(&mut self, delay: Duration, task: Task) {
        let timer = Timer {
            due: self.now + delay,
            seq: self.seq,
            task,
        };
        self.seq += 1;
        self.timers.push(timer);
    }

    /// Run `task` at the start of the next frame, before any timers.
    pub fn on_next_frame(&mut self, task: Task) {
        self.next_frame.push(task);
    }

    /// Install the recurring task. Fires every `period`, starting one period
    /// from now. Replaces a previously installed interval.
    pub fn every(&mut self, period: Duration, task: Task) {
        self.interval = Some((period, task));
        self.after(period, task);
    }

    pub fn pending(&self) -> usize {
        self.timers.len() + self.next_frame.len()
    }

    /// Advance the clock by `dt` and return the tasks that became due, in
    /// firing order: queued frame callbacks first, then timers by deadline.
    ///
    /// The recurring task is re-armed relative to its own deadline so it does
    /// not drift with frame timing.
    pub fn advance(&mut self, dt: Duration) -> Vec<Task> {
        let mut due = std::mem::take(&mut self.next_frame);
        self.now += dt;

        while self.timers.peek().is_some_and(|t| t.due <= self.now) {
            let Some(timer) = self.timers.pop() else {
                break;
            };
            if let Some((period, task)) = self.interval {
                if task == timer.task {
                    let next = Timer {
                        due: timer.due + period,
                        seq: self.seq,
                        task,
                    };
                    self.seq += 1;
                    self.timers.push(next);
                }
            }
            due.push(timer.task);
        }
        due
    }
}
