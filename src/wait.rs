//! The generic object wait-queue: the single blocking/waking mechanism
//! every IPC adapter in [`crate::ipc`] is a thin veneer over.
//!
//! Grounded on `examples/valibali-cluu/kernel/src/scheduler/io_wait.rs` in
//! full — `WaitQueue { waiting_threads: Vec<ThreadId> }` with
//! `add_waiter`/`wake_all`/`remove_waiter`, and the `wait_for_io`/
//! `wake_io_waiters` pairing. Generalized here from a FIFO `Vec` keyed by
//! a global `BTreeMap<IoChannel, WaitQueue>` lookup to a priority-ordered
//! [`crate::intrusive::PrioList`] embedded directly in each object's own
//! header, so waking picks the highest-priority waiter first rather than
//! whichever arrived first (spec.md §4.2).

use crate::intrusive::PrioList;
use crate::task::{TaskId, TaskTable};

#[derive(Default)]
pub struct WaitQueue {
    list: PrioList,
}

impl WaitQueue {
    pub const fn new() -> Self {
        WaitQueue { list: PrioList::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Add `id` to the queue. The caller is responsible for transitioning
    /// `table[id].state` to `Blocked` and arming any timeout on the
    /// timer list — this module only tracks queue membership.
    pub fn add_waiter(&mut self, table: &mut TaskTable, id: TaskId) {
        self.list.insert(table, id);
    }

    pub fn remove_waiter(&mut self, table: &mut TaskTable, id: TaskId) {
        self.list.remove(table, id);
    }

    /// The single highest-priority waiter, without removing it.
    pub fn peek(&self) -> Option<TaskId> {
        self.list.peek()
    }

    /// Pop the single highest-priority waiter and hand it to the caller,
    /// which applies the actual wake (sets scratch, reinserts on the
    /// ready list, cancels any timeout). The dual-use truthy-return
    /// `wake_one`/`wake_all` pair spec.md §9's Open Question asks about
    /// lives on [`crate::sched::Kernel`] (`wake_one` returns `bool`,
    /// `wake_all` is `while wake_one(...) {}`) since waking a task also
    /// means reinserting it on the ready list and cancelling its timeout,
    /// which only the kernel — not this module — has the state to do.
    pub fn pop_one(&mut self, table: &mut TaskTable) -> Option<TaskId> {
        self.list.pop_front(table)
    }
}
