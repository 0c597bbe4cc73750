//! Task control block and the fixed-capacity task table.
//!
//! Grounded on the teacher's `scheduler::thread::Thread`/`ThreadState`
//! (field shape, `ThreadId(pub usize)` newtype) and generalized per the
//! task record in spec.md §3: `basic_prio`/`effective_prio` are tracked
//! separately so the priority-inheritance mutex (see [`crate::mutex`]) can
//! raise the latter without losing the former, and every link between
//! tasks is an index into this table rather than a pointer — there is no
//! allocator on the target, and `heapless::Vec` gives a static, bounded
//! footprint instead.

use heapless::Vec as HVec;

use crate::config::{MAX_OWNED_MUTEXES, MAX_TASKS};
use crate::error::SysResult;
use crate::object::ObjId;
use crate::tick::{Tick, INFINITE};

/// Task priority. Zero is the lowest priority (used by IDLE); higher
/// numeric values run first, per spec.md §5.
pub type Priority = u8;

pub const IDLE_PRIORITY: Priority = 0;

/// Handle to a task, indexing directly into [`TaskTable`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub usize);

/// Which structure currently owns a task: at most one of ready list,
/// timer list, or a wait queue at a time, tracked here rather than by
/// searching every structure to find out where a task currently lives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TaskState {
    /// Not yet started, or exited; holds no resources.
    Stopped,
    /// On the ready list, eligible to run.
    Ready,
    /// Currently the task the dispatcher handed the CPU to.
    Running,
    /// Sleeping on the timer list until `start + delay`.
    Delayed,
    /// Blocked on an object's wait queue, optionally with a timeout also
    /// tracked on the timer list.
    Blocked,
}

/// Per-task scratch data filled in by whichever object last woke the
/// task, read back by the adapter that put it to sleep. Generalizes the
/// task record's single `tmp` field from spec.md §3: `result` is set by
/// every waker (see `Kernel::wake_task`), `flags` is an extra word a few
/// adapters (event flags) use to hand back data the bare `SysResult`
/// can't carry, without the two stepping on each other.
#[derive(Debug, Copy, Clone)]
pub struct TaskScratch {
    pub result: SysResult,
    pub flags: u32,
}

impl Default for TaskScratch {
    fn default() -> Self {
        TaskScratch {
            result: SysResult::Timeout,
            flags: 0,
        }
    }
}

/// The task control block.
pub struct Task {
    pub id: TaskId,
    pub stack_top: usize,
    pub sp: usize,
    pub entry: Option<fn()>,
    pub basic_prio: Priority,
    pub effective_prio: Priority,
    pub state: TaskState,
    /// Tick at which the current delay/timeout started.
    pub start: Tick,
    /// Length of the current delay/timeout; [`INFINITE`] means none.
    pub delay: Tick,
    /// Object the task is blocked on, if any.
    pub guard: Option<ObjId>,
    /// Intrusive link to the next task in whichever queue currently owns
    /// this task (ready list or a wait queue); `None` at the tail.
    pub link_next: Option<TaskId>,
    /// Mutexes currently owned by this task, most-recently-acquired last;
    /// walked when recomputing effective priority.
    pub owned_mutexes: HVec<ObjId, MAX_OWNED_MUTEXES>,
    pub scratch: TaskScratch,
}

impl Task {
    fn new(id: TaskId, basic_prio: Priority) -> Self {
        Task {
            id,
            stack_top: 0,
            sp: 0,
            entry: None,
            basic_prio,
            effective_prio: basic_prio,
            state: TaskState::Stopped,
            start: Tick::new(0),
            delay: INFINITE,
            guard: None,
            link_next: None,
            owned_mutexes: HVec::new(),
            scratch: TaskScratch::default(),
        }
    }
}

/// Fixed-capacity table of every task the kernel knows about. `TaskId`s
/// are stable indices into `slots`; a task is never removed, only reset
/// to `Stopped` and left for the next `spawn` to reuse, mirroring the
/// teacher's "no dynamic task creation beyond caller-supplied storage"
/// constraint (spec.md Non-goals).
pub struct TaskTable {
    slots: HVec<Task, MAX_TASKS>,
}

impl TaskTable {
    pub fn new() -> Self {
        TaskTable { slots: HVec::new() }
    }

    /// Allocate the next free slot for a new task. Returns `None` when
    /// the table is full — the caller owns all storage, so "full" is a
    /// configuration error the platform binary must size around, not a
    /// condition the core recovers from at runtime.
    pub fn spawn(&mut self, basic_prio: Priority) -> Option<TaskId> {
        if let Some(slot) = self.slots.iter().position(|t| matches!(t.state, TaskState::Stopped) && t.entry.is_none()) {
            let id = TaskId(slot);
            self.slots[slot] = Task::new(id, basic_prio);
            return Some(id);
        }
        let id = TaskId(self.slots.len());
        self.slots.push(Task::new(id, basic_prio)).ok()?;
        Some(id)
    }

    pub fn get(&self, id: TaskId) -> &Task {
        &self.slots[id.0]
    }

    pub fn get_mut(&mut self, id: TaskId) -> &mut Task {
        &mut self.slots[id.0]
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.slots.iter()
    }
}

impl Default for TaskTable {
    fn default() -> Self {
        Self::new()
    }
}
