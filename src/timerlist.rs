//! Unified delay/timer list.
//!
//! A single deadline-ordered collection of both sleeping tasks and
//! periodic timers, dispatched at expiry through the [`TimerEntry`] sum
//! type rather than through a trait object — spec.md §9's Design Note
//! calls this out explicitly, since the two expiry actions (wake a task,
//! fire a periodic timer's callback hook) are different enough that a
//! shared trait would just be an indirection over a two-armed `match`.
//!
//! The teacher has no periodic-timer concept at all — `scheduler::scheduler`
//! only tracks a `sleep_until_ms` field per thread. The sleeping-task half
//! here is grounded on that field and on `get_next_thread`'s expiry scan;
//! the periodic-timer half is built directly from spec.md §3/§4.3, since
//! no example in the pack implements one.
//!
//! Entries are kept in insertion order in a fixed-capacity vector and
//! scanned in full on every tick rather than kept sorted by deadline:
//! deadlines are wrap-safe relative comparisons (see [`crate::tick`]), and
//! a global sort order would require picking an arbitrary reference point
//! to compare against before "now" is known. At `MAX_TIMERS` ~= 32 a
//! linear scan per tick is cheap enough that the extra bookkeeping isn't
//! worth it. Removal always shifts rather than swap-removes, so insertion
//! order among the entries that remain is never disturbed — required by
//! spec.md §4.3's ordering contract: entries due on the same tick are
//! delivered in the order they were armed.

use heapless::Vec as HVec;

use crate::config::MAX_TIMERS;
use crate::object::ObjId;
use crate::task::TaskId;
use crate::tick::Tick;

/// What a timer-list entry does when its deadline passes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimerEntry {
    /// Wake a task sleeping on [`crate::sched::Kernel::delay`] or blocked
    /// with a timeout on an object's wait queue.
    Task(TaskId),
    /// Re-arm and signal a periodic timer object.
    Periodic(ObjId),
}

struct Slot {
    deadline: Tick,
    entry: TimerEntry,
}

pub struct TimerList {
    slots: HVec<Slot, MAX_TIMERS>,
}

impl TimerList {
    pub fn new() -> Self {
        TimerList { slots: HVec::new() }
    }

    /// Arm `entry` to fire at `deadline`. Returns `false` if the list is
    /// already at capacity (a configuration error — see [`crate::config`]).
    pub fn insert(&mut self, deadline: Tick, entry: TimerEntry) -> bool {
        self.slots.push(Slot { deadline, entry }).is_ok()
    }

    /// Cancel the timer-list entry belonging to `task`, if any (a task
    /// waking for a reason other than its timeout still needs its pending
    /// timeout entry removed).
    pub fn cancel_task(&mut self, task: TaskId) {
        if let Some(pos) = self.slots.iter().position(|s| s.entry == TimerEntry::Task(task)) {
            self.slots.remove(pos);
        }
    }

    pub fn cancel_periodic(&mut self, obj: ObjId) {
        if let Some(pos) = self.slots.iter().position(|s| s.entry == TimerEntry::Periodic(obj)) {
            self.slots.remove(pos);
        }
    }

    /// Remove and return one expired entry, if any are due at `now`. Call
    /// repeatedly from the tick handler until it returns `None` — several
    /// entries may expire on the same tick, delivered in the order they
    /// were armed (the first matching index is always the earliest-armed
    /// one, since insertion order is preserved).
    pub fn pop_expired(&mut self, now: Tick) -> Option<TimerEntry> {
        let pos = self.slots.iter().position(|s| s.deadline.has_expired(now))?;
        Some(self.slots.remove(pos).entry)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for TimerList {
    fn default() -> Self {
        Self::new()
    }
}
