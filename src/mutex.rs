//! Blocking mutex with optional priority inheritance.
//!
//! Grounded directly on spec.md §4.4's pseudocode: acquiring a contended
//! mutex raises its owner's effective priority to the maximum of the
//! owner's own basic priority and every current waiter's priority, and
//! releasing recomputes the releasing task's effective priority from
//! whatever mutexes it still holds. The teacher's own `sync`-adjacent
//! code (`Redstone-OS-forge/src/sync/mutex/mutex.rs`) is a spin-only stub
//! with literal `// TODO: Integrar com scheduler` / `// TODO: Acordar
//! threads esperando` comments and cannot ground inheritance semantics at
//! all; this module instead builds on the one place the teacher's own
//! scheduler anticipates lock-aware blocking,
//! `scheduler::types::BlockReason::WaitingForLock { lock_id }`.
//!
//! Ownership on release is handed directly to the next waiter (rather
//! than set to `None` and left for the woken task to re-claim) to avoid a
//! window, on the releasing task's own still-running stack, where a
//! second `lock()` call could steal the mutex out from under the waiter
//! that was just chosen.

use crate::config::PRIORITY_INHERITANCE;
use crate::error::SysResult;
use crate::object::ObjId;
use crate::port::Port;
use crate::sched::Kernel;
use crate::task::{Priority, TaskId};
use crate::tick::Tick;
use crate::wait::WaitQueue;

pub struct Mutex {
    id: ObjId,
    owner: Option<TaskId>,
    recursion: u32,
    recursive: bool,
    waiters: WaitQueue,
}

impl Mutex {
    pub const fn new(id: ObjId, recursive: bool) -> Self {
        Mutex {
            id,
            owner: None,
            recursion: 0,
            recursive,
            waiters: WaitQueue::new(),
        }
    }

    pub fn owner(&self) -> Option<TaskId> {
        self.owner
    }

    /// Acquire the mutex, blocking up to `timeout` ticks if already held.
    pub fn lock<P: Port>(&mut self, kernel: &mut Kernel<P>, timeout: Tick) -> SysResult {
        let caller = kernel.current();
        match self.owner {
            None => {
                self.take_ownership(kernel, caller);
                SysResult::Success
            }
            Some(owner) if owner == caller && self.recursive => {
                self.recursion += 1;
                SysResult::Success
            }
            Some(owner) => {
                if PRIORITY_INHERITANCE {
                    let waiter_prio = kernel.tasks.get(caller).effective_prio;
                    let owner_prio = kernel.tasks.get(owner).effective_prio;
                    if waiter_prio > owner_prio {
                        kernel.set_effective_prio(owner, waiter_prio, None);
                    }
                }
                let result = kernel.block_current(&mut self.waiters, self.id, timeout);
                if result != SysResult::Success {
                    // Timed out or the mutex was deleted from under us;
                    // make sure we're not still parked on the wait queue.
                    kernel.remove_waiter(&mut self.waiters, caller);
                }
                // On `Success`, `unlock` already performed the ownership
                // handoff to us before waking us up.
                result
            }
        }
    }

    /// Release the mutex. Hands ownership directly to the highest-priority
    /// waiter, if any, and recomputes the releasing task's effective
    /// priority from whatever mutexes it still holds.
    ///
    /// `other_owned` must list every other mutex `caller` currently owns
    /// besides this one — the core keeps no global `ObjId`-to-`Mutex`
    /// registry (no allocator, no `dyn` dispatch available), so whoever
    /// owns the concrete `Mutex` storage supplies them. Pass `&[]` if the
    /// caller never holds more than one mutex at a time.
    pub fn unlock<P: Port>(&mut self, kernel: &mut Kernel<P>, other_owned: &[&Mutex]) -> SysResult {
        let caller = kernel.current();
        if self.owner != Some(caller) {
            return SysResult::Stopped;
        }
        self.recursion -= 1;
        if self.recursion > 0 {
            return SysResult::Success;
        }

        self.drop_ownership(kernel, caller);

        if PRIORITY_INHERITANCE {
            recompute_holder_priority(kernel, caller, other_owned);
        }

        match kernel.pop_waiter(&mut self.waiters) {
            Some(next) => {
                self.take_ownership(kernel, next);
                kernel.wake(next, SysResult::Success);
            }
            None => self.owner = None,
        }
        SysResult::Success
    }

    /// Drop all claim this mutex has on `task` (called from
    /// [`Kernel::kill`] when the task being killed owns this mutex),
    /// handing ownership to the next waiter the same way `unlock` would.
    pub fn release_owner<P: Port>(&mut self, kernel: &mut Kernel<P>, task: TaskId) {
        if self.owner != Some(task) {
            return;
        }
        self.owner = None;
        self.recursion = 0;
        match kernel.pop_waiter(&mut self.waiters) {
            Some(next) => {
                self.take_ownership(kernel, next);
                kernel.wake(next, SysResult::Success);
            }
            None => {}
        }
    }

    fn take_ownership<P: Port>(&mut self, kernel: &mut Kernel<P>, task: TaskId) {
        self.owner = Some(task);
        self.recursion = 1;
        let t = kernel.tasks.get_mut(task);
        let _ = t.owned_mutexes.push(self.id);
    }

    fn drop_ownership<P: Port>(&mut self, kernel: &mut Kernel<P>, task: TaskId) {
        let t = kernel.tasks.get_mut(task);
        if let Some(pos) = t.owned_mutexes.iter().position(|m| *m == self.id) {
            t.owned_mutexes.swap_remove(pos);
        }
    }

    /// The effective priority of the highest-priority task currently
    /// waiting on this mutex, if any.
    pub fn highest_waiter_prio<P: Port>(&self, kernel: &Kernel<P>) -> Option<Priority> {
        self.waiters.peek().map(|id| kernel.task(id).effective_prio)
    }
}

/// Recompute `holder`'s effective priority as the max of its basic
/// priority and the highest waiter priority across every mutex it still
/// owns, per spec.md §4.4: `effective_prio(task) = max(task.basic, max
/// over mutexes t owns of highest waiter priority)`. `other_owned` is
/// every mutex `holder` still owns besides the one just released.
fn recompute_holder_priority<P: Port>(kernel: &mut Kernel<P>, holder: TaskId, other_owned: &[&Mutex]) {
    let mut best = kernel.tasks.get(holder).basic_prio;
    for m in other_owned {
        if let Some(p) = m.highest_waiter_prio(kernel) {
            if p > best {
                best = p;
            }
        }
    }
    kernel.set_effective_prio(holder, best, None);
}
