//! Per-task pending-signal bitmask with a blocking wait.
//!
//! Distinct from [`crate::ipc::event_flags::EventFlags`] by being
//! task-owned rather than object-owned: signals accumulate on the
//! *recipient*, not on a shared object every sender and receiver must
//! both hold a handle to, matching spec.md's SUPPLEMENTED FEATURES
//! wording for this adapter. Built directly on the task table rather
//! than a separate object — there is one `SignalState` per task, stored
//! alongside it.

use crate::error::SysResult;
use crate::object::ObjId;
use crate::port::Port;
use crate::sched::Kernel;
use crate::task::TaskId;
use crate::tick::{Tick, IMMEDIATE};
use crate::wait::WaitQueue;

/// One pending-signal mailbox, keyed by the task it belongs to. The
/// platform binary holds one of these per task (e.g. alongside its stack
/// allocation) and passes it to [`Signal::wait`]/[`Signal::raise`] for
/// that specific task.
pub struct Signal {
    id: ObjId,
    owner: TaskId,
    pending: u32,
    waiters: WaitQueue,
}

impl Signal {
    pub const fn new(id: ObjId, owner: TaskId) -> Self {
        Signal {
            id,
            owner,
            pending: 0,
            waiters: WaitQueue::new(),
        }
    }

    /// Block the owning task until any bit in `mask` is pending, then
    /// clear and return the bits that were set.
    pub fn wait<P: Port>(&mut self, kernel: &mut Kernel<P>, mask: u32, timeout: Tick) -> (SysResult, u32) {
        debug_assert_eq!(kernel.current(), self.owner, "Signal::wait called from a task other than its owner");
        loop {
            if self.pending & mask != 0 {
                let observed = self.pending & mask;
                self.pending &= !mask;
                return (SysResult::Success, observed);
            }
            if timeout == IMMEDIATE {
                return (SysResult::Timeout, 0);
            }
            let caller = kernel.current();
            let result = kernel.block_current(&mut self.waiters, self.id, timeout);
            if result != SysResult::Success {
                kernel.remove_waiter(&mut self.waiters, caller);
                return (result, 0);
            }
        }
    }

    /// Raise `mask`'s bits on the owning task and wake it if it is
    /// currently waiting.
    pub fn raise<P: Port>(&mut self, kernel: &mut Kernel<P>, mask: u32) {
        self.pending |= mask;
        kernel.wake_all(&mut self.waiters, SysResult::Success);
    }
}
