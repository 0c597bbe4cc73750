//! Counting semaphore.
//!
//! Grounded on `io_wait.rs`'s block/wake pairing; the counting state
//! itself is new — the teacher has no semaphore type anywhere in the
//! scheduler module, so `count`/`limit` are built directly from spec.md's
//! SUPPLEMENTED FEATURES entry for this adapter.

use crate::error::SysResult;
use crate::object::ObjId;
use crate::port::Port;
use crate::sched::Kernel;
use crate::tick::Tick;
use crate::wait::WaitQueue;

pub struct Semaphore {
    id: ObjId,
    count: u32,
    limit: u32,
    waiters: WaitQueue,
}

impl Semaphore {
    pub const fn new(id: ObjId, initial: u32, limit: u32) -> Self {
        Semaphore {
            id,
            count: initial,
            limit,
            waiters: WaitQueue::new(),
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Take one unit, blocking up to `timeout` ticks if none are available.
    pub fn wait<P: Port>(&mut self, kernel: &mut Kernel<P>, timeout: Tick) -> SysResult {
        if self.count > 0 {
            self.count -= 1;
            return SysResult::Success;
        }
        let caller = kernel.current();
        let result = kernel.block_current(&mut self.waiters, self.id, timeout);
        if result != SysResult::Success {
            kernel.remove_waiter(&mut self.waiters, caller);
        } else {
            // Woken directly by `signal`, which already accounted for the
            // unit it handed us; don't touch `count` here.
        }
        result
    }

    /// Release one unit, waking the highest-priority waiter if any,
    /// otherwise incrementing the count (capped at `limit`).
    pub fn signal<P: Port>(&mut self, kernel: &mut Kernel<P>) -> SysResult {
        if kernel.wake_one(&mut self.waiters, SysResult::Success) {
            return SysResult::Success;
        }
        if self.count >= self.limit {
            return SysResult::Full;
        }
        self.count += 1;
        SysResult::Success
    }
}
