//! N-party rendezvous: the last task to arrive wakes everyone else.
//!
//! Grounded on the same block/wake pairing as `io_wait.rs`; the
//! arrival-count threshold is new (spec.md names barriers as a
//! SUPPLEMENTED FEATURE the teacher has no equivalent of).

use crate::error::SysResult;
use crate::object::ObjId;
use crate::port::Port;
use crate::sched::Kernel;
use crate::tick::Tick;
use crate::wait::WaitQueue;

pub struct Barrier {
    id: ObjId,
    parties: u32,
    arrived: u32,
    waiters: WaitQueue,
}

impl Barrier {
    pub const fn new(id: ObjId, parties: u32) -> Self {
        Barrier {
            id,
            parties,
            arrived: 0,
            waiters: WaitQueue::new(),
        }
    }

    /// Arrive at the barrier. The task that completes the last arrival
    /// releases every other waiter and returns immediately itself; every
    /// other caller blocks until that happens or `timeout` ticks pass.
    pub fn wait<P: Port>(&mut self, kernel: &mut Kernel<P>, timeout: Tick) -> SysResult {
        self.arrived += 1;
        if self.arrived >= self.parties {
            self.arrived = 0;
            kernel.wake_all(&mut self.waiters, SysResult::Success);
            return SysResult::Success;
        }
        let caller = kernel.current();
        let result = kernel.block_current(&mut self.waiters, self.id, timeout);
        if result != SysResult::Success {
            kernel.remove_waiter(&mut self.waiters, caller);
            self.arrived = self.arrived.saturating_sub(1);
        }
        result
    }
}
