//! Condition variable paired with an external mutex.
//!
//! Grounded on spec.md's GLOSSARY condvar definition; the release/block/
//! reacquire shape is modeled on `ipc.rs::port_recv`'s block-loop
//! (`loop { ... block_current_thread(); yield_now(); }`), generalized
//! here to release and later reacquire a caller-supplied lock instead of
//! a Mach port.

use crate::error::SysResult;
use crate::mutex::Mutex;
use crate::object::ObjId;
use crate::port::Port;
use crate::sched::Kernel;
use crate::tick::{Tick, INFINITE};
use crate::wait::WaitQueue;

pub struct Condvar {
    id: ObjId,
    waiters: WaitQueue,
}

impl Condvar {
    pub const fn new(id: ObjId) -> Self {
        Condvar {
            id,
            waiters: WaitQueue::new(),
        }
    }

    /// Release `mutex`, block until notified or `timeout` ticks pass,
    /// then reacquire `mutex` before returning — the caller always gets
    /// the lock back, even on timeout, matching the usual condvar contract.
    pub fn wait<P: Port>(&mut self, kernel: &mut Kernel<P>, mutex: &mut Mutex, timeout: Tick) -> SysResult {
        let caller = kernel.current();
        // A task waiting on a condvar never holds another mutex at the
        // same time in this adapter's contract, so there is nothing else
        // to report as still-owned here.
        mutex.unlock(kernel, &[]);
        let result = kernel.block_current(&mut self.waiters, self.id, timeout);
        if result != SysResult::Success {
            kernel.remove_waiter(&mut self.waiters, caller);
        }
        mutex.lock(kernel, INFINITE);
        result
    }

    pub fn notify_one<P: Port>(&mut self, kernel: &mut Kernel<P>) -> bool {
        kernel.wake_one(&mut self.waiters, SysResult::Success)
    }

    pub fn notify_all<P: Port>(&mut self, kernel: &mut Kernel<P>) {
        kernel.wake_all(&mut self.waiters, SysResult::Success);
    }
}
