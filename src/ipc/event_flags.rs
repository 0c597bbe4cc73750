//! Event flag group: a set of bits any number of tasks can wait on, any
//! or all of which must become set to release a waiter.
//!
//! Grounded on `types.rs`'s `BlockReason` enum style for distinguishing
//! *why* a task is blocked — here that distinction (wait-any vs wait-all,
//! auto-clear or not) is carried per-waiter via [`WaitMode`], built with
//! `bitflags` the same way the teacher uses it elsewhere in the kernel
//! for hardware register layouts.

use bitflags::bitflags;

use crate::config::MAX_WAITERS;
use crate::error::SysResult;
use crate::object::ObjId;
use crate::port::Port;
use crate::sched::Kernel;
use crate::task::TaskId;
use crate::tick::Tick;
use crate::wait::WaitQueue;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct WaitMode: u8 {
        /// Release when *any* of the requested bits are set (default is *all*).
        const ANY        = 0b01;
        /// Clear the matched bits from the group on release.
        const AUTO_CLEAR = 0b10;
    }
}

struct Waiter {
    task: TaskId,
    mask: u32,
    mode: WaitMode,
}

pub struct EventFlags {
    id: ObjId,
    bits: u32,
    waiters: WaitQueue,
    pending: heapless::Vec<Waiter, MAX_WAITERS>,
}

impl EventFlags {
    pub fn new(id: ObjId) -> Self {
        EventFlags {
            id,
            bits: 0,
            waiters: WaitQueue::new(),
            pending: heapless::Vec::new(),
        }
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Block until `mask` is satisfied according to `mode`, or `timeout`
    /// ticks pass. Returns the group's bits at the moment of release.
    pub fn wait<P: Port>(&mut self, kernel: &mut Kernel<P>, mask: u32, mode: WaitMode, timeout: Tick) -> (SysResult, u32) {
        if self.satisfied(mask, mode) {
            let observed = self.apply_clear(mask, mode);
            return (SysResult::Success, observed);
        }
        let caller = kernel.current();
        if self.pending.push(Waiter { task: caller, mask, mode }).is_err() {
            return (SysResult::Full, self.bits);
        }
        let result = kernel.block_current(&mut self.waiters, self.id, timeout);
        self.pending.retain(|w| w.task != caller);
        if result != SysResult::Success {
            kernel.remove_waiter(&mut self.waiters, caller);
        }
        let observed = kernel.task(caller).scratch.flags;
        (result, observed)
    }

    /// Set `mask`'s bits and wake every waiter whose condition is now met.
    pub fn set<P: Port>(&mut self, kernel: &mut Kernel<P>, mask: u32) {
        self.bits |= mask;
        let mut i = 0;
        while i < self.pending.len() {
            if self.satisfied(self.pending[i].mask, self.pending[i].mode) {
                let w = self.pending.swap_remove(i);
                let observed = self.apply_clear(w.mask, w.mode);
                kernel.tasks.get_mut(w.task).scratch.flags = observed;
                kernel.remove_waiter(&mut self.waiters, w.task);
                kernel.wake(w.task, SysResult::Success);
            } else {
                i += 1;
            }
        }
    }

    pub fn clear(&mut self, mask: u32) {
        self.bits &= !mask;
    }

    fn satisfied(&self, mask: u32, mode: WaitMode) -> bool {
        if mode.contains(WaitMode::ANY) {
            self.bits & mask != 0
        } else {
            self.bits & mask == mask
        }
    }

    fn apply_clear(&mut self, mask: u32, mode: WaitMode) -> u32 {
        let observed = self.bits;
        if mode.contains(WaitMode::AUTO_CLEAR) {
            self.bits &= !mask;
        }
        observed
    }
}
