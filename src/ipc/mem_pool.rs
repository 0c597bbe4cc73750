//! Fixed-size block pool: `CAP` same-size blocks carved out of a static
//! arena, handed out and returned by index rather than by pointer so the
//! pool needs no allocator of its own.
//!
//! Grounded on spec.md's SUPPLEMENTED FEATURES entry; the free-list-of-
//! indices technique mirrors the index-based linking used throughout
//! [`crate::task`] and [`crate::ready`] for the same no-pointer-surgery
//! reason.

use heapless::Vec as HVec;

use crate::error::SysResult;
use crate::object::ObjId;
use crate::port::Port;
use crate::sched::Kernel;
use crate::tick::{Tick, IMMEDIATE};
use crate::wait::WaitQueue;

pub struct MemPool<const CAP: usize, const BLOCK: usize> {
    id: ObjId,
    arena: [[u8; BLOCK]; CAP],
    free: HVec<u8, CAP>,
    waiters: WaitQueue,
}

impl<const CAP: usize, const BLOCK: usize> MemPool<CAP, BLOCK> {
    pub fn new(id: ObjId) -> Self {
        let mut free = HVec::new();
        for i in 0..CAP {
            let _ = free.push(i as u8);
        }
        MemPool {
            id,
            arena: [[0; BLOCK]; CAP],
            free,
            waiters: WaitQueue::new(),
        }
    }

    /// Claim one block, blocking up to `timeout` ticks if the pool is
    /// exhausted. Returns the block's index, used to address it via
    /// [`MemPool::block_mut`] and later return it via [`MemPool::free`].
    pub fn alloc<P: Port>(&mut self, kernel: &mut Kernel<P>, timeout: Tick) -> (SysResult, Option<u8>) {
        loop {
            if let Some(idx) = self.free.pop() {
                return (SysResult::Success, Some(idx));
            }
            if timeout == IMMEDIATE {
                return (SysResult::Full, None);
            }
            let caller = kernel.current();
            let result = kernel.block_current(&mut self.waiters, self.id, timeout);
            if result != SysResult::Success {
                kernel.remove_waiter(&mut self.waiters, caller);
                return (result, None);
            }
        }
    }

    pub fn free_block<P: Port>(&mut self, kernel: &mut Kernel<P>, idx: u8) {
        let _ = self.free.push(idx);
        kernel.wake_one(&mut self.waiters, SysResult::Success);
    }

    pub fn block_mut(&mut self, idx: u8) -> &mut [u8; BLOCK] {
        &mut self.arena[idx as usize]
    }
}
