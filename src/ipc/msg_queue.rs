//! Fixed-capacity message queue.
//!
//! Grounded on `scheduler::ipc::Port`'s `message_queue: VecDeque<QueuedMessage>`
//! and its blocking `port_recv`/non-blocking `port_try_recv` split, moved
//! onto `heapless::Deque` (capacity fixed at `N`, no allocation) and made
//! to block both ways (`port_send` in the teacher is fire-and-forget;
//! spec.md requires a blocking send for a bounded queue).
//!
//! Send and receive both retry in a loop after being woken rather than
//! assuming a single direct handoff: on this single-core kernel nothing
//! else runs between a wake and the woken task's retry, so the retry is
//! always against the post-wake state, but writing it as a loop rather
//! than a one-shot handoff keeps `N > 1` capacities and multiple waiters
//! on each side correct without extra bookkeeping.

use heapless::Deque;

use crate::error::SysResult;
use crate::object::ObjId;
use crate::port::Port;
use crate::sched::Kernel;
use crate::tick::{Tick, IMMEDIATE};
use crate::wait::WaitQueue;

pub struct MsgQueue<T, const N: usize> {
    id: ObjId,
    items: Deque<T, N>,
    not_empty: WaitQueue,
    not_full: WaitQueue,
}

impl<T, const N: usize> MsgQueue<T, N> {
    pub fn new(id: ObjId) -> Self {
        MsgQueue {
            id,
            items: Deque::new(),
            not_empty: WaitQueue::new(),
            not_full: WaitQueue::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn send<P: Port>(&mut self, kernel: &mut Kernel<P>, item: T, timeout: Tick) -> SysResult {
        loop {
            if !self.items.is_full() {
                let _ = self.items.push_back(item);
                kernel.wake_one(&mut self.not_empty, SysResult::Success);
                return SysResult::Success;
            }
            if timeout == IMMEDIATE {
                return SysResult::Full;
            }
            let caller = kernel.current();
            let result = kernel.block_current(&mut self.not_full, self.id, timeout);
            if result != SysResult::Success {
                kernel.remove_waiter(&mut self.not_full, caller);
                return result;
            }
        }
    }

    pub fn recv<P: Port>(&mut self, kernel: &mut Kernel<P>, timeout: Tick) -> (SysResult, Option<T>) {
        loop {
            if let Some(item) = self.items.pop_front() {
                kernel.wake_one(&mut self.not_full, SysResult::Success);
                return (SysResult::Success, Some(item));
            }
            if timeout == IMMEDIATE {
                return (SysResult::Timeout, None);
            }
            let caller = kernel.current();
            let result = kernel.block_current(&mut self.not_empty, self.id, timeout);
            if result != SysResult::Success {
                kernel.remove_waiter(&mut self.not_empty, caller);
                return (result, None);
            }
        }
    }
}
