//! Byte-oriented ring buffer with blocking partial reads/writes.
//!
//! Distinct from [`crate::ipc::msg_queue::MsgQueue`] by operating on a
//! byte stream rather than whole fixed-size messages: a writer may be
//! satisfied by writing fewer bytes than it asked for if the buffer fills
//! partway through, and a reader similarly may get fewer bytes than
//! requested. Grounded on the same block/wake shape as the rest of this
//! module, built over a plain `[u8; N]` ring since `heapless` has no
//! dedicated byte-ring type.

use crate::error::SysResult;
use crate::object::ObjId;
use crate::port::Port;
use crate::sched::Kernel;
use crate::tick::{Tick, IMMEDIATE};
use crate::wait::WaitQueue;

pub struct StreamBuffer<const N: usize> {
    id: ObjId,
    buf: [u8; N],
    head: usize,
    len: usize,
    not_empty: WaitQueue,
    not_full: WaitQueue,
}

impl<const N: usize> StreamBuffer<N> {
    pub const fn new(id: ObjId) -> Self {
        StreamBuffer {
            id,
            buf: [0; N],
            head: 0,
            len: 0,
            not_empty: WaitQueue::new(),
            not_full: WaitQueue::new(),
        }
    }

    fn push(&mut self, byte: u8) {
        let tail = (self.head + self.len) % N;
        self.buf[tail] = byte;
        self.len += 1;
    }

    fn pop(&mut self) -> u8 {
        let byte = self.buf[self.head];
        self.head = (self.head + 1) % N;
        self.len -= 1;
        byte
    }

    /// Write as many of `data`'s bytes as fit without blocking, then (if
    /// any remain and `timeout` permits) block for room and keep going.
    /// Returns the number of bytes actually written.
    pub fn write<P: Port>(&mut self, kernel: &mut Kernel<P>, data: &[u8], timeout: Tick) -> (SysResult, usize) {
        let mut written = 0;
        while written < data.len() {
            if self.len == N {
                if timeout == IMMEDIATE {
                    break;
                }
                let caller = kernel.current();
                let result = kernel.block_current(&mut self.not_full, self.id, timeout);
                if result != SysResult::Success {
                    kernel.remove_waiter(&mut self.not_full, caller);
                    break;
                }
                continue;
            }
            self.push(data[written]);
            written += 1;
        }
        if written > 0 {
            kernel.wake_one(&mut self.not_empty, SysResult::Success);
        }
        let result = if written == data.len() { SysResult::Success } else { SysResult::Timeout };
        (result, written)
    }

    /// Read up to `out.len()` bytes, blocking for at least one if the
    /// buffer starts empty and `timeout` permits. Returns the number of
    /// bytes actually read.
    pub fn read<P: Port>(&mut self, kernel: &mut Kernel<P>, out: &mut [u8], timeout: Tick) -> (SysResult, usize) {
        if self.len == 0 {
            if timeout == IMMEDIATE {
                return (SysResult::Timeout, 0);
            }
            let caller = kernel.current();
            let result = kernel.block_current(&mut self.not_empty, self.id, timeout);
            if result != SysResult::Success {
                kernel.remove_waiter(&mut self.not_empty, caller);
                return (result, 0);
            }
        }
        let mut read = 0;
        while read < out.len() && self.len > 0 {
            out[read] = self.pop();
            read += 1;
        }
        if read > 0 {
            kernel.wake_one(&mut self.not_full, SysResult::Success);
        }
        (SysResult::Success, read)
    }
}
