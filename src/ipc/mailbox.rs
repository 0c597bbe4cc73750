//! Single-slot rendezvous mailbox, layered directly on [`MsgQueue`] with
//! its capacity fixed at 1 — a mailbox is a message queue with nothing
//! extra, so there's no separate implementation to keep in sync.

use crate::error::SysResult;
use crate::ipc::msg_queue::MsgQueue;
use crate::object::ObjId;
use crate::port::Port;
use crate::sched::Kernel;
use crate::tick::Tick;

pub struct Mailbox<T> {
    inner: MsgQueue<T, 1>,
}

impl<T> Mailbox<T> {
    pub fn new(id: ObjId) -> Self {
        Mailbox { inner: MsgQueue::new(id) }
    }

    pub fn post<P: Port>(&mut self, kernel: &mut Kernel<P>, item: T, timeout: Tick) -> SysResult {
        self.inner.send(kernel, item, timeout)
    }

    pub fn take<P: Port>(&mut self, kernel: &mut Kernel<P>, timeout: Tick) -> (SysResult, Option<T>) {
        self.inner.recv(kernel, timeout)
    }
}
