//! Work queue: a fixed-capacity ring of deferred jobs consumed by a
//! single worker task.
//!
//! Grounded on `examples/Redstone-OS-forge/src/core/work/workqueue.rs`'s
//! `WorkQueue`/`WorkItem`: enqueue a unit of deferred work, drain it from
//! a dedicated worker. That version stores `Box<dyn WorkItem>` in a
//! `Spinlock<VecDeque<_>>` — this target has no allocator, so a job here
//! is a plain `fn(usize)` pointer plus one argument word instead of a
//! boxed trait object, carried in a fixed-capacity [`MsgQueue`] rather
//! than a heap-backed deque, with blocking `run_next` replacing that
//! file's own `process_all` polling loop (and its `// TODO: Acordar
//! worker thread` — this module's block/wake *is* that integration).

use crate::error::SysResult;
use crate::ipc::msg_queue::MsgQueue;
use crate::object::ObjId;
use crate::port::Port;
use crate::sched::Kernel;
use crate::tick::Tick;

/// A deferred unit of work: a plain function pointer plus one word of
/// context in place of a boxed trait object, since this target has no
/// allocator.
#[derive(Clone, Copy)]
pub struct Job {
    pub run: fn(usize),
    pub arg: usize,
}

pub struct JobQueue<const N: usize> {
    inner: MsgQueue<Job, N>,
}

impl<const N: usize> JobQueue<N> {
    pub fn new(id: ObjId) -> Self {
        JobQueue { inner: MsgQueue::new(id) }
    }

    /// Submit a job. Non-blocking callers should pass
    /// [`crate::tick::IMMEDIATE`] and handle [`SysResult::Full`].
    pub fn submit<P: Port>(&mut self, kernel: &mut Kernel<P>, job: Job, timeout: Tick) -> SysResult {
        self.inner.send(kernel, job, timeout)
    }

    /// Called by the worker task's main loop: fetch the next job,
    /// blocking until one is submitted, and run it.
    pub fn run_next<P: Port>(&mut self, kernel: &mut Kernel<P>, timeout: Tick) -> SysResult {
        let (result, job) = self.inner.recv(kernel, timeout);
        if let Some(job) = job {
            (job.run)(job.arg);
        }
        result
    }
}
