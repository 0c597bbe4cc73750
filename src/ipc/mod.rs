//! Thin IPC adapters built entirely from [`crate::wait::WaitQueue`],
//! [`crate::timerlist::TimerList`] deadlines, and (for the mutex) the
//! priority-inheritance engine in [`crate::mutex`]. None of these add new
//! core mechanism; each is the smallest adapter that proves the
//! wait/wake + timer API the core exposes is actually sufficient to build
//! a real primitive on top of, per SPEC_FULL.md §9.
//!
//! Grounded on `examples/valibali-cluu/kernel/src/scheduler/ipc.rs`'s
//! `Port`/`Message` send-recv shape (fixed-size payload, blocking both
//! directions), reworked off `alloc::collections::VecDeque` and onto
//! `heapless` containers since the core may not allocate.

pub mod barrier;
pub mod condvar;
pub mod event_flags;
pub mod job_queue;
pub mod mailbox;
pub mod mem_pool;
pub mod msg_queue;
pub mod semaphore;
pub mod signal;
pub mod stream_buffer;
