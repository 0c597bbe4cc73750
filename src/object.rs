//! Common object header embedded in every kernel object.
//!
//! Generalizes the small-numeric-id newtype pattern the teacher uses for
//! `PortId`/`ThreadId` (`scheduler::ipc`, `scheduler::thread`) into a
//! single `ObjId` shared by every kind of kernel object, tagged with
//! [`ObjKind`] so the unified timer list (see [`crate::timerlist`]) can
//! tell a sleeping task apart from an expiring periodic timer without a
//! trait object.

/// Handle to any kernel object (task, mutex, semaphore, queue, ...).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjId(pub usize);

/// What kind of object an [`ObjId`] refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ObjKind {
    Task,
    Mutex,
    Semaphore,
    EventFlags,
    Condvar,
    Barrier,
    Mailbox,
    MsgQueue,
    JobQueue,
    StreamBuffer,
    MemPool,
    Signal,
}
