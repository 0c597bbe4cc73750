//! Kernel result codes.
//!
//! Mirrors the teacher's `scheduler::ipc::IpcError`: a plain enum with a
//! hand-written `Display` impl, no heap-allocating error type and no
//! `thiserror`. Contract violations (null handles, wrong isr context,
//! double-init) are not representable here at all — those are bugs, not
//! runtime conditions, and are reported through `debug_assert!`/`assert!`
//! instead (see the module docs in [`crate::sched`]).

use core::fmt;

/// Outcome of a blocking kernel operation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[must_use]
pub enum SysResult {
    /// The operation completed normally.
    Success,
    /// The calling task's wait timed out before the object signaled.
    Timeout,
    /// The object the task was waiting on was deleted while it waited.
    Stopped,
    /// A non-blocking send/enqueue found the object already full.
    Full,
    /// A non-blocking receive/dequeue found the object already empty and
    /// already deleted (object-specific; used by the queue-style adapters).
    Deleted,
}

impl SysResult {
    /// Shorthand used by call sites that only care about success/failure.
    pub fn is_ok(self) -> bool {
        matches!(self, SysResult::Success)
    }
}

impl fmt::Display for SysResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SysResult::Success => "success",
            SysResult::Timeout => "timeout",
            SysResult::Stopped => "object stopped",
            SysResult::Full => "object full",
            SysResult::Deleted => "object deleted",
        };
        f.write_str(s)
    }
}
