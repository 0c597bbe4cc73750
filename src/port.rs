//! The context-switch seam: everything the kernel core needs from the
//! concrete CPU it is running on, and nothing more.
//!
//! Names and groups spec.md §6's platform port surface 1:1 as a trait.
//! The trait-object-free policy/mechanism split is grounded on the
//! teacher's `scheduler::traits::{Scheduler, KernelSchedCtx}` — here the
//! core (mechanism) owns scheduling policy directly and only defers to
//! `Port` for the parts that are genuinely CPU-specific: masking
//! interrupts, switching stacks, fabricating the first frame of a new
//! task, and arming the hardware tick source.
//!
//! A `Port` implementation lives in the platform binary that links this
//! crate in, never in the core itself.

/// CPU-specific services the kernel core requires from its host.
pub trait Port {
    /// Disable interrupts and return the previous state, so nested calls
    /// restore correctly (the "big kernel lock", spec.md §5). Must be
    /// callable from both task and ISR context.
    fn isr_lock(&self) -> usize;

    /// Restore the interrupt state returned by a matching `isr_lock`.
    fn isr_unlock(&self, prev_state: usize);

    /// `true` when called from within an interrupt handler.
    fn isr_inside(&self) -> bool;

    /// Perform the actual context switch: save `current_sp` to wherever
    /// the outgoing task's control block keeps it, and return the stack
    /// pointer to resume `next` from. On the very first dispatch of a
    /// task (`next`'s stack pointer is the one [`Port::prepare_first_frame`]
    /// fabricated), this just returns that value.
    fn ctx_switch(&self, current_sp: usize) -> usize;

    /// Trap into the scheduler and suspend the calling task until it is
    /// chosen to run again. Implemented by trapping (e.g. an SVC/software
    /// interrupt) into a handler that calls [`crate::sched::Kernel::schedule`]
    /// with the trap frame's stack pointer — the same mechanism a tick
    /// interrupt uses, just triggered explicitly instead of by the timer.
    /// Does not return to its caller until the task resumes, exactly the
    /// way `port_ctx_switch` only "returns" by virtue of the resumed
    /// task's own saved stack pointing back here.
    fn yield_now(&self);

    /// Build the initial register frame for a brand-new task so that the
    /// first `ctx_switch` into it behaves like returning from a normal
    /// switch: starts execution at `entry`, and returns to
    /// `trampoline` if `entry` itself ever returns (the stack-break
    /// trampoline; see `scheduler::scheduler::create_thread` and
    /// `thread_exit_trampoline` in the teacher for the concrete x86_64
    /// shape this generalizes). Returns the fabricated stack pointer.
    fn prepare_first_frame(&self, stack_top: usize, entry: fn(), trampoline: fn() -> !) -> usize;

    /// Arm the hardware tick source to fire again after `ticks` counts,
    /// or disable it entirely when `ticks` is [`crate::tick::INFINITE`]
    /// (tick-less idle).
    fn tmr_start(&self, ticks: usize);
    fn tmr_stop(&self);
    /// Force an immediate tick interrupt, used when a shorter deadline is
    /// armed while the timer is already counting down to a later one.
    fn tmr_force(&self);

    /// Write one formatted log line. Only called when the `logging`
    /// feature is enabled; see [`crate::logging`].
    #[cfg(feature = "logging")]
    fn debug_write(&self, line: core::fmt::Arguments<'_>);
}

/// Stub multi-core spinlock. The kernel core is single-core only (spec.md
/// Non-goals); this type exists so a future SMP port has a named seam to
/// fill in, and is never called from anywhere in this crate.
pub struct NoopSpinlock;

impl NoopSpinlock {
    pub const fn new() -> Self {
        NoopSpinlock
    }

    pub fn lock(&self) {}
    pub fn unlock(&self) {}
}

impl Default for NoopSpinlock {
    fn default() -> Self {
        Self::new()
    }
}
