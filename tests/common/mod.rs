//! Mock `Port` for exercising the kernel core on the host, the same
//! "host-testable core, kernel-specific extensions separate" split
//! documented informally around the teacher pack's async executor tests
//! (`hadron-kernel/src/sched/executor.rs` unit-tests its queues without
//! real hardware). Stack fabrication here just records the entry
//! function instead of building a real CPU register frame — tests drive
//! the scheduler's bookkeeping directly rather than actually jumping into
//! task code, since there is no real stack to jump into on the host.

use std::cell::Cell;

use stateos_kernel::port::Port;

pub struct MockPort {
    pub isr_depth: Cell<usize>,
}

impl MockPort {
    pub fn new() -> Self {
        MockPort { isr_depth: Cell::new(0) }
    }
}

impl Port for MockPort {
    fn isr_lock(&self) -> usize {
        let prev = self.isr_depth.get();
        self.isr_depth.set(prev + 1);
        prev
    }

    fn isr_unlock(&self, prev_state: usize) {
        self.isr_depth.set(prev_state);
    }

    fn isr_inside(&self) -> bool {
        false
    }

    fn ctx_switch(&self, current_sp: usize) -> usize {
        // No real stack switch on the host: the "stack pointer" is just
        // an opaque token threaded through so tests can assert the
        // dispatcher's bookkeeping is internally consistent.
        current_sp
    }

    fn prepare_first_frame(&self, stack_top: usize, _entry: fn(), _trampoline: fn() -> !) -> usize {
        stack_top
    }

    fn tmr_start(&self, _ticks: usize) {}
    fn tmr_stop(&self) {}
    fn tmr_force(&self) {}

    #[cfg(feature = "logging")]
    fn debug_write(&self, _line: core::fmt::Arguments<'_>) {}

    fn yield_now(&self) {
        // Tests call `Kernel::schedule`/`Kernel::tick` directly instead of
        // relying on a real trap, so blocking calls in these tests return
        // as soon as the task's wake condition is already satisfied
        // (e.g. a semaphore pre-signaled) rather than actually suspending.
    }
}
