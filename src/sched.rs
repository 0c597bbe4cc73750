//! The dispatch engine and the `Kernel` singleton that owns every core
//! data structure.
//!
//! Grounded on the teacher's `scheduler::sched_core::SchedulerCore`/
//! `PerCpuSchedState` for the event-driven API shape (`on_tick`,
//! `process_ready`, `reschedule`) and `scheduler::traits::KernelSchedCtx`
//! for the query/mutate split, with the `PerCpuSchedState` multi-core
//! bookkeeping dropped (spec.md is single-core only). The concrete
//! dispatch sequence and stack-fabrication/trampoline detail are grounded
//! on `scheduler::scheduler::create_thread` (writes the exit trampoline
//! as the return address at `stack_top - 8`) and
//! `scheduler::mod::schedule_from_interrupt`.
//!
//! Only one `Kernel` may exist — constructing a second one over the same
//! `Port` would silently corrupt both instances' idea of what is
//! currently running, so the platform binary is expected to build exactly
//! one and hand out references to it, the same one-singleton-per-board
//! assumption the teacher's `lazy_static! { static ref SCHEDULER: ... }`
//! makes implicitly.

use heapless::Vec as HVec;

use crate::config::{self, MAX_TIMERS};
use crate::error::SysResult;
use crate::object::ObjId;
use crate::port::Port;
use crate::ready::Ready;
use crate::task::{Priority, Task, TaskId, TaskState, TaskTable, IDLE_PRIORITY};
use crate::tick::{Tick, INFINITE};
use crate::timerlist::{TimerEntry, TimerList};
use crate::wait::WaitQueue;

fn idle_entry() {
    loop {
        core::hint::spin_loop();
    }
}

fn idle_trampoline() -> ! {
    loop {
        core::hint::spin_loop();
    }
}

/// Owns every task, the ready list, and the timer list for one board.
pub struct Kernel<P: Port> {
    pub(crate) port: P,
    pub(crate) tasks: TaskTable,
    pub(crate) ready: Ready,
    pub(crate) timers: TimerList,
    pub(crate) tick: Tick,
    pub(crate) cur: Option<TaskId>,
    pub(crate) idle: TaskId,
    /// Periodic timer objects that fired since the last poll; drained by
    /// the periodic-timer IPC adapter, not consumed by the core itself.
    pending_periodic: HVec<ObjId, MAX_TIMERS>,
}

impl<P: Port> Kernel<P> {
    /// Build the kernel and its IDLE task. IDLE begins as the running
    /// task; call [`Kernel::spawn`] for every other task the platform
    /// binary needs before arming the tick source and enabling
    /// interrupts.
    pub fn new(port: P, idle_stack_top: usize) -> Self {
        let mut tasks = TaskTable::new();
        let idle = tasks.spawn(IDLE_PRIORITY).expect("task table has no room for IDLE");
        {
            let t = tasks.get_mut(idle);
            t.entry = Some(idle_entry);
            t.sp = port.prepare_first_frame(idle_stack_top, idle_entry, idle_trampoline);
            t.state = TaskState::Running;
        }
        let mut ready = Ready::new();
        ready.insert(&mut tasks, idle);
        ready.remove(&mut tasks, idle); // IDLE starts as the running task, not queued

        Kernel {
            port,
            tasks,
            ready,
            timers: TimerList::new(),
            tick: Tick::new(0),
            cur: Some(idle),
            idle,
            pending_periodic: HVec::new(),
        }
    }

    /// Pop one periodic-timer object that fired since the last call, if
    /// any. The periodic-timer adapter polls this from its own `signal`
    /// operation rather than the core pushing into the object directly,
    /// keeping the core free of any knowledge of the adapter types built
    /// on top of it.
    pub fn take_pending_periodic(&mut self) -> Option<ObjId> {
        if self.pending_periodic.is_empty() {
            None
        } else {
            Some(self.pending_periodic.remove(0))
        }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn now(&self) -> Tick {
        self.tick
    }

    pub fn current(&self) -> TaskId {
        self.cur.unwrap_or(self.idle)
    }

    pub fn task(&self, id: TaskId) -> &Task {
        self.tasks.get(id)
    }

    /// Create a new task and place it on the ready list. `stack_top` must
    /// point one-past-the-end of memory the caller owns for the
    /// lifetime of the task.
    pub fn spawn(&mut self, basic_prio: Priority, stack_top: usize, entry: fn()) -> Option<TaskId> {
        let id = self.tasks.spawn(basic_prio)?;
        let sp = self.port.prepare_first_frame(stack_top, entry, task_exit_trampoline);
        let t = self.tasks.get_mut(id);
        t.entry = Some(entry);
        t.stack_top = stack_top;
        t.sp = sp;
        t.state = TaskState::Ready;
        self.ready.insert(&mut self.tasks, id);
        Some(id)
    }

    /// Stop `id` unconditionally: pulls it out of the ready list, the
    /// timer list, and (via `waiters_of`, supplied by the caller) any
    /// object wait-queue it might be sitting on, matching spec.md §8
    /// scenario S5 — killing a task must not leave dangling references
    /// to it anywhere. If the caller knows `id` may own mutexes, it must
    /// read `kernel.task(id).owned_mutexes` and call each one's
    /// `Mutex::release_owner` *before* calling `kill`, since this clears
    /// that list as part of resetting the task.
    pub fn kill(&mut self, id: TaskId, waiters_of: Option<&mut WaitQueue>) {
        self.ready.remove(&mut self.tasks, id);
        self.timers.cancel_task(id);
        if let Some(q) = waiters_of {
            q.remove_waiter(&mut self.tasks, id);
        }
        let t = self.tasks.get_mut(id);
        t.state = TaskState::Stopped;
        t.guard = None;
        t.owned_mutexes.clear();
        if self.cur == Some(id) {
            self.cur = None;
        }
    }

    /// Block the current task on `queue` with an optional timeout
    /// (`INFINITE` to wait forever). Returns once woken, with the result
    /// the waker recorded in the task's scratch slot.
    ///
    /// The caller (an IPC adapter) must have already established why the
    /// task is waiting (e.g. queue full/empty) before calling this — this
    /// method only performs the generic suspend/resume dance.
    pub fn block_current(&mut self, queue: &mut WaitQueue, guard: ObjId, timeout: Tick) -> SysResult {
        let id = self.current();
        {
            let t = self.tasks.get_mut(id);
            t.state = TaskState::Blocked;
            t.guard = Some(guard);
            t.start = self.tick;
            t.delay = timeout;
            t.scratch.result = SysResult::Timeout;
        }
        queue.add_waiter(&mut self.tasks, id);
        if timeout != INFINITE {
            self.timers.insert(self.tick.add_delay(timeout), TimerEntry::Task(id));
        }
        self.reschedule_and_wait(id);
        self.tasks.get(id).scratch.result
    }

    /// Pop the single highest-priority waiter off `queue` without waking
    /// it yet, so the caller (an adapter performing ownership handoff,
    /// e.g. [`crate::mutex::Mutex::unlock`]) can finish its own
    /// bookkeeping before the task becomes runnable again.
    pub fn pop_waiter(&mut self, queue: &mut WaitQueue) -> Option<TaskId> {
        queue.pop_one(&mut self.tasks)
    }

    /// Wake a specific task already popped via [`Kernel::pop_waiter`].
    pub fn wake(&mut self, id: TaskId, result: SysResult) {
        self.wake_task(id, result);
    }

    /// Remove `id` from `queue` if it is still there. Safe to call
    /// unconditionally after a blocking call returns a non-`Success`
    /// result, in case the task's timeout fired before any waker reached
    /// it — `WaitQueue::remove_waiter` is a no-op when the task is
    /// already gone.
    pub fn remove_waiter(&mut self, queue: &mut WaitQueue, id: TaskId) {
        queue.remove_waiter(&mut self.tasks, id);
    }

    /// Wake the single highest-priority waiter on `queue` with `result`,
    /// placing it back on the ready list. Returns `true` iff a task was
    /// actually woken.
    pub fn wake_one(&mut self, queue: &mut WaitQueue, result: SysResult) -> bool {
        match queue.pop_one(&mut self.tasks) {
            Some(id) => {
                self.wake_task(id, result);
                true
            }
            None => false,
        }
    }

    /// Wake every waiter on `queue` with `result`.
    pub fn wake_all(&mut self, queue: &mut WaitQueue, result: SysResult) {
        while self.wake_one(queue, result) {}
    }

    fn wake_task(&mut self, id: TaskId, result: SysResult) {
        self.timers.cancel_task(id);
        let t = self.tasks.get_mut(id);
        t.state = TaskState::Ready;
        t.guard = None;
        t.scratch.result = result;
        self.ready.insert(&mut self.tasks, id);
    }

    /// Put the current task to sleep for `ticks` (spec.md §8 scenario S1).
    pub fn delay(&mut self, ticks: Tick) {
        let id = self.current();
        {
            let t = self.tasks.get_mut(id);
            t.state = TaskState::Delayed;
            t.start = self.tick;
            t.delay = ticks;
        }
        self.timers.insert(self.tick.add_delay(ticks), TimerEntry::Task(id));
        self.reschedule_and_wait(id);
    }

    /// Recompute `id`'s effective priority and re-seat it in whichever
    /// structure currently holds it (ready list or `queue`, if blocked).
    /// Used by the priority-inheritance mutex ([`crate::mutex`]) when a
    /// waiter's priority must propagate to the task it is waiting on.
    pub fn set_effective_prio(&mut self, id: TaskId, prio: Priority, queue: Option<&mut WaitQueue>) {
        self.tasks.get_mut(id).effective_prio = prio;
        match self.tasks.get(id).state {
            TaskState::Ready => {
                self.ready.remove(&mut self.tasks, id);
                self.ready.insert(&mut self.tasks, id);
            }
            TaskState::Blocked => {
                if let Some(q) = queue {
                    q.remove_waiter(&mut self.tasks, id);
                    q.add_waiter(&mut self.tasks, id);
                }
            }
            _ => {}
        }
    }

    /// Drive the timer list forward by one tick. Call from the platform
    /// binary's timer ISR. Wakes every task whose delay/timeout expired
    /// and re-arms every periodic timer whose period elapsed, then
    /// reschedules if the newly-ready set changed who should run.
    ///
    /// Order matches spec.md §4.3: all expiries for this tick are applied
    /// before the dispatch decision is made, so a higher-priority task
    /// woken by a timer preempts immediately rather than waiting one more
    /// tick.
    pub fn tick(&mut self, current_sp: usize) -> usize {
        self.tick = self.tick.add_delay(Tick::new(1));
        while let Some(entry) = self.timers.pop_expired(self.tick) {
            match entry {
                TimerEntry::Task(id) => {
                    let t = self.tasks.get(id);
                    let result = if matches!(t.state, TaskState::Delayed) {
                        SysResult::Success
                    } else {
                        SysResult::Timeout
                    };
                    self.wake_task(id, result);
                }
                TimerEntry::Periodic(obj) => {
                    // Adapters poll `pending_periodic` to learn their
                    // object fired; the core only re-delivers the tag.
                    self.pending_periodic.push(obj).ok();
                }
            }
        }
        self.schedule(current_sp)
    }

    /// Run the dispatch sequence: if the outgoing task is still `Running`
    /// (i.e. it wasn't just blocked or killed), return it to `Ready` and
    /// round-robin-rotate it behind equal-priority peers; then pick the
    /// new highest-priority ready task (IDLE if none), perform the
    /// context switch, and return the stack pointer to resume.
    pub fn schedule(&mut self, current_sp: usize) -> usize {
        if let Some(cur) = self.cur {
            self.tasks.get_mut(cur).sp = current_sp;
            if matches!(self.tasks.get(cur).state, TaskState::Running) {
                self.tasks.get_mut(cur).state = TaskState::Ready;
                self.ready.insert(&mut self.tasks, cur);
                if config::ROUND_ROBIN {
                    self.ready.rotate_front(&mut self.tasks, cur);
                }
            }
        }
        let next = self.ready.peek().unwrap_or(self.idle);
        self.ready.remove(&mut self.tasks, next);
        self.tasks.get_mut(next).state = TaskState::Running;
        self.cur = Some(next);
        self.port.ctx_switch(self.tasks.get(next).sp)
    }

    /// Suspend the calling task via [`Port::yield_now`] until it is woken.
    /// Bookkeeping (state, guard, timer-list entry) has already been set
    /// up by the caller; this is just the actual suspend point.
    fn reschedule_and_wait(&mut self, _id: TaskId) {
        self.port.yield_now();
    }
}

fn task_exit_trampoline() -> ! {
    // A task whose entry function returned instead of calling an exit
    // primitive falls through to here. There is no portable way to kill
    // the current task from inside itself without platform cooperation
    // (the stack is still in use), so the platform binary's trampoline
    // must call back into `Kernel::kill` with its own current task id
    // before triggering a reschedule.
    loop {
        core::hint::spin_loop();
    }
}
