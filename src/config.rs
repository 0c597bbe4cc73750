//! Compile-time kernel configuration.
//!
//! Everything the teacher would read from a runtime config struct is
//! resolved here at compile time instead: task and timer counts fix the
//! size of the fixed-capacity tables in [`crate::task`] and
//! [`crate::timerlist`], and the `logging`/`inheritance`/`round-robin`
//! Cargo features gate the corresponding ambient/optional behavior.

/// Maximum number of tasks the kernel can hold at once, including IDLE.
pub const MAX_TASKS: usize = 32;

/// Maximum number of outstanding timer/delay entries.
pub const MAX_TIMERS: usize = 32;

/// Maximum number of tasks that may simultaneously wait on one object.
pub const MAX_WAITERS: usize = 8;

/// Maximum number of mutexes a single task may hold at once.
pub const MAX_OWNED_MUTEXES: usize = 4;

/// `true` when built with the `round-robin` feature: equal-priority ready
/// tasks rotate at the end of their time slice instead of running to
/// completion.
pub const ROUND_ROBIN: bool = cfg!(feature = "round-robin");

/// `true` when built with the `inheritance` feature: mutex acquisition
/// recomputes effective priority along the owner chain.
pub const PRIORITY_INHERITANCE: bool = cfg!(feature = "inheritance");
