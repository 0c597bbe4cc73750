//! Structured logging through the `log` crate facade, routed over
//! whatever sink the platform `Port` provides instead of a hardcoded
//! serial writer.
//!
//! Grounded on `examples/valibali-cluu/kernel/src/utils/logger.rs`'s
//! `CluuLogger`: a `log::Log` impl backed by a single static logger
//! registered once via `log::set_logger`/`set_max_level`. The teacher
//! writes directly to a VGA-text/serial `Writer`; this version writes
//! through [`crate::port::Port::debug_write`] since the core has no
//! concrete architecture to target.

use core::sync::atomic::{AtomicBool, Ordering};

use log::{Level, LevelFilter, Log, Metadata, Record};
use spin::Once;

/// Installed once at boot. A raw pointer to the `Port`, not a reference,
/// since `log::Log` requires `'static` and the port's own lifetime is
/// "as long as the kernel runs" — the same assumption the teacher makes
/// by reaching for a `static ref` in `lazy_static!`.
struct KernelLogger {
    write: Once<fn(core::fmt::Arguments<'_>)>,
    enabled: AtomicBool,
}

static LOGGER: KernelLogger = KernelLogger {
    write: Once::new(),
    enabled: AtomicBool::new(true),
};

impl Log for KernelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.enabled.load(Ordering::Relaxed) && metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(write) = self.write.get() {
            write(format_args!("[{}] {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

/// Install the kernel logger, routing every log line through `sink`
/// (typically a thin wrapper around `P::debug_write` for the concrete
/// `Port` the platform binary uses). Call once at boot, before any task
/// starts running. Panics on a second call, matching the teacher's
/// `init()` which panics if `log::set_logger` fails.
pub fn init(sink: fn(core::fmt::Arguments<'_>)) {
    LOGGER.write.call_once(|| sink);
    log::set_logger(&LOGGER)
        .map(|()| log::set_max_level(LevelFilter::Info))
        .expect("kernel logger already installed");
}

/// Disable/re-enable logging at runtime without tearing down the
/// registered `log::Log` impl (useful for quieting a noisy ISR path).
pub fn set_enabled(enabled: bool) {
    LOGGER.enabled.store(enabled, Ordering::Relaxed);
}
