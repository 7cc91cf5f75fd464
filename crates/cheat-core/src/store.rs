//! Active-code store and per-tick executor.
//!
//! One [`CodeStore`] instance owns everything the engine mutates at runtime:
//! the active code list, the self-log buffer, and the process-wide flags.
//! The mutex serializes mutations against reads from other threads (a UI
//! draining the self-log); the flags are relaxed atomics readable without it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::code::ArCode;
use crate::error::ErrorReporter;
use crate::execute::run_code;
use crate::log::SelfLog;
use crate::memory::GuestMemory;

struct StoreInner {
    active: Vec<ArCode>,
    log_lines: Vec<String>,
    /// Set after each executor pass; cleared by the next code mutation.
    logging_latched_off: bool,
}

/// Process-wide set of active codes plus the self-log.
///
/// All mutating operations and the per-tick pass are gated on the host's
/// cheats-enabled flag and become no-ops while it is off.
pub struct CodeStore {
    inner: Mutex<StoreInner>,
    self_logging: AtomicBool,
    cheats_enabled: AtomicBool,
}

impl CodeStore {
    /// Creates an empty store with cheats disabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                active: Vec::new(),
                log_lines: Vec::new(),
                logging_latched_off: false,
            }),
            self_logging: AtomicBool::new(false),
            cheats_enabled: AtomicBool::new(false),
        }
    }

    /// Sets the host's cheats-enabled gate.
    pub fn set_cheats_enabled(&self, enabled: bool) {
        self.cheats_enabled.store(enabled, Ordering::Relaxed);
    }

    /// Reads the cheats-enabled gate. A transition mid-tick makes that tick
    /// either fully apply or fully skip.
    #[must_use]
    pub fn cheats_enabled(&self) -> bool {
        self.cheats_enabled.load(Ordering::Relaxed)
    }

    /// Replaces the active set with the active codes from `codes`, in order.
    pub fn apply_codes(&self, codes: &[ArCode]) {
        if !self.cheats_enabled() {
            return;
        }
        let mut inner = self.inner.lock().expect("code store poisoned");
        inner.logging_latched_off = false;
        inner.active = codes.iter().filter(|code| code.active).cloned().collect();
    }

    /// Appends `code` to the active set when its flag is set.
    pub fn add_code(&self, code: ArCode) {
        if !self.cheats_enabled() {
            return;
        }
        if code.active {
            let mut inner = self.inner.lock().expect("code store poisoned");
            inner.logging_latched_off = false;
            inner.active.push(code);
        }
    }

    /// Returns a snapshot of the active set in execution order.
    #[must_use]
    pub fn active_codes(&self) -> Vec<ArCode> {
        self.inner.lock().expect("code store poisoned").active.clone()
    }

    /// The per-tick entry point: runs every active code in order against
    /// `mem`, removing codes whose run failed and reporting each failure.
    ///
    /// The store lock is held for the whole pass, so no mutation is
    /// observable mid-pass. Afterwards further logging is latched off until
    /// the next [`CodeStore::apply_codes`] or [`CodeStore::add_code`].
    pub fn run_all_active(&self, mem: &mut dyn GuestMemory, reporter: &mut dyn ErrorReporter) {
        if !self.cheats_enabled() {
            return;
        }

        let mut inner = self.inner.lock().expect("code store poisoned");
        let log_enabled = self.is_self_logging() && !inner.logging_latched_off;

        let StoreInner {
            active, log_lines, ..
        } = &mut *inner;
        let mut log = SelfLog::new(log_enabled, log_lines);

        active.retain(|code| match run_code(code, mem, &mut log) {
            Ok(()) => true,
            Err(error) => {
                reporter.report(&error);
                false
            }
        });

        inner.logging_latched_off = true;
    }

    /// Turns self-logging on or off. Readable without the store lock; a
    /// stale read is acceptable.
    pub fn enable_self_logging(&self, enable: bool) {
        self.self_logging.store(enable, Ordering::Relaxed);
    }

    /// True when trace lines are being captured.
    #[must_use]
    pub fn is_self_logging(&self) -> bool {
        self.self_logging.load(Ordering::Relaxed)
    }

    /// Returns a copy of the captured trace lines.
    #[must_use]
    pub fn get_self_log(&self) -> Vec<String> {
        self.inner
            .lock()
            .expect("code store poisoned")
            .log_lines
            .clone()
    }

    /// Discards the captured trace lines.
    pub fn clear_self_log(&self) {
        self.inner
            .lock()
            .expect("code store poisoned")
            .log_lines
            .clear();
    }
}

impl Default for CodeStore {
    fn default() -> Self {
        Self::new()
    }
}
