//! Panic capture for spec bodies
//!
//! While a run is active the process panic hook is replaced with one that records the panic location (and a
//! backtrace, when `RUST_BACKTRACE` enables one) into a thread-local slot instead of printing it. The runner
//! reads the slot after `catch_unwind` returns to build the failure's stack text.

use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::RefCell;
use std::panic::{self, PanicHookInfo};
use std::sync::{Mutex, MutexGuard};

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

thread_local! {
    static LAST_PANIC: RefCell<Option<CapturedPanic>> = const { RefCell::new(None) };
}

/// Location and backtrace of the most recent panic on this thread.
#[derive(Debug, Clone, Default)]
pub struct CapturedPanic {
    pub location: Option<String>,
    pub backtrace: Option<String>,
}

impl CapturedPanic {
    /// Render as stack text for a failed expectation.
    pub fn stack(&self) -> String {
        let mut out = match &self.location {
            Some(location) => format!("panicked at {location}"),
            None => "panicked at <unknown location>".to_string(),
        };
        if let Some(backtrace) = &self.backtrace {
            out.push('\n');
            out.push_str(backtrace.trim_end());
        }
        out
    }
}

struct HookState {
    installs: usize,
    previous: Option<PanicHook>,
}

static HOOK_STATE: Mutex<HookState> = Mutex::new(HookState {
    installs: 0,
    previous: None,
});

fn hook_state() -> MutexGuard<'static, HookState> {
    HOOK_STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Keeps the capturing hook installed; the previous hook comes back when the last guard drops.
///
/// Guards nest and may overlap across threads (concurrent runs share one capturing hook).
pub struct HookGuard {
    _private: (),
}

impl HookGuard {
    pub fn install() -> Self {
        let mut state = hook_state();
        if state.installs == 0 {
            // A guard dropped mid-panic leaves the original hook parked here
            if state.previous.is_none() {
                state.previous = Some(panic::take_hook());
            }
            panic::set_hook(Box::new(|info| {
                let location = info.location().map(|l| l.to_string());
                let backtrace = Backtrace::capture();
                let backtrace = (backtrace.status() == BacktraceStatus::Captured).then(|| backtrace.to_string());
                LAST_PANIC.with(|slot| *slot.borrow_mut() = Some(CapturedPanic { location, backtrace }));
            }));
        }
        state.installs += 1;
        Self { _private: () }
    }
}

impl Drop for HookGuard {
    fn drop(&mut self) {
        let mut state = hook_state();
        state.installs = state.installs.saturating_sub(1);
        // set_hook panics when called from a panicking thread
        if state.installs > 0 || std::thread::panicking() {
            return;
        }
        if let Some(previous) = state.previous.take() {
            panic::set_hook(previous);
        }
    }
}

/// Take (and clear) the panic recorded on this thread, if any.
pub fn take_last() -> Option<CapturedPanic> {
    LAST_PANIC.with(|slot| slot.borrow_mut().take())
}

/// Extract the message from a `catch_unwind` payload.
pub fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "spec panicked with a non-string payload".to_string()
    }
}
