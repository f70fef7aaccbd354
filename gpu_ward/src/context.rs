//! Device context: one device, its runtime configuration and its error poll
//!
//! A `Context` is reference-counted and `!Send`. Every resource keeps a clone
//! of the context it was created on, so resources can never migrate away from
//! the thread that owns the device.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::debug::{ErrorStats, ErrorTracker};
use crate::device::Device;
use crate::ward_error;
use crate::ward_info;

/// Runtime configuration of a context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Run the program validation pass after linking and poll the device
    /// error queue after every state-mutating call
    pub debug_checks: bool,
    /// Name used in log lines and reports
    pub label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug_checks: cfg!(debug_assertions),
            label: "ward".to_string(),
        }
    }
}

struct ContextInner {
    device: Box<dyn Device>,
    config: Config,
    tracker: RefCell<ErrorTracker>,
}

/// Shared handle to a device and its configuration
#[derive(Clone)]
pub struct Context {
    inner: Rc<ContextInner>,
}

impl Context {
    /// Wrap `device`. The device's context must already be current on this thread.
    pub fn new<D: Device + 'static>(device: D, config: Config) -> Self {
        ward_info!(
            "ward::Context",
            "Context '{}' created on {} (debug checks {})",
            config.label,
            device.name(),
            if config.debug_checks { "on" } else { "off" }
        );
        Self {
            inner: Rc::new(ContextInner {
                device: Box::new(device),
                config,
                tracker: RefCell::new(ErrorTracker::default()),
            }),
        }
    }

    /// Wrap `device` with the default configuration
    pub fn with_defaults<D: Device + 'static>(device: D) -> Self {
        Self::new(device, Config::default())
    }

    pub fn device(&self) -> &dyn Device {
        self.inner.device.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn debug_checks(&self) -> bool {
        self.inner.config.debug_checks
    }

    /// True if both handles refer to the same context
    pub fn same_as(&self, other: &Context) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Drain the device error queue and log every entry
    ///
    /// Does nothing when debug checks are off. Never fails: device errors are
    /// diagnostics, not operation failures. Returns the number of errors drained.
    pub fn check_errors(&self, call_site: &str) -> usize {
        if !self.inner.config.debug_checks {
            return 0;
        }
        let mut drained = 0;
        while let Some(code) = self.inner.device.poll_error() {
            drained += 1;
            let message = format!("{} raised by {}", code, call_site);
            let count = self.inner.tracker.borrow_mut().record(code, &message);
            if count > 1 {
                ward_error!("ward::Context", "[{}] {} [×{}]", self.inner.config.label, message, count);
            } else {
                ward_error!("ward::Context", "[{}] {}", self.inner.config.label, message);
            }
        }
        drained
    }

    /// Device error counters accumulated by [`Context::check_errors`]
    pub fn error_stats(&self) -> ErrorStats {
        self.inner.tracker.borrow().stats()
    }

    pub fn reset_error_stats(&self) {
        self.inner.tracker.borrow_mut().reset();
    }

    pub(crate) fn repeated_error_messages(&self) -> usize {
        self.inner.tracker.borrow().repeated_messages()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("device", &self.inner.device.name())
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
