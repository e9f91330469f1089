// SPDX-License-Identifier: MPL-2.0
//! Reporting sinks for [`TranslationEvent`]s.
//!
//! The reporting capability is injected into the [`crate::Localizer`] rather
//! than hardwired, so hosts can route events into their own logging and
//! tests can observe them without capturing stderr.

use std::sync::Mutex;

use super::TranslationEvent;

/// A sink for translation diagnostics.
///
/// Implementations must be cheap and non-blocking; reporting happens on the
/// translation path.
pub trait Reporter: Send + Sync {
    /// Records one event.
    fn report(&self, event: TranslationEvent);
}

/// Default reporter: writes each event to stderr.
#[derive(Debug, Default)]
pub struct StderrReporter;

impl Reporter for StderrReporter {
    fn report(&self, event: TranslationEvent) {
        eprintln!("{}", event);
    }
}

/// Reporter that keeps every event in memory, in arrival order.
///
/// Intended for tests and for hosts that surface diagnostics in their own
/// UI instead of a terminal.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: Mutex<Vec<TranslationEvent>>,
}

impl MemoryReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<TranslationEvent> {
        self.events.lock().expect("reporter mutex poisoned").clone()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().expect("reporter mutex poisoned").len()
    }

    /// True if nothing has been reported yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discards all recorded events.
    pub fn clear(&self) {
        self.events.lock().expect("reporter mutex poisoned").clear();
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, event: TranslationEvent) {
        self.events
            .lock()
            .expect("reporter mutex poisoned")
            .push(event);
    }
}
