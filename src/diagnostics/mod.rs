// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for non-fatal translation problems.
//!
//! Lookups never fail the caller; instead, the two degenerate situations
//! (selecting an unsupported locale, looking up a missing key) are reported
//! as typed events through an injected [`Reporter`]. The default reporter
//! writes to stderr; tests inject a [`MemoryReporter`] and assert on the
//! recorded events directly.

mod events;
mod reporter;

pub use events::TranslationEvent;
pub use reporter::{MemoryReporter, Reporter, StderrReporter};
