// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for translation lookups.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A non-fatal problem observed during locale selection or key lookup.
///
/// Both cases degrade gracefully (the selection is ignored, the lookup falls
/// back); the event records that the degradation happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TranslationEvent {
    /// A locale outside the supported set was passed to locale selection.
    UnsupportedLocale {
        /// The rejected candidate, verbatim.
        locale: String,
    },

    /// A key had no entry in the requested locale's dictionary.
    ///
    /// Emitted on every miss, including misses that the default-locale
    /// fallback subsequently satisfies.
    MissingTranslation {
        /// Locale whose dictionary was consulted first.
        locale: String,
        /// The key that had no translation there.
        key: String,
    },
}

impl fmt::Display for TranslationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationEvent::UnsupportedLocale { locale } => {
                write!(f, "Attempted to select unsupported locale: {}", locale)
            }
            TranslationEvent::MissingTranslation { locale, key } => {
                write!(f, "Untranslated key in {}: {}", locale, key)
            }
        }
    }
}
