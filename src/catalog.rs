// SPDX-License-Identifier: MPL-2.0
//! The translation catalog: an immutable mapping from locale to dictionary.
//!
//! The catalog is built once, before first use, and shared read-only by all
//! callers. Locale dictionaries are flat string-to-string maps; values may
//! contain `{{name}}` placeholder tokens that the [`crate::Localizer`]
//! substitutes at translation time.
//!
//! The bundled dictionaries live in `assets/locales/` as one JSON object per
//! locale and are embedded into the binary at build time. The file stem is
//! the locale code (`en.json` provides `en`).

use std::collections::HashMap;

use rust_embed::RustEmbed;
use unic_langid::LanguageIdentifier;

use crate::error::{Error, Result};

#[derive(RustEmbed)]
#[folder = "assets/locales/"]
struct Asset;

/// Key-to-translated-string mapping for one locale.
pub type Dictionary = HashMap<String, String>;

/// Locale used when no preference resolves and as the fallback for keys
/// missing from other locales' dictionaries.
pub const DEFAULT_LOCALE: &str = "de";

/// Immutable locale → [`Dictionary`] mapping.
///
/// The set of supported locales is closed once the catalog is constructed;
/// lookups never mutate it. The default locale is guaranteed to have a
/// dictionary (checked at construction).
#[derive(Debug, Clone)]
pub struct Catalog {
    dictionaries: HashMap<LanguageIdentifier, Dictionary>,
    locales: Vec<LanguageIdentifier>,
    default_locale: LanguageIdentifier,
}

impl Catalog {
    /// Builds the catalog from the embedded locale resources.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalog`] if a resource name does not parse as a
    /// locale, a resource is not a flat JSON string map, or the default
    /// locale ends up without a dictionary.
    pub fn load() -> Result<Self> {
        let mut entries = Vec::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            if let Some(stem) = filename.strip_suffix(".json") {
                let locale: LanguageIdentifier = stem.parse().map_err(|_| {
                    Error::Catalog(format!("invalid locale resource name: {}", filename))
                })?;
                let content = Asset::get(filename).ok_or_else(|| {
                    Error::Catalog(format!("unreadable locale resource: {}", filename))
                })?;
                let dictionary: Dictionary = serde_json::from_slice(content.data.as_ref())?;
                entries.push((locale, dictionary));
            }
        }

        let default_locale = DEFAULT_LOCALE
            .parse()
            .expect("DEFAULT_LOCALE is a valid locale code");
        Self::from_locales(entries, default_locale)
    }

    /// Builds a catalog from pre-loaded dictionaries.
    ///
    /// The supported-locale order follows `entries` order; a duplicate
    /// locale replaces the earlier dictionary without changing the order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalog`] if `default_locale` has no dictionary in
    /// `entries`.
    pub fn from_locales(
        entries: Vec<(LanguageIdentifier, Dictionary)>,
        default_locale: LanguageIdentifier,
    ) -> Result<Self> {
        let mut dictionaries = HashMap::new();
        let mut locales = Vec::new();

        for (locale, dictionary) in entries {
            if dictionaries.insert(locale.clone(), dictionary).is_none() {
                locales.push(locale);
            }
        }

        if !dictionaries.contains_key(&default_locale) {
            return Err(Error::Catalog(format!(
                "default locale {} has no dictionary",
                default_locale
            )));
        }

        Ok(Self {
            dictionaries,
            locales,
            default_locale,
        })
    }

    /// The locale used as the fallback target.
    #[must_use]
    pub fn default_locale(&self) -> &LanguageIdentifier {
        &self.default_locale
    }

    /// Supported locales, in catalog construction order.
    #[must_use]
    pub fn locales(&self) -> &[LanguageIdentifier] {
        &self.locales
    }

    /// The dictionary for `locale`, if that locale is supported.
    #[must_use]
    pub fn dictionary(&self, locale: &LanguageIdentifier) -> Option<&Dictionary> {
        self.dictionaries.get(locale)
    }

    /// Whether `locale` is a member of the supported set.
    #[must_use]
    pub fn is_supported(&self, locale: &LanguageIdentifier) -> bool {
        self.dictionaries.contains_key(locale)
    }
}
