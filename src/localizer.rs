// SPDX-License-Identifier: MPL-2.0
//! Key lookup with locale fallback and named-argument substitution.
//!
//! The fallback chain is: requested locale → default locale → the key
//! itself. Every lookup is fresh; nothing is cached and nothing on this
//! path fails the caller — the worst outcome is the raw key as display
//! text.

use std::sync::Arc;

use unic_langid::LanguageIdentifier;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::diagnostics::{Reporter, StderrReporter, TranslationEvent};
use crate::error::Result;

/// Translates keys against a [`Catalog`], tracking one selected locale.
///
/// The selected locale is plain mutable state with last-write-wins
/// semantics. A host serving concurrent requests with differing locales
/// must not share one selected locale; use the `*_with_locale` forms and
/// pass the request's locale explicitly instead.
pub struct Localizer {
    catalog: Catalog,
    current_locale: LanguageIdentifier,
    reporter: Arc<dyn Reporter>,
}

impl Localizer {
    /// Wraps `catalog`, selecting its default locale and reporting
    /// diagnostics to stderr.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        let current_locale = catalog.default_locale().clone();
        Self {
            catalog,
            current_locale,
            reporter: Arc::new(StderrReporter),
        }
    }

    /// Loads the embedded catalog and selects the starting locale from, in
    /// order: `explicit` (a host-supplied override), the `config` language
    /// preference, the OS locale, and finally the catalog's default.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded catalog fails to load.
    pub fn with_preferences(explicit: Option<String>, config: &Config) -> Result<Self> {
        let catalog = Catalog::load()?;
        let current_locale = resolve_locale(explicit, config, catalog.locales())
            .unwrap_or_else(|| catalog.default_locale().clone());
        Ok(Self {
            catalog,
            current_locale,
            reporter: Arc::new(StderrReporter),
        })
    }

    /// Replaces the diagnostic sink.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// The catalog this localizer reads from.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The currently selected locale.
    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    /// The catalog's default locale.
    #[must_use]
    pub fn default_locale(&self) -> &LanguageIdentifier {
        self.catalog.default_locale()
    }

    /// Supported locales, in catalog construction order.
    #[must_use]
    pub fn locales(&self) -> &[LanguageIdentifier] {
        self.catalog.locales()
    }

    /// Selects the locale used by [`Localizer::translate`].
    ///
    /// Returns `true` if `candidate` parses as a locale code and is in the
    /// supported set. Otherwise the selection is left unchanged, an
    /// [`TranslationEvent::UnsupportedLocale`] diagnostic is reported, and
    /// `false` is returned; callers are expected to carry on with the
    /// previous locale.
    pub fn set_locale(&mut self, candidate: &str) -> bool {
        if let Ok(locale) = candidate.parse::<LanguageIdentifier>() {
            if self.catalog.is_supported(&locale) {
                self.current_locale = locale;
                return true;
            }
        }
        self.reporter.report(TranslationEvent::UnsupportedLocale {
            locale: candidate.to_string(),
        });
        false
    }

    /// Translates `key` using the currently selected locale.
    #[must_use]
    pub fn translate(&self, key: &str) -> String {
        self.translate_with_locale(&self.current_locale, key)
    }

    /// Translates `key` using the currently selected locale, then
    /// substitutes `args` (see [`Localizer::translate_with_locale_args`]).
    #[must_use]
    pub fn translate_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.translate_with_locale_args(&self.current_locale, key, args)
    }

    /// Translates `key` in an explicitly given `locale`.
    ///
    /// `locale` is expected to be one of [`Localizer::locales`]; an
    /// unsupported locale is not rejected, it simply has no dictionary and
    /// degrades through the fallback chain like any miss.
    #[must_use]
    pub fn translate_with_locale(&self, locale: &LanguageIdentifier, key: &str) -> String {
        self.lookup(locale, key)
    }

    /// Translates `key` in an explicitly given `locale`, then replaces every
    /// occurrence of `{{name}}` with the paired value, one argument at a
    /// time in slice order.
    ///
    /// Substitution is literal: values are not escaped or re-scanned for
    /// protection, so a value containing a `{{…}}` token that matches a
    /// later argument's placeholder gets substituted again. Callers that
    /// interpolate untrusted values should order `args` accordingly.
    #[must_use]
    pub fn translate_with_locale_args(
        &self,
        locale: &LanguageIdentifier,
        key: &str,
        args: &[(&str, &str)],
    ) -> String {
        apply_args(&self.lookup(locale, key), args)
    }

    fn lookup(&self, locale: &LanguageIdentifier, key: &str) -> String {
        if let Some(translation) = self.catalog.dictionary(locale).and_then(|d| d.get(key)) {
            return translation.clone();
        }

        // Reported on every miss, even when the default-locale fallback
        // below satisfies the lookup.
        self.reporter.report(TranslationEvent::MissingTranslation {
            locale: locale.to_string(),
            key: key.to_string(),
        });

        if locale != self.catalog.default_locale() {
            if let Some(translation) = self
                .catalog
                .dictionary(self.catalog.default_locale())
                .and_then(|d| d.get(key))
            {
                return translation.clone();
            }
        }
        key.to_string()
    }
}

/// Replaces every `{{name}}` occurrence for each `(name, value)` pair, in
/// slice order.
fn apply_args(template: &str, args: &[(&str, &str)]) -> String {
    let mut translation = template.to_string();
    for (name, value) in args {
        let placeholder = format!("{{{{{}}}}}", name);
        translation = translation.replace(&placeholder, value);
    }
    translation
}

/// Resolves the starting locale from host preference sources.
///
/// Checks, in order: an explicit override, the configured language, the OS
/// locale. Each candidate counts only if it parses and is in `available`.
fn resolve_locale(
    explicit: Option<String>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    if let Some(lang_str) = explicit {
        if let Ok(lang) = lang_str.parse::<LanguageIdentifier>() {
            if available.contains(&lang) {
                return Some(lang);
            }
        }
    }

    if let Some(lang_str) = &config.language {
        if let Ok(lang) = lang_str.parse::<LanguageIdentifier>() {
            if available.contains(&lang) {
                return Some(lang);
            }
        }
    }

    if let Some(os_locale_str) = sys_locale::get_locale() {
        if let Ok(os_lang) = os_locale_str.parse::<LanguageIdentifier>() {
            if available.contains(&os_lang) {
                return Some(os_lang);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Dictionary;
    use crate::diagnostics::MemoryReporter;

    fn dict(pairs: &[(&str, &str)]) -> Dictionary {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Minimal en/de catalog with de as the default locale.
    fn sample_catalog() -> Catalog {
        let en: LanguageIdentifier = "en".parse().unwrap();
        let de: LanguageIdentifier = "de".parse().unwrap();
        Catalog::from_locales(
            vec![
                (
                    en,
                    dict(&[
                        ("greet", "Hello {{name}}"),
                        ("plain", "A plain string"),
                        ("tokens", "{{x}} and {{x}}"),
                    ]),
                ),
                (
                    de.clone(),
                    dict(&[
                        ("greet", "Hallo {{name}}"),
                        ("plain", "Ein einfacher Text"),
                        ("default-only", "Nur auf Deutsch"),
                        ("default-greet", "Willkommen {{name}}"),
                    ]),
                ),
            ],
            de,
        )
        .expect("sample catalog should build")
    }

    fn observed_localizer() -> (Localizer, Arc<MemoryReporter>) {
        let reporter = Arc::new(MemoryReporter::new());
        let localizer =
            Localizer::new(sample_catalog()).with_reporter(reporter.clone() as Arc<dyn Reporter>);
        (localizer, reporter)
    }

    fn locale(code: &str) -> LanguageIdentifier {
        code.parse().unwrap()
    }

    #[test]
    fn stored_string_is_returned_verbatim() {
        let (localizer, reporter) = observed_localizer();
        assert_eq!(
            localizer.translate_with_locale(&locale("en"), "plain"),
            "A plain string"
        );
        assert!(reporter.is_empty());
    }

    #[test]
    fn starting_locale_is_the_default_locale() {
        let (localizer, _) = observed_localizer();
        assert_eq!(localizer.current_locale(), localizer.default_locale());
        assert_eq!(localizer.translate("plain"), "Ein einfacher Text");
    }

    #[test]
    fn set_locale_accepts_supported_locale() {
        let (mut localizer, reporter) = observed_localizer();
        assert!(localizer.set_locale("en"));
        assert_eq!(localizer.current_locale(), &locale("en"));
        assert_eq!(localizer.translate("plain"), "A plain string");
        assert!(reporter.is_empty());
    }

    #[test]
    fn set_locale_rejects_unsupported_locale_and_keeps_previous() {
        let (mut localizer, reporter) = observed_localizer();
        assert!(!localizer.set_locale("fr"));
        assert_eq!(localizer.current_locale(), &locale("de"));
        assert_eq!(
            reporter.events(),
            vec![TranslationEvent::UnsupportedLocale {
                locale: "fr".to_string()
            }]
        );
        // Subsequent translation still uses the previously active locale.
        assert_eq!(localizer.translate("plain"), "Ein einfacher Text");
    }

    #[test]
    fn set_locale_rejects_unparsable_candidate() {
        let (mut localizer, reporter) = observed_localizer();
        assert!(!localizer.set_locale("not a locale!"));
        assert_eq!(reporter.len(), 1);
    }

    #[test]
    fn translate_matches_explicit_form_after_selection() {
        let (mut localizer, _) = observed_localizer();
        assert!(localizer.set_locale("en"));
        assert_eq!(
            localizer.translate("greet"),
            localizer.translate_with_locale(&locale("en"), "greet")
        );
    }

    #[test]
    fn missing_key_falls_back_to_default_locale_and_reports() {
        let (localizer, reporter) = observed_localizer();
        assert_eq!(
            localizer.translate_with_locale(&locale("en"), "default-only"),
            "Nur auf Deutsch"
        );
        // The diagnostic fires on the initial miss even though the
        // fallback succeeded.
        assert_eq!(
            reporter.events(),
            vec![TranslationEvent::MissingTranslation {
                locale: "en".to_string(),
                key: "default-only".to_string()
            }]
        );
    }

    #[test]
    fn key_missing_everywhere_falls_back_to_itself() {
        let (localizer, reporter) = observed_localizer();
        assert_eq!(
            localizer.translate_with_locale(&locale("en"), "missingKey"),
            "missingKey"
        );
        // One diagnostic for the initial miss, none for the default-locale
        // miss.
        assert_eq!(reporter.len(), 1);
    }

    #[test]
    fn key_missing_in_default_locale_falls_back_to_itself() {
        let (localizer, reporter) = observed_localizer();
        assert_eq!(
            localizer.translate_with_locale(&locale("de"), "missingKey"),
            "missingKey"
        );
        assert_eq!(reporter.len(), 1);
    }

    #[test]
    fn substitution_replaces_named_argument() {
        let (localizer, _) = observed_localizer();
        assert_eq!(
            localizer.translate_with_locale_args(&locale("en"), "greet", &[("name", "Ann")]),
            "Hello Ann"
        );
    }

    #[test]
    fn substitution_replaces_all_occurrences() {
        let (localizer, _) = observed_localizer();
        assert_eq!(
            localizer.translate_with_locale_args(&locale("en"), "tokens", &[("x", "a")]),
            "a and a"
        );
    }

    #[test]
    fn substitution_applies_to_fallback_value() {
        let (localizer, reporter) = observed_localizer();
        // "default-greet" only exists in the default locale; substitution
        // still runs on the fallback result.
        assert_eq!(
            localizer.translate_with_locale_args(&locale("en"), "default-greet", &[("name", "Ann")]),
            "Willkommen Ann"
        );
        assert_eq!(reporter.len(), 1);
    }

    #[test]
    fn substitution_applies_to_identity_fallback() {
        let (localizer, _) = observed_localizer();
        assert_eq!(
            localizer.translate_with_locale_args(
                &locale("en"),
                "literal {{who}}",
                &[("who", "key")]
            ),
            "literal key"
        );
    }

    #[test]
    fn no_args_leaves_placeholder_tokens_verbatim() {
        let (localizer, _) = observed_localizer();
        assert_eq!(
            localizer.translate_with_locale(&locale("en"), "greet"),
            "Hello {{name}}"
        );
        assert_eq!(
            localizer.translate_with_locale_args(&locale("en"), "greet", &[]),
            "Hello {{name}}"
        );
    }

    #[test]
    fn unknown_argument_names_are_ignored() {
        let (localizer, _) = observed_localizer();
        assert_eq!(
            localizer.translate_with_locale_args(&locale("en"), "greet", &[("nobody", "x")]),
            "Hello {{name}}"
        );
    }

    #[test]
    fn substitution_is_sequential_in_argument_order() {
        // A value containing a later argument's placeholder is substituted
        // again. Sequential, order-dependent behavior, kept as-is.
        assert_eq!(
            apply_args("{{a}}", &[("a", "{{b}}"), ("b", "B")]),
            "B"
        );
        // Reversed order: {{b}} is gone before "a" introduces a new one.
        assert_eq!(
            apply_args("{{a}}", &[("b", "B"), ("a", "{{b}}")]),
            "{{b}}"
        );
    }

    #[test]
    fn unsupported_locale_in_explicit_form_degrades_through_fallback() {
        let (localizer, reporter) = observed_localizer();
        assert_eq!(
            localizer.translate_with_locale(&locale("fr"), "plain"),
            "Ein einfacher Text"
        );
        assert_eq!(reporter.len(), 1);
    }

    #[test]
    fn resolve_locale_prefers_explicit_override() {
        let config = Config {
            language: Some("de".to_string()),
        };
        let available = vec![locale("en"), locale("de")];
        let resolved = resolve_locale(Some("en".to_string()), &config, &available);
        assert_eq!(resolved, Some(locale("en")));
    }

    #[test]
    fn resolve_locale_uses_config_language() {
        let config = Config {
            language: Some("en".to_string()),
        };
        let available = vec![locale("en"), locale("de")];
        let resolved = resolve_locale(None, &config, &available);
        assert_eq!(resolved, Some(locale("en")));
    }

    #[test]
    fn resolve_locale_ignores_unsupported_preferences() {
        let config = Config {
            language: Some("fr".to_string()),
        };
        let available = vec![locale("en"), locale("de")];
        let resolved = resolve_locale(Some("it".to_string()), &config, &available);
        // Falls through to the OS locale, which is system dependent; it can
        // only ever resolve to a supported locale.
        if let Some(l) = resolved {
            assert!(available.contains(&l));
        }
    }
}
