// SPDX-License-Identifier: MPL-2.0
//! `lingua_lens` is a lightweight static-string localization library.
//!
//! It resolves a translation key to a human-readable string in a selected
//! locale, falling back to the default locale and finally to the key itself,
//! and substitutes named `{{placeholder}}` arguments into the result.

#![doc(html_root_url = "https://docs.rs/lingua_lens/0.1.0")]

pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod localizer;

pub use catalog::{Catalog, Dictionary, DEFAULT_LOCALE};
pub use localizer::Localizer;
