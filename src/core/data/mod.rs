//! Core data types shared by the parsers and the index.
//!
//! ## Module Structure
//!
//! - `language`: LanguageCode (normalized, case-insensitive language identifier)
//! - `message`: Translation types (FlatTable, KeyLocation, ResolvedTranslation)
//! - `settings`: Settings (root folder, default and fallback language)

pub mod language;
pub mod message;
pub mod settings;

pub use language::{LanguageCode, STATIC_FALLBACK_LANGUAGE};
pub use message::{FlatTable, KeyLocation, LocationMap, ResolvedTranslation};
pub use settings::Settings;
