//! Message translation for formguard
//!
//! Validation messages are produced as English source strings and
//! translated when they are shown. A [`Dictionary`] holds one
//! [`MessageBundle`] per language and ships with a Russian bundle covering
//! the built-in messages.
//!
//! # Quick Start
//!
//! ```
//! use formguard_i18n::Dictionary;
//!
//! let dictionary = Dictionary::new();
//! dictionary.add_translation("Too early", "Слишком рано", "ru");
//!
//! assert_eq!(dictionary.translate("Too early", "ru-RU"), "Слишком рано");
//! assert_eq!(dictionary.translate("Too early", "de"), "Too early");
//! ```

mod dictionary;
mod error;
mod locale;

pub use dictionary::{Dictionary, MessageBundle};
pub use error::I18nError;
pub use locale::{Locale, normalize_tag};

/// Result type for i18n operations
pub type Result<T> = std::result::Result<T, I18nError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{Dictionary, I18nError, Locale, MessageBundle, Result};
}
