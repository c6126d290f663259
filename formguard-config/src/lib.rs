// Layered form options for formguard

pub mod builder;
pub mod error;
pub mod loader;
pub mod merge;
pub mod options;

pub use builder::{Layer, OptionsBuilder};
pub use error::{ConfigError, Result};
pub use loader::{FileFormat, OptionsLoader, from_attributes};
pub use merge::{deep_merge, merge_all, merge_into};
pub use options::{AjaxOptions, Containers, Options, SendType, States, Translations};
