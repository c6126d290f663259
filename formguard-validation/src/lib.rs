//! Rule evaluation engine for formguard
//!
//! Validates a snapshot of form data against per-field rules. Rules are
//! resolved against a registry of named methods, may be gated on the values
//! of other fields, and produce human-readable messages in declaration order.
//!
//! # Examples
//!
//! ## Validating a Form Snapshot
//!
//! ```
//! use formguard_validation::*;
//!
//! let rules = RuleSet::new()
//!     .field("name", FieldRules::new().rule("required", true).rule("minLength", 3))
//!     .field("email", FieldRules::new().rule("email", true));
//!
//! let methods = MethodRegistry::new();
//! let messages = init_error_messages(&rules, &CustomMessages::new(), &methods);
//!
//! let mut data = DataMap::new();
//! data.insert("name".to_string(), FieldValue::from("Jo"));
//! data.insert("email".to_string(), FieldValue::from(""));
//!
//! let errors = validate_data(&rules, &methods, &data, &messages);
//! assert_eq!(errors.get("name"), Some(&["The value is too short".to_string()][..]));
//! assert_eq!(errors.get("email"), None);
//! assert!(!errors.is_valid());
//! ```
//!
//! ## Conditional Rules
//!
//! ```
//! use formguard_validation::*;
//!
//! // `discountCode` is required only while `hasDiscount` is set
//! let rule = RuleParam::when(true, ["hasDiscount"]);
//!
//! let mut data = DataMap::new();
//! data.insert("hasDiscount".to_string(), FieldValue::Bool(false));
//! assert!(is_checkable(&rule, &data).is_none());
//!
//! data.insert("hasDiscount".to_string(), FieldValue::Bool(true));
//! assert_eq!(is_checkable(&rule, &data), Some(&Param::Bool(true)));
//! ```
//!
//! ## Custom Methods
//!
//! ```
//! use formguard_validation::*;
//!
//! let mut methods = MethodRegistry::new();
//! methods.add(
//!     "even",
//!     |value: &FieldValue, _: &Param| {
//!         value.as_text().and_then(|s| s.parse::<i64>().ok()).is_some_and(|n| n % 2 == 0)
//!     },
//!     "The value must be even",
//! );
//!
//! let rules = FieldRules::new().rule("even", true);
//! let messages = ErrorMessageTable::default();
//! let errors = validate_field(
//!     &rules,
//!     &methods,
//!     &FieldValue::from("3"),
//!     "count",
//!     &messages,
//!     &DataMap::new(),
//! );
//! assert_eq!(errors, vec!["The value must be even".to_string()]);
//! ```

mod dependency;
mod errors;
mod messages;
mod methods;
mod rules;
mod traits;
mod validate;
mod validators;
mod value;

pub use dependency::*;
pub use errors::*;
pub use messages::*;
pub use methods::*;
pub use rules::*;
pub use traits::*;
pub use validate::*;
pub use validators::*;
pub use value::*;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        CustomMessages, DataMap, Dependency, ErrorMessageTable, FieldRules, FieldValue, FileRef,
        FormErrors, MethodRegistry, Param, RuleParam, RuleSet, init_error_messages, is_checkable,
        validate_data, validate_field,
    };
}
