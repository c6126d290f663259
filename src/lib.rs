//! Formguard - form validation with conditional rules, layered options,
//! localized messages and HTTP submission.
//!
//! The engine lives in the member crates and is re-exported here:
//!
//! - [`validation`]: data model, methods, rule evaluation, messages
//! - [`config`]: options, deep merge, option loading
//! - [`i18n`]: translation dictionary
//! - [`http_client`]: body encoding and submission
//! - [`log`]: env-controlled logging
//!
//! This crate adds the [`Form`] controller, which binds the engine to a host
//! through the [`FormSource`] and [`FormView`] traits.
//!
//! # Example
//!
//! ```rust
//! use formguard::prelude::*;
//! use serde_json::json;
//!
//! struct Signup;
//!
//! impl FormSource for Signup {
//!     fn inputs(&self) -> Vec<InputDescriptor> {
//!         vec![InputDescriptor::new("email", InputKind::Email).attr("required", "")]
//!     }
//!
//!     fn input_data(&self, name: &str) -> DataMap {
//!         let mut data = DataMap::new();
//!         data.insert(name.to_string(), FieldValue::from("not-an-email"));
//!         data
//!     }
//! }
//!
//! struct NoView;
//!
//! impl FormView for NoView {
//!     fn mark_field(&mut self, _: &str, _: &StateChange, _: Option<&str>) {}
//!     fn mark_form(&mut self, _: &StateChange) {}
//!     fn set_base_message(&mut self, _: &str) {}
//!     fn reset(&mut self) {}
//!     fn redirect(&mut self, _: &str) {}
//! }
//!
//! let mut form = Form::new(Signup, NoView, json!({ "language": "ru" })).unwrap();
//! let errors = form.validate();
//! assert_eq!(
//!     errors.get("email"),
//!     Some(&["Это поле должно содержать корректный адрес электронной почты".to_string()][..])
//! );
//! ```

mod adapter;
mod error;
mod form;
mod input;

pub use adapter::{FormSource, FormView, StateChange};
pub use error::{FormError, Result};
pub use form::{
    Collect, ErrorCallback, ErrorEvent, Form, FormBuilder, SEND_FAILED, SubmitOutcome,
    SuccessCallback, SuccessEvent,
};
pub use input::{InputDescriptor, InputKind};

pub use formguard_config as config;
pub use formguard_http_client as http_client;
pub use formguard_i18n as i18n;
pub use formguard_log as log;
pub use formguard_validation as validation;

/// Prelude for common imports.
///
/// ```
/// use formguard::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Collect, ErrorEvent, Form, FormBuilder, FormError, FormSource, FormView, InputDescriptor,
        InputKind, StateChange, SubmitOutcome, SuccessEvent,
    };

    pub use formguard_config::{Options, OptionsBuilder, SendType, from_attributes};
    pub use formguard_http_client::{FormClient, HttpClientConfig, SubmitResponse};
    pub use formguard_i18n::Dictionary;
    pub use formguard_validation::{
        DataMap, Dependency, FieldRules, FieldValue, FileRef, FormErrors, MethodRegistry, Param,
        RuleParam, RuleSet,
    };
}
