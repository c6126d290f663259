// Method registry

use crate::errors::panic_message;
use crate::rules::REQUIRED;
use crate::validators::*;
use crate::{FieldValue, MethodPredicate, Param, RuleError};
use indexmap::IndexMap;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

/// Default messages of the built-in methods. These are source strings; the
/// translation layer maps them per language.
pub mod default_messages {
    pub const REQUIRED: &str = "This field is required";
    pub const REGEXP: &str = "Please, provide correct value";
    pub const EMAIL: &str = "This field must contain a valid email";
    pub const TEL: &str = "This field must contain a phone number";
    pub const URL: &str = "This field must contain a valid URL";
    pub const DATE: &str = "This field must contain a date in format YYYY-MM-DD";
    pub const TIME: &str = "This field must contain a time in format HH:MM";
    pub const NUMBER: &str = "This field must contain a number";
    pub const INT: &str = "This field must contain an integer";
    pub const MIN_LENGTH: &str = "The value is too short";
    pub const MAX_LENGTH: &str = "The value is too long";
    pub const MIN: &str = "The value is too small";
    pub const MAX: &str = "The value is too large";
    pub const FILESIZE: &str = "The file is too big";
    pub const EXTENSION: &str = "The file has an invalid extension";
}

/// A predicate together with its default message.
#[derive(Clone)]
pub struct Method {
    predicate: Arc<dyn MethodPredicate>,
    message: String,
}

impl Method {
    pub fn new<P>(predicate: P, message: impl Into<String>) -> Self
    where
        P: MethodPredicate + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
            message: message.into(),
        }
    }

    /// Build a method from a closure.
    pub fn from_fn<F>(f: F, message: impl Into<String>) -> Self
    where
        F: Fn(&FieldValue, &Param) -> bool + Send + Sync + 'static,
    {
        Self::new(f, message)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn check(&self, value: &FieldValue, param: &Param) -> bool {
        self.predicate.check(value, param)
    }

    /// Run the predicate, turning a panic into `Err` with its message.
    pub fn try_check(&self, value: &FieldValue, param: &Param) -> Result<bool, String> {
        catch_unwind(AssertUnwindSafe(|| self.predicate.check(value, param)))
            .map_err(|payload| panic_message(payload.as_ref()))
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Mapping from rule name to method.
///
/// Always contains `required`, which decides emptiness for every field.
#[derive(Debug, Clone)]
pub struct MethodRegistry {
    methods: IndexMap<String, Method>,
}

impl MethodRegistry {
    /// Registry with the built-in methods.
    pub fn new() -> Self {
        use default_messages as msg;

        let mut registry = Self::required_only();
        registry.insert("regexp", Method::new(Regexp, msg::REGEXP));
        registry.insert("email", Method::new(IsEmail, msg::EMAIL));
        registry.insert("tel", Method::new(IsTel, msg::TEL));
        registry.insert("url", Method::new(IsUrl, msg::URL));
        registry.insert("date", Method::new(IsDate, msg::DATE));
        registry.insert("time", Method::new(IsTime, msg::TIME));
        registry.insert("number", Method::new(IsNumber, msg::NUMBER));
        registry.insert("int", Method::new(IsInt, msg::INT));
        registry.insert("minLength", Method::new(MinLength, msg::MIN_LENGTH));
        registry.insert("maxLength", Method::new(MaxLength, msg::MAX_LENGTH));
        registry.insert("min", Method::new(Min, msg::MIN));
        registry.insert("max", Method::new(Max, msg::MAX));
        registry.insert("filesize", Method::new(FileSize, msg::FILESIZE));
        registry.insert("extension", Method::new(Extension, msg::EXTENSION));
        registry
    }

    /// Registry holding only the built-in `required` method.
    pub fn required_only() -> Self {
        let mut methods = IndexMap::new();
        methods.insert(
            REQUIRED.to_string(),
            Method::new(Required, default_messages::REQUIRED),
        );
        Self { methods }
    }

    /// Register or replace a method, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, method: Method) -> Option<Method> {
        self.methods.insert(name.into(), method)
    }

    /// Register a closure-backed method.
    pub fn add<F>(&mut self, name: impl Into<String>, f: F, message: impl Into<String>) -> Option<Method>
    where
        F: Fn(&FieldValue, &Param) -> bool + Send + Sync + 'static,
    {
        self.insert(name, Method::from_fn(f, message))
    }

    pub fn get(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// The method deciding emptiness.
    pub fn required(&self) -> &Method {
        &self.methods[REQUIRED]
    }

    /// Remove a method. `required` cannot be removed.
    pub fn remove(&mut self, name: &str) -> Result<Option<Method>, RuleError> {
        if name == REQUIRED {
            return Err(RuleError::RequiredMethod);
        }
        Ok(self.methods.shift_remove(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::new()
    }
}
