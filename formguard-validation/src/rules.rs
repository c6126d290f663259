// Rule definitions

use crate::{DataMap, DependencyError, RuleError};
use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Name of the rule that decides emptiness.
pub const REQUIRED: &str = "required";

/// Argument handed to a validation method.
#[derive(Debug, Clone)]
pub enum Param {
    Bool(bool),
    Number(f64),
    Text(String),
    Pattern(Regex),
}

impl Param {
    /// Falsy parameters (`false`, `0`, `NaN`, `""`) disable their rule.
    pub fn is_truthy(&self) -> bool {
        match self {
            Param::Bool(b) => *b,
            Param::Number(n) => *n != 0.0 && !n.is_nan(),
            Param::Text(s) => !s.is_empty(),
            Param::Pattern(_) => true,
        }
    }

    /// Numeric view: numbers as-is, text parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Param::Number(n) => Some(*n),
            Param::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Non-negative integral view used for lengths and counts.
    pub fn as_usize(&self) -> Option<usize> {
        self.as_f64()
            .filter(|n| *n >= 0.0 && n.is_finite())
            .map(|n| n as usize)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Param::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Parse a scalar JSON value. `null` reads as `false`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Param::Bool(false)),
            Value::Bool(b) => Some(Param::Bool(*b)),
            Value::Number(n) => n.as_f64().map(Param::Number),
            Value::String(s) => Some(Param::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Param::Bool(a), Param::Bool(b)) => a == b,
            (Param::Number(a), Param::Number(b)) => a == b,
            (Param::Text(a), Param::Text(b)) => a == b,
            (Param::Pattern(a), Param::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

macro_rules! param_from {
    ($($ty:ty => $variant:ident($conv:expr)),* $(,)?) => {
        $(
            impl From<$ty> for Param {
                fn from(value: $ty) -> Self {
                    Param::$variant($conv(value))
                }
            }

            impl From<$ty> for RuleParam {
                fn from(value: $ty) -> Self {
                    RuleParam::Unconditional(Param::from(value))
                }
            }
        )*
    };
}

param_from! {
    bool => Bool(|v| v),
    f64 => Number(|v| v),
    i32 => Number(f64::from),
    u32 => Number(f64::from),
    i64 => Number(|v: i64| v as f64),
    usize => Number(|v: usize| v as f64),
    &str => Text(str::to_string),
    String => Text(|v| v),
    Regex => Pattern(|v| v),
}

/// Predicate over the whole data snapshot.
pub type DependencyFn = Arc<dyn Fn(&DataMap) -> Result<bool, DependencyError> + Send + Sync>;

/// Secondary condition gating a rule.
#[derive(Clone)]
pub enum Dependency {
    /// Holds when the named field is truthy in the current data.
    Field(String),
    /// Holds when the predicate returns `Ok(true)`.
    Predicate(DependencyFn),
}

impl Dependency {
    pub fn field(name: impl Into<String>) -> Self {
        Dependency::Field(name.into())
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&DataMap) -> bool + Send + Sync + 'static,
    {
        Dependency::Predicate(Arc::new(move |data| Ok(f(data))))
    }

    pub fn fallible<F, E>(f: F) -> Self
    where
        F: Fn(&DataMap) -> Result<bool, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Dependency::Predicate(Arc::new(move |data| {
            f(data).map_err(|e| DependencyError::new(e.to_string()))
        }))
    }
}

impl fmt::Debug for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Dependency::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<&str> for Dependency {
    fn from(name: &str) -> Self {
        Dependency::field(name)
    }
}

/// A rule's parameter, optionally gated by dependencies.
#[derive(Debug, Clone)]
pub enum RuleParam {
    Unconditional(Param),
    Conditional(Param, Vec<Dependency>),
}

impl RuleParam {
    /// A rule that applies only while every dependency holds.
    pub fn when<I, D>(param: impl Into<Param>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<Dependency>,
    {
        RuleParam::Conditional(
            param.into(),
            dependencies.into_iter().map(Into::into).collect(),
        )
    }

    /// A disabled rule.
    pub fn off() -> Self {
        RuleParam::Unconditional(Param::Bool(false))
    }

    /// The real parameter, ignoring dependencies.
    pub fn param(&self) -> &Param {
        match self {
            RuleParam::Unconditional(param) | RuleParam::Conditional(param, _) => param,
        }
    }

    pub fn dependencies(&self) -> &[Dependency] {
        match self {
            RuleParam::Unconditional(_) => &[],
            RuleParam::Conditional(_, deps) => deps,
        }
    }

    /// Parse a JSON rule parameter.
    ///
    /// Arrays read as `[param, dependency...]` where every dependency is a
    /// field name; an empty array is a disabled rule.
    pub fn from_json(field: &str, rule: &str, value: &Value) -> Result<Self, RuleError> {
        let invalid = |reason: &str| RuleError::InvalidParam {
            field: field.to_string(),
            rule: rule.to_string(),
            reason: reason.to_string(),
        };

        match value {
            Value::Array(items) => {
                let Some((head, tail)) = items.split_first() else {
                    return Ok(RuleParam::off());
                };
                let param = Param::from_json(head)
                    .ok_or_else(|| invalid("first element must be a scalar"))?;
                let dependencies = tail
                    .iter()
                    .enumerate()
                    .map(|(i, dep)| match dep {
                        Value::String(name) => Ok(Dependency::field(name.as_str())),
                        _ => Err(RuleError::InvalidDependency {
                            field: field.to_string(),
                            rule: rule.to_string(),
                            index: i + 1,
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(RuleParam::Conditional(param, dependencies))
            }
            Value::Object(_) => Err(invalid("objects are not supported")),
            scalar => Param::from_json(scalar)
                .map(RuleParam::Unconditional)
                .ok_or_else(|| invalid("number out of range")),
        }
    }
}

impl From<Param> for RuleParam {
    fn from(param: Param) -> Self {
        RuleParam::Unconditional(param)
    }
}

/// Ordered rules declared on one field.
#[derive(Debug, Clone, Default)]
pub struct FieldRules {
    rules: IndexMap<String, RuleParam>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn rule(mut self, name: impl Into<String>, param: impl Into<RuleParam>) -> Self {
        self.insert(name, param);
        self
    }

    /// Insert or replace a rule; a replaced rule keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, param: impl Into<RuleParam>) {
        self.rules.insert(name.into(), param.into());
    }

    pub fn get(&self, name: &str) -> Option<&RuleParam> {
        self.rules.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<RuleParam> {
        self.rules.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleParam)> {
        self.rules.iter().map(|(name, param)| (name.as_str(), param))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Overlay `higher` on top of these rules. Parameters, dependency chains
    /// included, are replaced whole; new rules are appended.
    pub fn merge(&mut self, higher: FieldRules) {
        for (name, param) in higher.rules {
            self.rules.insert(name, param);
        }
    }

    /// Combine rules inferred from an input with explicitly configured ones.
    /// Explicit rules win.
    pub fn merge_over_inferred(inferred: FieldRules, explicit: FieldRules) -> FieldRules {
        let mut merged = inferred;
        merged.merge(explicit);
        merged
    }

    pub fn from_json(field: &str, value: &Value) -> Result<Self, RuleError> {
        let Value::Object(map) = value else {
            return Err(RuleError::NotAnObject(field.to_string()));
        };

        let mut rules = FieldRules::new();
        for (rule, param) in map {
            rules.insert(rule.as_str(), RuleParam::from_json(field, rule, param)?);
        }
        Ok(rules)
    }
}

/// Rules for a whole form, keyed by field name in declaration
/// order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    fields: IndexMap<String, FieldRules>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field declaration.
    pub fn field(mut self, name: impl Into<String>, rules: FieldRules) -> Self {
        self.fields.insert(name.into(), rules);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, rules: FieldRules) -> Option<FieldRules> {
        self.fields.insert(name.into(), rules)
    }

    pub fn get(&self, name: &str) -> Option<&FieldRules> {
        self.fields.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldRules> {
        self.fields.get_mut(name)
    }

    /// Rules of a field, created empty when missing.
    pub fn field_mut(&mut self, name: &str) -> &mut FieldRules {
        self.fields.entry(name.to_string()).or_default()
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldRules> {
        self.fields.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRules)> {
        self.fields.iter().map(|(name, rules)| (name.as_str(), rules))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Overlay `higher` field by field.
    pub fn merge(&mut self, higher: RuleSet) {
        for (name, rules) in higher.fields {
            self.field_mut(&name).merge(rules);
        }
    }

    /// Parse `{ "<field>": { "<rule>": <param> } }`. `null` reads as empty.
    pub fn from_json(value: &Value) -> Result<Self, RuleError> {
        let map = match value {
            Value::Null => return Ok(RuleSet::new()),
            Value::Object(map) => map,
            _ => return Err(RuleError::NotAnObject("<rules>".to_string())),
        };

        let mut set = RuleSet::new();
        for (field, rules) in map {
            set.insert(field.as_str(), FieldRules::from_json(field, rules)?);
        }
        Ok(set)
    }
}
