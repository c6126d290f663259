// Field and form validation

use crate::rules::REQUIRED;
use crate::value::NULL;
use crate::{
    DataMap, ErrorMessageTable, FieldRules, FieldValue, FormErrors, MethodRegistry, Param,
    RuleSet, get_value_by_name, is_checkable,
};

/// Diagnostic reported for a rule with no registered method.
pub fn method_not_found(rule: &str) -> String {
    format!("Method \"{}\" not found", rule)
}

/// Diagnostic reported for a method that panicked.
pub fn method_failed(rule: &str) -> String {
    format!("Method \"{}\" failed", rule)
}

fn message_for(
    messages: &ErrorMessageTable,
    methods: &MethodRegistry,
    field: &str,
    rule: &str,
) -> String {
    messages
        .get(field, rule)
        .or_else(|| methods.get(rule).map(|m| m.message()))
        .unwrap_or_default()
        .to_string()
}

/// Validate one field's value against its rules.
///
/// Emptiness is decided by the registry's `required` method. An empty value
/// yields only the `required` message when that rule is checkable, and no
/// messages otherwise; other rules never see an empty value. For a present
/// value the remaining rules run in declaration order. An unknown rule name
/// or a panicking method produces a diagnostic message instead of an error.
pub fn validate_field(
    rules: &FieldRules,
    methods: &MethodRegistry,
    value: &FieldValue,
    name: &str,
    messages: &ErrorMessageTable,
    data: &DataMap,
) -> Vec<String> {
    let is_empty = match methods.required().try_check(value, &Param::Bool(true)) {
        Ok(present) => !present,
        Err(reason) => {
            formguard_log::error!("Method \"{}\" panicked on field {}: {}", REQUIRED, name, reason);
            return vec![method_failed(REQUIRED)];
        }
    };

    let is_required = rules
        .get(REQUIRED)
        .and_then(|rule| is_checkable(rule, data))
        .is_some();

    if is_empty && is_required {
        return vec![message_for(messages, methods, name, REQUIRED)];
    }

    if is_empty {
        return Vec::new();
    }

    let mut errors = Vec::new();

    for (rule, param) in rules.iter() {
        if rule == REQUIRED {
            continue;
        }

        let Some(params) = is_checkable(param, data) else {
            formguard_log::trace!("Rule {} on field {} is not checkable", rule, name);
            continue;
        };

        let Some(method) = methods.get(rule) else {
            errors.push(method_not_found(rule));
            continue;
        };

        match method.try_check(value, params) {
            Ok(true) => {}
            Ok(false) => errors.push(message_for(messages, methods, name, rule)),
            Err(reason) => {
                formguard_log::error!("Method \"{}\" panicked on field {}: {}", rule, name, reason);
                errors.push(method_failed(rule));
            }
        }
    }

    errors
}

/// Validate every field declared in `rules` against a data snapshot.
///
/// Fields present in `data` without rules are ignored; ruled fields absent
/// from `data` are validated as `Null`.
pub fn validate_data(
    rules: &RuleSet,
    methods: &MethodRegistry,
    data: &DataMap,
    messages: &ErrorMessageTable,
) -> FormErrors {
    let mut result = FormErrors::new();

    for (name, field_rules) in rules.iter() {
        let value = get_value_by_name(name, data).unwrap_or(&NULL);
        let errors = validate_field(field_rules, methods, value, name, messages, data);
        result.insert(name, errors);
    }

    result
}
