// Dependency resolution

use crate::errors::panic_message;
use crate::{DataMap, Dependency, FieldValue, Param, RuleParam, get_value_by_name};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Decide whether a rule applies to the current data.
///
/// Returns the real parameter when the rule is checkable and `None` when it
/// is not: a falsy parameter, or a dependency that does not hold.
/// Dependencies are evaluated in declared order and evaluation stops at the
/// first one that fails.
pub fn is_checkable<'a>(rule: &'a RuleParam, data: &DataMap) -> Option<&'a Param> {
    let param = rule.param();
    if !param.is_truthy() {
        return None;
    }

    rule.dependencies()
        .iter()
        .all(|dependency| dependency_holds(dependency, data))
        .then_some(param)
}

/// Evaluate one dependency. Predicate failures, including panics, are logged
/// and count as "does not hold".
fn dependency_holds(dependency: &Dependency, data: &DataMap) -> bool {
    match dependency {
        Dependency::Field(name) => get_value_by_name(name, data).is_some_and(FieldValue::is_truthy),
        Dependency::Predicate(predicate) => {
            match catch_unwind(AssertUnwindSafe(|| predicate(data))) {
                Ok(Ok(holds)) => holds,
                Ok(Err(error)) => {
                    formguard_log::warn!("Dependency function error: {}", error);
                    false
                }
                Err(payload) => {
                    formguard_log::warn!(
                        "Dependency function error: {}",
                        panic_message(payload.as_ref())
                    );
                    false
                }
            }
        }
    }
}
