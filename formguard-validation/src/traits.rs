// Validation traits

use crate::{FieldValue, Param};

/// Synchronous check backing a rule name.
///
/// Implementations must be pure functions of `(value, param)`. The
/// `required` method receives `Param::Bool(true)` since it takes no
/// argument.
pub trait MethodPredicate: Send + Sync {
    fn check(&self, value: &FieldValue, param: &Param) -> bool;
}

impl<F> MethodPredicate for F
where
    F: Fn(&FieldValue, &Param) -> bool + Send + Sync,
{
    fn check(&self, value: &FieldValue, param: &Param) -> bool {
        self(value, param)
    }
}
