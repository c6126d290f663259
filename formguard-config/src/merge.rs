// Deep merge of option layers

use serde_json::Value;

/// Merge `higher` on top of `lower` and return the result.
///
/// Objects merge key by key, recursively. Arrays and scalars from `higher`
/// replace whatever `lower` holds, so rule dependency chains are never
/// spliced. Key order follows `lower`, with keys new in `higher` appended.
pub fn deep_merge(mut lower: Value, higher: Value) -> Value {
    merge_into(&mut lower, higher);
    lower
}

/// In-place variant of [`deep_merge`].
pub fn merge_into(lower: &mut Value, higher: Value) {
    match (lower, higher) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_into(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Merge several layers in ascending precedence.
pub fn merge_all<I>(layers: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    layers
        .into_iter()
        .fold(Value::Object(Default::default()), deep_merge)
}
