// Layered options builder

use crate::merge::{merge_all, merge_into};
use crate::{FileFormat, Options, OptionsLoader, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Option sources in ascending precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Built-in defaults
    Defaults,
    /// Options declared on the form markup
    Form,
    /// Options supplied by the integrator
    Explicit,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Defaults, Layer::Form, Layer::Explicit];

    fn index(self) -> usize {
        match self {
            Layer::Defaults => 0,
            Layer::Form => 1,
            Layer::Explicit => 2,
        }
    }
}

/// Builder that merges the three option layers and deserializes the result.
///
/// Layers may be fed several times; later input to the same layer merges on
/// top of earlier input. The merge order between layers is always
/// defaults, then form, then explicit, whatever order they are set in.
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    layers: [Value; 3],
}

impl OptionsBuilder {
    /// Builder seeded with the built-in defaults.
    pub fn new() -> Self {
        let mut builder = Self::empty();
        builder.layers[Layer::Defaults.index()] = Options::defaults_value();
        builder
    }

    /// Builder with every layer empty.
    pub fn empty() -> Self {
        Self {
            layers: std::array::from_fn(|_| Value::Object(Map::new())),
        }
    }

    /// Merge `value` into one layer.
    pub fn layer(mut self, layer: Layer, value: Value) -> Self {
        merge_into(&mut self.layers[layer.index()], value);
        self
    }

    pub fn defaults(self, value: Value) -> Self {
        self.layer(Layer::Defaults, value)
    }

    pub fn form(self, value: Value) -> Self {
        self.layer(Layer::Form, value)
    }

    pub fn explicit(self, value: Value) -> Self {
        self.layer(Layer::Explicit, value)
    }

    /// Merge an option file into a layer, detecting its format.
    pub fn file(self, layer: Layer, path: impl AsRef<Path>) -> Result<Self> {
        let loader = OptionsLoader::auto(path.as_ref())?;
        let value = loader.load_file(path)?;
        Ok(self.layer(layer, value))
    }

    /// Merge options parsed from a string into a layer.
    pub fn source(self, layer: Layer, format: FileFormat, content: &str) -> Result<Self> {
        let value = OptionsLoader::new(format).parse(content)?;
        Ok(self.layer(layer, value))
    }

    pub fn get(&self, layer: Layer) -> &Value {
        &self.layers[layer.index()]
    }

    /// The merged JSON value.
    pub fn build_value(&self) -> Value {
        merge_all(self.layers.iter().cloned())
    }

    /// Merge all layers into typed options.
    pub fn build(&self) -> Result<Options> {
        let merged = self.build_value();
        formguard_log::trace!("Merged form options: {}", merged);
        Options::from_value(merged)
    }
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
