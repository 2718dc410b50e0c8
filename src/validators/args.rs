//! Static arguments bound to a validator at registration time.

use crate::core::types::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Named arguments for a validator (e.g. `min`, `max`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatorArgs {
    values: IndexMap<String, Value>,
}

impl ValidatorArgs {
    /// Create an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style argument setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Get a raw argument.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Get an argument as an integer.
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.typed(name, "an integer", Value::as_integer)
    }

    /// Get an argument as a float (integers are widened).
    pub fn float(&self, name: &str) -> Option<f64> {
        self.typed(name, "a number", Value::as_float)
    }

    /// Get an argument as a string.
    pub fn string(&self, name: &str) -> Option<&str> {
        self.typed(name, "a string", Value::as_str)
    }

    /// Get an argument as an array.
    pub fn array(&self, name: &str) -> Option<&[Value]> {
        self.typed(name, "an array", Value::as_array)
    }

    /// Get an argument as a boolean.
    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.typed(name, "a boolean", Value::as_bool)
    }

    /// Convert an argument, warning when it is present with the wrong type.
    fn typed<'a, T>(
        &'a self,
        name: &str,
        expected: &str,
        convert: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Option<T> {
        let value = self.get(name)?;
        let converted = convert(value);
        if converted.is_none() {
            log::warn!(
                "Validator argument '{}' should be {}, got {}; ignoring it",
                name,
                expected,
                value.type_name()
            );
        }
        converted
    }

    /// Iterate over arguments in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ValidatorArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
