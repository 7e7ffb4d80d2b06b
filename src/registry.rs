//! Lookup of activation functions by identifier.

use std::collections::BTreeMap;

use log::trace;

use crate::activation::ActivationFunction;
pub use crate::activation::NotFoundError;

/// A set of activation functions keyed by identifier.
///
/// The registry is an ordinary value handed to whatever builds networks; nothing about it is
/// global. [`ActivationRegistry::default`] contains every [`ActivationFunction`] under its own
/// [`id`][ActivationFunction::id]. Additional identifiers can be registered, for example to keep
/// loading genomes that were written under a legacy name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivationRegistry {
    functions: BTreeMap<String, ActivationFunction>,
}

impl ActivationRegistry {
    /// Returns an empty registry.
    pub fn empty() -> Self {
        Self {
            functions: BTreeMap::new(),
        }
    }

    /// Returns a registry containing every [`ActivationFunction`] under its own identifier.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();

        for function in ActivationFunction::ALL {
            registry.register(function.id(), function);
        }

        registry
    }

    /// Registers `function` under `id`, returning the function previously registered under it.
    pub fn register<S: Into<String>>(
        &mut self,
        id: S,
        function: ActivationFunction,
    ) -> Option<ActivationFunction> {
        let id = id.into();
        trace!("registering activation function {} as `{}`", function, id);
        self.functions.insert(id, function)
    }

    /// Returns the function registered under `id`.
    pub fn get(&self, id: &str) -> Result<ActivationFunction, NotFoundError> {
        self.functions
            .get(id)
            .copied()
            .ok_or_else(|| NotFoundError::new(id))
    }

    /// Returns whether a function is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.functions.contains_key(id)
    }

    /// Returns an iterator over the registered identifiers in lexicographic order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.functions.keys().map(String::as_str)
    }

    /// Returns an iterator over the registered identifiers and their functions.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ActivationFunction)> + '_ {
        self.functions.iter().map(|(id, f)| (id.as_str(), *f))
    }

    /// Returns the number of registered identifiers.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for ActivationRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
