//! The construction-time description of a network, as handed over by a topology decoder.

use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::activation::ActivationFunction;
use crate::config::EngineConfig;
use crate::network::{Connection, CyclicNetwork, Error, NeuronCounts};
use crate::registry::ActivationRegistry;

/// An unresolved network: neuron counts, connections in any order, and the activation function
/// identifier of every computed neuron.
///
/// `activation_ids` lists the output neurons first and the hidden neurons after them, matching
/// the neuron index order of [`CyclicNetwork`]. The bias and input neurons have no activation
/// function.
///
/// # Examples
///
/// ```
/// use cyclic_net::{ActivationRegistry, Connection, EngineConfig, NetworkDefinition, NeuronCounts};
///
/// let definition = NetworkDefinition::new(
///     NeuronCounts::new(2, 1, 1),
///     vec![
///         Connection::new(4, 3, -1.0),
///         Connection::new(1, 4, 1.0),
///         Connection::new(2, 4, 1.0),
///     ],
///     vec!["Linear".to_string(), "ReLU".to_string()],
/// );
///
/// let registry = ActivationRegistry::default();
/// let config = EngineConfig::new().with_timesteps_per_activation(2);
/// let mut network = definition.build(&registry, config).unwrap();
///
/// let output = network.evaluate(&[0.25, 0.5]).unwrap().get(0);
/// assert_eq!(0.0, output);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NetworkDefinition {
    counts: NeuronCounts,
    connections: Vec<Connection>,
    activation_ids: Vec<String>,
}

impl NetworkDefinition {
    pub fn new(
        counts: NeuronCounts,
        connections: Vec<Connection>,
        activation_ids: Vec<String>,
    ) -> Self {
        Self {
            counts,
            connections,
            activation_ids,
        }
    }

    /// Returns a definition in which every computed neuron uses the function registered as `id`.
    pub fn with_uniform_activation(
        counts: NeuronCounts,
        connections: Vec<Connection>,
        id: &str,
    ) -> Result<Self, Error> {
        let activation_ids = vec![id.to_string(); counts.computed()?];
        Ok(Self::new(counts, connections, activation_ids))
    }

    /// Describes an existing network, recording each computed neuron's function by its
    /// [`id`][ActivationFunction::id].
    pub fn from_network(network: &CyclicNetwork) -> Self {
        let first = network.neuron_counts().first_computed_index();
        let activation_ids = network.activation_functions()[first..]
            .iter()
            .map(|function| function.id().to_string())
            .collect();

        Self::new(
            network.neuron_counts(),
            network.connections().to_vec(),
            activation_ids,
        )
    }

    pub fn counts(&self) -> NeuronCounts {
        self.counts
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn activation_ids(&self) -> &[String] {
        &self.activation_ids
    }

    /// Builds a [`CyclicNetwork`] from a copy of this definition. See
    /// [`into_network`][Self::into_network].
    pub fn build(
        &self,
        registry: &ActivationRegistry,
        config: EngineConfig,
    ) -> Result<CyclicNetwork, Error> {
        self.clone().into_network(registry, config)
    }

    /// Resolves every activation function identifier against `registry`, sorts the connections
    /// by source neuron, and builds a [`CyclicNetwork`].
    ///
    /// The sort is stable, so connections sharing a source keep their relative order and the
    /// result is deterministic for a given definition.
    pub fn into_network(
        self,
        registry: &ActivationRegistry,
        config: EngineConfig,
    ) -> Result<CyclicNetwork, Error> {
        let computed = self.counts.computed()?;

        if self.activation_ids.len() != computed {
            return Err(Error::ActivationCountMismatch {
                expected: computed,
                actual: self.activation_ids.len(),
            });
        }

        let total = self.counts.total()?;
        let first = self.counts.first_computed_index();
        let mut activation_fns = Vec::with_capacity(total);
        // Placeholders for the bias and input neurons, which are never activated
        activation_fns.resize(first, ActivationFunction::Linear);

        for (i, id) in self.activation_ids.iter().enumerate() {
            let function = registry.get(id)?;
            trace!("neuron {} uses activation function {}", first + i, function);
            activation_fns.push(function);
        }

        let mut connections = self.connections;

        if !is_sorted_by_source(&connections) {
            connections.sort_by_key(Connection::source);
            debug!("sorted {} connections by source neuron", connections.len());
        }

        CyclicNetwork::new(connections, activation_fns, self.counts, config)
    }
}

fn is_sorted_by_source(connections: &[Connection]) -> bool {
    connections
        .windows(2)
        .all(|pair| pair[0].source() <= pair[1].source())
}
