//! The cyclic neural network engine.

mod error;
mod evaluate;

pub use error::{Error, NotEnoughInputsError};

use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::activation::ActivationFunction;
use crate::config::EngineConfig;
use crate::signal::{self, InputSignals, OutputSignals};

/// The index of the bias neuron, whose output is always `1.0`.
pub const BIAS_INDEX: usize = 0;

/// A weighted connection from a source neuron to a target neuron.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Connection {
    source: usize,
    target: usize,
    weight: f64,
}

impl Connection {
    /// Returns a new `Connection` that adds the output of `source`, weighted by `weight`, to the
    /// input of `target`.
    pub fn new(source: usize, target: usize, weight: f64) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    /// Returns the index of the source neuron.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Returns the index of the target neuron.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Returns the weight of the connection.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// The number of input, output and hidden neurons in a network. Every network additionally has
/// a single bias neuron.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NeuronCounts {
    pub inputs: usize,
    pub outputs: usize,
    pub hidden: usize,
}

impl NeuronCounts {
    pub fn new(inputs: usize, outputs: usize, hidden: usize) -> Self {
        Self {
            inputs,
            outputs,
            hidden,
        }
    }

    /// Returns the total number of neurons, including the bias neuron.
    pub fn total(&self) -> Result<usize, Error> {
        self.computed()?
            .checked_add(self.inputs)
            .and_then(|n| n.checked_add(1))
            .ok_or(Error::Arithmetic)
    }

    /// Returns the number of neurons whose values are computed (outputs and hidden neurons).
    pub fn computed(&self) -> Result<usize, Error> {
        self.outputs
            .checked_add(self.hidden)
            .ok_or(Error::Arithmetic)
    }

    /// Returns the index of the first output neuron.
    pub fn first_computed_index(&self) -> usize {
        1 + self.inputs
    }
}

/// A neural network that may contain cycles, evaluated in fixed timesteps.
///
/// Neurons are laid out in a single index space: the bias neuron at index `0`, then the inputs,
/// then the outputs, then the hidden neurons. Each timestep first propagates every connection's
/// weighted signal into its target's accumulator, then applies each computed neuron's activation
/// function to its accumulator.
///
/// The network keeps its state between calls to [`activate`][Self::activate], so recurrent
/// connections see values from earlier activations until [`reset_state`][Self::reset_state] is
/// called.
///
/// # Examples
///
/// ```
/// use cyclic_net::{ActivationFunction, Connection, CyclicNetwork, EngineConfig, NeuronCounts};
///
/// // bias, one input, one output
/// let counts = NeuronCounts::new(1, 1, 0);
/// let connections = vec![Connection::new(1, 2, 2.0)];
/// let functions = vec![ActivationFunction::Linear; 3];
/// let config = EngineConfig::new().with_bounded_output(false);
///
/// let mut network = CyclicNetwork::new(connections, functions, counts, config).unwrap();
/// network.inputs_mut().set(0, 3.0);
/// network.activate();
///
/// assert_eq!(6.0, network.outputs().get(0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CyclicNetwork {
    // Connections sorted by source neuron index
    connections: Vec<Connection>,
    // The activation function of each neuron; the bias and input entries are never applied
    activation_fns: Vec<ActivationFunction>,
    // Accumulated weighted input of each neuron for the timestep in progress
    pre_activation: Vec<f64>,
    // Output of each neuron after its most recent activation
    post_activation: Vec<f64>,
    input_count: usize,
    output_count: usize,
    timesteps_per_activation: usize,
    bounded_output: bool,
}

impl CyclicNetwork {
    /// Builds a network from its connections, the activation function of every neuron, and its
    /// neuron counts.
    ///
    /// `connections` must be sorted by source index; see
    /// [`NetworkDefinition`][crate::NetworkDefinition] for a builder that sorts them and resolves
    /// activation functions by identifier. `activation_fns` must contain one entry per neuron,
    /// including the bias and input neurons whose entries are ignored.
    pub fn new(
        connections: Vec<Connection>,
        activation_fns: Vec<ActivationFunction>,
        counts: NeuronCounts,
        config: EngineConfig,
    ) -> Result<Self, Error> {
        config.validate()?;

        let neuron_count = counts.total()?;

        if activation_fns.len() != neuron_count {
            return Err(Error::ActivationCountMismatch {
                expected: neuron_count,
                actual: activation_fns.len(),
            });
        }

        validate_connections(&connections, neuron_count, counts.first_computed_index())?;

        let mut post_activation = vec![0.0; neuron_count];
        post_activation[BIAS_INDEX] = 1.0;

        debug!(
            "built cyclic network with {} neurons ({} inputs, {} outputs, {} hidden), {} \
             connections, {} timesteps per activation",
            neuron_count,
            counts.inputs,
            counts.outputs,
            counts.hidden,
            connections.len(),
            config.timesteps_per_activation()
        );

        Ok(Self {
            connections,
            activation_fns,
            pre_activation: vec![0.0; neuron_count],
            post_activation,
            input_count: counts.inputs,
            output_count: counts.outputs,
            timesteps_per_activation: config.timesteps_per_activation(),
            bounded_output: config.bounded_output(),
        })
    }

    /// Runs the configured number of timesteps.
    ///
    /// Does not allocate, and does not validate anything; all checks happen in
    /// [`new`][Self::new]. NaN and infinite values are propagated rather than reported.
    pub fn activate(&mut self) {
        let start = self.first_computed_index();

        for _ in 0..self.timesteps_per_activation {
            evaluate::propagate(
                &self.connections,
                &self.post_activation,
                &mut self.pre_activation,
            );
            evaluate::activate_neurons(
                &self.activation_fns[start..],
                &mut self.pre_activation[start..],
                &mut self.post_activation[start..],
            );
        }
    }

    /// Copies `inputs` into the input neurons, activates the network, and returns its outputs.
    ///
    /// If too many inputs are given, the extras are discarded. Like [`activate`][Self::activate],
    /// this keeps the state left by earlier calls unless [`reset_state`][Self::reset_state] is
    /// called first.
    pub fn evaluate(
        &mut self,
        inputs: &[f64],
    ) -> Result<OutputSignals<'_>, NotEnoughInputsError> {
        let count = self.input_count;

        if inputs.len() < count {
            return Err(NotEnoughInputsError::new(count, inputs.len()));
        }

        self.inputs_mut().copy_from_slice(&inputs[..count]);
        self.activate();

        Ok(self.outputs())
    }

    /// Clears the state of every output and hidden neuron.
    ///
    /// The bias neuron keeps its value of `1.0`, and the input neurons keep whatever was last
    /// written to them.
    pub fn reset_state(&mut self) {
        let start = self.first_computed_index();

        self.pre_activation[start..].fill(0.0);
        self.post_activation[start..].fill(0.0);
    }

    /// Returns a writable view over the input neurons.
    pub fn inputs_mut(&mut self) -> InputSignals<'_> {
        let end = self.first_computed_index();
        InputSignals::new(&mut self.post_activation[1..end])
    }

    /// Returns the current values of the input neurons.
    pub fn inputs(&self) -> &[f64] {
        &self.post_activation[1..self.first_computed_index()]
    }

    /// Returns a view over the output neurons.
    ///
    /// If the network was configured with bounded outputs, values read through the view are
    /// clamped to `[0, 1]`.
    pub fn outputs(&self) -> OutputSignals<'_> {
        let start = self.first_computed_index();
        let bound = if self.bounded_output {
            Some(signal::bound_unit as fn(f64) -> f64)
        } else {
            None
        };

        OutputSignals::new(
            &self.post_activation[start..start + self.output_count],
            bound,
        )
    }

    /// Returns the post-activation value of every neuron, indexed by neuron index.
    pub fn post_activations(&self) -> &[f64] {
        &self.post_activation
    }

    /// Returns the connections of this network, sorted by source index.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Returns the activation function of every neuron, indexed by neuron index.
    pub fn activation_functions(&self) -> &[ActivationFunction] {
        &self.activation_fns
    }

    /// Returns the number of inputs required by this network.
    pub fn input_count(&self) -> usize {
        self.input_count
    }

    /// Returns the number of outputs produced by this network.
    pub fn output_count(&self) -> usize {
        self.output_count
    }

    /// Returns the number of hidden neurons.
    pub fn hidden_count(&self) -> usize {
        self.neuron_count() - self.first_computed_index() - self.output_count
    }

    /// Returns the total number of neurons, including the bias neuron.
    pub fn neuron_count(&self) -> usize {
        self.post_activation.len()
    }

    /// Returns the neuron counts of this network.
    pub fn neuron_counts(&self) -> NeuronCounts {
        NeuronCounts::new(self.input_count, self.output_count, self.hidden_count())
    }

    /// Returns the number of timesteps run by each call to [`activate`][Self::activate].
    pub fn timesteps_per_activation(&self) -> usize {
        self.timesteps_per_activation
    }

    /// Returns whether outputs are clamped to `[0, 1]` when read.
    pub fn is_output_bounded(&self) -> bool {
        self.bounded_output
    }

    /// Returns the configuration this network was built with.
    pub fn config(&self) -> EngineConfig {
        EngineConfig::new()
            .with_timesteps_per_activation(self.timesteps_per_activation)
            .with_bounded_output(self.bounded_output)
    }

    fn first_computed_index(&self) -> usize {
        1 + self.input_count
    }
}

/// Checks that every connection refers to existing neurons, never targets the bias or an input
/// neuron, and that the list is sorted by source index.
fn validate_connections(
    connections: &[Connection],
    neuron_count: usize,
    first_computed_index: usize,
) -> Result<(), Error> {
    let mut previous_source = 0;

    for (i, connection) in connections.iter().enumerate() {
        for neuron in [connection.source, connection.target] {
            if neuron >= neuron_count {
                return Err(Error::InvalidConnectionIndex {
                    connection: i,
                    neuron,
                });
            }
        }

        if connection.target < first_computed_index {
            return Err(Error::ConnectionToInput {
                connection: i,
                neuron: connection.target,
            });
        }

        if connection.source < previous_source {
            return Err(Error::ConnectionsNotSorted(i));
        }

        previous_source = connection.source;
    }

    Ok(())
}
