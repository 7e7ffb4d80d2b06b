//! An evaluation engine for neural networks with arbitrary, possibly cyclic topologies, as
//! produced by neuroevolution.
//!
//! A [`CyclicNetwork`] stores every neuron's state in flat arrays and runs a fixed number of
//! timesteps per activation. Each timestep propagates weighted signals along every connection,
//! then applies each neuron's [`ActivationFunction`]. The network keeps its state between
//! activations, so recurrent connections carry information forward until
//! [`CyclicNetwork::reset_state`] is called.
//!
//! # Examples
//!
//! ```
//! use cyclic_net::{ActivationRegistry, Connection, EngineConfig, NetworkDefinition, NeuronCounts};
//!
//! // bias 0, input 1, output 2, hidden 3
//! let definition = NetworkDefinition::new(
//!     NeuronCounts::new(1, 1, 1),
//!     vec![
//!         Connection::new(1, 3, 1.0),
//!         Connection::new(3, 2, 1.0),
//!         Connection::new(3, 3, 0.5),
//!     ],
//!     vec!["LogisticApproximantSteep".to_string(), "Linear".to_string()],
//! );
//!
//! let registry = ActivationRegistry::default();
//! let config = EngineConfig::new().with_timesteps_per_activation(2);
//! let mut network = definition.build(&registry, config).unwrap();
//!
//! // Write the inputs, activate, and read the outputs
//! network.inputs_mut().set(0, 1.0);
//! network.activate();
//! let output = network.outputs().get(0);
//! assert!(output > 0.5 && output < 1.0);
//!
//! // Clear the recurrent state before evaluating an unrelated input sequence
//! network.reset_state();
//! ```

pub mod activation;
pub mod config;
pub mod definition;
pub mod network;
pub mod registry;
pub mod signal;

pub use activation::ActivationFunction;
pub use config::EngineConfig;
pub use definition::NetworkDefinition;
pub use network::{Connection, CyclicNetwork, NeuronCounts};
pub use registry::ActivationRegistry;
pub use signal::{InputSignals, OutputSignals};
