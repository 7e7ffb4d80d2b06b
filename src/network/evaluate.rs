//! The two passes that make up one timestep of a network.
//!
//! They must stay separate loops. Fusing them would let a neuron read a target whose
//! accumulation for the current timestep is still in progress.

use super::Connection;
use crate::activation::ActivationFunction;

/// Adds the weighted post-activation value of each connection's source neuron to the
/// pre-activation value of its target neuron.
///
/// `connections` is sorted by source, so reads from `post_activation` walk forwards through
/// memory and only the writes into `pre_activation` jump around.
#[inline]
pub fn propagate(
    connections: &[Connection],
    post_activation: &[f64],
    pre_activation: &mut [f64],
) {
    for connection in connections {
        pre_activation[connection.target] += post_activation[connection.source] * connection.weight;
    }
}

/// Applies each neuron's activation function to its accumulated input and clears the
/// accumulator for the next timestep.
///
/// All three slices start at the first non-input neuron.
#[inline]
pub fn activate_neurons(
    functions: &[ActivationFunction],
    pre_activation: &mut [f64],
    post_activation: &mut [f64],
) {
    for ((function, pre), post) in functions
        .iter()
        .zip(pre_activation.iter_mut())
        .zip(post_activation.iter_mut())
    {
        *post = function.apply(*pre);
        *pre = 0.0;
    }
}
