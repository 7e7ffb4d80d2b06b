//! The error types for creation and evaluation of networks.

use std::{error, fmt};

use crate::activation::NotFoundError;

/// The reason why a network could not be built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The number of activation functions does not match the number of neurons that need one.
    ActivationCountMismatch {
        /// The required number of activation functions.
        expected: usize,
        /// The number of activation functions supplied.
        actual: usize,
    },
    /// An activation function identifier is not registered.
    ActivationNotFound(NotFoundError),
    /// A connection refers to a neuron index outside the network. Contains the index of the
    /// connection and the invalid neuron index.
    InvalidConnectionIndex {
        /// Index of the connection in the connection list.
        connection: usize,
        /// The out-of-range neuron index.
        neuron: usize,
    },
    /// A connection targets the bias neuron or an input neuron. Their values are set directly and
    /// never read from the accumulated input, so such a connection has no effect on the network.
    /// Contains the index of the connection and the target neuron index.
    ConnectionToInput {
        /// Index of the connection in the connection list.
        connection: usize,
        /// The target neuron index.
        neuron: usize,
    },
    /// The connection at this index has a lower source index than the connection before it.
    ConnectionsNotSorted(usize),
    /// The number of timesteps per activation is zero.
    InvalidTimesteps,
    /// An arithmetic operation or conversion overflowed while building the network.
    Arithmetic,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ActivationCountMismatch { expected, actual } => write!(
                f,
                "expected {} activation functions but got {}",
                expected, actual
            ),
            Self::ActivationNotFound(e) => write!(f, "{}", e),
            Self::InvalidConnectionIndex { connection, neuron } => write!(
                f,
                "connection at index {} refers to invalid neuron index {}",
                connection, neuron
            ),
            Self::ConnectionToInput { connection, neuron } => write!(
                f,
                "connection at index {} targets bias or input neuron {}",
                connection, neuron
            ),
            Self::ConnectionsNotSorted(index) => write!(
                f,
                "connection at index {} is not sorted by source neuron",
                index
            ),
            Self::InvalidTimesteps => write!(f, "timesteps per activation must be at least one"),
            Self::Arithmetic => write!(f, "integer overflow/underflow"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::ActivationNotFound(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NotFoundError> for Error {
    fn from(e: NotFoundError) -> Self {
        Self::ActivationNotFound(e)
    }
}

/// Too few inputs were passed to [`CyclicNetwork::evaluate`][super::CyclicNetwork::evaluate].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotEnoughInputsError {
    expected: usize,
    provided: usize,
}

impl NotEnoughInputsError {
    pub(crate) fn new(expected: usize, provided: usize) -> Self {
        Self { expected, provided }
    }

    /// Returns the number of inputs expected by the network.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Returns the number of inputs that were provided.
    pub fn provided(&self) -> usize {
        self.provided
    }
}

impl fmt::Display for NotEnoughInputsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "not enough inputs: expected {} but got {}",
            self.expected, self.provided
        )
    }
}

impl error::Error for NotEnoughInputsError {}
