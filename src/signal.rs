//! Views over a network's neuron state used to write inputs and read outputs.
//!
//! Both views borrow a contiguous window of the owning network's post-activation array, so they
//! cannot outlive it and never copy the state they expose.

use std::ops::{Index, IndexMut};

/// Clamps `x` to `[0, 1]`. NaN is passed through.
pub fn bound_unit(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// A writable window over the input neurons of a network.
///
/// Position `i` of the view is input neuron `1 + i` of the network.
#[derive(Debug)]
pub struct InputSignals<'a> {
    signals: &'a mut [f64],
}

impl<'a> InputSignals<'a> {
    pub(crate) fn new(signals: &'a mut [f64]) -> Self {
        Self { signals }
    }

    /// Returns the number of inputs.
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Returns whether the view has no inputs.
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Returns the current value of the input at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position >= self.len()`.
    pub fn get(&self, position: usize) -> f64 {
        self.signals[position]
    }

    /// Sets the input at `position` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `position >= self.len()`.
    pub fn set(&mut self, position: usize, value: f64) {
        self.signals[position] = value;
    }

    /// Sets every input from `values`.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != self.len()`.
    pub fn copy_from_slice(&mut self, values: &[f64]) {
        self.signals.copy_from_slice(values);
    }

    /// Returns the inputs as a slice.
    pub fn as_slice(&self) -> &[f64] {
        self.signals
    }
}

impl<'a> Index<usize> for InputSignals<'a> {
    type Output = f64;

    fn index(&self, position: usize) -> &Self::Output {
        &self.signals[position]
    }
}

impl<'a> IndexMut<usize> for InputSignals<'a> {
    fn index_mut(&mut self, position: usize) -> &mut Self::Output {
        &mut self.signals[position]
    }
}

/// A read-only window over the output neurons of a network.
///
/// If the view has a bound, every value read through it is passed through the bound. The stored
/// state itself is never modified, so recurrent connections keep reading the exact value.
#[derive(Clone, Copy, Debug)]
pub struct OutputSignals<'a> {
    signals: &'a [f64],
    bound: Option<fn(f64) -> f64>,
}

impl<'a> OutputSignals<'a> {
    pub(crate) fn new(signals: &'a [f64], bound: Option<fn(f64) -> f64>) -> Self {
        Self { signals, bound }
    }

    /// Returns the number of outputs.
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Returns whether the view has no outputs.
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Returns whether values are bounded when read.
    pub fn is_bounded(&self) -> bool {
        self.bound.is_some()
    }

    /// Returns the output at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position >= self.len()`.
    #[inline]
    pub fn get(&self, position: usize) -> f64 {
        let value = self.signals[position];

        match self.bound {
            Some(bound) => bound(value),
            None => value,
        }
    }

    /// Returns the stored output at `position`, ignoring the bound.
    pub fn get_raw(&self, position: usize) -> f64 {
        self.signals[position]
    }

    /// Returns an iterator over the outputs.
    pub fn iter(&self) -> impl Iterator<Item = f64> + 'a {
        let (signals, bound) = (self.signals, self.bound);
        signals.iter().map(move |&value| match bound {
            Some(bound) => bound(value),
            None => value,
        })
    }

    /// Copies the outputs into a new `Vec`.
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}
