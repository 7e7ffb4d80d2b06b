//! Handling of neuron activation functions.
//!
//! Every function here is pure and total over `f64`. NaN and infinite inputs are not treated
//! specially and propagate through the arithmetic as usual. Values that are too small or too
//! large never panic; operations on non-normal numbers result in non-normal numbers.

use std::{error, f64::consts::PI, fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents which activation function to use when evaluating a neuron.
///
/// The identifier of each variant (see [`id`][Self::id]) is stable and is what genome files
/// record for each neuron.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActivationFunction {
    /// Identity function. Outputs `x`.
    Linear,
    /// Outputs `0.5 + atan(x) / pi`.
    ArcTan,
    /// Outputs `x` for `x > 0`, or `0.001 * x` otherwise.
    LeakyReLU,
    /// [`LeakyReLU`][Self::LeakyReLU] shifted left by `0.5`.
    LeakyReLUShifted,
    /// Logistic function. Outputs `1 / (1 + exp(-x))`.
    Logistic,
    /// Steepened logistic function using [`fast_exp`]. Outputs `1 / (1 + fast_exp(-4.9 * x))`.
    LogisticApproximantSteep,
    /// Steepened logistic function. Outputs `1 / (1 + exp(-4.9 * x))`.
    LogisticSteep,
    /// Outputs `max(x, -1)`.
    MaxMinusOne,
    /// Polynomial approximation of the steepened logistic function.
    PolynomialApproximantSteep,
    /// Sigmoid built from two quadratic pieces, with a near-flat tail past `|x| = 0.999`.
    QuadraticSigmoid,
    /// Rectified linear unit. Outputs `max(0, x)`.
    ReLU,
    /// Scaled exponential linear unit.
    ScaledELU,
    /// Unipolar soft-sign with a steep slope at zero. Outputs `0.5 + x / (2 * (0.2 + abs(x)))`.
    SoftSignSteep,
    /// S-shaped rectified linear unit, linear on `(0.001, 0.999)`.
    SReLU,
    /// [`SReLU`][Self::SReLU] shifted left by `0.5`.
    SReLUShifted,
    /// Hyperbolic tangent function. Outputs `tanh(x)`.
    TanH,
    /// Gaussian bump. Outputs `exp(-(2.5 * x)^2)`.
    Gaussian,
    /// Outputs `sin(2 * x)`.
    Sine,
    /// Outputs `0` for every input.
    Null,
}

impl ActivationFunction {
    /// Every activation function, in declaration order.
    pub const ALL: [ActivationFunction; 19] = [
        Self::Linear,
        Self::ArcTan,
        Self::LeakyReLU,
        Self::LeakyReLUShifted,
        Self::Logistic,
        Self::LogisticApproximantSteep,
        Self::LogisticSteep,
        Self::MaxMinusOne,
        Self::PolynomialApproximantSteep,
        Self::QuadraticSigmoid,
        Self::ReLU,
        Self::ScaledELU,
        Self::SoftSignSteep,
        Self::SReLU,
        Self::SReLUShifted,
        Self::TanH,
        Self::Gaussian,
        Self::Sine,
        Self::Null,
    ];

    /// Applies the activation function to the input.
    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Linear => linear(x),
            Self::ArcTan => arc_tan(x),
            Self::LeakyReLU => leaky_relu(x),
            Self::LeakyReLUShifted => leaky_relu_shifted(x),
            Self::Logistic => logistic(x),
            Self::LogisticApproximantSteep => logistic_approximant_steep(x),
            Self::LogisticSteep => logistic_steep(x),
            Self::MaxMinusOne => max_minus_one(x),
            Self::PolynomialApproximantSteep => polynomial_approximant_steep(x),
            Self::QuadraticSigmoid => quadratic_sigmoid(x),
            Self::ReLU => relu(x),
            Self::ScaledELU => scaled_elu(x),
            Self::SoftSignSteep => soft_sign_steep(x),
            Self::SReLU => srelu(x),
            Self::SReLUShifted => srelu_shifted(x),
            Self::TanH => tanh(x),
            Self::Gaussian => gaussian(x),
            Self::Sine => sine(x),
            Self::Null => null(x),
        }
    }

    /// Returns the corresponding function to the `ActivationFunction`.
    pub fn get_function(self) -> fn(f64) -> f64 {
        match self {
            Self::Linear => linear,
            Self::ArcTan => arc_tan,
            Self::LeakyReLU => leaky_relu,
            Self::LeakyReLUShifted => leaky_relu_shifted,
            Self::Logistic => logistic,
            Self::LogisticApproximantSteep => logistic_approximant_steep,
            Self::LogisticSteep => logistic_steep,
            Self::MaxMinusOne => max_minus_one,
            Self::PolynomialApproximantSteep => polynomial_approximant_steep,
            Self::QuadraticSigmoid => quadratic_sigmoid,
            Self::ReLU => relu,
            Self::ScaledELU => scaled_elu,
            Self::SoftSignSteep => soft_sign_steep,
            Self::SReLU => srelu,
            Self::SReLUShifted => srelu_shifted,
            Self::TanH => tanh,
            Self::Gaussian => gaussian,
            Self::Sine => sine,
            Self::Null => null,
        }
    }

    /// Returns the stable identifier of the function.
    pub fn id(self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::ArcTan => "ArcTan",
            Self::LeakyReLU => "LeakyReLU",
            Self::LeakyReLUShifted => "LeakyReLUShifted",
            Self::Logistic => "Logistic",
            Self::LogisticApproximantSteep => "LogisticApproximantSteep",
            Self::LogisticSteep => "LogisticSteep",
            Self::MaxMinusOne => "MaxMinusOne",
            Self::PolynomialApproximantSteep => "PolynomialApproximantSteep",
            Self::QuadraticSigmoid => "QuadraticSigmoid",
            Self::ReLU => "ReLU",
            Self::ScaledELU => "ScaledELU",
            Self::SoftSignSteep => "SoftSignSteep",
            Self::SReLU => "SReLU",
            Self::SReLUShifted => "SReLUShifted",
            Self::TanH => "TanH",
            Self::Gaussian => "Gaussian",
            Self::Sine => "Sine",
            Self::Null => "Null",
        }
    }
}

impl fmt::Display for ActivationFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ActivationFunction {
    type Err = NotFoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|function| function.id() == s)
            .ok_or_else(|| NotFoundError::new(s))
    }
}

/// An activation function identifier did not match any known function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotFoundError {
    id: String,
}

impl NotFoundError {
    pub(crate) fn new<S: Into<String>>(id: S) -> Self {
        Self { id: id.into() }
    }

    /// Returns the identifier that was looked up.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "activation function `{}` not found", self.id)
    }
}

impl error::Error for NotFoundError {}

/// Fast approximation of `exp(v)`.
///
/// A linear transform of `v` is rounded to an integer and written into the upper 32 bits of an
/// IEEE-754 double, which places it across the exponent and the high mantissa bits. The
/// constants are `2^20 / ln(2) = 1512775` and `1023 * 2^20 = 1072693248`, with `60801` chosen to
/// minimise the RMS relative error. The relative error stays below 4% across the domain.
///
/// The transform is rounded half to even, so a transform ending in exactly `.5` goes to the even
/// neighbour. This matters for golden values: `fast_exp(4.9)` lands on such a tie.
///
/// `v` is clamped to `[-700, 700]`, the range in which the upper word holds a finite positive
/// double, so the result saturates towards `0` or a large finite value instead of wrapping into
/// the sign bit. Inside that range the result is bit-exact with the unclamped transform. NaN
/// survives the clamp and is propagated into the result.
#[inline]
pub fn fast_exp(v: f64) -> f64 {
    let v = v.clamp(-700.0, 700.0);
    let bits = (1_512_775.0 * v + (1_072_693_248.0 - 60_801.0)).round_ties_even() as i64;
    // `v - v` is zero for every finite `v` and NaN for NaN
    f64::from_bits((bits << 32) as u64) + (v - v)
}

/// Outputs `x`.
pub fn linear(x: f64) -> f64 {
    x
}

/// Outputs `0.5 + atan(x) / pi`.
pub fn arc_tan(x: f64) -> f64 {
    0.5 + x.atan() / PI
}

/// Outputs `x` for `x > 0`, or `0.001 * x` otherwise.
pub fn leaky_relu(x: f64) -> f64 {
    const A: f64 = 0.001;

    if x > 0.0 {
        x
    } else {
        x * A
    }
}

/// Outputs `leaky_relu(x + 0.5)`.
pub fn leaky_relu_shifted(x: f64) -> f64 {
    leaky_relu(x + 0.5)
}

/// Logistic function. Outputs `1 / (1 + exp(-x))`.
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Outputs `1 / (1 + fast_exp(-4.9 * x))`.
///
/// `f(0)` is `0.50735...` rather than `0.5` because of the [`fast_exp`] error.
pub fn logistic_approximant_steep(x: f64) -> f64 {
    1.0 / (1.0 + fast_exp(-4.9 * x))
}

/// Outputs `1 / (1 + exp(-4.9 * x))`.
pub fn logistic_steep(x: f64) -> f64 {
    1.0 / (1.0 + (-4.9 * x).exp())
}

/// Outputs `max(x, -1)`.
pub fn max_minus_one(x: f64) -> f64 {
    if x > -1.0 {
        x
    } else {
        -1.0
    }
}

/// Polynomial approximation of `logistic_steep`, using `1 + |y| + 0.555 y^2 + 0.143 y^4` in
/// place of `exp(|y|)` where `y = 4.9 * x`.
pub fn polynomial_approximant_steep(x: f64) -> f64 {
    let y = x * 4.9;
    let y2 = y * y;
    let e = 1.0 + y.abs() + y2 * 0.555 + y2 * y2 * 0.143;
    let f = if y > 0.0 { 1.0 / e } else { e };
    1.0 / (1.0 + f)
}

/// Sigmoid with quadratic segments on `(-0.999, 0.999)` and near-flat linear tails outside.
pub fn quadratic_sigmoid(x: f64) -> f64 {
    const T: f64 = 0.999;
    const A: f64 = 0.00001;

    // Zero maps to exactly 0.5
    let sign = if x == 0.0 { 0.0 } else { x.signum() };
    let x = x.abs();
    let y = if x < T {
        T - (x - T) * (x - T)
    } else {
        T + (x - T) * A
    };

    y * sign * 0.5 + 0.5
}

/// Rectified linear unit. Outputs `max(0, x)`.
pub fn relu(x: f64) -> f64 {
    if x > 0.0 {
        x
    } else {
        0.0
    }
}

/// Scaled exponential linear unit.
pub fn scaled_elu(x: f64) -> f64 {
    const ALPHA: f64 = 1.673_263_242_354_377_3;
    const SCALE: f64 = 1.050_700_987_355_480_5;

    if x >= 0.0 {
        SCALE * x
    } else {
        SCALE * (ALPHA * x.exp() - ALPHA)
    }
}

/// Outputs `0.5 + x / (2 * (0.2 + abs(x)))`.
pub fn soft_sign_steep(x: f64) -> f64 {
    0.5 + x / (2.0 * (0.2 + x.abs()))
}

/// S-shaped rectified linear unit. Linear on `(0.001, 0.999)`, with a slope of `0.00001`
/// outside that interval.
pub fn srelu(x: f64) -> f64 {
    const TL: f64 = 0.001;
    const TR: f64 = 0.999;
    const A: f64 = 0.00001;

    if x > TL && x < TR {
        x
    } else if x <= TL {
        TL + (x - TL) * A
    } else {
        TR + (x - TR) * A
    }
}

/// Outputs `srelu(x + 0.5)`.
pub fn srelu_shifted(x: f64) -> f64 {
    srelu(x + 0.5)
}

/// Outputs `tanh(x)`.
pub fn tanh(x: f64) -> f64 {
    x.tanh()
}

/// Outputs `exp(-(2.5 * x)^2)`.
pub fn gaussian(x: f64) -> f64 {
    (-(x * 2.5).powi(2)).exp()
}

/// Outputs `sin(2 * x)`.
pub fn sine(x: f64) -> f64 {
    (2.0 * x).sin()
}

/// Outputs `0`.
pub fn null(_: f64) -> f64 {
    0.0
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_activation() {
        assert_approx_eq!(5.0, ActivationFunction::Linear.apply(5.0));
        assert_approx_eq!(0.75, ActivationFunction::ArcTan.apply(1.0));
        assert_approx_eq!(-0.005, ActivationFunction::LeakyReLU.apply(-5.0));
        assert_approx_eq!(0.5, ActivationFunction::LeakyReLUShifted.apply(0.0));
        assert_approx_eq!(0.8807970779778823, ActivationFunction::Logistic.apply(2.0));
        assert_approx_eq!(0.5, ActivationFunction::LogisticSteep.apply(0.0));
        assert_approx_eq!(-1.0, ActivationFunction::MaxMinusOne.apply(-5.0));
        assert_approx_eq!(0.5, ActivationFunction::PolynomialApproximantSteep.apply(0.0));
        assert_approx_eq!(0.5, ActivationFunction::QuadraticSigmoid.apply(0.0));
        assert_approx_eq!(0.9995, ActivationFunction::QuadraticSigmoid.apply(0.999));
        assert_approx_eq!(5.0, ActivationFunction::ReLU.apply(5.0));
        assert_approx_eq!(0.0, ActivationFunction::ReLU.apply(-5.0));
        assert_approx_eq!(1.0507009873554805, ActivationFunction::ScaledELU.apply(1.0));
        assert_approx_eq!(0.5, ActivationFunction::SoftSignSteep.apply(0.0));
        assert_approx_eq!(0.25, ActivationFunction::SReLU.apply(0.25));
        assert_approx_eq!(0.75, ActivationFunction::SReLUShifted.apply(0.25));
        assert_approx_eq!(0.9640275800758169, ActivationFunction::TanH.apply(2.0));
        assert_approx_eq!(1.0, ActivationFunction::Gaussian.apply(0.0));
        assert_approx_eq!(0.9092974268256817, ActivationFunction::Sine.apply(1.0));
        assert_approx_eq!(0.0, ActivationFunction::Null.apply(123.0));
    }

    #[test]
    fn test_get_function_matches_apply() {
        for function in ActivationFunction::ALL {
            let f = function.get_function();
            for &x in &[-3.0, -0.5, 0.0, 0.3, 2.0] {
                assert_eq!(function.apply(x).to_bits(), f(x).to_bits(), "{}", function);
            }
        }
    }

    #[test]
    fn test_ids_round_trip_through_from_str() {
        for function in ActivationFunction::ALL {
            assert_eq!(Ok(function), function.id().parse::<ActivationFunction>());
            assert_eq!(function.id(), function.to_string());
        }

        let err = "Sigmoid".parse::<ActivationFunction>().unwrap_err();
        assert_eq!("Sigmoid", err.id());
    }

    #[test]
    fn test_fast_exp_constants() {
        // exp(0): upper word is 0x3FF00000 - 60801
        assert_eq!(
            fast_exp(0.0).to_bits(),
            ((1_072_693_248u64 - 60_801) << 32)
        );

        for &v in &[-20.0, -5.0, -1.0, -0.1, 0.0, 0.1, 1.0, 5.0, 20.0] {
            let exact = f64::exp(v);
            let relative = (fast_exp(v) - exact).abs() / exact;
            assert!(relative < 0.04, "v = {}, relative error = {}", v, relative);
        }
    }

    #[test]
    fn test_fast_exp_rounds_half_to_even() {
        // 1512775 * 4.9 + 1072632447 = 1080045044.5
        assert_eq!(1_080_045_044, fast_exp(4.9).to_bits() >> 32);
        // 1512775 * 1.5 + 1072632447 = 1074901609.5
        assert_eq!(1_074_901_610, fast_exp(1.5).to_bits() >> 32);
        assert_eq!(1_073_388_834, fast_exp(0.5).to_bits() >> 32);
        // Not a tie
        assert_eq!(1_068_926_148, fast_exp(-2.45).to_bits() >> 32);
    }

    #[test]
    fn test_fast_exp_extremes() {
        assert!(fast_exp(f64::NAN).is_nan());
        assert!(fast_exp(f64::NEG_INFINITY) >= 0.0);
        assert!(fast_exp(f64::NEG_INFINITY) < 1e-300);
        assert!(fast_exp(f64::INFINITY).is_finite());
        assert!(fast_exp(f64::INFINITY) > 1e300);
    }

    #[test]
    fn test_logistic_approximant_steep_at_zero() {
        let y = logistic_approximant_steep(0.0);
        assert!((y - 0.5).abs() / 0.5 < 0.02, "f(0) = {}", y);
        assert_approx_eq!(0.507_35, y, 1e-4);
    }

    #[test]
    fn test_logistic_approximant_steep_golden_values() {
        assert_approx_eq!(0.992_737_457_451_896_2, logistic_approximant_steep(1.0), 1e-12);
        assert_approx_eq!(0.919_148_615_383_469_1, logistic_approximant_steep(0.5), 1e-12);
        assert_approx_eq!(0.007_666_593_045_411_836, logistic_approximant_steep(-1.0), 1e-12);
    }

    #[test]
    fn test_logistic_approximant_steep_saturates() {
        for &x in &[1e300, f64::INFINITY] {
            assert_eq!(1.0, logistic_approximant_steep(x));
            let y = logistic_approximant_steep(-x);
            assert!(y > 0.0 && y < 1e-300, "f({}) = {}", -x, y);
        }
    }

    #[test]
    fn test_quadratic_sigmoid_is_symmetric() {
        assert_eq!(0.5, quadratic_sigmoid(0.0));
        assert_eq!(0.5, quadratic_sigmoid(-0.0));
        for &x in &[1e-12, 0.25, 0.5, 0.998, 2.0, 50.0] {
            assert_approx_eq!(1.0, quadratic_sigmoid(x) + quadratic_sigmoid(-x), 1e-12);
        }
    }

    #[test]
    fn test_nan_propagates() {
        assert!(soft_sign_steep(f64::NAN).is_nan());
        assert!(logistic_approximant_steep(f64::NAN).is_nan());
        assert!(logistic(f64::NAN).is_nan());
    }

    proptest! {
        #[test]
        fn soft_sign_steep_is_bounded(x in -1e6f64..1e6) {
            let y = soft_sign_steep(x);
            prop_assert!(y > 0.0 && y < 1.0, "f({}) = {}", x, y);
        }

        #[test]
        fn soft_sign_steep_is_monotonic(a in -1e3f64..1e3, delta in 1e-3f64..1e3) {
            prop_assert!(soft_sign_steep(a) < soft_sign_steep(a + delta));
        }

        #[test]
        fn logistic_approximant_steep_is_bounded(x in -100.0f64..100.0) {
            let y = logistic_approximant_steep(x);
            prop_assert!(y >= 0.0 && y <= 1.0 + 1e-9, "f({}) = {}", x, y);
        }

        #[test]
        fn logistic_approximant_steep_is_monotonic(a in -100.0f64..100.0, delta in 0.0f64..10.0) {
            prop_assert!(logistic_approximant_steep(a) <= logistic_approximant_steep(a + delta));
        }

        #[test]
        fn bounded_functions_stay_in_unit_interval(x in -50.0f64..50.0) {
            for function in [
                ActivationFunction::ArcTan,
                ActivationFunction::Logistic,
                ActivationFunction::LogisticSteep,
                ActivationFunction::PolynomialApproximantSteep,
                ActivationFunction::Gaussian,
            ] {
                let y = function.apply(x);
                prop_assert!((0.0..=1.0).contains(&y), "{}({}) = {}", function, x, y);
            }
        }
    }
}
