//! Runtime settings for a [`CyclicNetwork`][crate::CyclicNetwork].

mod error;
#[cfg(feature = "json")]
mod functions;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::network;

pub use error::Error;
#[cfg(feature = "json")]
pub(crate) use functions::*;

/// Settings that control how a network is activated and how its outputs are read.
///
/// With the `serde` feature enabled, missing fields fall back to their defaults when
/// deserializing.
///
/// # Examples
///
/// ```
/// use cyclic_net::EngineConfig;
///
/// let config = EngineConfig::new()
///     .with_timesteps_per_activation(3)
///     .with_bounded_output(false);
///
/// assert_eq!(3, config.timesteps_per_activation());
/// assert!(!config.bounded_output());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    // The number of propagation/activation passes run by each call to `activate`
    timesteps_per_activation: usize,
    // Whether the output view clamps values to [0, 1] when they are read
    bounded_output: bool,
}

impl EngineConfig {
    /// Returns the default configuration: one timestep per activation, bounded outputs.
    pub fn new() -> Self {
        Self {
            timesteps_per_activation: 1,
            bounded_output: true,
        }
    }

    /// Loads a configuration from a JSON string and validates it.
    #[cfg(feature = "json")]
    pub fn load_str(s: &str) -> Result<Self, Error> {
        load_str(s)
    }

    /// Loads a configuration from a JSON file and validates it.
    #[cfg(feature = "json")]
    pub fn load_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Error> {
        load_file(path)
    }

    /// Saves the configuration to a pretty-printed JSON string.
    #[cfg(feature = "json")]
    pub fn to_string(&self) -> Result<String, Error> {
        to_string(self)
    }

    /// Saves the configuration to a JSON file.
    ///
    /// Recursively creates missing directories if `create_dirs` is `true`.
    #[cfg(feature = "json")]
    pub fn to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
        create_dirs: bool,
    ) -> Result<(), Error> {
        to_file(self, path, create_dirs)
    }

    /// Sets the number of timesteps run by each activation.
    pub fn with_timesteps_per_activation(mut self, timesteps: usize) -> Self {
        self.timesteps_per_activation = timesteps;
        self
    }

    /// Sets whether output values are clamped to `[0, 1]` when read.
    pub fn with_bounded_output(mut self, bounded: bool) -> Self {
        self.bounded_output = bounded;
        self
    }

    /// Returns the number of timesteps run by each activation.
    pub fn timesteps_per_activation(&self) -> usize {
        self.timesteps_per_activation
    }

    /// Returns whether output values are clamped to `[0, 1]` when read.
    pub fn bounded_output(&self) -> bool {
        self.bounded_output
    }

    /// Checks that the configuration can be used to build a network.
    pub fn validate(&self) -> Result<(), network::Error> {
        if self.timesteps_per_activation == 0 {
            return Err(network::Error::InvalidTimesteps);
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(1, config.timesteps_per_activation());
        assert!(config.bounded_output());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_timesteps() {
        let config = EngineConfig::new().with_timesteps_per_activation(0);
        assert_eq!(Err(network::Error::InvalidTimesteps), config.validate());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_load_str() {
        let config =
            EngineConfig::load_str(r#"{ "timesteps_per_activation": 4, "bounded_output": false }"#)
                .unwrap();
        assert_eq!(4, config.timesteps_per_activation());
        assert!(!config.bounded_output());

        // Missing fields use their defaults
        let partial = EngineConfig::load_str(r#"{ "timesteps_per_activation": 2 }"#).unwrap();
        assert_eq!(EngineConfig::new().with_timesteps_per_activation(2), partial);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_load_str_invalid() {
        assert!(matches!(
            EngineConfig::load_str(r#"{ "timesteps_per_activation": 0 }"#),
            Err(Error::Invalid(network::Error::InvalidTimesteps))
        ));
        assert!(matches!(
            EngineConfig::load_str(r#"{ "timesteps_per_activation": -1 }"#),
            Err(Error::Serde(_))
        ));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_file() {
        let path = std::env::temp_dir()
            .join("cyclic_net_config_test")
            .join("engine.json");
        let config = EngineConfig::new().with_timesteps_per_activation(5);

        config.to_file(&path, true).unwrap();
        assert!(config.to_string().unwrap().contains("\"timesteps_per_activation\": 5"));
        assert_eq!(config, EngineConfig::load_file(&path).unwrap());

        assert!(matches!(
            EngineConfig::load_file(path.with_file_name("missing.json")),
            Err(Error::Io(_))
        ));
    }
}
