//! Functions that wrap up loading and saving configurations as JSON.

use std::fs::{DirBuilder, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;

use super::{EngineConfig, Error};

/// Loads a configuration from a JSON string and validates it.
pub(crate) fn load_str(s: &str) -> Result<EngineConfig, Error> {
    let config: EngineConfig = serde_json::from_str(s)?;
    config.validate()?;

    Ok(config)
}

/// Loads a configuration from a JSON file and validates it.
pub(crate) fn load_file<P: AsRef<Path>>(path: P) -> Result<EngineConfig, Error> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config: EngineConfig = serde_json::from_reader(reader)?;
    config.validate()?;

    debug!("loaded engine config from {}: {:?}", path.display(), config);

    Ok(config)
}

/// Encodes a configuration to a pretty-printed JSON string.
pub(crate) fn to_string(config: &EngineConfig) -> Result<String, Error> {
    serde_json::to_string_pretty(config).map_err(Into::into)
}

/// Encodes a configuration to a JSON file.
///
/// Recursively creates missing directories if `create_dirs` is `true`.
pub(crate) fn to_file<P: AsRef<Path>>(
    config: &EngineConfig,
    path: P,
    create_dirs: bool,
) -> Result<(), Error> {
    let path = path.as_ref();

    if create_dirs {
        if let Some(parent) = path.parent() {
            DirBuilder::new().recursive(true).create(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, config)?;
    writer.flush()?;

    Ok(())
}
