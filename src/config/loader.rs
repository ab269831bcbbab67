//! Loading training specifications from disk

use crate::config::schema::TrainSpec;
use crate::config::validate::validate_config;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Load and validate a YAML training specification
///
/// # Example
///
/// ```no_run
/// use flowgan::config::load_config;
///
/// let spec = load_config("config.yaml")?;
/// println!("training on {}", spec.data.train.display());
/// # Ok::<(), flowgan::Error>(())
/// ```
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<TrainSpec> {
    let path = config_path.as_ref();
    let yaml_content = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read config file {}", path.display()), e))?;

    let spec: TrainSpec = serde_yaml::from_str(&yaml_content)
        .map_err(|source| Error::Yaml { path: path.to_path_buf(), source })?;

    validate_config(&spec).map_err(|e| Error::Configuration(format!("Invalid config: {e}")))?;

    Ok(spec)
}
