//! Preprocessing configuration files.
//!
//! A configuration file is TOML with three required tables:
//!
//! ```toml
//! [missingValue]
//! method = "mean"      # mean | median | mode | remove | none
//! threshold = 0.5
//!
//! [outlier]
//! method = "zscore"    # zscore | iqr | none
//! threshold = 3.0
//!
//! [standardization]
//! method = "none"      # zscore | minmax | none
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use empirica_model::{ModelError, PreprocessConfig};

/// Parse and validate configuration text.
///
/// A missing table, an unknown method or an out-of-range threshold is an
/// [`ModelError::InvalidConfig`].
pub fn parse_config(text: &str) -> std::result::Result<PreprocessConfig, ModelError> {
    let config: PreprocessConfig =
        toml::from_str(text).map_err(|e| ModelError::invalid_config(e.message()))?;
    config.validate()?;
    Ok(config)
}

/// Load the configuration at `path`, or the default when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<PreprocessConfig> {
    let Some(path) = path else {
        tracing::debug!("no configuration file, using defaults");
        return Ok(PreprocessConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("read configuration {}", path.display()))?;
    let config =
        parse_config(&text).with_context(|| format!("load configuration {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// The default configuration rendered as TOML.
pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&PreprocessConfig::default()).context("serialize default configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use empirica_model::{MissingValueMethod, OutlierMethod};

    #[test]
    fn parses_full_document() {
        let config = parse_config(
            r#"
[missingValue]
method = "remove"
threshold = 0.2

[outlier]
method = "none"
threshold = 3.0

[standardization]
method = "zscore"
"#,
        )
        .unwrap();
        assert_eq!(config.missing_value.method, MissingValueMethod::Remove);
        assert_eq!(config.outlier.method, OutlierMethod::None);
    }

    #[test]
    fn empty_document_is_invalid() {
        assert!(matches!(parse_config(""), Err(ModelError::InvalidConfig(_))));
    }

    #[test]
    fn out_of_range_threshold_is_invalid() {
        let err = parse_config(
            r#"
[missingValue]
method = "mean"
threshold = 1.5

[outlier]
method = "iqr"
threshold = 1.5

[standardization]
method = "none"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::InvalidConfig(_)));
    }

    #[test]
    fn default_round_trips() {
        let text = default_config_toml().unwrap();
        assert_eq!(parse_config(&text).unwrap(), PreprocessConfig::default());
    }
}
