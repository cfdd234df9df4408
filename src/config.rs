// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search parameters.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parameters of one decoding run.
///
/// Missing fields take their [`Default`] values when deserialising.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Hypotheses kept per stack before expansion.
    pub beam_width: usize,
    /// Maximum jump between consecutive source spans; `None` is unlimited.
    pub max_distortion: Option<usize>,
    /// Expand the survivors of a stack on the rayon pool.
    pub parallel_expansion: bool,
    /// Fewest survivors worth expanding in parallel.
    pub parallel_threshold: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            beam_width: 200,
            max_distortion: Some(6),
            parallel_expansion: false,
            parallel_threshold: 64,
        }
    }
}

impl SearchConfig {
    /// Strictly left-to-right translation.
    pub fn monotone(beam_width: usize) -> Self {
        Self {
            beam_width,
            max_distortion: Some(0),
            ..Self::default()
        }
    }

    /// Any span may follow any other.
    pub fn unlimited_reordering(beam_width: usize) -> Self {
        Self {
            beam_width,
            max_distortion: None,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.beam_width == 0 {
            return Err(Error::InvalidConfig("beam_width must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(SearchConfig::monotone(5).max_distortion, Some(0));
        assert_eq!(SearchConfig::monotone(5).beam_width, 5);
        assert_eq!(SearchConfig::unlimited_reordering(7).max_distortion, None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SearchConfig::from_json_str(r#"{"beam_width": 10}"#).unwrap();
        assert_eq!(config.beam_width, 10);
        assert_eq!(config.max_distortion, Some(6));
        assert!(!config.parallel_expansion);
    }

    #[test]
    fn test_null_distortion_is_unlimited() {
        let config = SearchConfig::from_json_str(r#"{"max_distortion": null}"#).unwrap();
        assert_eq!(config.max_distortion, None);
    }

    #[test]
    fn test_zero_beam_rejected() {
        assert!(matches!(
            SearchConfig::from_json_str(r#"{"beam_width": 0}"#),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(SearchConfig::from_json_str("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_round_trip() {
        let config = SearchConfig::unlimited_reordering(3);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SearchConfig::from_json_str(&json).unwrap(), config);
    }
}
