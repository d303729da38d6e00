//! Configuration system

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Tuning constants for the simulation step
///
/// Everything else the engine needs comes from per-body shape parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fraction of each positional correction applied to body B; the
    /// complement goes to body A. Ignored when one side is static, which
    /// receives no correction at all.
    pub correction_split: f32,

    /// Number of resolve passes per tick. Values above 1 damp residual
    /// overlap left by simultaneous multi-body contacts.
    pub solver_iterations: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            correction_split: 0.5,
            solver_iterations: 1,
        }
    }
}

impl Config for SimulationConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning() {
        let config = SimulationConfig::default();
        assert_eq!(config.correction_split, 0.5);
        assert_eq!(config.solver_iterations, 1);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SimulationConfig {
            correction_split: 0.25,
            solver_iterations: 4,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: SimulationConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: SimulationConfig = toml::from_str("solver_iterations = 3").unwrap();
        assert_eq!(parsed.correction_split, 0.5);
        assert_eq!(parsed.solver_iterations, 3);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join("physics2d_config_test.toml");
        let path = path.to_str().unwrap();
        let config = SimulationConfig {
            correction_split: 0.75,
            solver_iterations: 2,
        };
        config.save_to_file(path).unwrap();
        let loaded = SimulationConfig::load_from_file(path).unwrap();
        assert_eq!(loaded, config);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let err = SimulationConfig::default()
            .save_to_file("tuning.yaml")
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
