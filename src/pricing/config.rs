use crate::error::{PricingError, PricingResult};
use crate::model_params::OptionParameters;
use std::fmt;
#[cfg(feature = "serde")]
use std::path::Path;
use std::str::FromStr;

/// How a pricing report is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum OutputFormat {
    /// Human-readable lines with prices rounded to cents
    #[default]
    Text,
    /// `key=value` lines at full precision
    KeyValue,
    /// Header row plus one data row
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::KeyValue => "key-value",
            OutputFormat::Csv => "csv",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "key-value" | "kv" => Ok(OutputFormat::KeyValue),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!(
                "unknown output format '{}' (expected text, key-value or csv)",
                other
            )),
        }
    }
}

/// Monte Carlo run settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// Number of simulated terminal prices
    #[cfg_attr(feature = "serde", serde(default = "default_paths"))]
    pub paths: usize,
    /// Random seed for reproducibility (None = OS entropy)
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::fast()
    }
}

impl SimulationConfig {
    /// 10^8 paths: standard error around 0.01% of an at-the-money price
    pub fn production() -> Self {
        Self {
            paths: 100_000_000,
            seed: None,
        }
    }

    /// 10^6 paths, the interactive default
    pub fn fast() -> Self {
        Self {
            paths: default_paths(),
            seed: None,
        }
    }

    /// 10^7 paths
    pub fn research() -> Self {
        Self {
            paths: 10_000_000,
            seed: None,
        }
    }

    /// 10^3 paths for smoke checks
    pub fn minimal() -> Self {
        Self {
            paths: 1_000,
            seed: None,
        }
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> PricingResult<Self> {
        match name.to_lowercase().as_str() {
            "production" => Ok(Self::production()),
            "fast" => Ok(Self::fast()),
            "research" => Ok(Self::research()),
            "minimal" => Ok(Self::minimal()),
            other => Err(PricingError::Config(format!(
                "unknown preset '{}' (expected production, fast, research or minimal)",
                other
            ))),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> PricingResult<()> {
        if self.paths == 0 {
            return Err(PricingError::invalid(
                "paths",
                0.0,
                "at least one simulated path is required",
            ));
        }
        Ok(())
    }
}

/// Report settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub format: OutputFormat,

    /// Symbol printed in front of prices in text mode
    #[cfg_attr(feature = "serde", serde(default = "default_currency"))]
    pub currency: String,

    /// Level of the Monte Carlo confidence interval in structured output
    #[cfg_attr(feature = "serde", serde(default = "default_confidence_level"))]
    pub confidence_level: f64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            currency: default_currency(),
            confidence_level: default_confidence_level(),
        }
    }
}

/// Everything needed for one pricing run, loadable from TOML:
///
/// ```toml
/// [option]
/// spot = 100.0
/// strike = 105.0
///
/// [simulation]
/// paths = 1000000
/// seed = 7
///
/// [output]
/// format = "key-value"
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub option: OptionParameters,

    #[cfg_attr(feature = "serde", serde(default))]
    pub simulation: SimulationConfig,

    #[cfg_attr(feature = "serde", serde(default))]
    pub output: OutputConfig,
}

impl PricingConfig {
    #[cfg(feature = "serde")]
    pub fn from_toml_str(s: &str) -> PricingResult<Self> {
        toml::from_str(s).map_err(|e| PricingError::Config(e.to_string()))
    }

    #[cfg(feature = "serde")]
    pub fn from_file<P: AsRef<Path>>(path: P) -> PricingResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PricingError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> PricingResult<()> {
        self.option.validate()?;
        self.simulation.validate()?;
        let level = self.output.confidence_level;
        if !(level > 0.0 && level < 1.0) {
            return Err(PricingError::invalid(
                "confidence_level",
                level,
                "must lie strictly between 0 and 1",
            ));
        }
        Ok(())
    }
}

fn default_paths() -> usize {
    1_000_000
}

fn default_currency() -> String {
    "£".to_string()
}

fn default_confidence_level() -> f64 {
    0.95
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(SimulationConfig::production().paths, 100_000_000);
        assert_eq!(SimulationConfig::research().paths, 10_000_000);
        assert_eq!(SimulationConfig::fast().paths, 1_000_000);
        assert_eq!(SimulationConfig::minimal().paths, 1_000);
        assert_eq!(SimulationConfig::default(), SimulationConfig::fast());
        assert_eq!(SimulationConfig::preset("Research").unwrap().paths, 10_000_000);
        assert!(SimulationConfig::preset("turbo").is_err());
    }

    #[test]
    fn test_zero_paths_fails_validation() {
        let cfg = SimulationConfig {
            paths: 0,
            seed: None,
        };
        assert!(matches!(
            cfg.validate(),
            Err(PricingError::InvalidParameter { name: "paths", .. })
        ));
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("KEY-VALUE".parse::<OutputFormat>().unwrap(), OutputFormat::KeyValue);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("json".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::KeyValue.to_string(), "key-value");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_toml_partial_file_uses_defaults() {
        let cfg = PricingConfig::from_toml_str(
            r#"
            [option]
            strike = 105.0

            [simulation]
            seed = 7

            [output]
            format = "csv"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.option.strike, 105.0);
        assert_eq!(cfg.option.spot, 100.0);
        assert_eq!(cfg.option.volatility, 0.2);
        assert_eq!(cfg.simulation.paths, 1_000_000);
        assert_eq!(cfg.simulation.seed, Some(7));
        assert_eq!(cfg.output.format, OutputFormat::Csv);
        assert_eq!(cfg.output.currency, "£");
        assert!(cfg.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_toml_errors_are_config_errors() {
        assert!(matches!(
            PricingConfig::from_toml_str("[option]\nspot = \"lots\""),
            Err(PricingError::Config(_))
        ));
        let cfg = PricingConfig::from_toml_str("[option]\nspot = -1.0").unwrap();
        assert!(matches!(
            cfg.validate(),
            Err(PricingError::InvalidParameter { name: "spot", .. })
        ));
        assert!(PricingConfig::from_file("does/not/exist.toml").is_err());
    }
}
