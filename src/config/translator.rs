use super::traits::ConfigSection;
use crate::engines::translation::TrailingBits;
use crate::error::{NeuroevoError, Result};
use crate::simulation::network::Activation;
use serde::{Deserialize, Serialize};

/// Largest chunk that still decodes into a `u64` with room to normalize
pub const MAX_BITS_PER_WEIGHT: usize = 32;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultTranslatorParams {}

impl ConfigSection for DefaultTranslatorParams {
    fn section_name() -> &'static str {
        "DefaultTranslator"
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinToWeightParams {
    #[serde(alias = "k")]
    pub bits_per_weight: usize,
    #[serde(alias = "layers")]
    pub layer_sizes: Vec<usize>,
    pub activation: Activation,
    pub trailing_bits: TrailingBits,
}

impl Default for BinToWeightParams {
    fn default() -> Self {
        Self {
            bits_per_weight: 8,
            layer_sizes: vec![6, 3],
            activation: Activation::Sigmoid,
            trailing_bits: TrailingBits::Decode,
        }
    }
}

impl ConfigSection for BinToWeightParams {
    fn section_name() -> &'static str {
        "BinToWeightTranslator"
    }

    fn validate(&self) -> Result<()> {
        if self.bits_per_weight == 0 || self.bits_per_weight > MAX_BITS_PER_WEIGHT {
            return Err(NeuroevoError::Configuration(format!(
                "Bits per weight must be between 1 and {}",
                MAX_BITS_PER_WEIGHT
            )));
        }
        if self.layer_sizes.len() < 2 {
            return Err(NeuroevoError::Configuration(
                "At least two layer sizes (input and output) are required".to_string(),
            ));
        }
        if self.layer_sizes.iter().any(|&n| n == 0) {
            return Err(NeuroevoError::Configuration(
                "Layer sizes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::traits::parse_parameters;
    use serde_json::json;

    #[test]
    fn test_accepts_short_key_names() {
        let params: BinToWeightParams =
            parse_parameters(&json!({"k": 4, "layers": [2, 3, 1]})).unwrap();
        assert_eq!(params.bits_per_weight, 4);
        assert_eq!(params.layer_sizes, vec![2, 3, 1]);
        assert_eq!(params.activation, Activation::Sigmoid);
    }

    #[test]
    fn test_null_means_defaults() {
        let params: BinToWeightParams = parse_parameters(&serde_json::Value::Null).unwrap();
        assert_eq!(params, BinToWeightParams::default());
    }

    #[test]
    fn test_invalid_layers() {
        assert!(parse_parameters::<BinToWeightParams>(&json!({"layers": [6]})).is_err());
        assert!(parse_parameters::<BinToWeightParams>(&json!({"layers": [6, -3]})).is_err());
        assert!(parse_parameters::<BinToWeightParams>(&json!({"layers": [6, 0]})).is_err());
    }

    #[test]
    fn test_trailing_bits_names() {
        let params: BinToWeightParams =
            parse_parameters(&json!({"trailing_bits": "drop"})).unwrap();
        assert_eq!(params.trailing_bits, TrailingBits::Drop);
    }
}
