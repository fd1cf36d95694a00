use crate::error::{NeuroevoError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Trait for configuration sections
pub trait ConfigSection: Serialize + DeserializeOwned + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<()>;
}

/// Parse and validate a component's `parameters` value.
///
/// A missing (`null`) value means "all defaults".
pub fn parse_parameters<P: ConfigSection>(value: &serde_json::Value) -> Result<P> {
    let params: P = if value.is_null() {
        P::default()
    } else {
        serde_json::from_value(value.clone()).map_err(|e| {
            NeuroevoError::Configuration(format!(
                "Invalid parameters for {}: {}",
                P::section_name(),
                e
            ))
        })?
    };
    params.validate()?;
    Ok(params)
}
