//! Case file schema.

use pbal_balance::{AuxiliaryEnergyData, BalanceConfig};
use pbal_props::ProcessStream;
use serde::{Deserialize, Serialize};

/// One balance problem: the streams crossing the boundary, equipment energy
/// data and engine settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceCase {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub streams: Vec<ProcessStream>,
    #[serde(default)]
    pub auxiliary: AuxiliaryEnergyData,
    #[serde(default)]
    pub config: BalanceConfig,
}

impl BalanceCase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: crate::LATEST_VERSION,
            name: name.into(),
            description: None,
            streams: Vec::new(),
            auxiliary: AuxiliaryEnergyData::default(),
            config: BalanceConfig::default(),
        }
    }

    pub fn with_stream(mut self, stream: ProcessStream) -> Self {
        self.streams.push(stream);
        self
    }

    pub fn with_auxiliary(mut self, auxiliary: AuxiliaryEnergyData) -> Self {
        self.auxiliary = auxiliary;
        self
    }

    pub fn with_config(mut self, config: BalanceConfig) -> Self {
        self.config = config;
        self
    }
}
