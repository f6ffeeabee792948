//! Validação de faixa das temperaturas candidatas.

use crate::config::DecoderConfig;
use crate::types::{HexByte, TemperatureReading};

/// Limites físicos plausíveis de temperatura da CPU (°C, inclusivos).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeValidator {
    min: u8,
    max: u8,
}

impl Default for RangeValidator {
    fn default() -> Self {
        Self::from_config(&DecoderConfig::default())
    }
}

impl RangeValidator {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub fn from_config(config: &DecoderConfig) -> Self {
        Self::new(config.temp_min, config.temp_max)
    }

    pub fn contains(&self, celsius: u8) -> bool {
        (self.min..=self.max).contains(&celsius)
    }

    /// Aceita o candidato ou descarta sem erro.
    pub fn accept(&self, candidate: HexByte) -> Option<TemperatureReading> {
        if self.contains(candidate.value()) {
            Some(TemperatureReading::accepted(candidate))
        } else {
            None
        }
    }

    pub fn bounds(&self) -> (u8, u8) {
        (self.min, self.max)
    }
}
