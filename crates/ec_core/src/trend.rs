//! Tendência entre leituras consecutivas aceitas.

use crate::types::{FanReading, TemperatureReading};
use std::cmp::Ordering;

/// Direção em relação à leitura anterior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Falling,
    Steady,
    /// Sem leitura anterior
    Unknown,
}

impl Trend {
    pub fn between(previous: Option<u8>, current: u8) -> Self {
        match previous.map(|p| current.cmp(&p)) {
            Some(Ordering::Greater) => Trend::Rising,
            Some(Ordering::Less) => Trend::Falling,
            Some(Ordering::Equal) => Trend::Steady,
            None => Trend::Unknown,
        }
    }
}

/// Últimos valores aceitos de cada categoria.
///
/// Só é atualizado quando uma leitura é aceita; candidatos descartados
/// não passam por aqui.
#[derive(Debug, Clone, Default)]
pub struct TrendState {
    previous_temperature: Option<TemperatureReading>,
    previous_fan_duty: Option<u8>,
}

impl TrendState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compara com a temperatura anterior e guarda a nova.
    pub fn observe_temperature(&mut self, reading: &TemperatureReading) -> Trend {
        let previous = self.previous_temperature.as_ref().map(|r| r.celsius());
        let trend = Trend::between(previous, reading.celsius());
        self.previous_temperature = Some(reading.clone());
        trend
    }

    /// Retorna `(changed, direction)` e guarda o novo duty.
    pub fn observe_fan(&mut self, reading: &FanReading) -> (bool, Trend) {
        let direction = Trend::between(self.previous_fan_duty, reading.duty_percent);
        let changed = matches!(direction, Trend::Rising | Trend::Falling);
        self.previous_fan_duty = Some(reading.duty_percent);
        (changed, direction)
    }

    pub fn previous_temperature(&self) -> Option<&TemperatureReading> {
        self.previous_temperature.as_ref()
    }

    pub fn previous_fan_duty(&self) -> Option<u8> {
        self.previous_fan_duty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HexByte;
    use crate::validator::RangeValidator;

    fn temp(token: &str) -> TemperatureReading {
        RangeValidator::default()
            .accept(HexByte::parse(token).unwrap())
            .unwrap()
    }

    fn fan(duty: u8) -> FanReading {
        FanReading {
            mode: 3,
            duty_percent: duty,
            source_hex: format!("{duty:02X}"),
        }
    }

    #[test]
    fn between_covers_all_directions() {
        assert_eq!(Trend::between(None, 50), Trend::Unknown);
        assert_eq!(Trend::between(Some(50), 51), Trend::Rising);
        assert_eq!(Trend::between(Some(50), 49), Trend::Falling);
        assert_eq!(Trend::between(Some(50), 50), Trend::Steady);
    }

    #[test]
    fn temperature_sequence() {
        let mut state = TrendState::new();
        assert_eq!(state.observe_temperature(&temp("37")), Trend::Unknown);
        assert_eq!(state.observe_temperature(&temp("37")), Trend::Steady);
        assert_eq!(state.observe_temperature(&temp("3C")), Trend::Rising);
        assert_eq!(state.observe_temperature(&temp("30")), Trend::Falling);
        assert_eq!(state.previous_temperature().map(|r| r.celsius()), Some(0x30));
    }

    #[test]
    fn first_fan_reading_is_not_a_change() {
        let mut state = TrendState::new();
        assert_eq!(state.observe_fan(&fan(60)), (false, Trend::Unknown));
        assert_eq!(state.observe_fan(&fan(60)), (false, Trend::Steady));
        assert_eq!(state.observe_fan(&fan(70)), (true, Trend::Rising));
        assert_eq!(state.observe_fan(&fan(40)), (true, Trend::Falling));
        assert_eq!(state.previous_fan_duty(), Some(40));
    }
}
