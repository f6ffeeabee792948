//! Máquina de estados "próxima linha carrega um valor".

use crate::patterns;

/// Estado do parser entre linhas.
///
/// Um marcador isolado (`CPUTmp`, `CFan idx,PWM`) avisa que o valor vem na
/// linha seguinte. A expectativa vale só para essa linha.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParserState {
    #[default]
    Idle,
    ExpectingTemperature,
    ExpectingFan,
}

impl ParserState {
    /// Estado após examinar `line`.
    ///
    /// Independe do estado anterior: qualquer expectativa pendente é
    /// consumida pela linha atual, com ou sem sucesso.
    pub fn after(line: &str) -> Self {
        if patterns::is_temperature_marker(line) {
            ParserState::ExpectingTemperature
        } else if patterns::announces_fan_data(line) {
            ParserState::ExpectingFan
        } else {
            ParserState::Idle
        }
    }

    pub fn is_expecting(self) -> bool {
        !matches!(self, ParserState::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_set_expectation() {
        assert_eq!(ParserState::after("CPUTmp"), ParserState::ExpectingTemperature);
        assert_eq!(ParserState::after("36,CFan idx,PWM"), ParserState::ExpectingFan);
    }

    #[test]
    fn inline_frames_do_not() {
        assert_eq!(ParserState::after("04,46,CFan idx,PWM"), ParserState::Idle);
        assert_eq!(ParserState::after("37,T(A0,S0)wTTTCPUTmp"), ParserState::Idle);
        assert_eq!(ParserState::after(""), ParserState::Idle);
    }

    #[test]
    fn idle_is_default() {
        assert_eq!(ParserState::default(), ParserState::Idle);
        assert!(!ParserState::Idle.is_expecting());
        assert!(ParserState::ExpectingFan.is_expecting());
    }
}
