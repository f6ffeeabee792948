//! Tipos decodificados do stream de telemetria do EC.
//!
//! Leituras só existem depois de aceitas pelo [`RangeValidator`]: não há
//! construtor público para [`TemperatureReading`], então uma instância fora
//! da faixa configurada nunca é materializada.
//!
//! [`RangeValidator`]: crate::validator::RangeValidator

use crate::trend::Trend;
use std::fmt;

// ──────────────────────────────────────────────
// Byte hexadecimal
// ──────────────────────────────────────────────

/// Token de dois dígitos hex (maiúsculos) extraído de uma linha.
///
/// Mantém o texto original para exibição (`--with-hex`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexByte {
    value: u8,
    text: String,
}

impl HexByte {
    /// Converte um token de exatamente dois dígitos hex.
    pub fn parse(token: &str) -> Option<Self> {
        if token.len() != 2 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u8::from_str_radix(token, 16).ok()?;
        Some(Self {
            value,
            text: token.to_string(),
        })
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Texto hex como apareceu na linha (ex: `"3C"`).
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for HexByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.text)
    }
}

// ──────────────────────────────────────────────
// Leituras
// ──────────────────────────────────────────────

/// Temperatura da CPU aceita (°C).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemperatureReading {
    celsius: u8,
    source_hex: String,
}

impl TemperatureReading {
    /// Só o validador cria leituras.
    pub(crate) fn accepted(candidate: HexByte) -> Self {
        Self {
            celsius: candidate.value,
            source_hex: candidate.text,
        }
    }

    pub fn celsius(&self) -> u8 {
        self.celsius
    }

    pub fn source_hex(&self) -> &str {
        &self.source_hex
    }
}

/// Modo e duty do ventilador.
///
/// O byte de duty já é o percentual, sem escala.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanReading {
    pub mode: u8,
    pub duty_percent: u8,
    /// Texto hex do duty (ex: `"3C"`)
    pub source_hex: String,
}

impl FanReading {
    pub(crate) fn from_pair(mode: HexByte, duty: HexByte) -> Self {
        Self {
            mode: mode.value,
            duty_percent: duty.value,
            source_hex: duty.text,
        }
    }
}

// ──────────────────────────────────────────────
// Eventos
// ──────────────────────────────────────────────

/// Evento produzido pelo decoder para uma linha.
///
/// Uma linha pode gerar temperatura e fan ao mesmo tempo; `Unparsed` só
/// aparece quando nenhum dos dois foi aceito.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Temperature {
        reading: TemperatureReading,
        trend: Trend,
    },
    Fan {
        reading: FanReading,
        /// Duty diferente do último aceito
        changed: bool,
        direction: Trend,
    },
    Unparsed(String),
}

impl Event {
    pub fn is_unparsed(&self) -> bool {
        matches!(self, Event::Unparsed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_byte_parses_uppercase_pairs() {
        let b = HexByte::parse("3C").unwrap();
        assert_eq!(b.value(), 60);
        assert_eq!(b.text(), "3C");
        assert_eq!(b.to_string(), "0x3C");
    }

    #[test]
    fn hex_byte_rejects_wrong_length() {
        assert!(HexByte::parse("3").is_none());
        assert!(HexByte::parse("3C0").is_none());
        assert!(HexByte::parse("ZZ").is_none());
        assert!(HexByte::parse("+F").is_none());
    }

    #[test]
    fn fan_reading_keeps_duty_hex() {
        let fan = FanReading::from_pair(
            HexByte::parse("03").unwrap(),
            HexByte::parse("3C").unwrap(),
        );
        assert_eq!(fan.mode, 3);
        assert_eq!(fan.duty_percent, 60);
        assert_eq!(fan.source_hex, "3C");
    }
}
