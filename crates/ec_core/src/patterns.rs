//! Reconhecedores de linha.
//!
//! O EC reaproveita tokens parecidos para grandezas diferentes: `"37,..."`
//! pode ser temperatura, `"03,3C,..."` é modo/duty do fan. Cada
//! reconhecedor é uma função pura `&str -> Option<...>`; a prioridade entre
//! eles é a ordem de [`TEMPERATURE_RECOGNIZERS`].
//!
//! Formatos observados:
//!
//! ```text
//! CPUTmp                    marcador sozinho → próxima linha tem a temperatura
//! 37,T(A0,S0)wTTTCPUTmp     temperatura inline (0x37 = 55°C)
//! o39,o,T(A0,S0)wTTTCPUTmp  variante com prefixo 'o'
//! REC=3C,51                 modo recovery (0x3C = 60°C)
//! 36,CFan idx,PWM           marcador de fan → próxima linha tem "modo,duty"
//! 04,46,CFan idx,PWM        fan inline (modo 4, duty 70%)
//! ```

use crate::types::HexByte;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Marcador de temperatura da CPU.
pub const CPU_TEMP_MARKER: &str = "CPUTmp";

/// Marcador de dados do fan.
pub const FAN_MARKER: &str = "CFan idx,PWM";

/// Substrings que identificam um frame de temperatura (e não de fan)
/// quando a linha começa com `"XX,"`.
pub const TEMP_FRAME_GUARDS: [&str; 3] = ["T(", "wT", "Tw"];

static LEADING_HEX: LazyLock<Regex> = LazyLock::new(|| compile(r"^([0-9A-F]{2})"));
static LEADING_PAIR: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^([0-9A-F]{2}),([0-9A-F]{2})"));
static INLINE_CPU_TEMP: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^([0-9A-F]{2}),.*CPUTmp"));
static PREFIXED_CPU_TEMP: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^o([0-9A-F]{2}),o.*CPUTmp"));
static LEADING_HEX_COMMA: LazyLock<Regex> = LazyLock::new(|| compile(r"^([0-9A-F]{2}),"));
static RECOVERY_TEMP: LazyLock<Regex> = LazyLock::new(|| compile(r"REC=([0-9A-F]{2})"));
static INLINE_FAN: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^([0-9A-F]{2}),([0-9A-F]{2}),CFan idx,PWM"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("padrão de reconhecedor inválido")
}

fn capture_hex(re: &Regex, line: &str, group: usize) -> Option<HexByte> {
    let caps = re.captures(line)?;
    HexByte::parse(caps.get(group)?.as_str())
}

fn capture_pair(re: &Regex, line: &str) -> Option<(HexByte, HexByte)> {
    let caps = re.captures(line)?;
    let first = HexByte::parse(caps.get(1)?.as_str())?;
    let second = HexByte::parse(caps.get(2)?.as_str())?;
    Some((first, second))
}

// ──────────────────────────────────────────────
// Origem de uma temperatura
// ──────────────────────────────────────────────

/// Qual reconhecedor produziu a temperatura.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempSource {
    /// Linha seguinte a um `CPUTmp` isolado
    Continuation,
    /// `XX,...CPUTmp`
    InlineCpuTemp,
    /// `oXX,o...CPUTmp`
    PrefixedCpuTemp,
    /// `XX,` com guarda de frame de temperatura
    TaggedFrame,
    /// `REC=XX`
    Recovery,
}

impl fmt::Display for TempSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TempSource::Continuation => "continuação de CPUTmp",
            TempSource::InlineCpuTemp => "CPUTmp inline",
            TempSource::PrefixedCpuTemp => "padrão oXX,o",
            TempSource::TaggedFrame => "hex no início da linha",
            TempSource::Recovery => "padrão REC",
        };
        f.write_str(name)
    }
}

/// Reconhecedor de temperatura.
pub type TempRecognizer = fn(&str) -> Option<HexByte>;

/// Reconhecedores inline de temperatura, em ordem de prioridade.
pub const TEMPERATURE_RECOGNIZERS: [(TempSource, TempRecognizer); 4] = [
    (TempSource::InlineCpuTemp, inline_cpu_temp as TempRecognizer),
    (TempSource::PrefixedCpuTemp, prefixed_cpu_temp as TempRecognizer),
    (TempSource::TaggedFrame, tagged_frame_temp as TempRecognizer),
    (TempSource::Recovery, recovery_temp as TempRecognizer),
];

// ──────────────────────────────────────────────
// Reconhecedores dirigidos por estado
// ──────────────────────────────────────────────

/// Hex no início da linha (linha após `CPUTmp`).
pub fn leading_temperature(line: &str) -> Option<HexByte> {
    capture_hex(&LEADING_HEX, line, 1)
}

/// Par `"XX,YY"` no início da linha (linha após `CFan idx,PWM`).
pub fn leading_fan_pair(line: &str) -> Option<(HexByte, HexByte)> {
    capture_pair(&LEADING_PAIR, line)
}

// ──────────────────────────────────────────────
// Reconhecedores inline
// ──────────────────────────────────────────────

pub fn inline_cpu_temp(line: &str) -> Option<HexByte> {
    capture_hex(&INLINE_CPU_TEMP, line, 1)
}

pub fn prefixed_cpu_temp(line: &str) -> Option<HexByte> {
    capture_hex(&PREFIXED_CPU_TEMP, line, 1)
}

/// `"XX,"` só vale como temperatura se a linha tiver cara de frame de
/// temperatura; `"03,3C,CFan idx,PWM"` também começa com `"03,"`.
pub fn tagged_frame_temp(line: &str) -> Option<HexByte> {
    if !TEMP_FRAME_GUARDS.iter().any(|guard| line.contains(guard)) {
        return None;
    }
    capture_hex(&LEADING_HEX_COMMA, line, 1)
}

pub fn recovery_temp(line: &str) -> Option<HexByte> {
    capture_hex(&RECOVERY_TEMP, line, 1)
}

/// `"XX,YY,CFan idx,PWM"`: modo e duty na mesma linha do marcador.
pub fn inline_fan(line: &str) -> Option<(HexByte, HexByte)> {
    capture_pair(&INLINE_FAN, line)
}

// ──────────────────────────────────────────────
// Marcadores
// ──────────────────────────────────────────────

/// Linha é exatamente o marcador `CPUTmp`.
pub fn is_temperature_marker(line: &str) -> bool {
    line == CPU_TEMP_MARKER
}

/// Linha tem o marcador de fan sem o par de valores antes dele.
pub fn announces_fan_data(line: &str) -> bool {
    line.contains(FAN_MARKER) && !INLINE_FAN.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(hex: Option<HexByte>) -> Option<u8> {
        hex.map(|h| h.value())
    }

    #[test]
    fn leading_temperature_reads_first_token() {
        assert_eq!(value(leading_temperature("3C")), Some(0x3C));
        assert_eq!(value(leading_temperature("37,T(A0,S0)wTTTCPUTmp")), Some(0x37));
        assert_eq!(value(leading_temperature("e80,d51,")), None);
    }

    #[test]
    fn lowercase_hex_is_not_a_token() {
        assert_eq!(value(leading_temperature("3c")), None);
        assert_eq!(value(recovery_temp("REC=3c")), None);
    }

    #[test]
    fn inline_cpu_temp_needs_marker() {
        assert_eq!(value(inline_cpu_temp("37,T(A0,S0)TTwTCPUTmp")), Some(0x37));
        assert_eq!(value(inline_cpu_temp("37,T(A0,S0)")), None);
    }

    #[test]
    fn prefixed_variant() {
        assert_eq!(value(prefixed_cpu_temp("o39,o,T(A0,S0)wTTTCPUTmp")), Some(0x39));
        assert_eq!(value(prefixed_cpu_temp("39,o,CPUTmp")), None);
    }

    #[test]
    fn tagged_frame_requires_guard() {
        assert_eq!(value(tagged_frame_temp("37,T(A0,S0)")), Some(0x37));
        assert_eq!(value(tagged_frame_temp("40,xxwTxx")), Some(0x40));
        assert_eq!(value(tagged_frame_temp("36,CFan idx,PWM")), None);
    }

    #[test]
    fn recovery_anywhere_in_line() {
        assert_eq!(value(recovery_temp("REC=3C,51")), Some(0x3C));
        assert_eq!(value(recovery_temp("e80 REC=41")), Some(0x41));
    }

    #[test]
    fn fan_pairs() {
        let (mode, duty) = inline_fan("04,46,CFan idx,PWM").unwrap();
        assert_eq!((mode.value(), duty.value()), (4, 0x46));
        assert!(inline_fan("36,CFan idx,PWM").is_none());

        let (mode, duty) = leading_fan_pair("03,3C,T(A0,S0)").unwrap();
        assert_eq!((mode.value(), duty.value()), (3, 0x3C));
        assert!(leading_fan_pair("03").is_none());
    }

    #[test]
    fn markers() {
        assert!(is_temperature_marker("CPUTmp"));
        assert!(!is_temperature_marker("37,CPUTmp"));
        assert!(announces_fan_data("36,CFan idx,PWM"));
        assert!(announces_fan_data("CFan idx,PWM"));
        assert!(!announces_fan_data("04,46,CFan idx,PWM"));
        assert!(!announces_fan_data("CPUTmp"));
    }

    #[test]
    fn recognizer_order_is_fixed() {
        let order: Vec<_> = TEMPERATURE_RECOGNIZERS.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            order,
            vec![
                TempSource::InlineCpuTemp,
                TempSource::PrefixedCpuTemp,
                TempSource::TaggedFrame,
                TempSource::Recovery,
            ]
        );
    }
}
