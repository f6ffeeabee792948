//! Contadores de decodificação.

/// Estatísticas acumuladas da sessão.
///
/// Leitura não interfere na decodificação.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderStats {
    pub total_lines: u64,
    pub temperature_events: u64,
    pub fan_events: u64,
    /// Linhas não vazias sem temperatura nem fan
    pub unparsed_lines: u64,
}

impl DecoderStats {
    /// Percentual de eventos de leitura sobre o total de linhas.
    pub fn success_rate(&self) -> Option<f64> {
        if self.total_lines == 0 {
            return None;
        }
        let parsed = (self.temperature_events + self.fan_events) as f64;
        Some(parsed / self.total_lines as f64 * 100.0)
    }
}
