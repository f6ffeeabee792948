//! Níveis térmicos usados para escolher o preenchimento do gauge.

/// Nível de uma temperatura em relação aos três thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BarLevel {
    Cool,
    Warm,
    Hot,
    Critical,
}

impl BarLevel {
    /// Caractere de preenchimento da barra.
    pub fn fill_char(self) -> char {
        match self {
            BarLevel::Cool => '░',
            BarLevel::Warm => '▒',
            BarLevel::Hot => '▓',
            BarLevel::Critical => '█',
        }
    }
}

/// Retorna o [`BarLevel`] de `celsius` dados thresholds crescentes.
pub fn level_for_temperature(celsius: u8, thresholds: &[u8; 3]) -> BarLevel {
    let [cool, warm, hot] = *thresholds;
    if celsius < cool {
        BarLevel::Cool
    } else if celsius < warm {
        BarLevel::Warm
    } else if celsius < hot {
        BarLevel::Hot
    } else {
        BarLevel::Critical
    }
}
