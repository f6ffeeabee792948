//! Gauge ASCII de temperatura.
//!
//! ```text
//! 40 |░░░░░░░░░░░░░░░░░░│                         |75°C ↗
//! ```

use ec_core::levels::level_for_temperature;
use ec_core::{GaugeConfig, Trend};

/// Cantos e rótulos ocupam 6 colunas da largura.
const LABEL_COLUMNS: usize = 6;

const INDICATOR: char = '│';

/// Seta de tendência anexada ao gauge.
pub fn trend_arrow(trend: Trend) -> &'static str {
    match trend {
        Trend::Rising => " ↗",
        Trend::Falling => " ↘",
        Trend::Steady => " →",
        Trend::Unknown => "",
    }
}

/// Número de células preenchidas para `celsius` na escala do gauge.
pub fn filled_cells(celsius: u8, config: &GaugeConfig) -> usize {
    let cells = config.width.saturating_sub(LABEL_COLUMNS);
    if celsius < config.min {
        return 0;
    }
    if celsius > config.max {
        return cells;
    }

    let range = (i32::from(config.max) - i32::from(config.min)).max(1);
    let offset = i32::from(celsius) - i32::from(config.min);
    let filled = (f64::from(offset) / f64::from(range) * cells as f64).floor() as usize;
    filled.min(cells)
}

/// Renderiza o gauge com indicador de posição e seta de tendência.
pub fn render_gauge(celsius: u8, trend: Trend, config: &GaugeConfig) -> String {
    let cells = config.width.saturating_sub(LABEL_COLUMNS);
    let filled = filled_cells(celsius, config);
    let fill = level_for_temperature(celsius, &config.thresholds).fill_char();

    let min_label = config.min.to_string();
    let max_label = config.max.to_string();

    let mut gauge: Vec<char> = format!(
        "{min_label} |{}{}|{max_label}°C",
        fill.to_string().repeat(filled),
        " ".repeat(cells - filled)
    )
    .chars()
    .collect();

    let first_cell = min_label.len() + 2;
    let last_slot = config.width.saturating_sub(max_label.len() + 3);
    let indicator = (first_cell + filled).min(last_slot).max(first_cell);
    if indicator < gauge.len() {
        gauge[indicator] = INDICATOR;
    }

    let mut out: String = gauge.into_iter().collect();
    out.push_str(trend_arrow(trend));
    out
}
