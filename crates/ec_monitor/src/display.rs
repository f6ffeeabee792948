//! Formatação dos eventos para o terminal.

use crate::gauge::render_gauge;
use ec_core::{
    DecoderStats, DisplayConfig, Event, FanReading, GaugeConfig, TemperatureReading, Trend,
};
use std::fmt::Write;

/// Converte eventos em linhas de saída.
///
/// Guarda o último fan aceito para exibir junto das temperaturas.
pub struct Presenter {
    display: DisplayConfig,
    gauge: GaugeConfig,
    last_fan: Option<FanReading>,
}

impl Presenter {
    pub fn new(display: DisplayConfig, gauge: GaugeConfig) -> Self {
        Self {
            display,
            gauge,
            last_fan: None,
        }
    }

    /// Imprime o evento com o horário local atual.
    pub fn print(&mut self, event: &Event) {
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        if let Some(line) = self.render(event, &timestamp) {
            println!("{line}");
        }
    }

    /// Linha formatada do evento, ou `None` quando não deve aparecer.
    pub fn render(&mut self, event: &Event, timestamp: &str) -> Option<String> {
        match event {
            Event::Temperature { reading, trend } => {
                Some(self.render_temperature(reading, *trend, timestamp))
            }
            Event::Fan {
                reading,
                changed,
                direction,
            } => {
                let line = self.render_fan(reading, *changed, *direction, timestamp);
                self.last_fan = Some(reading.clone());
                Some(line)
            }
            Event::Unparsed(raw) => self.render_raw(raw, timestamp),
        }
    }

    pub fn last_fan(&self) -> Option<&FanReading> {
        self.last_fan.as_ref()
    }

    fn render_temperature(&self, reading: &TemperatureReading, trend: Trend, ts: &str) -> String {
        let celsius = reading.celsius();
        let fan_info = match &self.last_fan {
            Some(fan) if self.display.with_hex => {
                format!("FAN:{:3}% (0x{:02X})", fan.duty_percent, fan.duty_percent)
            }
            Some(fan) => format!("FAN:{:3}%", fan.duty_percent),
            None => "FAN: N/A ".to_string(),
        };
        let hex_info = if self.display.with_hex {
            format!(" (0x{})", reading.source_hex())
        } else {
            String::new()
        };
        let gauge = render_gauge(celsius, trend, &self.gauge);

        format!("[{ts}] {fan_info} CPU:{celsius:3}°C{hex_info} {gauge}")
    }

    fn render_fan(&self, reading: &FanReading, changed: bool, direction: Trend, ts: &str) -> String {
        let duty = reading.duty_percent;
        let label = if changed { "Fan PWM changed" } else { "Fan PWM" };
        let hex_info = if self.display.with_hex {
            format!(" (0x{}, {duty}%)", reading.source_hex)
        } else {
            format!(" ({duty}%)")
        };
        let arrow = match direction {
            Trend::Rising => " ↑",
            Trend::Falling => " ↓",
            Trend::Steady | Trend::Unknown => "",
        };

        format!("[{ts}] {label}: Mode={}, PWM={duty}{hex_info}{arrow}", reading.mode)
    }

    fn render_raw(&self, raw: &str, ts: &str) -> Option<String> {
        if self.display.skip_raw && !self.display.debug {
            return None;
        }
        // Linhas muito curtas são ruído
        if raw.chars().count() <= 2 {
            return None;
        }
        let prefix = if self.display.debug { "DEBUG" } else { "Raw" };
        Some(format!("[{ts}] {prefix}: {raw}"))
    }
}

/// Relatório de estatísticas de parsing.
pub fn format_statistics(stats: &DecoderStats) -> String {
    let rule = "═".repeat(60);
    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "  Estatísticas de parsing");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "  Linhas processadas:     {}", stats.total_lines);
    let _ = writeln!(out, "  Temperaturas:           {}", stats.temperature_events);
    let _ = writeln!(out, "  Leituras de fan:        {}", stats.fan_events);
    let _ = writeln!(out, "  Não reconhecidas:       {}", stats.unparsed_lines);
    if let Some(rate) = stats.success_rate() {
        let _ = writeln!(out, "  Taxa de sucesso:        {rate:.1}%");
    }
    out.push_str(&rule);
    out
}
