//! Sessão de decodificação: bytes → linhas → eventos.
//!
//! Para cada linha, nesta ordem:
//! 1. Expectativa pendente (`CPUTmp` / `CFan idx,PWM` na linha anterior)
//!    tenta extrair o valor do início da linha e é sempre consumida.
//! 2. Reconhecedores inline, em ordem de prioridade; por categoria vale o
//!    primeiro candidato aceito.
//! 3. Marcadores isolados armam a expectativa para a próxima linha.
//!
//! Nada aqui falha: linhas sem leitura viram [`Event::Unparsed`] e
//! temperaturas fora da faixa são descartadas em silêncio (log `debug`).

use crate::config::DecoderConfig;
use crate::line_buffer::LineBuffer;
use crate::patterns::{self, TempSource, TEMPERATURE_RECOGNIZERS};
use crate::state::ParserState;
use crate::stats::DecoderStats;
use crate::trend::TrendState;
use crate::types::{Event, FanReading, HexByte, TemperatureReading};
use crate::validator::RangeValidator;
use tracing::debug;

/// Decoder do stream do EC. Uma instância por sessão.
#[derive(Debug)]
pub struct Decoder {
    lines: LineBuffer,
    state: ParserState,
    trend: TrendState,
    validator: RangeValidator,
    stats: DecoderStats,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::with_validator(RangeValidator::default())
    }
}

impl Decoder {
    pub fn new(config: &DecoderConfig) -> Self {
        Self::with_validator(RangeValidator::from_config(config))
    }

    pub fn with_validator(validator: RangeValidator) -> Self {
        Self {
            lines: LineBuffer::new(),
            state: ParserState::Idle,
            trend: TrendState::new(),
            validator,
            stats: DecoderStats::default(),
        }
    }

    /// Processa um chunk de bytes e retorna os eventos de todas as linhas
    /// completadas por ele.
    pub fn process_chunk(&mut self, chunk: &[u8]) -> Vec<Event> {
        let lines = self.lines.feed(chunk);
        lines
            .iter()
            .flat_map(|line| self.process_line(line))
            .collect()
    }

    /// Fim do stream: decodifica o fragmento sem terminador, se houver.
    pub fn finish(&mut self) -> Vec<Event> {
        match self.lines.take_remainder() {
            Some(line) => self.process_line(&line),
            None => Vec::new(),
        }
    }

    /// Decodifica uma linha lógica (sem terminador).
    pub fn process_line(&mut self, raw: &str) -> Vec<Event> {
        self.stats.total_lines += 1;

        let line = raw.trim();
        let pending = std::mem::replace(&mut self.state, ParserState::after(line));
        if pending != self.state {
            debug!("Estado {:?} → {:?}", pending, self.state);
        }

        if line.is_empty() {
            return Vec::new();
        }

        let (continued_temp, continued_fan) = match pending {
            ParserState::ExpectingTemperature => {
                let temp = patterns::leading_temperature(line)
                    .and_then(|c| self.accept_temperature(c, TempSource::Continuation));
                if temp.is_none() {
                    debug!("Sem temperatura válida após CPUTmp: {line}");
                }
                (temp, None)
            }
            ParserState::ExpectingFan => {
                let fan = patterns::leading_fan_pair(line)
                    .map(|(mode, duty)| FanReading::from_pair(mode, duty));
                if fan.is_none() {
                    debug!("Esperava fan (XX,XX) após CFan idx,PWM, recebido: {line}");
                }
                (None, fan)
            }
            ParserState::Idle => (None, None),
        };

        let temperature = continued_temp.or_else(|| self.inline_temperature(line));
        let fan = continued_fan.or_else(|| {
            patterns::inline_fan(line).map(|(mode, duty)| FanReading::from_pair(mode, duty))
        });

        let mut events = Vec::with_capacity(2);

        if let Some(reading) = temperature {
            let trend = self.trend.observe_temperature(&reading);
            self.stats.temperature_events += 1;
            events.push(Event::Temperature { reading, trend });
        }

        if let Some(reading) = fan {
            debug!(
                "Fan: modo={} duty={}% (0x{})",
                reading.mode, reading.duty_percent, reading.source_hex
            );
            let (changed, direction) = self.trend.observe_fan(&reading);
            self.stats.fan_events += 1;
            events.push(Event::Fan {
                reading,
                changed,
                direction,
            });
        }

        if events.is_empty() {
            self.stats.unparsed_lines += 1;
            events.push(Event::Unparsed(line.to_string()));
        }

        events
    }

    /// Contadores da sessão.
    pub fn statistics(&self) -> DecoderStats {
        self.stats
    }

    pub fn trend(&self) -> &TrendState {
        &self.trend
    }

    pub fn validator(&self) -> &RangeValidator {
        &self.validator
    }

    fn inline_temperature(&self, line: &str) -> Option<TemperatureReading> {
        TEMPERATURE_RECOGNIZERS.iter().find_map(|(source, recognize)| {
            recognize(line).and_then(|candidate| self.accept_temperature(candidate, *source))
        })
    }

    fn accept_temperature(
        &self,
        candidate: HexByte,
        source: TempSource,
    ) -> Option<TemperatureReading> {
        let celsius = candidate.value();
        let hex = candidate.to_string();
        match self.validator.accept(candidate) {
            Some(reading) => {
                debug!("Temperatura {celsius}°C ({hex}) via {source}");
                Some(reading)
            }
            None => {
                let (min, max) = self.validator.bounds();
                debug!("Descartando {celsius}°C ({hex}) via {source}: fora de {min}–{max}°C");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend::Trend;

    fn temperatures(events: &[Event]) -> Vec<u8> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::Temperature { reading, .. } => Some(reading.celsius()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn temperature_marker_then_value() {
        let mut dec = Decoder::default();

        let events = dec.process_line("CPUTmp");
        assert_eq!(dec.state, ParserState::ExpectingTemperature);
        assert_eq!(events, vec![Event::Unparsed("CPUTmp".into())]);

        let events = dec.process_line("37,T(A0,S0)wTTTCPUTmp");
        assert_eq!(dec.state, ParserState::Idle);
        assert_eq!(temperatures(&events), vec![55]);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn bare_hex_after_marker() {
        let mut dec = Decoder::default();
        dec.process_line("CPUTmp");
        assert_eq!(temperatures(&dec.process_line("3C")), vec![60]);
    }

    #[test]
    fn fan_marker_then_pair() {
        let mut dec = Decoder::default();

        dec.process_line("36,CFan idx,PWM");
        assert_eq!(dec.state, ParserState::ExpectingFan);

        let events = dec.process_line("03,3C,T(A0,S0)");
        assert_eq!(dec.state, ParserState::Idle);
        match events.as_slice() {
            [Event::Fan { reading, changed, direction }] => {
                assert_eq!(reading.mode, 3);
                assert_eq!(reading.duty_percent, 60);
                assert!(!changed);
                assert_eq!(*direction, Trend::Unknown);
            }
            other => panic!("esperava um evento de fan, veio {other:?}"),
        }
    }

    #[test]
    fn expectation_cleared_even_without_match() {
        let mut dec = Decoder::default();
        dec.process_line("CPUTmp");
        let events = dec.process_line("e80,d51,");
        assert!(events[0].is_unparsed());
        assert_eq!(dec.state, ParserState::Idle);

        // "3C" sozinho sem marcador não é temperatura
        assert!(dec.process_line("3C")[0].is_unparsed());
    }

    #[test]
    fn blank_line_consumes_expectation() {
        let mut dec = Decoder::default();
        dec.process_line("36,CFan idx,PWM");
        assert!(dec.process_line("   ").is_empty());
        assert_eq!(dec.state, ParserState::Idle);
        assert!(dec.process_line("03,3C")[0].is_unparsed());

        let stats = dec.statistics();
        assert_eq!(stats.total_lines, 3);
        assert_eq!(stats.unparsed_lines, 2);
    }

    #[test]
    fn marker_after_marker_rearms() {
        let mut dec = Decoder::default();
        dec.process_line("CPUTmp");
        dec.process_line("CPUTmp");
        assert_eq!(dec.state, ParserState::ExpectingTemperature);
        assert_eq!(temperatures(&dec.process_line("41")), vec![65]);
    }

    #[test]
    fn out_of_range_first_candidate_falls_through() {
        let mut dec = Decoder::default();
        // 0x99 via CPUTmp inline é descartado; REC=3C ainda vale
        let events = dec.process_line("99,wTCPUTmp REC=3C");
        assert_eq!(temperatures(&events), vec![60]);
    }

    #[test]
    fn line_with_temperature_and_fan() {
        let mut dec = Decoder::default();
        dec.process_line("CPUTmp");
        let events = dec.process_line("3C,46,CFan idx,PWM");
        assert_eq!(events.len(), 2);
        assert_eq!(temperatures(&events), vec![60]);
        assert!(matches!(
            &events[1],
            Event::Fan { reading, .. } if reading.duty_percent == 0x46
        ));
    }

    #[test]
    fn trend_skips_discarded_candidates() {
        let mut dec = Decoder::default();
        dec.process_line("REC=3C");
        dec.process_line("REC=99");
        match dec.process_line("REC=3D").as_slice() {
            [Event::Temperature { trend, .. }] => assert_eq!(*trend, Trend::Rising),
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn finish_flushes_tail() {
        let mut dec = Decoder::default();
        assert!(dec.process_chunk(b"REC=3C,51").is_empty());
        assert_eq!(temperatures(&dec.finish()), vec![60]);
        assert!(dec.finish().is_empty());
    }

    #[test]
    fn custom_bounds_from_config() {
        let config = DecoderConfig {
            temp_min: 50,
            temp_max: 60,
        };
        let mut dec = Decoder::new(&config);
        assert!(dec.process_line("REC=30")[0].is_unparsed()); // 48
        assert_eq!(temperatures(&dec.process_line("REC=32")), vec![50]);
    }
}
