//! # EC Core
//!
//! Decoder do stream de depuração do EC (ENE KB3310, EeePC 701/900)
//! recebido pela UART. O stream mistura frames de duas linhas
//! ("marcador, depois valor") com frames inline e reaproveita tokens
//! parecidos para grandezas diferentes.
//!
//! ## Módulos
//! - [`line_buffer`] – Chunks de bytes → linhas completas
//! - [`state`] – Expectativa "próxima linha tem valor"
//! - [`patterns`] – Reconhecedores ordenados de temperatura e fan
//! - [`validator`] – Faixa plausível de temperatura
//! - [`trend`] – Direção em relação à leitura anterior
//! - [`decoder`] – Sessão que junta tudo e emite [`Event`]s
//! - [`stats`] – Contadores da sessão
//! - [`config`] – Configuração unificada via TOML
//! - [`levels`] – Níveis térmicos do gauge
//! - [`sample`] – Captura de exemplo

pub mod config;
pub mod decoder;
pub mod levels;
pub mod line_buffer;
pub mod patterns;
pub mod sample;
pub mod state;
pub mod stats;
pub mod trend;
pub mod types;
pub mod validator;

// Re-exports convenientes
pub use config::{AppConfig, DecoderConfig, DisplayConfig, GaugeConfig, InputConfig};
pub use decoder::Decoder;
pub use stats::DecoderStats;
pub use trend::Trend;
pub use types::{Event, FanReading, TemperatureReading};
