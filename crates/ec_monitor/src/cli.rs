//! Opções de linha de comando.

use crate::source::ByteSource;
use clap::Parser;
use ec_core::AppConfig;
use ec_core::config::{DEFAULT_BAR_THRESHOLDS, parse_thresholds};
use std::path::PathBuf;
use tracing::warn;

const EXAMPLES: &str = "\
Exemplos:
  socat -u /dev/ttyUSB0,b115200,raw - | ec_monitor --skip-raw
  ec_monitor --input /dev/ttyUSB0 --with-hex
  ec_monitor --test --debug
  ec_monitor -i captura.log --gauge-min=30 --gauge-max=80 --gauge-width=60
  ec_monitor -i captura.log --gauge-bar-thresholds=50,70,80";

/// ENE KB3310 EC Monitor com gauge de temperatura.
#[derive(Debug, Parser)]
#[command(name = "ec_monitor", version, about, after_help = EXAMPLES)]
pub struct Cli {
    /// Arquivo ou dispositivo com o stream do EC (padrão: stdin)
    #[arg(short, long, value_name = "PATH", conflicts_with = "test")]
    pub input: Option<PathBuf>,

    /// Decodifica a captura de exemplo embutida
    #[arg(short, long)]
    pub test: bool,

    /// Caminho do config.toml (padrão: ao lado do executável)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Largura do gauge
    #[arg(long = "gauge-width", visible_alias = "width")]
    pub gauge_width: Option<usize>,

    /// Início da escala do gauge (°C)
    #[arg(long = "gauge-min", visible_alias = "min-temp")]
    pub gauge_min: Option<u8>,

    /// Fim da escala do gauge (°C)
    #[arg(long = "gauge-max", visible_alias = "max-temp")]
    pub gauge_max: Option<u8>,

    /// Thresholds ░/▒/▓/█ separados por vírgula (ex: 60,75,85)
    #[arg(long = "gauge-bar-thresholds", value_name = "A,B,C")]
    pub gauge_bar_thresholds: Option<String>,

    /// Oculta linhas não reconhecidas
    #[arg(short = 'r', long, overrides_with = "show_raw")]
    pub skip_raw: bool,

    /// Mostra linhas não reconhecidas
    #[arg(long, overrides_with = "skip_raw")]
    pub show_raw: bool,

    /// Mostra os valores hex de temperatura e fan
    #[arg(long)]
    pub with_hex: bool,

    /// Log debug, linhas cruas e estatísticas ao sair
    #[arg(short, long)]
    pub debug: bool,

    /// Menor temperatura aceita pelo decoder (°C)
    #[arg(long)]
    pub temp_min: Option<u8>,

    /// Maior temperatura aceita pelo decoder (°C)
    #[arg(long)]
    pub temp_max: Option<u8>,
}

impl Cli {
    pub fn source(&self) -> ByteSource {
        match &self.input {
            Some(path) => ByteSource::Path(path.clone()),
            None => ByteSource::Stdin,
        }
    }

    /// Sobrescreve a configuração carregada com as flags informadas.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(width) = self.gauge_width {
            config.gauge.width = width;
        }
        if let Some(min) = self.gauge_min {
            config.gauge.min = min;
        }
        if let Some(max) = self.gauge_max {
            config.gauge.max = max;
        }
        if let Some(text) = &self.gauge_bar_thresholds {
            config.gauge.thresholds = parse_thresholds(text).unwrap_or_else(|e| {
                warn!("{e}. Usando padrão {DEFAULT_BAR_THRESHOLDS:?}");
                DEFAULT_BAR_THRESHOLDS
            });
        }
        if self.skip_raw {
            config.display.skip_raw = true;
        }
        if self.show_raw {
            config.display.skip_raw = false;
        }
        if self.with_hex {
            config.display.with_hex = true;
        }
        if self.debug {
            config.display.debug = true;
        }
        if let Some(min) = self.temp_min {
            config.decoder.temp_min = min;
        }
        if let Some(max) = self.temp_max {
            config.decoder.temp_max = max;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ec_monitor").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_keep_config() {
        let mut config = AppConfig::default();
        parse(&[]).apply(&mut config);
        assert_eq!(config, AppConfig::default());
        assert_eq!(parse(&[]).source(), ByteSource::Stdin);
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&[
            "-i",
            "/dev/ttyUSB0",
            "--gauge-min=30",
            "--max-temp",
            "80",
            "--width",
            "60",
            "--gauge-bar-thresholds=50,70,80",
            "--with-hex",
            "-r",
            "--temp-max",
            "90",
        ]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);

        assert_eq!(cli.source(), ByteSource::Path(PathBuf::from("/dev/ttyUSB0")));
        assert_eq!(config.gauge.min, 30);
        assert_eq!(config.gauge.max, 80);
        assert_eq!(config.gauge.width, 60);
        assert_eq!(config.gauge.thresholds, [50, 70, 80]);
        assert!(config.display.with_hex);
        assert!(config.display.skip_raw);
        assert_eq!(config.decoder.temp_max, 90);
    }

    #[test]
    fn bad_thresholds_fall_back() {
        let mut config = AppConfig::default();
        config.gauge.thresholds = [1, 2, 3];
        parse(&["--gauge-bar-thresholds", "50,70"]).apply(&mut config);
        assert_eq!(config.gauge.thresholds, DEFAULT_BAR_THRESHOLDS);
    }

    #[test]
    fn show_raw_wins_when_last() {
        let mut config = AppConfig::default();
        parse(&["--skip-raw", "--show-raw"]).apply(&mut config);
        assert!(!config.display.skip_raw);
    }

    #[test]
    fn input_conflicts_with_test() {
        let result = Cli::try_parse_from(["ec_monitor", "--test", "-i", "x.log"]);
        assert!(result.is_err());
    }
}
