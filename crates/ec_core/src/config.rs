//! Configuração unificada via TOML.
//!
//! Um único `config.toml` ao lado do executável; flags da CLI sobrescrevem
//! os valores carregados.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Thresholds padrão das barras do gauge (°C).
pub const DEFAULT_BAR_THRESHOLDS: [u8; 3] = [60, 75, 85];

/// Erros de leitura/escrita da configuração.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Erro de I/O em {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Erro ao parsear TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Erro na lista de thresholds `"a,b,c"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThresholdParseError {
    #[error("Threshold inválido: '{0}'")]
    InvalidValue(String),

    #[error("Esperados 3 thresholds, recebidos {0}")]
    WrongCount(usize),
}

/// Limites do validador de temperatura.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DecoderConfig {
    /// Menor temperatura plausível (°C)
    pub temp_min: u8,
    /// Maior temperatura plausível (°C)
    pub temp_max: u8,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            temp_min: 40,
            temp_max: 80,
        }
    }
}

/// Escala e aparência do gauge ASCII.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GaugeConfig {
    /// Início da escala (°C)
    pub min: u8,
    /// Fim da escala (°C)
    pub max: u8,
    /// Largura total em caracteres
    pub width: usize,
    /// Limites ░/▒/▓/█
    pub thresholds: [u8; 3],
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            min: 40,
            max: 75,
            width: 50,
            thresholds: DEFAULT_BAR_THRESHOLDS,
        }
    }
}

/// Opções de exibição.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Oculta linhas não reconhecidas
    pub skip_raw: bool,
    /// Mostra os valores hex originais
    pub with_hex: bool,
    /// Log debug + estatísticas ao sair
    pub debug: bool,
}

/// Leitura do stream de bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InputConfig {
    /// Máximo de bytes por leitura
    pub chunk_size: usize,
    /// Intervalo de verificação do sinal de parada (ms)
    pub poll_interval_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            chunk_size: 256,
            poll_interval_ms: 10,
        }
    }
}

/// Configuração raiz do aplicativo.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub decoder: DecoderConfig,
    pub gauge: GaugeConfig,
    pub display: DisplayConfig,
    pub input: InputConfig,
}

impl AppConfig {
    /// Carrega configuração de um arquivo TOML.
    ///
    /// Arquivo ausente ou inválido cai nos valores padrão.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match Self::read(path) {
                Ok(config) => {
                    info!("Configuração carregada de {}", path.display());
                    return config;
                }
                Err(e) => warn!("Ignorando {}: {e}", path.display()),
            }
        }

        info!("Usando configuração padrão");
        AppConfig::default()
    }

    /// Lê e parseia o arquivo, propagando erros.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Salva configuração em arquivo TOML.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Configuração salva em {}", path.display());
        Ok(())
    }

    /// Retorna o caminho padrão do config.toml.
    pub fn default_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
            .unwrap_or_else(|_| PathBuf::from("."));
        exe_dir.join("config.toml")
    }

    /// Valida a configuração e retorna lista de erros.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.decoder.temp_min > self.decoder.temp_max {
            errors.push(format!(
                "Faixa de temperatura inválida: {}–{}°C",
                self.decoder.temp_min, self.decoder.temp_max
            ));
        }
        if self.gauge.min >= self.gauge.max {
            errors.push(format!(
                "Escala do gauge inválida: {}–{}°C",
                self.gauge.min, self.gauge.max
            ));
        }
        if self.gauge.width < 10 {
            errors.push(format!("Largura do gauge muito pequena: {} (mínimo 10)", self.gauge.width));
        }
        if !self.gauge.thresholds.is_sorted() {
            errors.push(format!(
                "Thresholds do gauge fora de ordem: {:?}",
                self.gauge.thresholds
            ));
        }
        if self.input.chunk_size == 0 {
            errors.push("Tamanho de chunk não pode ser 0".into());
        }

        errors
    }
}

/// Parseia `"60,75,85"` em três thresholds.
pub fn parse_thresholds(text: &str) -> Result<[u8; 3], ThresholdParseError> {
    let values = text
        .split(',')
        .map(|t| {
            let t = t.trim();
            t.parse::<u8>()
                .map_err(|_| ThresholdParseError::InvalidValue(t.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    <[u8; 3]>::try_from(values).map_err(|v| ThresholdParseError::WrongCount(v.len()))
}
