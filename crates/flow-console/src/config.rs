// config.rs
//
// Configuración de la consola leída del entorno. Se carga `.env` con
// dotenvy antes de leer las variables, igual que el resto de helpers
// `*_from_env` del workspace.
use crate::errors::ConsoleError;
use flow::FlowEngineConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Pregunta la compuerta de salto antes de cada paso.
pub const ENV_OFFER_SKIP: &str = "FLOWRUNNER_OFFER_SKIP";
/// Directorio base para las rutas relativas de los pasos de fichero.
pub const ENV_BASE_DIR: &str = "FLOWRUNNER_BASE_DIR";
/// Filtro de logs (sintaxis de `EnvFilter`).
pub const ENV_LOG: &str = "FLOWRUNNER_LOG";
/// Intervalo en milisegundos con el que el prompt revisa la cancelación.
pub const ENV_POLL_MS: &str = "FLOWRUNNER_POLL_MS";

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
  pub offer_skip: bool,
  pub base_dir: PathBuf,
  pub log_filter: String,
  pub poll_interval: Duration,
}

impl Default for ConsoleConfig {
  fn default() -> Self {
    ConsoleConfig { offer_skip: true,
                    base_dir: PathBuf::from("."),
                    log_filter: "warn".to_string(),
                    poll_interval: Duration::from_millis(50) }
  }
}

impl ConsoleConfig {
  /// Carga `.env` (si existe) y lee las variables `FLOWRUNNER_*`.
  pub fn from_env() -> Result<Self, ConsoleError> {
    dotenvy::dotenv().ok();
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Construye la configuración a partir de una función de búsqueda de
  /// variables; las ausentes toman el valor por defecto.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConsoleError>
    where F: Fn(&str) -> Option<String>
  {
    let mut cfg = ConsoleConfig::default();
    if let Some(v) = lookup(ENV_OFFER_SKIP) {
      cfg.offer_skip = parse_bool(ENV_OFFER_SKIP, &v)?;
    }
    if let Some(v) = lookup(ENV_BASE_DIR) {
      if !v.trim().is_empty() {
        cfg.base_dir = PathBuf::from(v.trim());
      }
    }
    if let Some(v) = lookup(ENV_LOG) {
      if !v.trim().is_empty() {
        cfg.log_filter = v.trim().to_string();
      }
    }
    if let Some(v) = lookup(ENV_POLL_MS) {
      let ms: u64 =
        v.trim().parse().map_err(|_| ConsoleError::Config(format!("{} debe ser un entero, no '{}'", ENV_POLL_MS, v)))?;
      if ms == 0 {
        return Err(ConsoleError::Config(format!("{} debe ser mayor que cero", ENV_POLL_MS)));
      }
      cfg.poll_interval = Duration::from_millis(ms);
    }
    Ok(cfg)
  }

  /// Configuración del motor derivada de la de consola.
  pub fn engine_config(&self) -> FlowEngineConfig {
    FlowEngineConfig { offer_skip: self.offer_skip }
  }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConsoleError> {
  match value.trim().to_lowercase().as_str() {
    "1" | "true" | "yes" | "si" | "on" => Ok(true),
    "0" | "false" | "no" | "off" => Ok(false),
    other => Err(ConsoleError::Config(format!("{} debe ser booleano, no '{}'", key, other))),
  }
}
