use thiserror::Error;

/// Errores propios de la capa de consola.
#[derive(Error, Debug)]
pub enum ConsoleError {
  /// Variable de entorno con un valor que no se puede interpretar.
  #[error("Configuración inválida: {0}")]
  Config(String),
  /// Fallo de E/S al preparar la terminal (arrancar el hilo lector).
  #[error("Error de E/S: {0}")]
  Io(#[from] std::io::Error),
}
