// Archivo: errors.rs
// Propósito: definir los errores del motor de flujos y el alias Result<T>
// usado por las APIs del crate.
use std::path::PathBuf;
use thiserror::Error;

/// Errores del motor de flujos.
///
/// Los errores producidos por `Step::execute` son locales: el bucle de
/// ejecución los convierte en contadores de analítica y continúa con el
/// siguiente paso. Sólo `Cancelled` interrumpe una ejecución.
#[derive(Error, Debug)]
pub enum FlowError {
    /// Entrada del usuario que no se pudo convertir (por ejemplo texto en un
    /// paso numérico).
    #[error("Entrada inválida: {0}")]
    Input(String),
    /// Fallo al abrir, leer o escribir un fichero.
    #[error("Error de fichero '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// División por cero u operación no soportada.
    #[error("Error aritmético: {0}")]
    Arithmetic(String),
    /// Configuración inválida de un paso (detectada al construirlo o al
    /// añadirlo al flujo).
    #[error("Configuración inválida: {0}")]
    Config(String),
    /// Nombre de flujo que no coincide, o flujo ya eliminado.
    #[error("No encontrado: {0}")]
    NotFound(String),
    /// Un paso referenciado no tiene valor capturado en esta ejecución.
    #[error("Contenido no disponible para el paso {0}")]
    MissingValue(usize),
    /// El prompt fue desbloqueado por el token de cancelación.
    #[error("Ejecución cancelada")]
    Cancelled,
}

impl FlowError {
    /// Construye un `FlowError::File` a partir de la ruta y el error de E/S.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FlowError::File { path: path.into(), source }
    }
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, FlowError>;
