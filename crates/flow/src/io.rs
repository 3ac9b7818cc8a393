// Archivo: io.rs
// Propósito: contratos de los colaboradores externos que consume el motor
// (terminal, ficheros y reloj). Las implementaciones concretas viven en
// `flow-console`; las de prueba en `stubs`.
use crate::errors::{FlowError, Result};
use chrono::{DateTime, Utc};
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Fuente de interacción con el usuario.
///
/// `read_line` puede bloquear el hilo esperando entrada; las
/// implementaciones deben devolver `FlowError::Cancelled` si el token de la
/// ejecución se cancela mientras esperan.
pub trait PromptSource {
    /// Escribe una línea en la salida normal.
    fn print(&mut self, text: &str);

    /// Escribe una línea en el flujo de errores visible para el usuario.
    fn print_error(&mut self, text: &str);

    /// Muestra `prompt` y devuelve la línea leída, sin el salto de línea.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Lee un número finito. Texto no numérico, `nan` o `inf` producen
    /// `FlowError::Input`.
    fn read_number(&mut self, prompt: &str) -> Result<f64> {
        let raw = self.read_line(prompt)?;
        let trimmed = raw.trim();
        trimmed.parse::<f64>()
               .ok()
               .filter(|v| v.is_finite())
               .ok_or_else(|| FlowError::Input(format!("'{}' no es un número válido", trimmed)))
    }
}

/// Acceso a ficheros. Cada llamada abre y cierra su propio handle.
pub trait FileStore {
    fn read_lines(&self, path: &Path) -> Result<Vec<String>>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// Reloj inyectable para la marca de creación del flujo.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Colaboradores de una ejecución agrupados: prompt, ficheros y token de
/// cancelación.
pub struct RunIo<'a> {
    pub prompt: &'a mut dyn PromptSource,
    pub files: &'a dyn FileStore,
    pub cancel: CancellationToken,
}

impl<'a> RunIo<'a> {
    pub fn new(prompt: &'a mut dyn PromptSource, files: &'a dyn FileStore) -> Self {
        Self { prompt, files, cancel: CancellationToken::new() }
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Devuelve `Cancelled` si el token ya fue cancelado.
    pub fn check_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(FlowError::Cancelled);
        }
        Ok(())
    }
}
