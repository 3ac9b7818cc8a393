// Archivo: stubs.rs
// Propósito: implementaciones en memoria de los colaboradores para pruebas
// y demos: un prompt con respuestas guionizadas, un almacén de ficheros en
// memoria y un reloj fijo. No tocan la terminal ni el disco.
use crate::errors::{FlowError, Result};
use crate::io::{Clock, FileStore, PromptSource};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;

/// Prompt que responde con una lista fija de líneas.
///
/// Cuando el guion se agota responde con una línea vacía (la respuesta por
/// defecto de la compuerta de salto), salvo que se haya configurado
/// `cancel_on_exhaustion`, en cuyo caso cancela el token y devuelve
/// `FlowError::Cancelled`.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
    errors: Vec<String>,
    cancel: Option<CancellationToken>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { answers: answers.into_iter().map(Into::into).collect(), ..Default::default() }
    }

    pub fn cancel_on_exhaustion(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Prompts mostrados, en orden.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Líneas escritas con `print`.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Líneas escritas con `print_error`.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl PromptSource for ScriptedPrompt {
    fn print(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn print_error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(answer) => Ok(answer),
            None => match &self.cancel {
                Some(token) => {
                    token.cancel();
                    Err(FlowError::Cancelled)
                }
                None => Ok(String::new()),
            },
        }
    }
}

/// Almacén de ficheros en memoria.
#[derive(Debug, Default)]
pub struct InMemoryFileStore {
    files: Mutex<HashMap<PathBuf, String>>,
    read_only: bool,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Almacén en el que toda escritura falla con `PermissionDenied`.
    pub fn read_only() -> Self {
        Self { read_only: true, ..Default::default() }
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.lock().insert(path.into(), content.into());
        self
    }

    /// Contenido actual de `path`, si existe.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.lock().get(path.as_ref()).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, String>> {
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FileStore for InMemoryFileStore {
    fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        self.lock()
            .get(path)
            .map(|content| content.lines().map(str::to_string).collect())
            .ok_or_else(|| FlowError::file(path, io::Error::new(io::ErrorKind::NotFound, "fichero inexistente")))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if self.read_only {
            return Err(FlowError::file(path, io::Error::new(io::ErrorKind::PermissionDenied, "sólo lectura")));
        }
        self.lock().insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

/// Reloj que siempre devuelve el mismo instante.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// 2024-01-01T00:00:00Z.
    pub fn epoch() -> Self {
        FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
