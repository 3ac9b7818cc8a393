use crate::errors::{FlowError, Result};
use crate::io::{FileStore, RunIo};
use crate::steps::Step;
use crate::value::{Captured, StepRef};

/// Contexto pasado a `Step::execute`.
///
/// Da acceso de sólo lectura a los pasos anteriores (para resolver las
/// referencias de Display, Calculus y Output) y a los colaboradores de la
/// ejecución. El paso en curso y los posteriores no son visibles, así que
/// una referencia nunca puede leer un valor todavía no capturado.
pub struct StepContext<'s, 'io> {
    position: StepRef,
    prior: &'s [Step],
    io: &'s mut RunIo<'io>,
}

impl<'s, 'io> StepContext<'s, 'io> {
    /// Crea el contexto del paso en `position`; `prior` son los pasos
    /// `[0, position)`.
    pub fn new(position: StepRef, prior: &'s [Step], io: &'s mut RunIo<'io>) -> Self {
        Self { position, prior, io }
    }

    /// Posición del paso que se está ejecutando.
    pub fn position(&self) -> StepRef {
        self.position
    }

    pub fn print(&mut self, text: &str) {
        self.io.prompt.print(text);
    }

    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.io.check_cancelled()?;
        self.io.prompt.read_line(prompt)
    }

    pub fn read_number(&mut self, prompt: &str) -> Result<f64> {
        self.io.check_cancelled()?;
        self.io.prompt.read_number(prompt)
    }

    pub fn files(&self) -> &dyn FileStore {
        self.io.files
    }

    /// Valor capturado por el paso `target` en esta ejecución.
    ///
    /// Devuelve `MissingValue` si el paso fue saltado, falló o no captura
    /// valores, y `Config` si `target` no es anterior al paso actual.
    pub fn captured(&self, target: StepRef) -> Result<Captured> {
        let step = self.prior
                       .get(target.index())
                       .ok_or_else(|| {
                           FlowError::Config(format!("el paso {} no es anterior al paso {}", target, self.position))
                       })?;
        step.captured().ok_or(FlowError::MissingValue(target.number()))
    }

    /// Valor numérico capturado por `target`.
    pub fn number(&self, target: StepRef) -> Result<f64> {
        self.captured(target)?
            .as_number()
            .ok_or_else(|| FlowError::Input(format!("el paso {} no contiene un número", target)))
    }
}
