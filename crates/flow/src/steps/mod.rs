//! Variantes de paso.
//!
//! `Step` es un enum cerrado: cada variante envuelve un struct con sus datos
//! y su implementación de `StepAction`. El enum despacha con `match`, de modo
//! que añadir un tipo nuevo obliga a cubrirlo en todas las operaciones.
pub mod calculus;
pub mod display;
pub mod file_input;
pub mod input;
pub mod output;
pub mod text;

pub use calculus::CalculusStep;
pub use display::DisplayStep;
pub use file_input::{CsvFileInputStep, TextFileInputStep};
pub use input::{CsvInputStep, NumberInputStep, TextInputStep};
pub use output::OutputStep;
pub use text::{EndStep, TextStep, TitleStep};

use crate::context::StepContext;
use crate::errors::Result;
use crate::io::PromptSource;
use crate::kind::StepKind;
use crate::value::{Captured, StepRef};
use serde::{Deserialize, Serialize};

/// Texto de la compuerta de salto.
pub const SKIP_PROMPT: &str = "Press 'N' to skip to the next step or any other key to continue: ";

/// Respuesta del usuario a la compuerta de salto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interaction {
    Proceed,
    Skip,
}

/// Capacidad que debe exponer un paso referenciado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Guarda algún valor (`StepKind::captures`).
    Captures,
    /// Guarda un número (`StepKind::numeric`).
    Numeric,
}

impl Capability {
    pub fn satisfied_by(&self, kind: StepKind) -> bool {
        match self {
            Capability::Captures => kind.captures(),
            Capability::Numeric => kind.numeric(),
        }
    }
}

/// Referencia hacia atrás declarada por un paso.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub target: StepRef,
    pub needs: Capability,
}

/// Comportamiento común de los structs de paso.
pub trait StepAction {
    /// Ejecuta el efecto del paso y guarda su captura, si la tiene.
    fn execute(&mut self, ctx: &mut StepContext<'_, '_>) -> Result<()>;

    /// Valor capturado en la ejecución actual.
    fn captured(&self) -> Option<Captured> {
        None
    }

    /// Pasos anteriores de los que depende.
    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    /// Olvida lo capturado en una ejecución previa.
    fn reset(&mut self) {}

    /// Resumen de una línea con los datos de la instancia.
    fn summary(&self) -> String;
}

/// Un paso del flujo.
#[derive(Debug, Clone)]
pub enum Step {
    Title(TitleStep),
    Text(TextStep),
    TextInput(TextInputStep),
    NumberInput(NumberInputStep),
    CsvInput(CsvInputStep),
    Calculus(CalculusStep),
    Display(DisplayStep),
    TextFileInput(TextFileInputStep),
    CsvFileInput(CsvFileInputStep),
    Output(OutputStep),
    End(EndStep),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            Step::Title($inner) => $body,
            Step::Text($inner) => $body,
            Step::TextInput($inner) => $body,
            Step::NumberInput($inner) => $body,
            Step::CsvInput($inner) => $body,
            Step::Calculus($inner) => $body,
            Step::Display($inner) => $body,
            Step::TextFileInput($inner) => $body,
            Step::CsvFileInput($inner) => $body,
            Step::Output($inner) => $body,
            Step::End($inner) => $body,
        }
    };
}

impl Step {
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Title(_) => StepKind::Title,
            Step::Text(_) => StepKind::Text,
            Step::TextInput(_) => StepKind::TextInput,
            Step::NumberInput(_) => StepKind::NumberInput,
            Step::CsvInput(_) => StepKind::CsvInput,
            Step::Calculus(_) => StepKind::Calculus,
            Step::Display(_) => StepKind::Display,
            Step::TextFileInput(_) => StepKind::TextFileInput,
            Step::CsvFileInput(_) => StepKind::CsvFileInput,
            Step::Output(_) => StepKind::Output,
            Step::End(_) => StepKind::End,
        }
    }

    /// Explicación estática del tipo (ver `StepKind::describe`).
    pub fn describe(&self) -> &'static str {
        self.kind().describe()
    }

    pub fn execute(&mut self, ctx: &mut StepContext<'_, '_>) -> Result<()> {
        dispatch!(self, s => s.execute(ctx))
    }

    pub fn captured(&self) -> Option<Captured> {
        dispatch!(self, s => s.captured())
    }

    pub fn references(&self) -> Vec<Reference> {
        dispatch!(self, s => s.references())
    }

    pub fn reset(&mut self) {
        dispatch!(self, s => s.reset())
    }

    pub fn summary(&self) -> String {
        format!("{}: {}", self.kind(), dispatch!(self, s => s.summary()))
    }

    /// Todos los tipos salvo `End` ofrecen la compuerta de salto.
    pub fn offers_skip(&self) -> bool {
        self.kind() != StepKind::End
    }

    /// Pregunta una vez si ejecutar o saltar el paso. `N`/`n` salta;
    /// cualquier otra respuesta, incluida la vacía, continúa.
    pub fn interact(&self, prompt: &mut dyn PromptSource) -> Result<Interaction> {
        if !self.offers_skip() {
            return Ok(Interaction::Proceed);
        }
        let answer = prompt.read_line(SKIP_PROMPT)?;
        Ok(match answer.trim().chars().next() {
            Some('N') | Some('n') => Interaction::Skip,
            _ => Interaction::Proceed,
        })
    }
}

macro_rules! impl_from_step {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(impl From<$ty> for Step {
            fn from(s: $ty) -> Self {
                Step::$variant(s)
            }
        })*
    };
}

impl_from_step!(Title => TitleStep,
                Text => TextStep,
                TextInput => TextInputStep,
                NumberInput => NumberInputStep,
                CsvInput => CsvInputStep,
                Calculus => CalculusStep,
                Display => DisplayStep,
                TextFileInput => TextFileInputStep,
                CsvFileInput => CsvFileInputStep,
                Output => OutputStep,
                End => EndStep);
