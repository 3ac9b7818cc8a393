use super::StepAction;
use crate::context::StepContext;
use crate::errors::{FlowError, Result};
use crate::value::Captured;
use std::path::PathBuf;

/// Pide una línea de texto y la guarda.
#[derive(Debug, Clone, PartialEq)]
pub struct TextInputStep {
    pub description: String,
    value: Option<String>,
}

impl TextInputStep {
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into(), value: None }
    }

    /// Texto capturado en la última ejecución.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl StepAction for TextInputStep {
    fn execute(&mut self, ctx: &mut StepContext<'_, '_>) -> Result<()> {
        ctx.print(&format!("Description: {}", self.description));
        let line = ctx.read_line("Enter text: ")?;
        self.value = Some(line.trim().to_string());
        Ok(())
    }

    fn captured(&self) -> Option<Captured> {
        self.value.clone().map(Captured::Text)
    }

    fn reset(&mut self) {
        self.value = None;
    }

    fn summary(&self) -> String {
        self.description.clone()
    }
}

/// Pide un número y lo guarda.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberInputStep {
    pub description: String,
    value: Option<f64>,
}

impl NumberInputStep {
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into(), value: None }
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }
}

impl StepAction for NumberInputStep {
    fn execute(&mut self, ctx: &mut StepContext<'_, '_>) -> Result<()> {
        ctx.print(&format!("Description: {}", self.description));
        self.value = Some(ctx.read_number("Enter number: ")?);
        Ok(())
    }

    fn captured(&self) -> Option<Captured> {
        self.value.map(Captured::Number)
    }

    fn reset(&mut self) {
        self.value = None;
    }

    fn summary(&self) -> String {
        self.description.clone()
    }
}

/// Pide una línea de valores separados por comas y la escribe tal cual en
/// `file_name`. No hay comillas ni escapes: una coma siempre separa celdas.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvInputStep {
    pub description: String,
    pub file_name: PathBuf,
    values: Option<Vec<String>>,
}

impl CsvInputStep {
    pub fn new(description: impl Into<String>, file_name: impl Into<PathBuf>) -> Self {
        Self { description: description.into(), file_name: file_name.into(), values: None }
    }

    pub fn values(&self) -> Option<&[String]> {
        self.values.as_deref()
    }
}

impl StepAction for CsvInputStep {
    fn execute(&mut self, ctx: &mut StepContext<'_, '_>) -> Result<()> {
        ctx.print(&format!("Description: {}", self.description));
        let line = ctx.read_line("Enter comma-separated values: ")?;
        let line = line.trim();
        if line.is_empty() {
            return Err(FlowError::Input("no se introdujo ningún valor".into()));
        }
        let values: Vec<String> = line.split(',').map(str::to_string).collect();
        ctx.files().write(&self.file_name, &format!("{}\n", values.join(",")))?;
        ctx.print(&format!("Saved {} values to {}", values.len(), self.file_name.display()));
        self.values = Some(values);
        Ok(())
    }

    fn captured(&self) -> Option<Captured> {
        self.values.clone().map(Captured::Csv)
    }

    fn reset(&mut self) {
        self.values = None;
    }

    fn summary(&self) -> String {
        format!("{} -> {}", self.description, self.file_name.display())
    }
}
