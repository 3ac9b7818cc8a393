use super::StepAction;
use crate::context::StepContext;
use crate::errors::Result;
use crate::value::Captured;
use std::path::PathBuf;

/// Lee las líneas de un fichero de texto.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFileInputStep {
    pub description: String,
    pub file_name: PathBuf,
    lines: Option<Vec<String>>,
}

impl TextFileInputStep {
    pub fn new(description: impl Into<String>, file_name: impl Into<PathBuf>) -> Self {
        Self { description: description.into(), file_name: file_name.into(), lines: None }
    }

    pub fn lines(&self) -> Option<&[String]> {
        self.lines.as_deref()
    }
}

impl StepAction for TextFileInputStep {
    fn execute(&mut self, ctx: &mut StepContext<'_, '_>) -> Result<()> {
        ctx.print(&format!("Executing TextFileInput: {}", self.description));
        let lines = ctx.files().read_lines(&self.file_name)?;
        ctx.print(&format!("Read {} lines from {}", lines.len(), self.file_name.display()));
        self.lines = Some(lines);
        Ok(())
    }

    fn captured(&self) -> Option<Captured> {
        self.lines.clone().map(Captured::Lines)
    }

    fn reset(&mut self) {
        self.lines = None;
    }

    fn summary(&self) -> String {
        format!("{} <- {}", self.description, self.file_name.display())
    }
}

/// Lee un fichero CSV: cada línea se divide por `,` en celdas de texto. Sin
/// cabecera ni inferencia de tipos.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvFileInputStep {
    pub description: String,
    pub file_name: PathBuf,
    table: Option<Vec<Vec<String>>>,
}

impl CsvFileInputStep {
    pub fn new(description: impl Into<String>, file_name: impl Into<PathBuf>) -> Self {
        Self { description: description.into(), file_name: file_name.into(), table: None }
    }

    pub fn table(&self) -> Option<&[Vec<String>]> {
        self.table.as_deref()
    }
}

/// Divide cada línea por comas.
pub fn parse_csv_lines(lines: &[String]) -> Vec<Vec<String>> {
    lines.iter().map(|l| l.split(',').map(str::to_string).collect()).collect()
}

impl StepAction for CsvFileInputStep {
    fn execute(&mut self, ctx: &mut StepContext<'_, '_>) -> Result<()> {
        ctx.print(&format!("Executing CSVFileInput: {}", self.description));
        let lines = ctx.files().read_lines(&self.file_name)?;
        let table = parse_csv_lines(&lines);
        ctx.print(&format!("Read {} rows from {}", table.len(), self.file_name.display()));
        self.table = Some(table);
        Ok(())
    }

    fn captured(&self) -> Option<Captured> {
        self.table.clone().map(Captured::Table)
    }

    fn reset(&mut self) {
        self.table = None;
    }

    fn summary(&self) -> String {
        format!("{} <- {}", self.description, self.file_name.display())
    }
}
