use super::{Capability, Reference, StepAction};
use crate::context::StepContext;
use crate::errors::Result;
use crate::value::StepRef;
use std::path::PathBuf;

/// Escribe en un fichero el contenido aportado por pasos anteriores.
///
/// Formato, una entrada por línea:
///
/// ```text
/// Step Number: <posición 1-based de este paso>
/// Title: <title>
/// Description: <description>
/// <contenido de cada fuente, en orden>
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OutputStep {
    pub file_name: PathBuf,
    pub title: String,
    pub description: String,
    pub sources: Vec<StepRef>,
    contents: Vec<String>,
}

impl OutputStep {
    pub fn new(file_name: impl Into<PathBuf>,
               title: impl Into<String>,
               description: impl Into<String>,
               sources: Vec<StepRef>)
               -> Self {
        Self { file_name: file_name.into(),
               title: title.into(),
               description: description.into(),
               sources,
               contents: Vec::new() }
    }

    /// Contenido recogido en la última ejecución.
    pub fn contents(&self) -> &[String] {
        &self.contents
    }

    /// Texto completo del fichero para `step_number` y `contents`.
    pub fn render(&self, step_number: usize, contents: &[String]) -> String {
        let mut out = format!("Step Number: {}\nTitle: {}\nDescription: {}\n",
                              step_number, self.title, self.description);
        for line in contents {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

impl StepAction for OutputStep {
    fn execute(&mut self, ctx: &mut StepContext<'_, '_>) -> Result<()> {
        let number = ctx.position().number();
        ctx.print(&format!("Executing OutputStep for step {}", number));
        let contents = self.sources
                           .iter()
                           .map(|r| ctx.captured(*r).map(|v| v.render()))
                           .collect::<Result<Vec<String>>>()?;
        ctx.files().write(&self.file_name, &self.render(number, &contents))?;
        ctx.print(&format!("Wrote {} content lines to {}", contents.len(), self.file_name.display()));
        self.contents = contents;
        Ok(())
    }

    fn references(&self) -> Vec<Reference> {
        self.sources.iter().map(|target| Reference { target: *target, needs: Capability::Captures }).collect()
    }

    fn reset(&mut self) {
        self.contents.clear();
    }

    fn summary(&self) -> String {
        let sources = self.sources.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(" ");
        format!("{} -> {} [{}]", self.title, self.file_name.display(), sources)
    }
}
