use super::StepAction;
use crate::context::StepContext;
use crate::errors::Result;

/// Paso que muestra un título y un subtítulo.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleStep {
    pub title: String,
    pub subtitle: String,
}

impl TitleStep {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self { title: title.into(), subtitle: subtitle.into() }
    }
}

impl StepAction for TitleStep {
    fn execute(&mut self, ctx: &mut StepContext<'_, '_>) -> Result<()> {
        ctx.print(&format!("Title: {}", self.title));
        ctx.print(&format!("Subtitle: {}", self.subtitle));
        Ok(())
    }

    fn summary(&self) -> String {
        format!("{} / {}", self.title, self.subtitle)
    }
}

/// Paso que muestra un título y un texto.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStep {
    pub title: String,
    pub copy: String,
}

impl TextStep {
    pub fn new(title: impl Into<String>, copy: impl Into<String>) -> Self {
        Self { title: title.into(), copy: copy.into() }
    }
}

impl StepAction for TextStep {
    fn execute(&mut self, ctx: &mut StepContext<'_, '_>) -> Result<()> {
        ctx.print(&format!("Title: {}", self.title));
        ctx.print(&format!("Copy: {}", self.copy));
        Ok(())
    }

    fn summary(&self) -> String {
        self.title.clone()
    }
}

/// Terminador del flujo; no tiene datos ni ofrece salto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EndStep;

impl StepAction for EndStep {
    fn execute(&mut self, ctx: &mut StepContext<'_, '_>) -> Result<()> {
        ctx.print("End of the flow");
        Ok(())
    }

    fn summary(&self) -> String {
        "fin".to_string()
    }
}
