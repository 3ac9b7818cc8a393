use super::{Capability, Reference, StepAction};
use crate::context::StepContext;
use crate::errors::Result;
use crate::value::StepRef;

/// Muestra el valor capturado por un paso anterior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayStep {
    pub source: StepRef,
}

impl DisplayStep {
    pub fn new(source: StepRef) -> Self {
        Self { source }
    }
}

impl StepAction for DisplayStep {
    fn execute(&mut self, ctx: &mut StepContext<'_, '_>) -> Result<()> {
        ctx.print(&format!("Displaying content for step {}", self.source.number()));
        let value = ctx.captured(self.source)?;
        ctx.print(&format!("Content: {}", value.render()));
        Ok(())
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference { target: self.source, needs: Capability::Captures }]
    }

    fn summary(&self) -> String {
        format!("muestra {}", self.source)
    }
}
