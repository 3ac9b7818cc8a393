use super::{Capability, Reference, StepAction};
use crate::calculus::{fold, Expression, OperationKind, Operand};
use crate::context::StepContext;
use crate::errors::{FlowError, Result};
use crate::value::Captured;

/// Pliega una expresión sobre literales y números capturados antes.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculusStep {
    expression: Expression,
    result: Option<f64>,
}

impl CalculusStep {
    pub fn new(expression: Expression) -> Self {
        Self { expression, result: None }
    }

    /// Atajo: parsea `input` con `Expression::parse`. Falla con
    /// `FlowError::Config` si hay menos de dos operandos.
    pub fn parse(input: &str, kind: OperationKind) -> Result<Self> {
        Ok(Self::new(Expression::parse(input, kind)?))
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Acumulador de la última ejecución. Si el pliegue se detuvo por una
    /// división por cero contiene el valor previo a esa posición.
    pub fn result(&self) -> Option<f64> {
        self.result
    }
}

impl StepAction for CalculusStep {
    fn execute(&mut self, ctx: &mut StepContext<'_, '_>) -> Result<()> {
        ctx.print("Performing calculus operations:");
        let values = self.expression
                         .operands()
                         .iter()
                         .map(|o| match o {
                             Operand::Literal(v) => Ok(*v),
                             Operand::Step(r) => ctx.number(*r),
                         })
                         .collect::<Result<Vec<f64>>>()?;
        let (first, rest) = match values.split_first() {
            Some(split) => split,
            None => return Err(FlowError::Config("la expresión no tiene operandos".into())),
        };
        let folded = fold(*first, rest, self.expression.kind());
        self.result = Some(folded.value);
        match folded.error {
            Some(e) => Err(e),
            None => {
                ctx.print(&format!("Result: {}", folded.value));
                Ok(())
            }
        }
    }

    fn captured(&self) -> Option<Captured> {
        self.result.map(Captured::Number)
    }

    fn references(&self) -> Vec<Reference> {
        self.expression
            .references()
            .map(|target| Reference { target, needs: Capability::Numeric })
            .collect()
    }

    fn reset(&mut self) {
        self.result = None;
    }

    fn summary(&self) -> String {
        self.expression.to_string()
    }
}
