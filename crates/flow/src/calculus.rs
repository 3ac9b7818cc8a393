// Archivo: calculus.rs
// Propósito: evaluador de expresiones del paso Calculus. Tokeniza una
// expresión separada por espacios en operandos y operadores y pliega los
// operandos de izquierda a derecha con una única `OperationKind`.
use crate::errors::{FlowError, Result};
use crate::value::StepRef;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operación aplicada de forma uniforme en todas las posiciones del pliegue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Add,
    Subtract,
    Multiply,
    Divide,
    Min,
    Max,
}

impl OperationKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            OperationKind::Add => "+",
            OperationKind::Subtract => "-",
            OperationKind::Multiply => "*",
            OperationKind::Divide => "/",
            OperationKind::Min => "min",
            OperationKind::Max => "max",
        }
    }

    /// Aplica la operación a `(acc, operand)`. La división por cero es el
    /// único caso que falla.
    pub fn apply(&self, acc: f64, operand: f64) -> Result<f64> {
        Ok(match self {
            OperationKind::Add => acc + operand,
            OperationKind::Subtract => acc - operand,
            OperationKind::Multiply => acc * operand,
            OperationKind::Divide => {
                if operand == 0.0 {
                    return Err(FlowError::Arithmetic(format!("división por cero ({} / {})", acc, operand)));
                }
                acc / operand
            }
            OperationKind::Min => acc.min(operand),
            OperationKind::Max => acc.max(operand),
        })
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for OperationKind {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "+" | "add" => Ok(OperationKind::Add),
            "-" | "sub" | "subtract" => Ok(OperationKind::Subtract),
            "*" | "mul" | "multiply" => Ok(OperationKind::Multiply),
            "/" | "div" | "divide" => Ok(OperationKind::Divide),
            "min" => Ok(OperationKind::Min),
            "max" => Ok(OperationKind::Max),
            other => Err(FlowError::Arithmetic(format!("operación no soportada: {}", other))),
        }
    }
}

/// Operando de una expresión: un literal o el valor numérico capturado por
/// un paso anterior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    Literal(f64),
    Step(StepRef),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(v) => write!(f, "{}", v),
            Operand::Step(r) => write!(f, "{}", r),
        }
    }
}

/// Expresión validada: `operators.len() == operands.len() - 1` y al menos
/// dos operandos. Al deserializar también pasa por `Expression::new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExpressionParts")]
pub struct Expression {
    operands: Vec<Operand>,
    operators: Vec<char>,
    kind: OperationKind,
}

#[derive(Deserialize)]
struct ExpressionParts {
    operands: Vec<Operand>,
    operators: Vec<char>,
    kind: OperationKind,
}

impl TryFrom<ExpressionParts> for Expression {
    type Error = FlowError;

    fn try_from(parts: ExpressionParts) -> Result<Self> {
        Expression::new(parts.operands, parts.operators, parts.kind)
    }
}

impl Expression {
    pub fn new(operands: Vec<Operand>, operators: Vec<char>, kind: OperationKind) -> Result<Self> {
        if operands.len() < 2 {
            return Err(FlowError::Config(format!("se necesitan al menos dos operandos, hay {}", operands.len())));
        }
        if operators.len() + 1 != operands.len() {
            return Err(FlowError::Config(format!("{} operandos requieren {} operadores, hay {}",
                                                 operands.len(),
                                                 operands.len() - 1,
                                                 operators.len())));
        }
        Ok(Self { operands, operators, kind })
    }

    /// Parsea una expresión separada por espacios, por ejemplo `10 / #2`.
    ///
    /// - token que empieza por dígito (o `-`/`.` seguido de dígito): literal
    /// - `#n`: valor capturado por el paso número `n`
    /// - cualquier otro token de un carácter: operador (sólo descriptivo)
    pub fn parse(input: &str, kind: OperationKind) -> Result<Self> {
        let mut operands = Vec::new();
        let mut operators = Vec::new();
        let mut expect_operand = true;
        for token in input.split_whitespace() {
            if expect_operand {
                operands.push(parse_operand(token)?);
            } else {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(op), None) => operators.push(op),
                    _ => return Err(FlowError::Config(format!("se esperaba un operador, se encontró '{}'", token))),
                }
            }
            expect_operand = !expect_operand;
        }
        if expect_operand && !operators.is_empty() {
            return Err(FlowError::Config("la expresión termina en un operador".into()));
        }
        Self::new(operands, operators, kind)
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    pub fn operators(&self) -> &[char] {
        &self.operators
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Pasos referenciados por la expresión, en orden.
    pub fn references(&self) -> impl Iterator<Item = StepRef> + '_ {
        self.operands.iter().filter_map(|o| match o {
                                Operand::Step(r) => Some(*r),
                                Operand::Literal(_) => None,
                            })
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.operands.first() {
            write!(f, "{}", first)?;
        }
        for (op, operand) in self.operators.iter().zip(self.operands.iter().skip(1)) {
            write!(f, " {} {}", op, operand)?;
        }
        write!(f, " [{}]", self.kind)
    }
}

fn parse_operand(token: &str) -> Result<Operand> {
    if let Some(number) = token.strip_prefix('#') {
        return number.parse::<usize>()
                     .ok()
                     .and_then(StepRef::from_number)
                     .map(Operand::Step)
                     .ok_or_else(|| FlowError::Config(format!("referencia de paso inválida: {}", token)));
    }
    let mut chars = token.chars();
    let first = chars.next();
    let second = chars.next();
    let numeric_start = match (first, second) {
        (Some(c), _) if c.is_ascii_digit() => true,
        (Some('-'), Some(c)) | (Some('.'), Some(c)) => c.is_ascii_digit(),
        _ => false,
    };
    if !numeric_start {
        return Err(FlowError::Config(format!("se esperaba un operando, se encontró '{}'", token)));
    }
    token.parse::<f64>()
         .map(Operand::Literal)
         .map_err(|_| FlowError::Config(format!("número inválido: {}", token)))
}

/// Resultado de un pliegue. `error` se rellena cuando el pliegue se detuvo;
/// `value` conserva el acumulador previo a la posición que falló.
#[derive(Debug)]
pub struct Fold {
    pub value: f64,
    pub error: Option<FlowError>,
}

/// Pliega `first` y `rest` de izquierda a derecha con `kind`.
pub fn fold(first: f64, rest: &[f64], kind: OperationKind) -> Fold {
    let mut acc = first;
    for operand in rest {
        match kind.apply(acc, *operand) {
            Ok(next) => acc = next,
            Err(e) => return Fold { value: acc, error: Some(e) },
        }
    }
    Fold { value: acc, error: None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_literals_and_references() {
        let e = Expression::parse("10 + #2 - -3.5", OperationKind::Add).unwrap();
        assert_eq!(e.operands(),
                   &[Operand::Literal(10.0), Operand::Step(StepRef(1)), Operand::Literal(-3.5)]);
        assert_eq!(e.operators(), &['+', '-']);
        assert_eq!(e.references().collect::<Vec<_>>(), vec![StepRef(1)]);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(matches!(Expression::parse("10", OperationKind::Add), Err(FlowError::Config(_))));
        assert!(matches!(Expression::parse("10 +", OperationKind::Add), Err(FlowError::Config(_))));
        assert!(matches!(Expression::parse("10 plus 2", OperationKind::Add), Err(FlowError::Config(_))));
        assert!(matches!(Expression::parse("x + 2", OperationKind::Add), Err(FlowError::Config(_))));
        assert!(matches!(Expression::parse("#0 + 2", OperationKind::Add), Err(FlowError::Config(_))));
    }

    #[test]
    fn operator_count_must_match() {
        let r = Expression::new(vec![Operand::Literal(1.0), Operand::Literal(2.0)], vec![], OperationKind::Add);
        assert!(matches!(r, Err(FlowError::Config(_))));
    }

    #[test]
    fn deserializing_validates_operand_count() {
        let single = r#"{"operands":[{"literal":5.0}],"operators":[],"kind":"add"}"#;
        assert!(serde_json::from_str::<Expression>(single).is_err());

        let pair = r#"{"operands":[{"literal":5.0},{"step":0}],"operators":["+"],"kind":"add"}"#;
        let e = serde_json::from_str::<Expression>(pair).unwrap();
        assert_eq!(e.references().collect::<Vec<_>>(), vec![StepRef(0)]);
    }

    #[test]
    fn operation_kind_from_str() {
        assert_eq!("min".parse::<OperationKind>().unwrap(), OperationKind::Min);
        assert_eq!("/".parse::<OperationKind>().unwrap(), OperationKind::Divide);
        assert!(matches!("%".parse::<OperationKind>(), Err(FlowError::Arithmetic(_))));
    }

    #[test]
    fn fold_ignores_operator_tokens() {
        let f = fold(1.0, &[2.0, 3.0, 4.0], OperationKind::Add);
        assert_eq!(f.value, 10.0);
        assert!(f.error.is_none());
        let f = fold(3.0, &[7.0, -1.0], OperationKind::Max);
        assert_eq!(f.value, 7.0);
        let f = fold(3.0, &[7.0, -1.0], OperationKind::Min);
        assert_eq!(f.value, -1.0);
    }

    #[test]
    fn divide_by_zero_keeps_accumulator() {
        let f = fold(100.0, &[5.0, 0.0, 2.0], OperationKind::Divide);
        assert_eq!(f.value, 20.0);
        assert!(matches!(f.error, Some(FlowError::Arithmetic(_))));
    }
}
