use serde::{Deserialize, Serialize};
use std::fmt;

/// Posición (0-based) de un paso dentro de su flujo. Al usuario se le muestra
/// como número de paso 1-based (`#n`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StepRef(pub usize);

impl StepRef {
    /// Crea la referencia a partir del número visible (1-based).
    pub fn from_number(number: usize) -> Option<Self> {
        number.checked_sub(1).map(StepRef)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    pub fn number(&self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for StepRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.number())
    }
}

/// Valor capturado por un paso de entrada durante la ejecución actual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Captured {
    Text(String),
    Number(f64),
    Csv(Vec<String>),
    Lines(Vec<String>),
    Table(Vec<Vec<String>>),
}

impl Captured {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Captured::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Representación textual usada por `Display` y por `Output`.
    pub fn render(&self) -> String {
        match self {
            Captured::Text(s) => s.clone(),
            Captured::Number(n) => n.to_string(),
            Captured::Csv(cells) => cells.join(","),
            Captured::Lines(lines) => lines.join("\n"),
            Captured::Table(rows) => rows.iter().map(|r| r.join(",")).collect::<Vec<_>>().join("\n"),
        }
    }
}
