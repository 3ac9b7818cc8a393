use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Etiqueta inmutable de cada tipo de paso. Se usa para el despacho, para
/// agrupar la analítica y para validar las referencias entre pasos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Title,
    Text,
    TextInput,
    NumberInput,
    CsvInput,
    Calculus,
    Display,
    TextFileInput,
    CsvFileInput,
    Output,
    End,
}

impl StepKind {
    /// Todos los tipos, en el orden en que se muestran en el catálogo.
    pub const ALL: [StepKind; 11] = [StepKind::Title,
                                     StepKind::Text,
                                     StepKind::TextInput,
                                     StepKind::NumberInput,
                                     StepKind::CsvInput,
                                     StepKind::Calculus,
                                     StepKind::Display,
                                     StepKind::TextFileInput,
                                     StepKind::CsvFileInput,
                                     StepKind::Output,
                                     StepKind::End];

    /// Etiqueta visible (la misma que usa la consola y los informes).
    pub fn label(&self) -> &'static str {
        match self {
            StepKind::Title => "TITLE",
            StepKind::Text => "TEXT",
            StepKind::TextInput => "TEXT INPUT",
            StepKind::NumberInput => "NUMBER INPUT",
            StepKind::CsvInput => "CSV INPUT",
            StepKind::Calculus => "CALCULUS",
            StepKind::Display => "DISPLAY",
            StepKind::TextFileInput => "TEXT FILE INPUT",
            StepKind::CsvFileInput => "CSV FILE INPUT",
            StepKind::Output => "OUTPUT",
            StepKind::End => "END",
        }
    }

    /// Explicación estática del comportamiento del tipo, independiente de
    /// los datos de cada instancia.
    pub fn describe(&self) -> &'static str {
        match self {
            StepKind::Title => "Muestra un título y un subtítulo.",
            StepKind::Text => "Muestra un título y un bloque de texto.",
            StepKind::TextInput => "Pide una línea de texto y la guarda para pasos posteriores.",
            StepKind::NumberInput => "Pide un número y lo guarda para pasos posteriores.",
            StepKind::CsvInput => {
                "Pide valores separados por comas y los escribe tal cual en un fichero."
            }
            StepKind::Calculus => {
                "Aplica una operación (+, -, *, /, min, max) de izquierda a derecha sobre números \
                 literales o capturados antes."
            }
            StepKind::Display => "Muestra el valor capturado por un paso anterior.",
            StepKind::TextFileInput => "Lee las líneas de un fichero de texto.",
            StepKind::CsvFileInput => "Lee un fichero CSV como tabla de celdas de texto.",
            StepKind::Output => "Escribe en un fichero el contenido aportado por pasos anteriores.",
            StepKind::End => "Marca el final del flujo.",
        }
    }

    /// Indica si el paso guarda un valor que otros pasos pueden leer.
    pub fn captures(&self) -> bool {
        matches!(self,
                 StepKind::TextInput
                 | StepKind::NumberInput
                 | StepKind::CsvInput
                 | StepKind::Calculus
                 | StepKind::TextFileInput
                 | StepKind::CsvFileInput)
    }

    /// Indica si el valor capturado es numérico (usable como operando).
    pub fn numeric(&self) -> bool {
        matches!(self, StepKind::NumberInput | StepKind::Calculus)
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for StepKind {
    type Err = String;

    /// Acepta la etiqueta visible (`TEXT INPUT`) o el nombre en snake_case
    /// (`text_input`), sin distinguir mayúsculas.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        StepKind::ALL.iter()
                     .copied()
                     .find(|k| k.label().to_lowercase() == normalized)
                     .ok_or_else(|| format!("tipo de paso desconocido: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_and_snake_case() {
        assert_eq!("TEXT INPUT".parse::<StepKind>().unwrap(), StepKind::TextInput);
        assert_eq!("csv_file_input".parse::<StepKind>().unwrap(), StepKind::CsvFileInput);
        assert_eq!(" end ".parse::<StepKind>().unwrap(), StepKind::End);
        assert!("loop".parse::<StepKind>().is_err());
    }

    #[test]
    fn capabilities() {
        assert!(StepKind::Calculus.numeric());
        assert!(StepKind::CsvInput.captures());
        assert!(!StepKind::CsvInput.numeric());
        assert!(!StepKind::Display.captures());
        assert!(!StepKind::End.captures());
    }
}
