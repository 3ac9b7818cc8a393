// Archivo: analytics.rs
// Propósito: contadores agregados de un flujo (inicios, finalizaciones,
// saltos y errores por tipo de paso).
use crate::kind::StepKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Registro de analítica de un flujo. Se pone a cero al crear el flujo, se
/// incrementa durante `run` y se reinicia por completo en `delete`.
///
/// Los mapas guardan los tipos en el orden en que aparecieron por primera
/// vez; un tipo sin saltos ni errores no tiene entrada.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    pub starts: u64,
    pub completions: u64,
    pub skips: IndexMap<StepKind, u64>,
    pub errors: IndexMap<StepKind, u64>,
    pub total_errors: u64,
}

impl Analytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_start(&mut self) {
        self.starts += 1;
    }

    pub fn record_completion(&mut self) {
        self.completions += 1;
    }

    pub fn record_skip(&mut self, kind: StepKind) {
        *self.skips.entry(kind).or_insert(0) += 1;
    }

    pub fn record_error(&mut self, kind: StepKind) {
        *self.errors.entry(kind).or_insert(0) += 1;
        self.total_errors += 1;
    }

    pub fn skips_for(&self, kind: StepKind) -> u64 {
        self.skips.get(&kind).copied().unwrap_or(0)
    }

    pub fn errors_for(&self, kind: StepKind) -> u64 {
        self.errors.get(&kind).copied().unwrap_or(0)
    }

    pub fn total_skips(&self) -> u64 {
        self.skips.values().sum()
    }

    /// Media de errores por ejecución completada. `None` ("no aplica")
    /// mientras no haya ninguna finalización.
    pub fn average_errors_per_completion(&self) -> Option<f64> {
        if self.completions == 0 {
            return None;
        }
        Some(self.total_errors as f64 / self.completions as f64)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_is_not_applicable_without_completions() {
        let mut a = Analytics::new();
        a.record_start();
        a.record_error(StepKind::Calculus);
        assert_eq!(a.average_errors_per_completion(), None);
        a.record_completion();
        a.record_start();
        a.record_error(StepKind::Output);
        a.record_completion();
        assert_eq!(a.average_errors_per_completion(), Some(1.0));
    }

    #[test]
    fn buckets_per_kind() {
        let mut a = Analytics::new();
        a.record_skip(StepKind::Text);
        a.record_skip(StepKind::Text);
        a.record_skip(StepKind::Title);
        assert_eq!(a.skips_for(StepKind::Text), 2);
        assert_eq!(a.skips_for(StepKind::End), 0);
        assert_eq!(a.total_skips(), 3);
        assert_eq!(a.skips.keys().copied().collect::<Vec<_>>(), vec![StepKind::Text, StepKind::Title]);
        a.reset();
        assert_eq!(a, Analytics::default());
    }
}
