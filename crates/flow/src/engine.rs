// Archivo: engine.rs
// Propósito: bucle de ejecución de un flujo (interact -> execute -> record).
//
// El bucle es una función libre que recibe los pasos, la analítica y los
// colaboradores como parámetros explícitos, de modo que se puede probar sin
// `Flow` ni terminal.
use crate::analytics::Analytics;
use crate::context::StepContext;
use crate::errors::{FlowError, Result};
use crate::io::RunIo;
use crate::kind::StepKind;
use crate::steps::{Interaction, Step};
use crate::value::StepRef;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuración del motor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEngineConfig {
    /// Si es `false` no se pregunta la compuerta de salto y todos los pasos
    /// se ejecutan.
    pub offer_skip: bool,
}

impl Default for FlowEngineConfig {
    fn default() -> Self {
        FlowEngineConfig { offer_skip: true }
    }
}

/// Fallo local de un paso, ya contabilizado en la analítica.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepFailure {
    pub step: StepRef,
    pub kind: StepKind,
    pub message: String,
}

/// Resumen de una ejecución completa.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub executed: usize,
    pub skipped: usize,
    pub failures: Vec<StepFailure>,
    /// Ficheros escritos por pasos Output y CsvInput.
    pub files_written: Vec<PathBuf>,
    /// Resultado del último paso ejecutado (sin contar `End`) si fue un
    /// Calculus.
    pub final_result: Option<f64>,
}

/// Ejecuta `steps` en orden y actualiza `analytics`.
///
/// Incrementa `starts` al empezar y `completions` al terminar. Los errores de
/// un paso se cuentan, se notifican por el flujo de errores y no detienen el
/// flujo. Sólo `FlowError::Cancelled` aborta la ejecución; en ese caso no se
/// registra la finalización.
pub fn run_steps(steps: &mut [Step],
                 analytics: &mut Analytics,
                 io: &mut RunIo<'_>,
                 config: &FlowEngineConfig)
                 -> Result<RunSummary> {
    analytics.record_start();
    for step in steps.iter_mut() {
        step.reset();
    }

    let mut summary = RunSummary::default();
    let mut last_executed: Option<usize> = None;

    for index in 0..steps.len() {
        io.check_cancelled()?;
        let (prior, rest) = steps.split_at_mut(index);
        let step = &mut rest[0];
        let kind = step.kind();
        let position = StepRef(index);

        if config.offer_skip {
            // una lectura fallida de la compuerta cuenta como "continuar"
            let interaction = match step.interact(&mut *io.prompt) {
                Ok(i) => i,
                Err(FlowError::Cancelled) => return Err(FlowError::Cancelled),
                Err(e) => {
                    warn!("compuerta del paso {} ({}) ilegible: {}", position, kind, e);
                    Interaction::Proceed
                }
            };
            if let Interaction::Skip = interaction {
                debug!("paso {} ({}) saltado", position, kind);
                io.prompt.print("Skipping to the next step...");
                analytics.record_skip(kind);
                summary.skipped += 1;
                continue;
            }
        }

        debug!("ejecutando paso {} ({})", position, kind);
        let outcome = {
            let mut ctx = StepContext::new(position, prior, io);
            step.execute(&mut ctx)
        };
        summary.executed += 1;
        if kind != StepKind::End {
            last_executed = Some(index);
        }

        match outcome {
            Ok(()) => {
                if let Some(path) = written_file(step) {
                    summary.files_written.push(path);
                }
            }
            Err(FlowError::Cancelled) => return Err(FlowError::Cancelled),
            Err(e) => {
                warn!("el paso {} ({}) falló: {}", position, kind, e);
                io.prompt.print_error(&format!("Error in step {} ({}): {}", position.number(), kind, e));
                analytics.record_error(kind);
                summary.failures.push(StepFailure { step: position, kind, message: e.to_string() });
            }
        }
    }

    summary.final_result = last_executed.and_then(|i| match &steps[i] {
                                                    Step::Calculus(c) => c.result(),
                                                    _ => None,
                                                });
    analytics.record_completion();
    io.prompt.print("Flow completed.");
    info!("flujo completado: {} ejecutados, {} saltados, {} errores",
          summary.executed,
          summary.skipped,
          summary.failures.len());
    Ok(summary)
}

fn written_file(step: &Step) -> Option<PathBuf> {
    match step {
        Step::Output(o) => Some(o.file_name.clone()),
        Step::CsvInput(c) => Some(c.file_name.clone()),
        _ => None,
    }
}
