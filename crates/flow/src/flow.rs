// Archivo: flow.rs
// Propósito: entidad `Flow` con su máquina de estados
// (Created -> Running -> Completed, y Deleted desde cualquier estado).
use crate::analytics::Analytics;
use crate::engine::{run_steps, FlowEngineConfig, RunSummary};
use crate::errors::{FlowError, Result};
use crate::io::{Clock, RunIo};
use crate::kind::StepKind;
use crate::steps::Step;
use crate::value::StepRef;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Estado del ciclo de vida de un flujo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowState {
    Created,
    Running,
    Completed,
    Deleted,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlowState::Created => "created",
            FlowState::Running => "running",
            FlowState::Completed => "completed",
            FlowState::Deleted => "deleted",
        };
        write!(f, "{}", s)
    }
}

/// Secuencia ordenada y con nombre de pasos, con su analítica.
///
/// El flujo es dueño exclusivo de sus pasos. Las referencias entre pasos son
/// posiciones validadas en `add_step`.
#[derive(Debug, Clone)]
pub struct Flow {
    id: Uuid,
    name: Option<String>,
    created_at: DateTime<Utc>,
    state: FlowState,
    steps: Vec<Step>,
    analytics: Analytics,
    config: FlowEngineConfig,
}

impl Flow {
    /// Crea un flujo vacío en estado `Created`, con la marca de creación del
    /// reloj dado.
    pub fn create(name: impl Into<String>, clock: &dyn Clock) -> Self {
        let flow = Self { id: Uuid::new_v4(),
                          name: Some(name.into()),
                          created_at: clock.now(),
                          state: FlowState::Created,
                          steps: Vec::new(),
                          analytics: Analytics::new(),
                          config: FlowEngineConfig::default() };
        info!("flujo {} creado ({:?})", flow.id, flow.name);
        flow
    }

    pub fn with_config(mut self, config: FlowEngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, r: StepRef) -> Option<&Step> {
        self.steps.get(r.index())
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    /// Cambia el nombre. Sólo se permite antes de la primera ejecución.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<()> {
        if self.state != FlowState::Created {
            return Err(FlowError::Config(format!("no se puede renombrar un flujo en estado {}", self.state)));
        }
        self.name = Some(name.into());
        Ok(())
    }

    /// Añade un paso al final y devuelve su posición.
    ///
    /// Valida que cada referencia apunte a un paso anterior con la capacidad
    /// requerida; si no, devuelve `Config` y el flujo no cambia.
    pub fn add_step(&mut self, step: impl Into<Step>) -> Result<StepRef> {
        if self.state == FlowState::Deleted {
            return Err(FlowError::NotFound("el flujo fue eliminado".into()));
        }
        let step = step.into();
        let position = StepRef(self.steps.len());
        for reference in step.references() {
            let target = self.steps.get(reference.target.index()).ok_or_else(|| {
                                                                    FlowError::Config(format!("el paso {} sólo puede \
                                                                                               referenciar pasos \
                                                                                               anteriores, no {}",
                                                                                              position,
                                                                                              reference.target))
                                                                })?;
            if !reference.needs.satisfied_by(target.kind()) {
                return Err(FlowError::Config(format!("el paso {} ({}) no aporta el valor que necesita {} ({})",
                                                     reference.target,
                                                     target.kind(),
                                                     position,
                                                     step.kind())));
            }
        }
        self.steps.push(step);
        Ok(position)
    }

    /// Ejecuta todos los pasos en orden.
    ///
    /// Created/Completed -> Running -> Completed. Si la ejecución se cancela
    /// el flujo vuelve al estado en que estaba y se devuelve `Cancelled`.
    pub fn run(&mut self, io: &mut RunIo<'_>) -> Result<RunSummary> {
        let previous = match self.state {
            FlowState::Created | FlowState::Completed => self.state,
            FlowState::Running => return Err(FlowError::Config("el flujo ya se está ejecutando".into())),
            FlowState::Deleted => return Err(FlowError::NotFound("el flujo fue eliminado".into())),
        };
        info!("ejecutando flujo {} ({:?}) con {} pasos", self.id, self.name, self.steps.len());
        self.state = FlowState::Running;
        match run_steps(&mut self.steps, &mut self.analytics, io, &self.config) {
            Ok(summary) => {
                self.state = FlowState::Completed;
                Ok(summary)
            }
            Err(e) => {
                self.state = previous;
                Err(e)
            }
        }
    }

    /// Elimina el flujo si `name` coincide con el nombre actual: vacía los
    /// pasos, reinicia la analítica y borra el nombre. Si no coincide
    /// devuelve `NotFound` y no cambia nada.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        if self.name.as_deref() != Some(name) {
            return Err(FlowError::NotFound(format!("no existe un flujo llamado '{}'", name)));
        }
        self.steps.clear();
        self.analytics.reset();
        self.name = None;
        self.state = FlowState::Deleted;
        info!("flujo {} eliminado", self.id);
        Ok(())
    }

    /// Informe de sólo lectura, disponible en cualquier estado.
    pub fn report(&self) -> FlowReport {
        FlowReport { id: self.id,
                     name: self.name.clone(),
                     created_at: self.created_at,
                     state: self.state,
                     step_count: self.steps.len(),
                     average_errors_per_completion: self.analytics.average_errors_per_completion(),
                     analytics: self.analytics.clone() }
    }
}

/// Entrada del catálogo de tipos de paso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub kind: StepKind,
    pub description: &'static str,
}

/// Catálogo de todos los tipos de paso con su descripción.
pub fn catalog() -> Vec<CatalogEntry> {
    StepKind::ALL.iter().map(|k| CatalogEntry { kind: *k, description: k.describe() }).collect()
}

/// Instantánea de un flujo para mostrar o serializar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowReport {
    pub id: Uuid,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub state: FlowState,
    pub step_count: usize,
    pub analytics: Analytics,
    pub average_errors_per_completion: Option<f64>,
}

impl fmt::Display for FlowReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Flow: {}", self.name.as_deref().unwrap_or("<sin nombre>"))?;
        writeln!(f, "Id: {}", self.id)?;
        writeln!(f, "Created at: {}", self.created_at.format("%a %b %e %H:%M:%S %Y"))?;
        writeln!(f, "State: {}", self.state)?;
        writeln!(f, "Steps: {}", self.step_count)?;
        writeln!(f, "Started: {}", self.analytics.starts)?;
        writeln!(f, "Completed: {}", self.analytics.completions)?;
        for (kind, n) in &self.analytics.skips {
            writeln!(f, "Skipped {}: {}", kind, n)?;
        }
        for (kind, n) in &self.analytics.errors {
            writeln!(f, "Errors {}: {}", kind, n)?;
        }
        writeln!(f, "Total errors: {}", self.analytics.total_errors)?;
        match self.average_errors_per_completion {
            Some(avg) => write!(f, "Average errors per completion: {:.2}", avg),
            None => write!(f, "Average errors per completion: not applicable"),
        }
    }
}
