//! Crate `flow`: motor de flujos interactivos
//!
//! Un flujo es una secuencia ordenada de pasos tipados (títulos, textos,
//! entradas de texto/número/CSV, lectores de ficheros, cálculos sobre
//! entradas previas, escritores de ficheros y un terminador) que se ejecutan
//! en orden. Antes de cada paso el usuario puede saltarlo; el flujo lleva
//! analítica de inicios, finalizaciones, saltos y errores por tipo de paso.
//!
//! Diseño resumido:
//! - `Step` es un enum cerrado; cada variante implementa `StepAction`.
//! - Las referencias entre pasos son posiciones (`StepRef`) validadas al
//!   añadir el paso: sólo hacia pasos anteriores y con la capacidad correcta.
//! - El bucle `engine::run_steps` recibe pasos, analítica y colaboradores
//!   explícitamente; `Flow` añade la máquina de estados encima.
//! - La terminal, los ficheros y el reloj se inyectan mediante los traits de
//!   `io`. `stubs` trae implementaciones en memoria para pruebas.
//!
//! Ejemplo rápido:
//! ```rust
//! use flow::stubs::{FixedClock, InMemoryFileStore, ScriptedPrompt};
//! use flow::{EndStep, Flow, RunIo, TextInputStep};
//!
//! let mut flow = Flow::create("Demo", &FixedClock::epoch());
//! flow.add_step(TextInputStep::new("name")).unwrap();
//! flow.add_step(EndStep).unwrap();
//!
//! let mut prompt = ScriptedPrompt::new(["", "Alice"]);
//! let files = InMemoryFileStore::new();
//! flow.run(&mut RunIo::new(&mut prompt, &files)).unwrap();
//! assert_eq!(flow.analytics().completions, 1);
//! ```
pub mod analytics;
pub mod calculus;
pub mod context;
pub mod engine;
pub mod errors;
pub mod flow;
pub mod io;
pub mod kind;
pub mod steps;
pub mod stubs;
pub mod value;

pub use analytics::Analytics;
pub use calculus::{Expression, OperationKind, Operand};
pub use context::StepContext;
pub use engine::{run_steps, FlowEngineConfig, RunSummary, StepFailure};
pub use errors::{FlowError, Result};
pub use flow::{catalog, CatalogEntry, Flow, FlowReport, FlowState};
pub use io::{Clock, FileStore, PromptSource, RunIo};
pub use kind::StepKind;
pub use steps::*;
pub use value::{Captured, StepRef};

pub use tokio_util::sync::CancellationToken;
