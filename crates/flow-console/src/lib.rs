//! flow-console: colaboradores concretos del motor `flow`
//!
//! Implementa los traits de `flow::io` sobre la terminal y el disco:
//! `TerminalPrompt` (stdin/stdout con cancelación), `DiskFileStore` y
//! `SystemClock`. También carga la configuración desde el entorno
//! (`ConsoleConfig::from_env`).

pub mod config;
pub mod disk;
pub mod errors;
pub mod terminal;

pub use config::ConsoleConfig;
pub use disk::{DiskFileStore, SystemClock};
pub use errors::ConsoleError;
pub use terminal::TerminalPrompt;
