use anyhow::Context;
use flow::{catalog, CancellationToken, Flow, FlowError, PromptSource, RunIo, RunSummary};
use flow_console::{ConsoleConfig, DiskFileStore, SystemClock, TerminalPrompt};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod editor;

/// Pequeño menú interactivo para editar y ejecutar un flujo.
///
/// Opciones soportadas:
/// 1) Ver catálogo de tipos de paso
/// 2) Crear flow (reemplaza al actual)
/// 3) Renombrar flow
/// 4) Añadir paso
/// 5) Listar pasos
/// 6) Ejecutar flow
/// 7) Informe (texto)
/// 8) Informe (JSON)
/// 9) Eliminar flow
/// 0) Salir
///
/// El fin de la entrada estándar cierra el programa.
fn main() -> anyhow::Result<()> {
    let config = ConsoleConfig::from_env().context("leyendo la configuración")?;

    tracing_subscriber::registry().with(fmt::layer().compact().with_writer(std::io::stderr))
                                  .with(EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn")))
                                  .init();

    let cancel = CancellationToken::new();
    let mut prompt = TerminalPrompt::stdin(cancel.clone(), config.poll_interval).context("abriendo la terminal")?;
    let files = DiskFileStore::new(&config.base_dir);
    let mut shell = Shell { config, files, cancel, current: None };

    loop {
        prompt.print("\n== Flow runner ==");
        prompt.print(&shell.banner());
        for line in MENU {
            prompt.print(line);
        }
        let choice = match prompt.read_line("Elige una opción: ") {
            Ok(c) => c,
            Err(FlowError::Cancelled) => break,
            Err(e) => return Err(e.into()),
        };
        match shell.handle(choice.trim(), &mut prompt) {
            Ok(Control::Continue) => {}
            Ok(Control::Exit) => break,
            Err(e) if matches!(e.downcast_ref::<FlowError>(), Some(FlowError::Cancelled)) => break,
            Err(e) => prompt.print_error(&format!("Error: {:#}", e)),
        }
    }

    prompt.print("Saliendo...");
    Ok(())
}

const MENU: [&str; 10] = ["1) Ver catálogo de pasos",
                          "2) Crear flow",
                          "3) Renombrar flow",
                          "4) Añadir paso",
                          "5) Listar pasos",
                          "6) Ejecutar flow",
                          "7) Informe (texto)",
                          "8) Informe (JSON)",
                          "9) Eliminar flow",
                          "0) Salir"];

enum Control {
    Continue,
    Exit,
}

struct Shell {
    config: ConsoleConfig,
    files: DiskFileStore,
    cancel: CancellationToken,
    current: Option<Flow>,
}

impl Shell {
    fn banner(&self) -> String {
        match &self.current {
            Some(f) => format!("Flow actual: {} ({}, {} pasos)",
                               f.name().unwrap_or("<sin nombre>"),
                               f.state(),
                               f.steps().len()),
            None => "Sin flow. Usa la opción 2 para crear uno.".to_string(),
        }
    }

    fn flow_mut(&mut self) -> anyhow::Result<&mut Flow> {
        self.current.as_mut().context("no hay flow; crea uno primero")
    }

    fn handle(&mut self, choice: &str, prompt: &mut TerminalPrompt) -> anyhow::Result<Control> {
        match choice {
            "1" => {
                for (i, entry) in catalog().iter().enumerate() {
                    prompt.print(&format!("{:>2}) {:<15} {}", i + 1, entry.kind.label(), entry.description));
                }
            }
            "2" => {
                let name = prompt.read_line("Nombre del flow: ")?;
                let flow = Flow::create(name.trim(), &SystemClock).with_config(self.config.engine_config());
                prompt.print(&creation_line(&flow));
                self.current = Some(flow);
            }
            "3" => {
                let name = prompt.read_line("Nuevo nombre: ")?;
                self.flow_mut()?.rename(name.trim())?;
                prompt.print("Flow renombrado");
            }
            "4" => {
                self.flow_mut()?;
                let kind = editor::parse_kind(&prompt.read_line("Tipo de paso (número o nombre): ")?)?;
                prompt.print(kind.describe());
                let step = editor::build_step(kind, prompt)?;
                let position = self.flow_mut()?.add_step(step)?;
                prompt.print(&format!("Paso {} añadido ({})", position.number(), kind));
            }
            "5" => {
                let flow = self.flow_mut()?;
                if flow.steps().is_empty() {
                    prompt.print("El flow no tiene pasos");
                }
                for (i, step) in flow.steps().iter().enumerate() {
                    prompt.print(&format!("{:>3}. {}", i + 1, step.summary()));
                }
            }
            "6" => {
                let flow = self.current.as_mut().context("no hay flow; crea uno primero")?;
                let summary = {
                    let mut io = RunIo::new(&mut *prompt, &self.files).with_cancel(self.cancel.clone());
                    flow.run(&mut io)?
                };
                print_summary(prompt, &summary);
            }
            "7" => {
                let report = self.flow_mut()?.report();
                prompt.print(&report.to_string());
            }
            "8" => {
                let report = self.flow_mut()?.report();
                prompt.print(&serde_json::to_string_pretty(&report).context("serializando el informe")?);
            }
            "9" => {
                let name = prompt.read_line("Nombre del flow a eliminar: ")?;
                self.flow_mut()?.delete(name.trim())?;
                log::info!("flow eliminado desde el menú");
                prompt.print("Flow eliminado");
            }
            "0" => return Ok(Control::Exit),
            other => prompt.print(&format!("Opción inválida: {}", other)),
        }
        Ok(Control::Continue)
    }
}

fn creation_line(flow: &Flow) -> String {
    format!("Flow '{}' created at: {}",
            flow.name().unwrap_or_default(),
            flow.created_at().format("%a %b %e %H:%M:%S %Y"))
}

fn print_summary(prompt: &mut dyn PromptSource, summary: &RunSummary) {
    prompt.print(&format!("Pasos ejecutados: {}, saltados: {}, con error: {}",
                          summary.executed,
                          summary.skipped,
                          summary.failures.len()));
    for path in &summary.files_written {
        prompt.print(&format!("Fichero escrito: {}", path.display()));
    }
    if let Some(result) = summary.final_result {
        prompt.print(&format!("Final result: {}", result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow::stubs::FixedClock;

    #[test]
    fn creation_line_names_the_flow_and_its_timestamp() {
        let flow = Flow::create("Demo", &FixedClock::epoch());
        assert_eq!(creation_line(&flow), "Flow 'Demo' created at: Mon Jan  1 00:00:00 2024");
    }
}
