// terminal.rs
//
// `PromptSource` sobre la terminal. La lectura de stdin bloquea, así que se
// hace en un hilo auxiliar que envía las líneas por un canal; el prompt
// espera en el canal con un timeout corto y revisa el token de cancelación
// entre intentos. Así un Ctrl-C (u otro hilo) puede desbloquear un prompt
// pendiente.
use crate::errors::ConsoleError;
use flow::{CancellationToken, FlowError, PromptSource};
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

pub struct TerminalPrompt {
  lines: Receiver<io::Result<String>>,
  cancel: CancellationToken,
  poll: Duration,
}

impl TerminalPrompt {
  /// Prompt sobre stdin.
  pub fn stdin(cancel: CancellationToken, poll: Duration) -> Result<Self, ConsoleError> {
    Ok(Self::from_reader(io::BufReader::new(io::stdin()), cancel, poll)?)
  }

  /// Prompt sobre cualquier lector de líneas (útil para pruebas y para
  /// alimentar la consola desde un fichero).
  pub fn from_reader<R>(reader: R, cancel: CancellationToken, poll: Duration) -> io::Result<Self>
    where R: BufRead + Send + 'static
  {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new().name("flow-stdin".into()).spawn(move || {
                                                       for line in reader.lines() {
                                                         if tx.send(line).is_err() {
                                                           break;
                                                         }
                                                       }
                                                     })?;
    Ok(Self { lines: rx, cancel, poll })
  }
}

impl PromptSource for TerminalPrompt {
  fn print(&mut self, text: &str) {
    println!("{}", text);
  }

  fn print_error(&mut self, text: &str) {
    eprintln!("{}", text);
  }

  /// Fin de la entrada (EOF) se trata como cancelación.
  fn read_line(&mut self, prompt: &str) -> flow::Result<String> {
    print!("{}", prompt);
    io::stdout().flush().ok();
    loop {
      if self.cancel.is_cancelled() {
        return Err(FlowError::Cancelled);
      }
      match self.lines.recv_timeout(self.poll) {
        Ok(Ok(line)) => return Ok(line.trim_end_matches('\r').to_string()),
        Ok(Err(e)) => return Err(FlowError::Input(format!("no se pudo leer la entrada: {}", e))),
        Err(RecvTimeoutError::Timeout) => continue,
        Err(RecvTimeoutError::Disconnected) => {
          log::info!("entrada cerrada; cancelando");
          self.cancel.cancel();
          return Err(FlowError::Cancelled);
        }
      }
    }
  }
}
