use chrono::{DateTime, Utc};
use flow::{Clock, FileStore, FlowError};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// `FileStore` sobre el sistema de ficheros. Las rutas relativas se
/// resuelven contra `base_dir`. Cada operación abre y cierra su handle.
#[derive(Debug, Clone)]
pub struct DiskFileStore {
  base_dir: PathBuf,
}

impl DiskFileStore {
  pub fn new(base_dir: impl Into<PathBuf>) -> Self {
    Self { base_dir: base_dir.into() }
  }

  /// Ruta efectiva para `path`.
  pub fn resolve(&self, path: &Path) -> PathBuf {
    if path.is_absolute() {
      path.to_path_buf()
    } else {
      self.base_dir.join(path)
    }
  }
}

impl FileStore for DiskFileStore {
  fn read_lines(&self, path: &Path) -> flow::Result<Vec<String>> {
    let full = self.resolve(path);
    let file = File::open(&full).map_err(|e| FlowError::file(&full, e))?;
    let lines = BufReader::new(file).lines()
                                    .collect::<std::io::Result<Vec<String>>>()
                                    .map_err(|e| FlowError::file(&full, e))?;
    log::debug!("leídas {} líneas de {}", lines.len(), full.display());
    Ok(lines)
  }

  fn write(&self, path: &Path, content: &str) -> flow::Result<()> {
    let full = self.resolve(path);
    let mut file = File::create(&full).map_err(|e| FlowError::file(&full, e))?;
    file.write_all(content.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|e| FlowError::file(&full, e))?;
    log::debug!("escritos {} bytes en {}", content.len(), full.display());
    Ok(())
  }
}

/// Reloj del sistema.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}
