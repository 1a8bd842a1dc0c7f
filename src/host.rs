//! Host shell: file picking, file reading and background loading.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::data::ingest::{ingest, Ingested};
use crate::error::IngestError;

/// Platform services the viewer needs from its host.
pub trait HostShell: Send + Sync {
    /// Ask the user for a CSV file. `None` when cancelled.
    fn open_file_prompt(&self) -> Option<PathBuf>;

    /// Whole file content as text, or `None` when it cannot be read.
    fn read_file(&self, path: &Path) -> Option<String>;
}

/// Native dialogs through `rfd` and plain filesystem reads.
#[derive(Copy, Clone, Debug, Default)]
pub struct NativeHost;

impl HostShell for NativeHost {
    fn open_file_prompt(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Open CSV")
            .add_filter("CSV", &["csv"])
            .add_filter("All files", &["*"])
            .pick_file()
    }

    fn read_file(&self, path: &Path) -> Option<String> {
        match std::fs::read_to_string(path) {
            Ok(s) => Some(s),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read file");
                None
            }
        }
    }
}

/// Result of one background load.
#[derive(Debug)]
pub struct LoadOutcome {
    pub path: PathBuf,
    pub result: Result<Ingested, IngestError>,
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Reads and ingests files on worker threads; the UI thread polls for
/// finished loads.
pub struct FileLoader {
    host: Arc<dyn HostShell>,
    tx: Sender<LoadOutcome>,
    rx: Receiver<LoadOutcome>,
    /// Read by workers when they finish, so a waker set after a load was
    /// started still fires for it.
    waker: Arc<Mutex<Option<Waker>>>,
}

impl FileLoader {
    pub fn new(host: Arc<dyn HostShell>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            host,
            tx,
            rx,
            waker: Arc::new(Mutex::new(None)),
        }
    }

    /// Called after each finished load, typically to request a repaint.
    pub fn set_waker(&mut self, waker: impl Fn() + Send + Sync + 'static) {
        let mut slot = self.waker.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(Arc::new(waker));
    }

    pub fn host(&self) -> &dyn HostShell {
        self.host.as_ref()
    }

    /// Start loading `path` in the background.
    pub fn spawn_load(&self, path: PathBuf) {
        let host = Arc::clone(&self.host);
        let tx = self.tx.clone();
        let waker = Arc::clone(&self.waker);
        tracing::debug!(path = %path.display(), "loading file");
        std::thread::spawn(move || {
            let result = match host.read_file(&path) {
                Some(text) => ingest(&text),
                None => Err(IngestError::unreadable("file could not be read")),
            };
            if tx.send(LoadOutcome { path, result }).is_ok() {
                let wake = waker.lock().unwrap_or_else(|e| e.into_inner()).clone();
                if let Some(wake) = wake {
                    wake();
                }
            }
        });
    }

    /// Loads finished since the last poll, in completion order.
    pub fn poll(&self) -> Vec<LoadOutcome> {
        self.rx.try_iter().collect()
    }

    /// Block until the next load finishes or `timeout` passes.
    pub fn wait(&self, timeout: Duration) -> Option<LoadOutcome> {
        self.rx.recv_timeout(timeout).ok()
    }
}
