//! Common test utilities and helpers
//!
//! Temporary base directories laid out the way composectl expects, and a
//! capture of the log lines written during a test.

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing::subscriber::DefaultGuard;

use composectl::application::StackManager;
use composectl::domain::entities::configuration::Config;
use composectl::infrastructure::filesystem::stack_repository::STACKS_DIR_NAME;
use composectl::infrastructure::logging;
use composectl::infrastructure::process::RecordingExecutor;
use composectl::infrastructure::{ComposeClient, ConfigStore, StackRepository};

/// Temporary base directory with a `stacks/` subdirectory
pub struct BaseDirFixture {
    dir: TempDir,
}

impl BaseDirFixture {
    /// Empty base directory with an empty `stacks/`
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join(STACKS_DIR_NAME)).expect("Failed to create stacks dir");
        Self { dir }
    }

    /// Base directory containing the given stack directories
    pub fn with_stacks(dirs: &[&str]) -> Self {
        let fixture = Self::new();
        for dir in dirs {
            fixture.add_stack(dir);
        }
        fixture
    }

    /// Base directory path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create `stacks/<dir>` and return its path
    pub fn add_stack(&self, dir: &str) -> PathBuf {
        let path = self.path().join(STACKS_DIR_NAME).join(dir);
        fs::create_dir_all(&path).expect("Failed to create stack dir");
        path
    }

    /// Write a file relative to the base directory
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Log file written by the binary
    pub fn log_file(&self) -> PathBuf {
        self.path().join(logging::LOG_FILE_NAME)
    }

    /// Orchestrator wired to a recording executor and the global config on disk
    pub fn manager(&self, executor: &RecordingExecutor, dry_run: bool) -> StackManager {
        let config_store = ConfigStore::new(self.path());
        let config = config_store.load_global().unwrap_or_else(|_| Config::default());
        let compose = Arc::new(ComposeClient::new(
            Arc::new(executor.clone()),
            config,
            dry_run,
        ));
        StackManager::new(
            StackRepository::new(self.path(), compose.clone()),
            compose,
            config_store,
        )
    }
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Captures what would be written to the log file
pub struct LogCapture {
    buffer: SharedBuffer,
    _guard: DefaultGuard,
}

impl LogCapture {
    /// Install a verbose log subscriber for the current thread
    pub fn start() -> Self {
        let buffer = SharedBuffer::default();
        let file = buffer.clone();
        let guard = logging::install(move || file.clone(), std::io::sink, true);
        Self {
            buffer,
            _guard: guard,
        }
    }

    /// Everything logged so far
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.0.lock().unwrap()).into_owned()
    }

    /// Log lines containing `needle`
    pub fn lines_containing(&self, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_string)
            .collect()
    }
}
