//! The surrounding UI shell, as seen by a workspace session.

use std::io;
use std::path::Path;
use std::sync::Mutex;

/// Notification and document services a session needs from its host.
pub trait ViewHost: Send + Sync {
    fn show_info(&self, message: &str);
    fn show_error(&self, message: &str);
    /// Open `path` in whatever the host uses for documents.
    fn open_document(&self, path: &Path) -> io::Result<()>;
}

/// Host for terminal commands: stdout/stderr and the system opener.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalHost;

impl ViewHost for TerminalHost {
    fn show_info(&self, message: &str) {
        println!("ℹ️  {}", message);
    }

    fn show_error(&self, message: &str) {
        eprintln!("❌ {}", message);
    }

    fn open_document(&self, path: &Path) -> io::Result<()> {
        if !path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ));
        }
        open::that(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostMessage {
    pub severity: Severity,
    pub text: String,
}

/// Host that records what it was asked to show.
///
/// Documents are "opened" by checking they exist and recording the path, so
/// a remote client can open them on its side.
#[derive(Debug, Default)]
pub struct RecordingHost {
    messages: Mutex<Vec<HostMessage>>,
    opened: Mutex<Vec<String>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, severity: Severity, text: &str) {
        lock(&self.messages).push(HostMessage {
            severity,
            text: text.to_string(),
        });
    }

    /// Drain recorded messages.
    pub fn take_messages(&self) -> Vec<HostMessage> {
        std::mem::take(&mut *lock(&self.messages))
    }

    /// Drain recorded document paths.
    pub fn take_opened(&self) -> Vec<String> {
        std::mem::take(&mut *lock(&self.opened))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

impl ViewHost for RecordingHost {
    fn show_info(&self, message: &str) {
        self.push(Severity::Info, message);
    }

    fn show_error(&self, message: &str) {
        self.push(Severity::Error, message);
    }

    fn open_document(&self, path: &Path) -> io::Result<()> {
        if !path.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a file", path.display()),
            ));
        }
        lock(&self.opened).push(path.display().to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_recording_host_messages() {
        let host = RecordingHost::new();
        host.show_info("hello");
        host.show_error("oops");

        let messages = host.take_messages();
        assert_eq!(
            messages,
            vec![
                HostMessage {
                    severity: Severity::Info,
                    text: "hello".to_string()
                },
                HostMessage {
                    severity: Severity::Error,
                    text: "oops".to_string()
                },
            ]
        );
        assert!(host.take_messages().is_empty());
    }

    #[test]
    fn test_recording_host_open_document() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        std::fs::write(&file, "x").unwrap();

        let host = RecordingHost::new();
        host.open_document(&file).unwrap();
        assert!(host.open_document(&temp_dir.path().join("missing")).is_err());
        assert_eq!(host.take_opened(), vec![file.display().to_string()]);
    }

    #[test]
    fn test_terminal_host_rejects_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = TerminalHost
            .open_document(&temp_dir.path().join("nope.rs"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
