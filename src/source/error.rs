//! Errors raised while talking to the external status tool.

use thiserror::Error;

/// Failure of a single invocation of the external tool.
///
/// Spawn and exit failures correspond to a failed fetch; `Decode` covers
/// output that is not a valid status document. Callers treat all three the
/// same way.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to execute {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{binary} exited with {}: {stderr}", describe_code(.code))]
    Exit {
        binary: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to decode workspace status: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SourceError {
    /// True when the binary itself could not be found.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SourceError::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
