//! Error types for snippet execution

use std::path::PathBuf;
use std::time::Duration;

/// Error types for execution operations
///
/// `Display` output is what the user sees after the `Error: ` prefix, so
/// process failures render the captured stderr verbatim.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    /// Compiler or interpreter binary could not be started
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited unsuccessfully
    #[error("{stderr}")]
    Failed { program: String, stderr: String },

    /// Compile plus run exceeded the configured timeout
    #[error("Execution timed out after {0:?}")]
    Timeout(Duration),

    /// Java source without a `public class`
    #[error("Could not find public class name")]
    MissingClassName,

    /// Compiler reported success but left no output file
    #[error("Compilation failed to produce {}", .0.display())]
    MissingArtifact(PathBuf),

    /// Scratch directory or file I/O
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
