//! Subprocess helpers shared by all toolchains

use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use super::errors::ExecutionError;

/// Run `program args...` in `workdir`, returning stdout on success
///
/// The child is killed if the returned future is dropped, which is how the
/// dispatcher's timeout cancels a runaway snippet.
pub(crate) async fn run_checked<I, S>(
    program: impl AsRef<OsStr>,
    args: I,
    workdir: &Path,
) -> Result<String, ExecutionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();
    let program_name = program.to_string_lossy().into_owned();
    tracing::debug!(program = %program_name, workdir = %workdir.display(), "Spawning process");

    let output = Command::new(program)
        .args(args)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| ExecutionError::Spawn {
            program: program_name.clone(),
            source,
        })?;

    if !output.status.success() {
        let mut stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if stderr.trim().is_empty() {
            stderr = format!("{program_name} exited with {}", output.status);
        }
        tracing::error!(program = %program_name, status = %output.status, "Process failed");
        return Err(ExecutionError::Failed {
            program: program_name,
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
