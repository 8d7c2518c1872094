//! Per-language compile and run recipes
//!
//! Every run gets its own temporary directory, removed when the run ends.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::errors::ExecutionError;
use super::process::run_checked;
use crate::language::CompiledLanguage;

static JAVA_PUBLIC_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"public\s+class\s+(\w+)").expect("Invalid Java class regex"));

/// Captured result of one successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionOutput {
    pub stdout: String,
    /// Compiled binary or bytecode, for compiled languages
    #[serde(skip)]
    pub artifact: Option<Vec<u8>>,
    pub elapsed: Duration,
}

/// How to execute one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toolchain {
    /// `program <file>.<extension>`
    Interpreter {
        program: String,
        extension: &'static str,
    },
    /// `g++ main.cpp -o main`, then `./main`
    Cpp { compiler: String },
    /// `javac <Class>.java`, then `java <Class>`
    Java { compiler: String, runtime: String },
    /// `go build -o main main.go`, then `./main`
    Go { program: String },
}

impl Toolchain {
    #[must_use]
    pub fn interpreter(program: impl Into<String>, extension: &'static str) -> Self {
        Toolchain::Interpreter {
            program: program.into(),
            extension,
        }
    }

    /// Stock toolchain for a registry entry, if the language has one
    #[must_use]
    pub fn for_language(entry: &CompiledLanguage) -> Option<Self> {
        let extension = entry.extension();
        let toolchain = match entry.language().name() {
            "Python" => Self::interpreter("python3", extension),
            "JavaScript" => Self::interpreter("node", extension),
            "Julia" => Self::interpreter("julia", extension),
            "C++" => Toolchain::Cpp {
                compiler: "g++".into(),
            },
            "Java" => Toolchain::Java {
                compiler: "javac".into(),
                runtime: "java".into(),
            },
            "Go" => Toolchain::Go {
                program: "go".into(),
            },
            _ => return None,
        };
        Some(toolchain)
    }

    /// Write `code` to a scratch directory, build if needed, run
    pub async fn run(&self, code: &str) -> Result<ExecutionOutput, ExecutionError> {
        let start = Instant::now();
        let scratch = tempfile::Builder::new().prefix("codexchange-").tempdir()?;
        let dir = scratch.path();

        let (stdout, artifact) = match self {
            Toolchain::Interpreter { program, extension } => {
                let source = write_source(dir, &format!("main.{extension}"), code).await?;
                (run_checked(program, [&source], dir).await?, None)
            }
            Toolchain::Cpp { compiler } => {
                let source = write_source(dir, "main.cpp", code).await?;
                let binary = dir.join(executable_name("main"));
                run_checked(compiler, [source.as_os_str(), OsStr::new("-o"), binary.as_os_str()], dir)
                    .await?;
                let stdout = run_checked(&binary, std::iter::empty::<&str>(), dir).await?;
                (stdout, Some(read_artifact(&binary).await?))
            }
            Toolchain::Java { compiler, runtime } => {
                let class_name = java_class_name(code).ok_or(ExecutionError::MissingClassName)?;
                let source = write_source(dir, &format!("{class_name}.java"), code).await?;
                run_checked(compiler, [&source], dir).await?;
                let class_file = dir.join(format!("{class_name}.class"));
                let bytecode = read_artifact(&class_file).await?;
                (run_checked(runtime, [class_name], dir).await?, Some(bytecode))
            }
            Toolchain::Go { program } => {
                let source = write_source(dir, "main.go", code).await?;
                let binary = dir.join(executable_name("main"));
                run_checked(
                    program,
                    [OsStr::new("build"), OsStr::new("-o"), binary.as_os_str(), source.as_os_str()],
                    dir,
                )
                .await?;
                let bytes = read_artifact(&binary).await?;
                (run_checked(&binary, std::iter::empty::<&str>(), dir).await?, Some(bytes))
            }
        };

        Ok(ExecutionOutput {
            stdout,
            artifact,
            elapsed: start.elapsed(),
        })
    }
}

/// Name of the `public class` a Java file must be saved as
#[must_use]
pub fn java_class_name(code: &str) -> Option<&str> {
    JAVA_PUBLIC_CLASS
        .captures(code)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn executable_name(stem: &str) -> String {
    if cfg!(windows) {
        format!("{stem}.exe")
    } else {
        stem.to_string()
    }
}

async fn write_source(dir: &Path, file_name: &str, code: &str) -> Result<PathBuf, ExecutionError> {
    let path = dir.join(file_name);
    tokio::fs::write(&path, code).await?;
    Ok(path)
}

async fn read_artifact(path: &Path) -> Result<Vec<u8>, ExecutionError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExecutionError::MissingArtifact(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageRegistry;

    #[test]
    fn test_java_class_name() {
        let code = "import java.util.*;\npublic class Main {\n}";
        assert_eq!(java_class_name(code), Some("Main"));
        assert_eq!(java_class_name("class Hidden {}"), None);
    }

    #[test]
    fn test_stock_toolchains() {
        let registry = LanguageRegistry::builtin();
        let toolchain = |name: &str| {
            let entry = registry.get(registry.resolve(name).unwrap()).unwrap();
            Toolchain::for_language(entry)
        };

        assert_eq!(toolchain("Python"), Some(Toolchain::interpreter("python3", "py")));
        assert_eq!(toolchain("Julia"), Some(Toolchain::interpreter("julia", "jl")));
        for name in ["JavaScript", "C++", "Java", "Go"] {
            assert!(toolchain(name).is_some(), "{name}");
        }
        assert_eq!(toolchain("Ruby"), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_interpreter_runs_in_scratch_dir() {
        let toolchain = Toolchain::interpreter("sh", "sh");
        let output = toolchain.run("echo hello").await.unwrap();
        assert_eq!(output.stdout, "hello\n");
        assert!(output.artifact.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let toolchain = Toolchain::interpreter("definitely-not-a-real-interpreter", "x");
        assert!(matches!(
            toolchain.run("1").await,
            Err(ExecutionError::Spawn { .. })
        ));
    }
}
