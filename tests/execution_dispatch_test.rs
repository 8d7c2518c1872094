//! Dispatcher messages and toolchain routing

use std::time::{Duration, Instant};

use kodegen_tools_codexchange::execution::{ExecutionDispatcher, Toolchain};

mod common;
use common::init_tracing;
use common::snippets::JS_FUNCTION;

#[tokio::test]
async fn test_empty_code() {
    let report = ExecutionDispatcher::default().run("   \n", "Python").await;
    assert_eq!(report.text, "No code to execute.");
    assert!(report.artifact.is_none());
}

#[tokio::test]
async fn test_wrong_language_is_refused() {
    let report = ExecutionDispatcher::default().run(JS_FUNCTION, "Python").await;
    assert_eq!(
        report.text,
        "⚠️ Error: Cannot execute code.\nCode appears to be JavaScript but Python was selected"
    );
}

#[tokio::test]
async fn test_language_without_toolchain() {
    let dispatcher = ExecutionDispatcher::default();
    assert_eq!(
        dispatcher.run("puts 'hi'", "Ruby").await.text,
        "Execution not implemented for Ruby"
    );
    assert_eq!(
        dispatcher.run("anything", "Cobol").await.text,
        "Execution not implemented for Cobol"
    );
}

#[test]
fn test_stock_toolchains_cover_conversion_languages() {
    let names: Vec<&str> = ExecutionDispatcher::default()
        .supported_languages()
        .into_iter()
        .map(|l| l.name())
        .collect();
    assert_eq!(names, vec!["C++", "Go", "Java", "JavaScript", "Julia", "Python"]);
}

#[cfg(unix)]
mod shell {
    use super::*;

    // PHP's predicate accepts `echo ...`, which lets sh stand in for a real toolchain
    fn sh_dispatcher() -> ExecutionDispatcher {
        ExecutionDispatcher::default().with_toolchain("PHP", Toolchain::interpreter("sh", "sh"))
    }

    #[tokio::test]
    async fn test_successful_run_reports_elapsed_time() {
        init_tracing();
        let report = sh_dispatcher().run("echo hi", "PHP").await;
        assert!(
            report.text.starts_with("hi\n\nExecution completed in "),
            "{}",
            report.text
        );
        assert!(report.text.ends_with(" seconds"));
        assert!(report.artifact.is_none());
    }

    #[tokio::test]
    async fn test_failed_run_reports_stderr() {
        init_tracing();
        let report = sh_dispatcher().run("echo oops >&2; exit 3", "PHP").await;
        assert_eq!(report.text, "Error: oops\n");
    }

    #[tokio::test]
    async fn test_timeout_kills_long_runs() {
        let dispatcher = sh_dispatcher().with_timeout(Duration::from_millis(200));
        let report = dispatcher.run("echo start; sleep 5", "PHP").await;
        assert!(report.text.starts_with("Error: "), "{}", report.text);
        assert!(report.text.contains("timed out"));
    }

    #[tokio::test]
    async fn test_failed_run_without_stderr_names_the_program() {
        init_tracing();
        let report = sh_dispatcher().run("echo quiet >/dev/null; exit 7", "PHP").await;
        assert!(report.text.starts_with("Error: sh exited with "), "{}", report.text);
    }

    #[tokio::test]
    async fn test_missing_interpreter_reports_spawn_failure() {
        init_tracing();
        let dispatcher = ExecutionDispatcher::default().with_toolchain(
            "PHP",
            Toolchain::interpreter("codexchange-no-such-interpreter", "sh"),
        );
        let report = dispatcher.run("echo hi", "PHP").await;
        assert!(
            report
                .text
                .starts_with("Error: Failed to start codexchange-no-such-interpreter: "),
            "{}",
            report.text
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_uses_the_runtime_clock() {
        init_tracing();
        let dispatcher = sh_dispatcher().with_timeout(Duration::from_secs(30));
        let started = Instant::now();
        let report = dispatcher.run("echo start; sleep 60", "PHP").await;

        assert_eq!(report.text, "Error: Execution timed out after 30s");
        // The paused clock jumps straight to the deadline
        assert!(started.elapsed() < Duration::from_secs(20));
    }
}
