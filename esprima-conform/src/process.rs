//! Bounded invocation of the parser under test.
//!
//! Output is captured through temporary files rather than pipes so a child
//! that floods stdout can never stall the wait loop.

use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::fixture::is_source_test;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Appended to `.source.js` fixtures so evaluating them prints the real input.
const PRINT_SOURCE: &[u8] = b"print(source);";

/// Result of one parser run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// The process exited on its own. `code` is `None` when it died from a signal.
    Exited {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// The time bound expired and the process was killed.
    TimedOut { elapsed: Duration },
}

impl ProcessOutcome {
    /// Captured stdout; empty for a timed-out run.
    pub fn stdout(&self) -> &str {
        match self {
            ProcessOutcome::Exited { stdout, .. } => stdout,
            ProcessOutcome::TimedOut { .. } => "",
        }
    }
}

/// Errors that keep the parser from being run at all.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to launch {binary}: {source}")]
    Spawn {
        binary: PathBuf,
        source: std::io::Error,
    },
    #[error("failed while waiting for {binary}: {source}")]
    Wait {
        binary: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to prepare input for {path}: {source}")]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// How to run the parser under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserCommand {
    pub binary: PathBuf,
    /// Flags requesting a JSON tree dump, placed before the input path.
    pub args: Vec<String>,
    /// Bound applied to each invocation separately.
    pub timeout: Duration,
}

impl ParserCommand {
    /// Run the parser on a fixture, evaluating `.source.js` wrappers first.
    pub fn run_test(&self, test: &Path) -> Result<ProcessOutcome, ProcessError> {
        if !is_source_test(test) {
            return self.dump_ast(test);
        }

        let evaluated = match self.evaluate_source(test)? {
            Ok(file) => file,
            Err(outcome) => return Ok(outcome),
        };
        self.dump_ast(evaluated.path())
    }

    /// Run the parser with the dump flags on `input`.
    pub fn dump_ast(&self, input: &Path) -> Result<ProcessOutcome, ProcessError> {
        let mut command = Command::new(&self.binary);
        command.args(&self.args).arg(input);
        Ok(self.run_bounded(command)?.decode())
    }

    /// Execute the wrapper and capture the source string it prints.
    ///
    /// Returns the timed-out outcome instead of a file when evaluation
    /// itself ran out of time.
    fn evaluate_source(
        &self,
        test: &Path,
    ) -> Result<Result<NamedTempFile, ProcessOutcome>, ProcessError> {
        let input_err = |source| ProcessError::Input {
            path: test.to_path_buf(),
            source,
        };

        let mut wrapper = fs::read(test).map_err(input_err)?;
        wrapper.push(b'\n');
        wrapper.extend_from_slice(PRINT_SOURCE);
        let mut script = NamedTempFile::new().map_err(input_err)?;
        script.write_all(&wrapper).map_err(input_err)?;
        script.flush().map_err(input_err)?;

        let mut command = Command::new(&self.binary);
        command.arg(script.path());
        let stdout = match self.run_bounded(command)? {
            Captured::Exited { stdout, .. } => stdout,
            timed_out @ Captured::TimedOut { .. } => return Ok(Err(timed_out.decode())),
        };

        // The printed source goes back to the parser byte for byte.
        let mut evaluated = NamedTempFile::new().map_err(input_err)?;
        evaluated.write_all(stdout.trim_ascii()).map_err(input_err)?;
        evaluated.flush().map_err(input_err)?;
        Ok(Ok(evaluated))
    }

    fn run_bounded(&self, mut command: Command) -> Result<Captured, ProcessError> {
        let wait_err = |source| ProcessError::Wait {
            binary: self.binary.clone(),
            source,
        };

        let mut stdout = tempfile::tempfile().map_err(wait_err)?;
        let mut stderr = tempfile::tempfile().map_err(wait_err)?;
        command
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout.try_clone().map_err(wait_err)?))
            .stderr(Stdio::from(stderr.try_clone().map_err(wait_err)?));

        let started = Instant::now();
        let mut child = command.spawn().map_err(|source| ProcessError::Spawn {
            binary: self.binary.clone(),
            source,
        })?;

        let status = loop {
            match child.try_wait().map_err(wait_err)? {
                Some(status) => break status,
                None if started.elapsed() >= self.timeout => {
                    let _ = child.kill();
                    let _ = child.wait();
                    let elapsed = started.elapsed();
                    debug!(binary = %self.binary.display(), ?elapsed, "parser timed out");
                    return Ok(Captured::TimedOut { elapsed });
                }
                None => thread::sleep(POLL_INTERVAL),
            }
        };
        debug!(binary = %self.binary.display(), code = ?status.code(), "process finished");

        Ok(Captured::Exited {
            code: status.code(),
            stdout: read_captured(&mut stdout).map_err(wait_err)?,
            stderr: read_captured(&mut stderr).map_err(wait_err)?,
        })
    }
}

/// Raw bytes of one run, before any decoding.
enum Captured {
    Exited {
        code: Option<i32>,
        stdout: Vec<u8>,
        stderr: Vec<u8>,
    },
    TimedOut {
        elapsed: Duration,
    },
}

impl Captured {
    /// Decode output as text; invalid UTF-8 is replaced.
    fn decode(self) -> ProcessOutcome {
        match self {
            Captured::Exited {
                code,
                stdout,
                stderr,
            } => ProcessOutcome::Exited {
                code,
                stdout: String::from_utf8_lossy(&stdout).into_owned(),
                stderr: String::from_utf8_lossy(&stderr).into_owned(),
            },
            Captured::TimedOut { elapsed } => ProcessOutcome::TimedOut { elapsed },
        }
    }
}

fn read_captured(file: &mut File) -> std::io::Result<Vec<u8>> {
    file.seek(SeekFrom::Start(0))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

#[cfg(all(test, unix))]
mod tests {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    use super::{ParserCommand, ProcessError, ProcessOutcome};

    fn script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-hermes");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
        path
    }

    fn command(binary: PathBuf, timeout: Duration) -> ParserCommand {
        ParserCommand {
            binary,
            args: vec!["-hermes-parser".to_string(), "-dump-ast".to_string()],
            timeout,
        }
    }

    #[test]
    fn captures_output_and_exit_code() {
        let dir = tempfile::tempdir().expect("tempdir");
        let binary = script(dir.path(), r#"printf '%s %s\n' "$1" "$2"; echo oops >&2; exit 3"#);
        let input = dir.path().join("case.js");
        fs::write(&input, "a;").expect("write input");

        let outcome = command(binary, Duration::from_secs(10))
            .run_test(&input)
            .expect("run");
        assert_eq!(
            outcome,
            ProcessOutcome::Exited {
                code: Some(3),
                stdout: "-hermes-parser -dump-ast\n".to_string(),
                stderr: "oops\n".to_string(),
            }
        );
        assert!(matches!(outcome, ProcessOutcome::Exited { code: Some(3), .. }));
    }

    #[test]
    fn slow_parser_times_out() {
        let dir = tempfile::tempdir().expect("tempdir");
        let binary = script(dir.path(), "sleep 5");
        let input = dir.path().join("case.js");
        fs::write(&input, "a;").expect("write input");

        let outcome = command(binary, Duration::from_millis(200))
            .run_test(&input)
            .expect("run");
        assert!(matches!(outcome, ProcessOutcome::TimedOut { .. }));
        assert_eq!(outcome.stdout(), "");
    }

    #[test]
    fn source_tests_are_evaluated_before_parsing() {
        let dir = tempfile::tempdir().expect("tempdir");
        // Evaluation mode (one argument) prints the source with padding;
        // dump mode echoes the evaluated file's contents.
        let binary = script(
            dir.path(),
            r#"if [ "$#" -eq 1 ]; then printf '  x = 1;\n\n'; else cat "$3"; fi"#,
        );
        let input = dir.path().join("case.source.js");
        fs::write(&input, r#"var source = "x = 1;";"#).expect("write input");

        let outcome = command(binary, Duration::from_secs(10))
            .run_test(&input)
            .expect("run");
        assert_eq!(outcome.stdout(), "x = 1;");
        assert!(matches!(outcome, ProcessOutcome::Exited { code: Some(0), .. }));
    }

    #[test]
    fn evaluated_source_keeps_non_utf8_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        // Evaluation prints a lone surrogate encoding; dump mode hex-dumps its input.
        let binary = script(
            dir.path(),
            r#"if [ "$#" -eq 1 ]; then printf 'x="\355\240\200";\n'; else od -An -tx1 "$3" | tr -d ' \n'; fi"#,
        );
        let input = dir.path().join("case.source.js");
        fs::write(&input, r#"var source = "x;";"#).expect("write input");

        let outcome = command(binary, Duration::from_secs(10))
            .run_test(&input)
            .expect("run");
        assert_eq!(outcome.stdout(), "783d22eda080223b");
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("case.js");
        fs::write(&input, "a;").expect("write input");

        let err = command(dir.path().join("no-such-binary"), Duration::from_secs(1))
            .run_test(&input)
            .expect_err("should fail");
        assert!(matches!(err, ProcessError::Spawn { .. }));
    }
}
