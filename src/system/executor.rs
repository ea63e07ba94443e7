// src/system/executor.rs

use crate::constants::{DEFAULT_COMMAND_TIMEOUT, DEFAULT_MAX_OUTPUT_BYTES};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command '{program}' could not be started: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Command '{program}' timed out after {timeout:?} and was killed.")]
    Timeout { program: String, timeout: Duration },
    #[error("Command '{program}' exceeded the output limit of {limit} bytes and was killed.")]
    OutputOverflow { program: String, limit: usize },
    #[error("I/O failure while running '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// A fully-specified request to run one external program.
///
/// The argument vector is passed to the OS as-is; no shell is ever involved,
/// so caller-supplied values (simulator names, URLs, file paths) cannot be
/// reinterpreted as command syntax.
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    timeout: Duration,
    max_output_bytes: usize,
}

impl ProcessRequest {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            cwd: None,
            timeout: DEFAULT_COMMAND_TIMEOUT,
            max_output_bytes: DEFAULT_MAX_OUTPUT_BYTES,
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_output_limit(mut self, max_output_bytes: usize) -> Self {
        self.max_output_bytes = max_output_bytes;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

/// Captured outcome of a completed process.
///
/// A non-zero exit code is *not* an executor error: the tool ran and reported
/// failure, which is data for the caller. Only spawn failure, timeout and
/// output overflow surface as `ExecutionError`.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    pub stdout: String,
    pub stderr: String,
    pub code: i32,
}

impl ProcessResult {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Runs an external program with a bounded time and output budget.
///
/// Blocks the calling thread until exactly one of four terminal events
/// occurs: normal exit, runtime I/O error, timeout expiry, or output
/// overflow. On timeout or overflow the child is forcibly terminated and
/// reaped before the error is returned; no timer or process handle outlives
/// the call. The executor holds no state across calls.
pub fn execute(request: &ProcessRequest) -> Result<ProcessResult, ExecutionError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ExecutionError::Io {
            program: request.program.clone(),
            source: e,
        })?;
    runtime.block_on(execute_async(request))
}

async fn execute_async(request: &ProcessRequest) -> Result<ProcessResult, ExecutionError> {
    log::debug!(
        "Executing '{}' with args {:?} (timeout: {:?}, output cap: {} bytes)",
        request.program,
        request.args,
        request.timeout,
        request.max_output_bytes
    );

    let mut command = Command::new(&request.program);
    command
        .args(&request.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        // Backstop: if any path below returns early, dropping the handle
        // still kills the child.
        .kill_on_drop(true);
    if let Some(cwd) = &request.cwd {
        command.current_dir(dunce::simplified(cwd));
    }

    let mut child = command.spawn().map_err(|e| ExecutionError::Spawn {
        program: request.program.clone(),
        source: e,
    })?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| io_error(request, std::io::Error::other("stdout pipe not captured")))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| io_error(request, std::io::Error::other("stderr pipe not captured")))?;

    let deadline = tokio::time::sleep(request.timeout);
    tokio::pin!(deadline);

    let mut out_buf: Vec<u8> = Vec::new();
    let mut err_buf: Vec<u8> = Vec::new();
    let mut out_chunk = [0u8; 8192];
    let mut err_chunk = [0u8; 8192];
    let mut out_done = false;
    let mut err_done = false;

    // Exactly one terminal outcome: this single select loop owns all four
    // event sources, and every branch that settles the call returns.
    loop {
        tokio::select! {
            () = &mut deadline => {
                kill_and_reap(&mut child).await;
                return Err(ExecutionError::Timeout {
                    program: request.program.clone(),
                    timeout: request.timeout,
                });
            }
            read = stdout.read(&mut out_chunk), if !out_done => {
                match read {
                    Ok(0) => out_done = true,
                    Ok(n) => {
                        out_buf.extend_from_slice(&out_chunk[..n]);
                        if out_buf.len() > request.max_output_bytes {
                            kill_and_reap(&mut child).await;
                            return Err(ExecutionError::OutputOverflow {
                                program: request.program.clone(),
                                limit: request.max_output_bytes,
                            });
                        }
                    }
                    Err(e) => {
                        kill_and_reap(&mut child).await;
                        return Err(io_error(request, e));
                    }
                }
            }
            read = stderr.read(&mut err_chunk), if !err_done => {
                match read {
                    Ok(0) => err_done = true,
                    Ok(n) => {
                        err_buf.extend_from_slice(&err_chunk[..n]);
                        if err_buf.len() > request.max_output_bytes {
                            kill_and_reap(&mut child).await;
                            return Err(ExecutionError::OutputOverflow {
                                program: request.program.clone(),
                                limit: request.max_output_bytes,
                            });
                        }
                    }
                    Err(e) => {
                        kill_and_reap(&mut child).await;
                        return Err(io_error(request, e));
                    }
                }
            }
            status = child.wait(), if out_done && err_done => {
                let status = match status {
                    Ok(s) => s,
                    Err(e) => {
                        kill_and_reap(&mut child).await;
                        return Err(io_error(request, e));
                    }
                };
                // Killed-by-signal has no code; report -1 as the sentinel.
                let code = status.code().unwrap_or(-1);
                log::debug!("'{}' exited with code {}", request.program, code);
                return Ok(ProcessResult {
                    stdout: String::from_utf8_lossy(&out_buf).trim().to_string(),
                    stderr: String::from_utf8_lossy(&err_buf).trim().to_string(),
                    code,
                });
            }
        }
    }
}

fn io_error(request: &ProcessRequest, source: std::io::Error) -> ExecutionError {
    ExecutionError::Io {
        program: request.program.clone(),
        source,
    }
}

/// Forcibly terminates the child and waits for the OS to release it, so no
/// zombie survives an error return.
async fn kill_and_reap(child: &mut Child) {
    if let Err(e) = child.start_kill() {
        log::debug!("Failed to kill child process: {}", e);
    }
    let _ = child.wait().await;
}

/// Convenience for callers that only need the working directory varied.
pub fn execute_in(
    program: &str,
    args: Vec<String>,
    cwd: Option<&Path>,
) -> Result<ProcessResult, ExecutionError> {
    let mut request = ProcessRequest::new(program, args);
    if let Some(dir) = cwd {
        request = request.with_cwd(dir);
    }
    execute(&request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_captures_stdout_and_reports_zero_exit() {
        let request = ProcessRequest::new("echo", vec!["hello".to_string(), "world".to_string()]);
        let result = execute(&request).unwrap();
        assert_eq!(result.stdout, "hello world");
        assert_eq!(result.code, 0);
        assert!(result.success());
    }

    #[test]
    fn test_non_zero_exit_is_data_not_error() {
        let request = ProcessRequest::new("false", vec![]);
        let result = execute(&request).unwrap();
        assert_ne!(result.code, 0);
        assert!(!result.success());
    }

    #[test]
    fn test_stderr_is_captured_separately() {
        let request = ProcessRequest::new(
            "ls",
            vec!["/definitely-not-a-real-path-xcpilot".to_string()],
        );
        let result = execute(&request).unwrap();
        assert_ne!(result.code, 0);
        assert!(!result.stderr.is_empty());
        assert!(result.stdout.is_empty());
    }

    #[test]
    fn test_missing_program_is_spawn_failure() {
        let request = ProcessRequest::new("xcpilot-no-such-binary", vec![]);
        let err = execute(&request).unwrap_err();
        assert!(matches!(err, ExecutionError::Spawn { .. }));
    }

    #[test]
    fn test_timeout_kills_within_bounded_margin() {
        let request = ProcessRequest::new("sleep", vec!["10".to_string()])
            .with_timeout(Duration::from_millis(50));
        let start = Instant::now();
        let err = execute(&request).unwrap_err();
        let elapsed = start.elapsed();
        assert!(matches!(err, ExecutionError::Timeout { .. }));
        assert!(
            elapsed < Duration::from_millis(500),
            "timeout took {:?}",
            elapsed
        );
    }

    #[test]
    fn test_output_overflow_kills_and_never_resolves() {
        // `yes` emits output forever; the cap must settle the call.
        let request = ProcessRequest::new("yes", vec![]).with_output_limit(4096);
        let err = execute(&request).unwrap_err();
        match err {
            ExecutionError::OutputOverflow { limit, .. } => assert_eq!(limit, 4096),
            other => panic!("expected overflow, got {:?}", other),
        }
    }

    #[test]
    fn test_cwd_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        let request = ProcessRequest::new("pwd", vec![]).with_cwd(dir.path());
        let result = execute(&request).unwrap();
        let reported = dunce::canonicalize(result.stdout).unwrap();
        let expected = dunce::canonicalize(dir.path()).unwrap();
        assert_eq!(reported, expected);
    }
}
