//! Shell command runner.
//!
//! Runs `<shell> -c <command>` with the selected text on stdin. Each run gets
//! its own thread so invocation never blocks; commands that outlive the
//! timeout are killed.

use parking_lot::Mutex;
use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;
use wait_timeout::ChildExt;

use selected_core::{CapabilityError, CommandConfig};
use selected_plugin_api::CommandRunner;

/// Outcome of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub timed_out: bool,
}

impl CommandOutput {
    /// Whether the command exited with status 0.
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == 0
    }
}

/// Runs commands through a shell with a timeout.
pub struct ShellRunner {
    shell: String,
    timeout: Duration,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl ShellRunner {
    /// Create a runner.
    pub fn new(shell: impl Into<String>, timeout: Duration) -> Self {
        Self {
            shell: shell.into(),
            timeout,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Create a runner from the `[command]` config section.
    pub fn from_config(config: &CommandConfig) -> Self {
        Self::new(&config.shell, Duration::from_millis(config.timeout_ms))
    }

    /// Run a command to completion on the current thread.
    pub fn run_blocking(&self, command: &str, stdin_text: &str) -> Result<CommandOutput, CapabilityError> {
        execute(&self.shell, self.timeout, command, stdin_text)
    }

    /// Wait for every command started with [`CommandRunner::run`].
    pub fn wait_idle(&self) {
        let handles: Vec<_> = self.pending.lock().drain(..).collect();
        for handle in handles {
            if handle.join().is_err() {
                tracing::error!("Command thread panicked");
            }
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, stdin_text: &str) -> Result<(), CapabilityError> {
        let shell = self.shell.clone();
        let timeout = self.timeout;
        let command = command.to_string();
        let stdin_text = stdin_text.to_string();

        let handle = std::thread::Builder::new()
            .name("selected-command".to_string())
            .spawn(move || match execute(&shell, timeout, &command, &stdin_text) {
                Ok(output) if output.success() => {
                    tracing::info!("Command finished: {}", output.stdout.trim_end());
                }
                Ok(output) if output.timed_out => {
                    tracing::warn!("Command timed out after {:?}: {}", timeout, command);
                }
                Ok(output) => {
                    tracing::warn!(
                        "Command exited with {}: {}",
                        output.exit_code,
                        output.stderr.trim_end()
                    );
                }
                Err(e) => tracing::warn!("Command failed: {}", e),
            })?;

        let mut pending = self.pending.lock();
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
        Ok(())
    }
}

fn execute(
    shell: &str,
    timeout: Duration,
    command: &str,
    stdin_text: &str,
) -> Result<CommandOutput, CapabilityError> {
    let mut child = Command::new(shell)
        .args(["-c", command])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // Each pipe gets its own thread; the timeout covers the whole run.
    if let Some(mut stdin) = child.stdin.take() {
        let input = stdin_text.as_bytes().to_vec();
        std::thread::spawn(move || {
            // A command that ignores stdin may close it early
            if let Err(e) = stdin.write_all(&input) {
                tracing::debug!("Command closed stdin: {}", e);
            }
        });
    }
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let status = match child.wait_timeout(timeout)? {
        Some(status) => status,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            // Readers finish on their own once every holder of the pipes exits
            return Ok(CommandOutput {
                stdout: String::new(),
                stderr: format!("Command timed out after {}ms", timeout.as_millis()),
                exit_code: -1,
                timed_out: true,
            });
        }
    };

    Ok(CommandOutput {
        stdout: collect(stdout),
        stderr: collect(stderr),
        exit_code: status.code().unwrap_or(-1),
        timed_out: false,
    })
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<String> {
    std::thread::spawn(move || {
        let mut bytes = Vec::new();
        let _ = pipe.read_to_end(&mut bytes);
        String::from_utf8_lossy(&bytes).into_owned()
    })
}

fn collect(reader: Option<JoinHandle<String>>) -> String {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(timeout_ms: u64) -> ShellRunner {
        ShellRunner::new("sh", Duration::from_millis(timeout_ms))
    }

    #[test]
    fn test_text_goes_to_stdin() {
        let output = runner(5_000).run_blocking("tr a-z A-Z", "hello").unwrap();
        assert!(output.success());
        assert_eq!(output.stdout, "HELLO");
    }

    #[test]
    fn test_exit_code() {
        let output = runner(5_000).run_blocking("echo oops >&2; exit 3", "").unwrap();
        assert!(!output.success());
        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[test]
    fn test_timeout_kills_command() {
        let output = runner(100).run_blocking("sleep 5", "").unwrap();
        assert!(output.timed_out);
        assert!(!output.success());
    }

    #[test]
    fn test_large_stdin_is_fully_delivered() {
        let input = "x".repeat(1 << 20);
        let output = runner(5_000).run_blocking("wc -c", &input).unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.trim(), (1 << 20).to_string());
    }

    #[test]
    fn test_unread_stdin_does_not_defeat_timeout() {
        let input = "x".repeat(1 << 20);
        let started = std::time::Instant::now();
        let output = runner(200).run_blocking("sleep 3", &input).unwrap();
        assert!(output.timed_out);
        assert!(started.elapsed() < Duration::from_secs(2), "{:?}", started.elapsed());
    }

    #[test]
    fn test_large_stdout_is_collected() {
        let output = runner(5_000)
            .run_blocking("head -c 200000 /dev/zero | tr '\\0' y", "")
            .unwrap();
        assert!(output.success(), "{:?}", output.stderr);
        assert_eq!(output.stdout.len(), 200_000);
        assert!(output.stdout.bytes().all(|b| b == b'y'));
    }

    #[test]
    fn test_missing_shell() {
        let runner = ShellRunner::new("/nonexistent/shell", Duration::from_secs(1));
        assert!(matches!(
            runner.run_blocking("true", ""),
            Err(CapabilityError::Io(_))
        ));
    }

    #[test]
    fn test_run_in_background() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.txt");
        let command = format!("cat > '{}'", out.display());

        let runner = runner(5_000);
        runner.run(&command, "from the selection").unwrap();
        runner.wait_idle();

        assert_eq!(std::fs::read_to_string(&out).unwrap(), "from the selection");
    }
}
