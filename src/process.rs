use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use portable_pty::{native_pty_system, CommandBuilder, PtyPair, PtySize};
use std::io::{BufRead, BufReader, ErrorKind};
use std::thread;

use crate::agent::{ProcessExecuter, ProcessOutput};

/// Runs processes on the local machine inside a pseudo terminal
///
/// The argument string is handed to the platform shell unchanged, so the
/// double quoting done by the argument builder is honoured exactly as written.
#[derive(Debug, Clone)]
pub struct LocalProcessExecuter {
    size: PtySize,
}

impl LocalProcessExecuter {
    /// Create a new process executer
    pub fn new() -> Self {
        Self {
            size: PtySize {
                rows: 24,
                cols: 200,
                pixel_width: 0,
                pixel_height: 0,
            },
        }
    }

    fn build_command(&self, executable: &str, arguments: &str, working_directory: &str) -> CommandBuilder {
        let command_line = if arguments.is_empty() {
            quote_executable(executable)
        } else {
            format!("{} {}", quote_executable(executable), arguments)
        };

        #[cfg(windows)]
        let mut cmd = {
            let mut cmd = CommandBuilder::new("cmd");
            cmd.args(["/C", command_line.as_str()]);
            cmd
        };

        #[cfg(not(windows))]
        let mut cmd = {
            let mut cmd = CommandBuilder::new("sh");
            cmd.args(["-c", command_line.as_str()]);
            cmd
        };

        cmd.cwd(working_directory);
        cmd
    }
}

impl Default for LocalProcessExecuter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessExecuter for LocalProcessExecuter {
    fn execute(&self, executable: &str, arguments: &str, working_directory: &str) -> Result<ProcessOutput> {
        debug!("Running {} {} in {}", executable, arguments, working_directory);

        let pty_system = native_pty_system();

        let PtyPair { master, slave } = pty_system
            .openpty(self.size)
            .context("Failed to open pty")?;

        let cmd = self.build_command(executable, arguments, working_directory);

        let mut child = slave
            .spawn_command(cmd)
            .with_context(|| format!("Failed to spawn {}", executable))?;

        // The reader only sees end of file once every handle on the slave side is closed
        drop(slave);

        let reader = master
            .try_clone_reader()
            .context("Failed to clone pty reader")?;

        let reader_thread = thread::spawn(move || read_output_lines(BufReader::new(reader)));

        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for {}", executable))?;

        drop(master);

        let lines = reader_thread
            .join()
            .map_err(|_| anyhow!("Output reader for {} panicked", executable))?;

        Ok(ProcessOutput {
            exit_code: status.exit_code() as i32,
            lines,
        })
    }
}

/// Drain `reader` line by line until end of file or a read error
///
/// Lines are decoded lossily so output in a foreign encoding never stops the
/// drain; a child blocked on a full pty would otherwise never exit. Linux
/// reports EIO instead of EOF once the child side closes.
pub fn read_output_lines<R: BufRead>(mut reader: R) -> Vec<String> {
    let mut lines = Vec::new();
    let mut buffer = Vec::new();

    loop {
        buffer.clear();
        match reader.read_until(b'\n', &mut buffer) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buffer);
                let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r').to_string();
                info!("{}", line);
                lines.push(line);
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                debug!("Stopped reading process output: {}", e);
                break;
            }
        }
    }

    lines
}

/// Quote an executable path for the platform shell
///
/// Paths without spaces or shell metacharacters pass through untouched.
pub fn quote_executable(executable: &str) -> String {
    const SHELL_META: &[char] = &[
        ' ', '\t', '\'', '"', '$', '`', '!', '*', '?', '(', ')', '&', ';', '|', '<', '>',
    ];

    if !executable.is_empty() && !executable.contains(SHELL_META) {
        return executable.to_string();
    }

    if cfg!(windows) {
        format!("\"{}\"", executable)
    } else {
        format!("'{}'", executable.replace('\'', "'\\''"))
    }
}
