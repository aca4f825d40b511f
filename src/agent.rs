use anyhow::Result;
use std::path::PathBuf;

use crate::process::LocalProcessExecuter;

/// Result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code reported by the process
    pub exit_code: i32,
    /// Combined stdout/stderr, one entry per line
    pub lines: Vec<String>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Path services of the machine a command runs on
pub trait FileOperations {
    /// Join `relative` onto `base` using the target machine's separator
    fn combine_path(&self, base: &str, relative: &str) -> String;

    /// Default base directory of an application on the target machine
    fn default_application_base_directory(&self, application_id: &str) -> String;

    fn directory_separator(&self) -> char;
}

/// Runs processes on the machine a command runs on
pub trait ProcessExecuter {
    /// Run `executable` with an already assembled argument string
    fn execute(&self, executable: &str, arguments: &str, working_directory: &str) -> Result<ProcessOutput>;
}

/// A machine that can run a step
pub trait Agent {
    fn file_operations(&self) -> &dyn FileOperations;

    fn process_executer(&self) -> &dyn ProcessExecuter;
}

/// Path services for the current machine
#[derive(Debug, Clone)]
pub struct LocalFileOperations {
    base_directory: PathBuf,
}

impl LocalFileOperations {
    pub fn new(base_directory: PathBuf) -> Self {
        Self { base_directory }
    }
}

impl FileOperations for LocalFileOperations {
    fn combine_path(&self, base: &str, relative: &str) -> String {
        combine_with_separator(base, relative, self.directory_separator())
    }

    fn default_application_base_directory(&self, application_id: &str) -> String {
        let apps = self.base_directory.join("apps");
        self.combine_path(&apps.to_string_lossy(), application_id)
    }

    fn directory_separator(&self) -> char {
        std::path::MAIN_SEPARATOR
    }
}

/// Join two path strings with exactly one `separator` between them
///
/// Both `/` and `\` are treated as separators at the seam so paths typed for
/// either platform combine cleanly.
pub fn combine_with_separator(base: &str, relative: &str, separator: char) -> String {
    let is_sep = |c: char| c == '/' || c == '\\' || c == separator;

    if relative.is_empty() {
        return base.to_string();
    }
    if base.is_empty() {
        return relative.to_string();
    }

    let head = base.trim_end_matches(is_sep);
    let tail = relative.trim_start_matches(is_sep);

    // Keep a bare root such as "/" intact
    if head.is_empty() {
        return format!("{}{}", separator, tail);
    }

    format!("{}{}{}", head, separator, tail)
}

/// The machine rake-step itself runs on
pub struct LocalAgent {
    file_operations: LocalFileOperations,
    process_executer: LocalProcessExecuter,
}

impl LocalAgent {
    /// Create a local agent whose applications live under `base_directory`
    pub fn new(base_directory: PathBuf) -> Self {
        Self {
            file_operations: LocalFileOperations::new(base_directory),
            process_executer: LocalProcessExecuter::new(),
        }
    }
}

impl Agent for LocalAgent {
    fn file_operations(&self) -> &dyn FileOperations {
        &self.file_operations
    }

    fn process_executer(&self) -> &dyn ProcessExecuter {
        &self.process_executer
    }
}
