#![allow(dead_code)]

use anyhow::{anyhow, Result};
use std::cell::RefCell;

use rake_step::agent::{combine_with_separator, Agent, FileOperations, ProcessExecuter, ProcessOutput};

/// Path services of a pretend agent with a fixed application root
pub struct FakeFileOperations {
    pub apps_root: String,
    pub separator: char,
}

impl FakeFileOperations {
    pub fn unix() -> Self {
        Self {
            apps_root: "/agent/apps".to_string(),
            separator: '/',
        }
    }

    pub fn windows() -> Self {
        Self {
            apps_root: "C:\\Agent\\Apps".to_string(),
            separator: '\\',
        }
    }
}

impl FileOperations for FakeFileOperations {
    fn combine_path(&self, base: &str, relative: &str) -> String {
        combine_with_separator(base, relative, self.separator)
    }

    fn default_application_base_directory(&self, application_id: &str) -> String {
        self.combine_path(&self.apps_root, application_id)
    }

    fn directory_separator(&self) -> char {
        self.separator
    }
}

/// Invocation seen by the recording executer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub executable: String,
    pub arguments: String,
    pub working_directory: String,
}

/// Records every invocation instead of running it
pub struct RecordingExecuter {
    pub invocations: RefCell<Vec<Invocation>>,
    pub exit_code: i32,
    pub fail: bool,
}

impl ProcessExecuter for RecordingExecuter {
    fn execute(&self, executable: &str, arguments: &str, working_directory: &str) -> Result<ProcessOutput> {
        if self.fail {
            return Err(anyhow!("executable not found: {}", executable));
        }

        self.invocations.borrow_mut().push(Invocation {
            executable: executable.to_string(),
            arguments: arguments.to_string(),
            working_directory: working_directory.to_string(),
        });

        Ok(ProcessOutput {
            exit_code: self.exit_code,
            lines: vec!["rake output".to_string()],
        })
    }
}

pub struct RecordingAgent {
    pub file_operations: FakeFileOperations,
    pub executer: RecordingExecuter,
}

impl RecordingAgent {
    pub fn new(exit_code: i32) -> Self {
        Self {
            file_operations: FakeFileOperations::unix(),
            executer: RecordingExecuter {
                invocations: RefCell::new(Vec::new()),
                exit_code,
                fail: false,
            },
        }
    }

    pub fn failing() -> Self {
        let mut agent = Self::new(0);
        agent.executer.fail = true;
        agent
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.executer.invocations.borrow().clone()
    }
}

impl Agent for RecordingAgent {
    fn file_operations(&self) -> &dyn FileOperations {
        &self.file_operations
    }

    fn process_executer(&self) -> &dyn ProcessExecuter {
        &self.executer
    }
}
