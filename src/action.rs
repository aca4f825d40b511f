use anyhow::Result;
use log::{info, warn};

use crate::agent::Agent;
use crate::arguments::build_arguments;
use crate::config::RakeInvocationConfig;
use crate::description::describe;
use crate::error::ActionError;
use crate::working_dir::resolve_working_directory;

/// Where a step runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    /// Directory holding the checked out sources of the build
    pub source_directory: String,
    /// Application the build belongs to
    pub application_id: String,
}

impl ExecutionContext {
    pub fn new(source_directory: impl Into<String>, application_id: impl Into<String>) -> Self {
        Self {
            source_directory: source_directory.into(),
            application_id: application_id.into(),
        }
    }
}

/// Name, summary and category shown when picking an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionProperties {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
}

/// A step that runs on an agent
pub trait Action {
    fn properties(&self) -> ActionProperties;

    /// Run the step and return the exit code of the process it started
    fn execute(&self, context: &ExecutionContext, agent: &dyn Agent) -> Result<i32>;

    /// Handle a command sent from the agent side
    fn process_remote_command(&self, name: &str, _args: &[String]) -> Result<String> {
        Err(ActionError::NotSupported(name.to_string()).into())
    }
}

/// Runs the Rake executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RakeAction {
    config: RakeInvocationConfig,
}

impl RakeAction {
    pub const PROPERTIES: ActionProperties = ActionProperties {
        name: "Execute Rake",
        description: "Runs the Rake executable.",
        category: "Ruby",
    };

    pub fn new(config: RakeInvocationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RakeInvocationConfig {
        &self.config
    }

    /// Arguments passed to the Rake executable
    pub fn arguments(&self) -> String {
        build_arguments(&self.config)
    }

    /// Absolute working directory on the agent
    pub fn absolute_working_directory(&self, context: &ExecutionContext, agent: &dyn Agent) -> String {
        resolve_working_directory(
            self.config.working_directory(),
            context,
            agent.file_operations(),
        )
    }
}

impl Action for RakeAction {
    fn properties(&self) -> ActionProperties {
        Self::PROPERTIES
    }

    fn execute(&self, context: &ExecutionContext, agent: &dyn Agent) -> Result<i32> {
        info!("Executing Rake...");

        let working_directory = self.absolute_working_directory(context, agent);
        let arguments = self.arguments();

        let output = agent.process_executer().execute(
            &self.config.rake_executable_path,
            &arguments,
            &working_directory,
        )?;

        if !output.success() {
            warn!("Rake exited with code {}", output.exit_code);
        }

        info!("Rake execution complete.");
        Ok(output.exit_code)
    }
}

impl std::fmt::Display for RakeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&describe(&self.config))
    }
}
