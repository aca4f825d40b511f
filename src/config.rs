use anyhow::{Result, Context};
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};
use std::fs;

/// Global configuration for rake-step
#[derive(Debug, Serialize, Deserialize)]
pub struct Settings {
    /// Rake executable used when a step leaves the path out or empty
    #[serde(default = "default_rake_executable")]
    pub default_rake_executable: String,

    /// Root under which each application gets its default base directory
    #[serde(default)]
    pub base_directory: Option<PathBuf>,

    /// Step to use when none is given on the command line
    #[serde(default = "default_step")]
    pub default_step: String,
}

fn default_rake_executable() -> String {
    "rake".to_string()
}

fn default_step() -> String {
    "default".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_rake_executable: default_rake_executable(),
            base_directory: None,
            default_step: default_step(),
        }
    }
}

impl Settings {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .context("Failed to read config file")?;

        let settings: Settings = toml::from_str(&content)
            .context("Failed to parse config file")?;

        Ok(settings)
    }

    /// Root of the application base directories
    ///
    /// Falls back to `~/.rake-step` when no base directory is configured, and
    /// to a relative `.rake-step` when the home directory cannot be found.
    pub fn base_directory(&self) -> PathBuf {
        match &self.base_directory {
            Some(dir) => dir.clone(),
            None => dirs::home_dir()
                .map(|home| home.join(".rake-step"))
                .unwrap_or_else(|| PathBuf::from(".rake-step")),
        }
    }
}

/// Configuration of a single Rake invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RakeInvocationConfig {
    /// Path to the Rake executable
    #[serde(default)]
    pub rake_executable_path: String,

    /// Optional Rakefile, relative to the working directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rake_file: Option<String>,

    /// Working directory of the executable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,

    /// Environment variables in the form `VAR=VALUE`
    #[serde(default)]
    pub variable_values: Vec<String>,

    /// Space separated Rake tasks; empty runs the default task
    #[serde(default)]
    pub tasks: String,
}

impl RakeInvocationConfig {
    /// Create a configuration that runs the default task of `rake_executable_path`
    pub fn new(rake_executable_path: impl Into<String>) -> Self {
        Self {
            rake_executable_path: rake_executable_path.into(),
            ..Self::default()
        }
    }

    /// Load a step configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read step file {}", path.display()))?;

        let config: RakeInvocationConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse step file {}", path.display()))?;

        Ok(config)
    }

    /// Rakefile, if one is set and non-empty
    pub fn rake_file(&self) -> Option<&str> {
        self.rake_file.as_deref().filter(|f| !f.is_empty())
    }

    /// Working directory, if one is set and non-empty
    pub fn working_directory(&self) -> Option<&str> {
        self.working_directory.as_deref().filter(|d| !d.is_empty())
    }

    /// Individual task names
    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.split(' ').filter(|t| !t.is_empty())
    }
}

/// Values given on the command line that take precedence over a step file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOverrides {
    pub rake_executable_path: Option<String>,
    pub rake_file: Option<String>,
    pub working_directory: Option<String>,
    /// Appended after the step's own variables
    pub variable_values: Vec<String>,
    pub tasks: Option<String>,
}

impl StepOverrides {
    /// Merge the overrides into `config`, then fill an empty executable
    /// path from `settings`
    pub fn apply(self, mut config: RakeInvocationConfig, settings: &Settings) -> RakeInvocationConfig {
        if let Some(exe) = self.rake_executable_path {
            config.rake_executable_path = exe;
        }
        if config.rake_executable_path.is_empty() {
            config.rake_executable_path = settings.default_rake_executable.clone();
        }
        if let Some(rake_file) = self.rake_file {
            config.rake_file = Some(rake_file);
        }
        if let Some(working_directory) = self.working_directory {
            config.working_directory = Some(working_directory);
        }
        config.variable_values.extend(self.variable_values);
        if let Some(tasks) = self.tasks {
            config.tasks = tasks;
        }

        config
    }
}
