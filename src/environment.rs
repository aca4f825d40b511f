use anyhow::{Result, Context, anyhow};
use std::path::{Path, PathBuf};
use std::fs;

use crate::config::{RakeInvocationConfig, Settings, StepOverrides};

/// Represents the rake-step environment of a project
#[derive(Debug, Clone)]
pub struct Environment {
    root_dir: PathBuf,
    step_dir: PathBuf,
    steps_dir: PathBuf,
    config_file: PathBuf,
}

const DEFAULT_CONFIG: &str = r#"# rake-step configuration
default_rake_executable = "rake"
default_step = "default"

# Applications get their base directory under <base_directory>/apps/<id>
# base_directory = "/var/lib/rake-step"
"#;

const DEFAULT_STEP: &str = r#"# Rake step
rake_executable_path = "rake"
# rake_file = "Rakefile"
# working_directory = "~build"
variable_values = []
tasks = ""
"#;

impl Environment {
    /// Create a new environment instance rooted at `root_dir`
    pub fn new(root_dir: PathBuf) -> Self {
        let step_dir = root_dir.join(".rake-step");
        let steps_dir = step_dir.join("steps");
        let config_file = step_dir.join("config.toml");

        Self {
            root_dir,
            step_dir,
            steps_dir,
            config_file,
        }
    }

    /// Initialize a new environment with default settings and a default step
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.steps_dir)
            .context("Failed to create steps directory")?;

        if !self.config_file.exists() {
            fs::write(&self.config_file, DEFAULT_CONFIG)
                .context("Failed to write default config file")?;
        }

        let default_step = self.step_path("default");
        if !default_step.exists() {
            fs::write(&default_step, DEFAULT_STEP)
                .context("Failed to write default step file")?;
        }

        Ok(())
    }

    /// Check if the environment exists
    pub fn exists(&self) -> bool {
        self.step_dir.exists() && self.config_file.exists()
    }

    /// Project root the environment lives in
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Load the global settings, falling back to defaults
    pub fn settings(&self) -> Result<Settings> {
        Settings::load(&self.config_file)
    }

    fn step_path(&self, name: &str) -> PathBuf {
        self.steps_dir.join(format!("{}.toml", name))
    }

    /// Load a step configuration by name
    pub fn load_step(&self, name: &str) -> Result<RakeInvocationConfig> {
        let path = self.step_path(name);

        if !path.exists() {
            return Err(anyhow!("Step '{}' does not exist", name));
        }

        RakeInvocationConfig::load(&path)
    }

    /// Load a step, or the default step when `name` is `None`, and apply
    /// command line overrides
    pub fn resolve_step(
        &self,
        name: Option<&str>,
        overrides: StepOverrides,
        settings: &Settings,
    ) -> Result<RakeInvocationConfig> {
        let name = name.unwrap_or(settings.default_step.as_str());
        let config = self.load_step(name)?;
        Ok(overrides.apply(config, settings))
    }

    /// List all steps
    pub fn list_steps(&self) -> Result<Vec<String>> {
        let mut steps = Vec::new();

        if !self.steps_dir.exists() {
            return Ok(steps);
        }

        for entry in fs::read_dir(&self.steps_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("toml") {
                if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                    steps.push(name.to_string());
                }
            }
        }

        steps.sort();
        Ok(steps)
    }
}
