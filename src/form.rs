//! Form binding for the step configuration.
//!
//! The editor works on plain text, one string per control, so any front end
//! (a terminal prompt, a web form, a TOML file) can drive it. Environment
//! variables are edited as one multi-line text box, one `VAR=VALUE` per line.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::RakeInvocationConfig;
use crate::error::ActionError;

/// Text of every control on the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub rake_executable_path: String,
    pub working_directory: String,
    pub rake_file: String,
    pub tasks: String,
    pub variable_values: String,
}

/// Which configuration value a control edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    RakeExecutablePath,
    WorkingDirectory,
    RakeFile,
    Tasks,
    VariableValues,
}

impl FieldKey {
    fn value<'a>(&self, fields: &'a FormFields) -> &'a str {
        match self {
            FieldKey::RakeExecutablePath => &fields.rake_executable_path,
            FieldKey::WorkingDirectory => &fields.working_directory,
            FieldKey::RakeFile => &fields.rake_file,
            FieldKey::Tasks => &fields.tasks,
            FieldKey::VariableValues => &fields.variable_values,
        }
    }
}

/// A labelled control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: FieldKey,
    pub label: &'static str,
    pub required: bool,
    /// Shown in place of an empty value
    pub default_text: Option<&'static str>,
    /// Rows of a multi-line control, `None` for single line
    pub rows: Option<u16>,
}

impl FormField {
    fn single_line(key: FieldKey, label: &'static str) -> Self {
        Self {
            key,
            label,
            required: false,
            default_text: None,
            rows: None,
        }
    }
}

/// A titled group of controls with help text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldGroup {
    pub title: &'static str,
    pub description: &'static str,
    /// Rendered after the other groups and collapsed by default
    pub advanced: bool,
    pub fields: Vec<FormField>,
}

/// Layout of the Rake step editor
pub fn layout() -> Vec<FormFieldGroup> {
    vec![
        FormFieldGroup {
            title: "Rake Executable Path",
            description: "The path to the Rake executable.",
            advanced: false,
            fields: vec![
                FormField {
                    required: true,
                    ..FormField::single_line(FieldKey::RakeExecutablePath, "Rake Executable Path:")
                },
                FormField {
                    default_text: Some("default"),
                    ..FormField::single_line(FieldKey::WorkingDirectory, "Working Directory:")
                },
            ],
        },
        FormFieldGroup {
            title: "Rake File",
            description: "The optional Rake File to use, relative to the working directory.",
            advanced: false,
            fields: vec![FormField::single_line(FieldKey::RakeFile, "Rake File:")],
        },
        FormFieldGroup {
            title: "Tasks",
            description: "Enter the tasks to run, separated by spaces.",
            advanced: false,
            fields: vec![FormField::single_line(FieldKey::Tasks, "Tasks:")],
        },
        FormFieldGroup {
            title: "Environment Variables",
            description: "You may optionally specify additional environment variables and values for this execution, separated by newlines. For example:\n  opt1=value1\n  opt2=value2",
            advanced: true,
            fields: vec![FormField {
                rows: Some(5),
                ..FormField::single_line(FieldKey::VariableValues, "Environment Variables:")
            }],
        },
    ]
}

/// Fill the form from an existing configuration
pub fn bind_to_form(config: &RakeInvocationConfig) -> FormFields {
    FormFields {
        rake_executable_path: config.rake_executable_path.clone(),
        working_directory: config.working_directory.clone().unwrap_or_default(),
        rake_file: config.rake_file.clone().unwrap_or_default(),
        tasks: config.tasks.clone(),
        variable_values: config.variable_values.join("\n"),
    }
}

/// Build a configuration from the form
pub fn create_from_form(fields: &FormFields) -> Result<RakeInvocationConfig> {
    for group in layout() {
        for field in group.fields.iter().filter(|f| f.required) {
            if field.key.value(fields).trim().is_empty() {
                return Err(ActionError::Validation(format!(
                    "{} is required",
                    field.label.trim_end_matches(':')
                ))
                .into());
            }
        }
    }

    Ok(RakeInvocationConfig {
        rake_executable_path: fields.rake_executable_path.clone(),
        working_directory: non_empty(&fields.working_directory),
        rake_file: non_empty(&fields.rake_file),
        tasks: fields.tasks.clone(),
        variable_values: fields
            .variable_values
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Plain text rendering of the form with its current values
pub fn render(fields: &FormFields) -> String {
    let mut groups = layout();
    // Advanced groups go last
    groups.sort_by_key(|g| g.advanced);

    let mut out = String::new();
    for group in groups {
        out.push_str(&format!("{}\n", group.title));
        for line in group.description.lines() {
            out.push_str(&format!("  {}\n", line));
        }
        for field in &group.fields {
            let value = field.key.value(fields);
            let marker = if field.required { " *" } else { "" };
            match field.rows {
                Some(_) => {
                    out.push_str(&format!("  {}{}\n", field.label, marker));
                    for line in value.lines() {
                        out.push_str(&format!("    {}\n", line));
                    }
                }
                None => {
                    let shown = if value.is_empty() {
                        field.default_text.map(|d| format!("({})", d)).unwrap_or_default()
                    } else {
                        value.to_string()
                    };
                    out.push_str(&format!("  {}{} {}\n", field.label, marker, shown));
                }
            }
        }
        out.push('\n');
    }
    out
}
