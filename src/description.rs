use crate::config::RakeInvocationConfig;

/// One line summary of what a step runs
pub fn describe(config: &RakeInvocationConfig) -> String {
    let plural = if config.task_names().count() > 1 { "s" } else { "" };

    let tasks = if config.tasks.is_empty() {
        "default"
    } else {
        config.tasks.as_str()
    };

    let rake_file = config
        .rake_file()
        .map(|file| format!(" using the Rake File: \"{}\"", file))
        .unwrap_or_default();

    format!("Execute the Rake task{} \"{}\"{}", plural, tasks, rake_file)
}

impl std::fmt::Display for RakeInvocationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&describe(self))
    }
}
