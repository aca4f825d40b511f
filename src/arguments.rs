//! Command line assembly for a Rake invocation.

use crate::config::RakeInvocationConfig;

/// Flag that keeps Rake from echoing the commands it runs
pub const QUIET_FLAG: &str = "--quiet";

/// Wrap a value in double quotes. Embedded quotes are left alone.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value)
}

/// Ordered argument tokens for `config`
///
/// `--quiet` always comes first, then `--rakefile "<file>"` when a Rakefile is
/// set, then each `VAR=VALUE` string quoted on its own, and finally the task
/// string verbatim. The task string is kept even when empty.
pub fn argument_tokens(config: &RakeInvocationConfig) -> Vec<String> {
    let mut args = Vec::with_capacity(config.variable_values.len() + 3);

    args.push(QUIET_FLAG.to_string());

    if let Some(rake_file) = config.rake_file() {
        args.push(format!("--rakefile {}", quote(rake_file)));
    }

    for variable_value in &config.variable_values {
        args.push(quote(variable_value));
    }

    args.push(config.tasks.clone());

    args
}

/// Argument string handed to the Rake executable
pub fn build_arguments(config: &RakeInvocationConfig) -> String {
    argument_tokens(config).join(" ")
}
