use log::debug;

use crate::action::ExecutionContext;
use crate::agent::FileOperations;

/// Whether `path` is rooted on either Unix or Windows
///
/// Checked as a string because the path belongs to the agent, which may not
/// share the local platform's conventions.
pub fn is_rooted(path: &str) -> bool {
    let bytes = path.as_bytes();
    match bytes.first() {
        Some(b'/') | Some(b'\\') => true,
        Some(drive) if drive.is_ascii_alphabetic() => bytes.get(1) == Some(&b':'),
        _ => false,
    }
}

/// Resolve the working directory of a step to an absolute path
///
/// Rules, first match wins:
/// - empty or absent: the source directory
/// - rooted: unchanged
/// - `~` prefix: relative to the application's default base directory
/// - anything else: relative to the source directory
pub fn resolve_working_directory(
    working_directory: Option<&str>,
    context: &ExecutionContext,
    file_operations: &dyn FileOperations,
) -> String {
    let working_directory = match working_directory {
        Some(dir) if !dir.is_empty() => dir,
        _ => {
            debug!("No working directory set, using source directory");
            return context.source_directory.clone();
        }
    };

    if is_rooted(working_directory) {
        return working_directory.to_string();
    }

    if let Some(app_relative) = working_directory.strip_prefix('~') {
        let separator = file_operations.directory_separator();
        let app_relative = app_relative.trim_start_matches(separator);
        let base = file_operations.default_application_base_directory(&context.application_id);
        debug!("Resolving '{}' against application base {}", app_relative, base);
        return file_operations.combine_path(&base, app_relative);
    }

    file_operations.combine_path(&context.source_directory, working_directory)
}
