use anyhow::Result;

use rake_step::config::RakeInvocationConfig;
use rake_step::error::ActionError;
use rake_step::form::{bind_to_form, create_from_form, layout, render, FieldKey, FormFields};

#[test]
fn test_bind_to_form() -> Result<()> {
    let config = RakeInvocationConfig {
        rake_executable_path: "/usr/bin/rake".to_string(),
        rake_file: Some("Rakefile".to_string()),
        working_directory: None,
        variable_values: vec!["A=1".to_string(), "B=2".to_string()],
        tasks: "build test".to_string(),
    };

    let fields = bind_to_form(&config);

    assert_eq!(fields.rake_executable_path, "/usr/bin/rake");
    assert_eq!(fields.rake_file, "Rakefile");
    assert_eq!(fields.working_directory, "");
    assert_eq!(fields.variable_values, "A=1\nB=2");
    assert_eq!(fields.tasks, "build test");

    // Binding back yields the same configuration
    assert_eq!(create_from_form(&fields)?, config);

    Ok(())
}

#[test]
fn test_create_from_form_splits_variables() -> Result<()> {
    let fields = FormFields {
        rake_executable_path: "rake".to_string(),
        variable_values: "A=1\r\n\r\nB=2\n\nC=3\n".to_string(),
        ..FormFields::default()
    };

    let config = create_from_form(&fields)?;

    assert_eq!(config.variable_values, vec!["A=1", "B=2", "C=3"]);
    assert_eq!(config.rake_file, None);
    assert_eq!(config.working_directory, None);
    assert_eq!(config.tasks, "");

    Ok(())
}

#[test]
fn test_create_from_form_requires_executable() -> Result<()> {
    let fields = FormFields {
        tasks: "build".to_string(),
        ..FormFields::default()
    };

    let err = create_from_form(&fields).unwrap_err();

    match err.downcast_ref::<ActionError>() {
        Some(ActionError::Validation(message)) => {
            assert!(message.contains("Rake Executable Path"));
        },
        other => panic!("Expected a validation error, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_layout_groups() -> Result<()> {
    let groups = layout();
    let titles: Vec<&str> = groups.iter().map(|g| g.title).collect();

    assert_eq!(
        titles,
        vec!["Rake Executable Path", "Rake File", "Tasks", "Environment Variables"]
    );

    let executable = &groups[0].fields[0];
    assert_eq!(executable.key, FieldKey::RakeExecutablePath);
    assert!(executable.required);

    let working_dir = &groups[0].fields[1];
    assert_eq!(working_dir.default_text, Some("default"));

    let variables = &groups[3].fields[0];
    assert_eq!(variables.rows, Some(5));
    assert!(groups[3].advanced);

    Ok(())
}

#[test]
fn test_render_shows_values_and_defaults() -> Result<()> {
    let fields = FormFields {
        rake_executable_path: "rake".to_string(),
        tasks: "build".to_string(),
        variable_values: "A=1\nB=2".to_string(),
        ..FormFields::default()
    };

    let rendered = render(&fields);

    assert!(rendered.contains("Rake Executable Path: * rake"));
    assert!(rendered.contains("Working Directory: (default)"));
    assert!(rendered.contains("Tasks: build"));
    assert!(rendered.contains("    A=1\n    B=2\n"));

    Ok(())
}
