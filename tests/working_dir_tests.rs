use anyhow::Result;

mod common;

use common::FakeFileOperations;
use rake_step::action::ExecutionContext;
use rake_step::agent::{combine_with_separator, FileOperations, LocalFileOperations};
use rake_step::working_dir::{is_rooted, resolve_working_directory};

fn unix_context() -> ExecutionContext {
    ExecutionContext::new("/builds/src", "app1")
}

#[test]
fn test_empty_working_directory_uses_source_dir() -> Result<()> {
    let ops = FakeFileOperations::unix();
    let context = unix_context();

    assert_eq!(resolve_working_directory(None, &context, &ops), "/builds/src");
    assert_eq!(resolve_working_directory(Some(""), &context, &ops), "/builds/src");

    Ok(())
}

#[test]
fn test_absolute_working_directory_unchanged() -> Result<()> {
    let ops = FakeFileOperations::unix();
    let context = unix_context();

    assert_eq!(resolve_working_directory(Some("/abs/path"), &context, &ops), "/abs/path");
    assert_eq!(resolve_working_directory(Some("C:\\tools"), &context, &ops), "C:\\tools");

    Ok(())
}

#[test]
fn test_tilde_resolves_against_application_base() -> Result<()> {
    let ops = FakeFileOperations::unix();
    let context = unix_context();

    assert_eq!(
        resolve_working_directory(Some("~sub/dir"), &context, &ops),
        "/agent/apps/app1/sub/dir"
    );
    // Leading separators after the tilde are dropped
    assert_eq!(
        resolve_working_directory(Some("~/sub/dir"), &context, &ops),
        "/agent/apps/app1/sub/dir"
    );
    assert_eq!(resolve_working_directory(Some("~"), &context, &ops), "/agent/apps/app1");

    Ok(())
}

#[test]
fn test_relative_resolves_against_source_dir() -> Result<()> {
    let ops = FakeFileOperations::unix();
    let context = unix_context();

    assert_eq!(
        resolve_working_directory(Some("rel/dir"), &context, &ops),
        "/builds/src/rel/dir"
    );

    Ok(())
}

#[test]
fn test_windows_agent_separator() -> Result<()> {
    let ops = FakeFileOperations::windows();
    let context = ExecutionContext::new("C:\\Builds\\src", "app1");

    assert_eq!(
        resolve_working_directory(Some("~\\build"), &context, &ops),
        "C:\\Agent\\Apps\\app1\\build"
    );
    assert_eq!(
        resolve_working_directory(Some("rel"), &context, &ops),
        "C:\\Builds\\src\\rel"
    );
    assert_eq!(
        resolve_working_directory(Some("D:\\other"), &context, &ops),
        "D:\\other"
    );

    Ok(())
}

#[test]
fn test_is_rooted() -> Result<()> {
    assert!(is_rooted("/x"));
    assert!(is_rooted("\\x"));
    assert!(is_rooted("C:\\x"));
    assert!(is_rooted("c:foo"));

    assert!(!is_rooted(""));
    assert!(!is_rooted("rel"));
    assert!(!is_rooted("~x"));
    assert!(!is_rooted("1:x"));

    Ok(())
}

#[test]
fn test_combine_with_separator() -> Result<()> {
    assert_eq!(combine_with_separator("/a/", "/b", '/'), "/a/b");
    assert_eq!(combine_with_separator("/a", "", '/'), "/a");
    assert_eq!(combine_with_separator("", "b", '/'), "b");
    assert_eq!(combine_with_separator("/", "b", '/'), "/b");
    assert_eq!(combine_with_separator("C:\\a\\", "b/c", '\\'), "C:\\a\\b/c");

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_local_file_operations() -> Result<()> {
    let ops = LocalFileOperations::new("/var/lib/rake-step".into());

    assert_eq!(ops.directory_separator(), '/');
    assert_eq!(
        ops.default_application_base_directory("app1"),
        "/var/lib/rake-step/apps/app1"
    );
    assert_eq!(
        resolve_working_directory(Some("~build"), &ExecutionContext::new("/src", "app1"), &ops),
        "/var/lib/rake-step/apps/app1/build"
    );

    Ok(())
}
