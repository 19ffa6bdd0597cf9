use anyhow::Result;

use crate::CliTest;

#[test]
fn test_new_key_reported() -> Result<()> {
    let test = CliTest::with_file("app/views/index.html", "<h1>&{'greeting.hello'}</h1>\n")?;

    let output = test.run(test.check_command())?;

    assert_eq!(output.code, 1);
    assert!(output.stdout.contains("\"greeting.hello\""));
    assert!(output.stdout.contains("new-key"));
    assert!(output.stdout.contains("app/views/index.html:1"));
    Ok(())
}

#[test]
fn test_obsolete_key_reported() -> Result<()> {
    let test = CliTest::with_file("app/views/index.html", "<h1>static</h1>\n")?;
    test.write_file("conf/messages.en", "old.banner=Welcome\n")?;

    let mut cmd = test.check_command();
    cmd.args(["--language", "en"]);
    let output = test.run(cmd)?;

    assert_eq!(output.code, 1);
    assert!(output.stdout.contains("\"old.banner\""));
    assert!(output.stdout.contains("obsolete-key"));
    Ok(())
}

#[test]
fn test_kept_key_is_not_obsolete() -> Result<()> {
    let test = CliTest::with_file("app/views/index.html", "<h1>static</h1>\n")?;
    test.write_file("conf/messages.en", "old.banner=Welcome\n")?;
    test.write_file("conf/messages.keep", "old.banner\n")?;

    let mut cmd = test.check_command();
    cmd.args(["--language", "en"]);
    let output = test.run(cmd)?;

    assert_eq!(output.code, 0);
    assert!(!output.stdout.contains("obsolete-key"));
    Ok(())
}

#[test]
fn test_in_sync_project_succeeds() -> Result<()> {
    let test = CliTest::with_file("app/views/index.html", "<h1>&{'app.title'}</h1>\n")?;
    test.write_file("conf/messages.en", "app.title=My App\n")?;

    let mut cmd = test.check_command();
    cmd.args(["--language", "en"]);
    let output = test.run(cmd)?;

    assert_eq!(output.code, 0);
    assert!(output.stdout.contains("catalogs are in sync"));
    Ok(())
}

#[test]
fn test_controller_scope_inherits_application_catalog() -> Result<()> {
    let test = CliTest::with_file("app/views/Admin/list.html", "<h1>&{'shared.title'}</h1>\n")?;
    test.write_file("conf/messages.en", "shared.title=Title\n")?;

    let mut cmd = test.check_command();
    cmd.args(["--language", "en", "--controller", "admin"]);
    let output = test.run(cmd)?;

    assert_eq!(output.code, 0);
    assert!(!output.stdout.contains("new-key"));
    Ok(())
}

#[test]
fn test_malformed_reference_does_not_fail_scan() -> Result<()> {
    let test = CliTest::with_file("app/views/index.html", "&{'unterminated}\n")?;

    let output = test.run(test.check_command())?;

    assert_eq!(output.code, 0);
    assert!(output.stdout.contains("catalogs are in sync"));
    Ok(())
}

#[test]
fn test_config_excluded_paths() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".msgsyncrc.json",
        r#"{ "excludedPaths": ["drafts"] }"#,
    )?;
    test.write_file("app/views/drafts/wip.html", "&{'draft.key'}\n")?;
    test.write_file("app/views/index.html", "<h1>static</h1>\n")?;

    let output = test.run(test.check_command())?;

    assert_eq!(output.code, 0);
    assert!(!output.stdout.contains("draft.key"));
    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.arg("--help");
    let output = test.run(cmd)?;

    assert_eq!(output.code, 0);
    assert!(output.stdout.contains("check"));
    assert!(output.stdout.contains("clean"));
    Ok(())
}
