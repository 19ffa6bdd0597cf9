use anyhow::Result;

use crate::CliTest;

#[test]
fn test_sources_lists_reference_locations() -> Result<()> {
    let test = CliTest::with_file("app/views/index.html", "line\n&{'app.title'}\n")?;
    test.write_file("app/views/Admin/list.html", "&{'app.title'}\n")?;

    let mut cmd = test.command();
    cmd.args(["sources", "app.title"]);
    let output = test.run(cmd)?;

    assert_eq!(output.code, 0);
    assert!(output.stdout.contains("app/views/index.html:2"));
    assert!(output.stdout.contains("app/views/Admin/list.html:1"));
    Ok(())
}

#[test]
fn test_sources_for_unreferenced_key() -> Result<()> {
    let test = CliTest::with_file("app/views/index.html", "<h1>static</h1>\n")?;

    let mut cmd = test.command();
    cmd.args(["sources", "ghost.key"]);
    let output = test.run(cmd)?;

    assert_eq!(output.code, 0);
    assert!(output.stdout.contains("not referenced anywhere"));
    Ok(())
}
