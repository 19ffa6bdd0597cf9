use anyhow::Result;

use crate::CliTest;

#[test]
fn test_set_writes_key_to_catalog() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.args(["set", "greeting.hello", "Hello!", "--language", "en"]);
    let output = test.run(cmd)?;

    assert_eq!(output.code, 0);
    let catalog = test.read_file("conf/messages.en")?;
    assert!(catalog.contains("greeting.hello=Hello!"));
    Ok(())
}

#[test]
fn test_set_updates_existing_key() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("conf/messages.en", "greeting.hello=Old\nother.key=Other\n")?;

    let mut cmd = test.command();
    cmd.args(["set", "greeting.hello", "New", "--language", "en"]);
    test.run(cmd)?;

    let catalog = test.read_file("conf/messages.en")?;
    assert!(catalog.contains("greeting.hello=New"));
    assert!(catalog.contains("other.key=Other"));
    Ok(())
}

#[test]
fn test_set_with_keep_protects_key() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.args(["set", "a.key", "Value", "--language", "en", "--keep"]);
    test.run(cmd)?;

    let list = test.read_file("conf/messages.keep")?;
    assert!(list.contains("a.key"));
    Ok(())
}

#[test]
fn test_set_controller_catalog_layout() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.command();
    cmd.args([
        "set",
        "admin.title",
        "Admin",
        "--language",
        "en",
        "--controller",
        "admin",
    ]);
    let output = test.run(cmd)?;

    assert_eq!(output.code, 0);
    let catalog = test.read_file("conf/Messages/messages.admin.en")?;
    assert!(catalog.contains("admin.title=Admin"));
    Ok(())
}

#[test]
fn test_saved_catalog_is_sorted() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("conf/messages.en", "zebra=Z\napple=A\n")?;

    let mut cmd = test.command();
    cmd.args(["set", "mango", "M", "--language", "en"]);
    test.run(cmd)?;

    let catalog = test.read_file("conf/messages.en")?;
    let keys: Vec<&str> = catalog
        .lines()
        .filter(|l| !l.starts_with('#'))
        .map(|l| l.split('=').next().unwrap())
        .collect();
    assert_eq!(keys, vec!["apple", "mango", "zebra"]);
    Ok(())
}
