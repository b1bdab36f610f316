use predicates::prelude::*;

mod common;

#[test]
fn test_modes_table() {
    let mut ctx = common::powersafe();
    ctx.cmd
        .arg("modes")
        .assert()
        .success()
        .stdout(predicate::str::contains("MODE"))
        .stdout(predicate::str::contains("UNFORCED"))
        .stdout(predicate::str::contains("lame_duck"))
        .stdout(predicate::str::contains("immediately"));
}

#[test]
fn test_modes_quiet() {
    let mut ctx = common::powersafe();
    ctx.cmd
        .args(["modes", "--quiet"])
        .assert()
        .success()
        .stdout("normal\neager_unmount\nlame_duck\nshutdown\ndisabled\n");
}

#[test]
fn test_unknown_subcommand_fails() {
    let mut ctx = common::powersafe();
    ctx.cmd.arg("format").assert().failure();
}
