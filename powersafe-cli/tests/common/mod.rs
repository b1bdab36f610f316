#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

pub struct TestContext {
    pub cmd: Command,
    pub dir: TempDir,
}

impl TestContext {
    pub fn new_cmd(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_powersafe");
        let mut cmd = Command::new(bin_path);
        cmd.timeout(Duration::from_secs(30));
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Write a scenario file into the context's temp dir.
    pub fn scenario(&self, name: &str, yaml: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, yaml).expect("Failed to write scenario");
        path
    }
}

pub fn powersafe() -> TestContext {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let bin_path: &str = env!("CARGO_BIN_EXE_powersafe");
    let mut cmd = Command::new(bin_path);
    // You can override this with .timeout(Duration::from_secs(N))
    cmd.timeout(Duration::from_secs(30));
    cmd.env_remove("RUST_LOG");

    TestContext { cmd, dir }
}
