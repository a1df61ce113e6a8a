use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

#[allow(dead_code)]
pub fn run_notesmith(args: &[&str]) -> Output {
    TestEnv::new().run(args)
}

pub struct TestEnv {
    home: TempDir,
    config: TempDir,
    data: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temporary HOME dir"),
            config: tempfile::tempdir().expect("create temporary XDG config dir"),
            data: tempfile::tempdir().expect("create temporary XDG data dir"),
        }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_notesmith"))
            .args(args)
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.config.path())
            .env("XDG_DATA_HOME", self.data.path())
            .env_remove("NOTESMITH_OPENAI_API_KEY")
            .env_remove("NOTESMITH_GEMINI_API_KEY")
            .output()
            .expect("failed to execute notesmith binary")
    }

    /// Run with dummy service credentials present in the environment.
    #[allow(dead_code)]
    pub fn run_with_keys(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_notesmith"))
            .args(args)
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.config.path())
            .env("XDG_DATA_HOME", self.data.path())
            .env("NOTESMITH_OPENAI_API_KEY", "sk-test-dummy")
            .env("NOTESMITH_GEMINI_API_KEY", "gk-test-dummy")
            .output()
            .expect("failed to execute notesmith binary")
    }

    #[allow(dead_code)]
    pub fn write_file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.data.path().join(name);
        std::fs::write(&path, contents).expect("write test file");
        path
    }
}
