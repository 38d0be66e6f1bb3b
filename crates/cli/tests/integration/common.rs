//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated test environment with its own `blueprint.lua`.
pub struct TestEnv {
  pub temp: TempDir,
  pub project_path: PathBuf,
}

impl TestEnv {
  /// Copy a fixture into a temporary `blueprint.lua`.
  pub fn from_fixture(name: &str) -> Self {
    Self::from_source(&fixture_content(name))
  }

  pub fn from_source(source: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let project_path = temp.path().join("blueprint.lua");
    std::fs::write(&project_path, source).unwrap();
    Self { temp, project_path }
  }

  /// A `bp` command running inside the temp directory.
  ///
  /// Package configuration from the host environment is cleared so tests
  /// only see what they pass explicitly.
  pub fn bp_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("bp");
    cmd.current_dir(self.temp.path());
    cmd.env_remove("BLUEPRINT_INSTALLED");
    cmd.env_remove("BLUEPRINT_QUERY_CMD");
    cmd.env_remove("RUST_LOG");
    cmd
  }

  /// Run a command and return its stdout lines.
  pub fn stdout_lines(cmd: &mut Command) -> Vec<String> {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout)
      .unwrap()
      .lines()
      .map(str::to_string)
      .collect()
  }
}
