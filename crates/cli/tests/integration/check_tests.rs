use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn check_valid_project() {
  let env = TestEnv::from_fixture("layered.lua");

  env
    .bp_cmd()
    .arg("check")
    .assert()
    .success()
    .stdout(predicate::str::contains("is valid"))
    .stdout(predicate::str::contains("Items: 5"))
    .stdout(predicate::str::contains("Applications: 2"));
}

#[test]
fn check_verbose_lists_build_order() {
  let env = TestEnv::from_fixture("layered.lua");

  env
    .bp_cmd()
    .args(["check", "-v"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Build order:"))
    .stdout(predicate::str::contains("lib:core"));
}

#[test]
fn check_reports_cycle() {
  let env = TestEnv::from_fixture("cycle.lua");

  env
    .bp_cmd()
    .arg("check")
    .assert()
    .failure()
    .stderr(predicate::str::contains("dependency cycle detected among: lib:a, lib:b"));
}

#[test]
fn check_reports_duplicate_identity() {
  let env = TestEnv::from_fixture("duplicate.lua");

  env
    .bp_cmd()
    .arg("check")
    .assert()
    .failure()
    .stderr(predicate::str::contains("multiple libraries or apps have an identical name"));
}

#[test]
fn check_reports_unknown_dependency() {
  let env = TestEnv::from_source(r#"project.application { name = "tool", deps = { "ghost" } }"#);

  env
    .bp_cmd()
    .arg("check")
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown library 'ghost'"));
}

#[test]
fn check_reports_lua_errors() {
  let env = TestEnv::from_source(r#"project.library { name = "io", dependencies = {} }"#);

  env
    .bp_cmd()
    .arg("check")
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown field 'dependencies'"));
}
