use predicates::prelude::*;
use serde_json::Value;

use super::common::TestEnv;

#[test]
fn plan_shows_skipped_items_with_reasons() {
  let env = TestEnv::from_fixture("layered.lua");

  env
    .bp_cmd()
    .args(["plan", "--installed", "zlib"])
    .assert()
    .success()
    .stdout(predicate::str::contains("lib:net (missing ssl)"))
    .stdout(predicate::str::contains("app:fetch (blocked by lib:net)"))
    .stdout(predicate::str::contains("To build: 3"))
    .stdout(predicate::str::contains("Skipped: 2"));
}

#[test]
fn plan_json_is_complete() {
  let env = TestEnv::from_fixture("layered.lua");
  let output = env
    .bp_cmd()
    .args(["plan", "--json", "--installed", "zlib,ssl"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["hash"].as_str().unwrap().len(), 20);

  let plan = &json["plan"];
  assert_eq!(plan["order"].as_array().unwrap().len(), 5);
  assert_eq!(plan["eligible_order"].as_array().unwrap().len(), 5);
  assert_eq!(plan["waves"][0], serde_json::json!(["lib:core"]));

  let fetch = plan["items"]
    .as_array()
    .unwrap()
    .iter()
    .find(|entry| entry["id"] == "app:fetch")
    .unwrap();
  assert_eq!(fetch["external_closure"], serde_json::json!(["ssl", "zlib"]));
  assert_eq!(fetch["eligibility"]["status"], "eligible");
}

#[test]
fn plan_hash_is_stable() {
  let env = TestEnv::from_fixture("layered.lua");
  let run = || {
    let output = env.bp_cmd().args(["plan", "--json"]).output().unwrap();
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    json["hash"].clone()
  };

  assert_eq!(run(), run());
}

#[test]
fn plan_missing_project_fails() {
  let env = TestEnv::from_fixture("layered.lua");

  env
    .bp_cmd()
    .args(["plan", "missing.lua"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("project file not found"));
}
