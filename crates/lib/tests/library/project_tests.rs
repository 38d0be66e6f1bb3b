//! Project files evaluated end to end.

use blueprint_lib::eval::{EvalError, evaluate_project, evaluate_source};
use blueprint_lib::{BuildPlan, InstalledPackages, ItemId, PlanError, RegistryError};
use tempfile::TempDir;

const PROJECT: &str = r#"
local core = project.library { name = "core" }
local io = project.library { name = "io", deps = { core }, packages = { "zlib" } }
project.library { name = "net", deps = { "core" }, packages = { "ssl" } }
project.application { name = "fetch", deps = { io, "net" }, packages = { "cmdliner" } }
project.application { name = "repl", deps = { core } }
"#;

#[test]
fn plan_from_project_file() {
  let temp = TempDir::new().unwrap();
  let path = temp.path().join("blueprint.lua");
  std::fs::write(&path, PROJECT).unwrap();

  let registry = evaluate_project(&path).unwrap();
  assert_eq!(registry.len(), 5);
  assert_eq!(registry.applications().count(), 2);

  let installed = InstalledPackages::new(["zlib", "cmdliner"]);
  let plan = BuildPlan::compute(&registry, &installed).unwrap();

  assert!(plan.is_eligible(&ItemId::library("io")));
  assert!(!plan.is_eligible(&ItemId::library("net")));
  assert!(!plan.is_eligible(&ItemId::application("fetch")));
  assert!(plan.is_eligible(&ItemId::application("repl")));

  let fetch = plan.entry(&ItemId::application("fetch")).unwrap();
  let packages: Vec<_> = fetch.external_closure.iter().map(String::as_str).collect();
  assert_eq!(packages, vec!["cmdliner", "ssl", "zlib"]);
  assert_eq!(fetch.link_order.first(), Some(&ItemId::library("core")));
}

#[test]
fn cyclic_project_fails_at_plan_time() {
  let registry = evaluate_source(
    r#"
      project.library { name = "a", deps = { "b" } }
      project.library { name = "b", deps = { "a" } }
    "#,
    "=cycle",
  )
  .unwrap();

  let err = BuildPlan::compute(&registry, &InstalledPackages::default()).unwrap_err();
  assert!(matches!(err, PlanError::Graph(_)));
  assert!(err.to_string().contains("lib:a, lib:b"), "got: {}", err);
}

#[test]
fn dangling_reference_names_the_missing_item() {
  let registry = evaluate_source(r#"project.application { name = "tool", deps = { "ghost" } }"#, "=dangling").unwrap();

  let err = BuildPlan::compute(&registry, &InstalledPackages::default()).unwrap_err();
  assert_eq!(err.to_string(), "unknown library 'ghost'");
}

#[test]
fn duplicate_names_fail_at_evaluation() {
  let err = evaluate_source(
    r#"
      project.library { name = "core" }
      project.library { name = "core", packages = { "zlib" } }
    "#,
    "=dup",
  )
  .unwrap_err();

  assert!(matches!(
    err,
    EvalError::Registry(RegistryError::DuplicateIdentity { first: 0, second: 1, .. })
  ));
}
