use super::common::TestEnv;

fn position(lines: &[String], id: &str) -> usize {
  lines
    .iter()
    .position(|line| line == id)
    .unwrap_or_else(|| panic!("{} missing from {:?}", id, lines))
}

#[test]
fn order_is_dependency_first() {
  let env = TestEnv::from_fixture("layered.lua");
  let lines = TestEnv::stdout_lines(env.bp_cmd().arg("order"));

  assert_eq!(lines.len(), 5);
  assert!(position(&lines, "lib:core") < position(&lines, "lib:io"));
  assert!(position(&lines, "lib:core") < position(&lines, "lib:net"));
  assert!(position(&lines, "lib:io") < position(&lines, "app:fetch"));
  assert!(position(&lines, "lib:net") < position(&lines, "app:fetch"));
  assert!(position(&lines, "lib:core") < position(&lines, "app:repl"));
}

#[test]
fn eligible_order_drops_blocked_items() {
  let env = TestEnv::from_fixture("layered.lua");
  let lines = TestEnv::stdout_lines(env.bp_cmd().args(["order", "--eligible", "--installed", "zlib"]));

  assert!(lines.contains(&"lib:io".to_string()));
  assert!(!lines.contains(&"lib:net".to_string()));
  assert!(!lines.contains(&"app:fetch".to_string()));
  assert!(lines.contains(&"app:repl".to_string()));
}

#[test]
fn installed_packages_from_environment() {
  let env = TestEnv::from_fixture("layered.lua");
  let lines = TestEnv::stdout_lines(
    env
      .bp_cmd()
      .args(["order", "--eligible"])
      .env("BLUEPRINT_INSTALLED", "zlib,ssl"),
  );

  assert_eq!(lines.len(), 5);
}

#[cfg(unix)]
#[test]
fn installed_packages_from_query_command() {
  let env = TestEnv::from_fixture("layered.lua");
  // `true zlib` and `true ssl` both exit 0.
  let lines = TestEnv::stdout_lines(env.bp_cmd().args(["order", "--eligible", "--query-cmd", "true"]));

  assert_eq!(lines.len(), 5);
}
