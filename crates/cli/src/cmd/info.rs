use blueprint_lib::consts::{DEFAULT_PROJECT_FILE, INSTALLED_ENV, QUERY_CMD_ENV};

use crate::output::print_stat;

pub fn cmd_info() {
  println!("blueprint {}", env!("CARGO_PKG_VERSION"));
  print_stat("Project file", DEFAULT_PROJECT_FILE);
  for var in [INSTALLED_ENV, QUERY_CMD_ENV] {
    let value = std::env::var(var).unwrap_or_else(|_| "(unset)".to_string());
    print_stat(var, &value);
  }
}
