/// Length of the truncated hex digest used for [`crate::util::hash::ObjectHash`].
pub const OBJ_HASH_PREFIX_LEN: usize = 20;

/// Upper bound on dependency-chain depth walked by the closure engine and the
/// eligibility evaluator before giving up with a likely-cycle error.
pub const MAX_CLOSURE_DEPTH: usize = 256;

/// Metatable `__type` marker of the reference tables returned by
/// `project.library{}` and `project.application{}`.
pub const ITEM_REF_TYPE: &str = "ItemRef";

/// Project file looked up when no path is given.
pub const DEFAULT_PROJECT_FILE: &str = "blueprint.lua";

/// Comma-separated list of installed packages.
pub const INSTALLED_ENV: &str = "BLUEPRINT_INSTALLED";

/// Command used to query package availability, e.g. `ocamlfind query`.
pub const QUERY_CMD_ENV: &str = "BLUEPRINT_QUERY_CMD";
