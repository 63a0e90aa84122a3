//! Startup configuration for the access layer.
//!
//! Config files: `minab.toml`, `minab.yaml`, or `minab.json`,
//! searched in `./` then `~/.config/minab/`, with `${ENV_VAR}` substitution
//! in all string values and environment-variable overrides (`GQL_HOST`,
//! `API_BASE`, `PLACE_API_URL`, `PLACE_API_KEY`) applied last.
//!
//! Resolution happens once at startup; the resulting [`MinabConfig`] is
//! passed down by value.

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use {
    loader::{apply_env_overrides, config_dir, discover_and_load, load_config},
    schema::MinabConfig,
};
