use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{env_subst::substitute_env, schema::MinabConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["minab.toml", "minab.yaml", "minab.yml", "minab.json"];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<MinabConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations, then apply environment
/// overrides.
///
/// Search order:
/// 1. `./minab.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/minab/minab.{toml,yaml,yml,json}` (user-global)
///
/// Starts from `MinabConfig::default()` if no config file is found. The
/// environment always wins over file values.
pub fn discover_and_load() -> MinabConfig {
    let mut cfg = if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
                MinabConfig::default()
            },
        }
    } else {
        debug!("no config file found, using defaults");
        MinabConfig::default()
    };
    apply_env_overrides(&mut cfg);
    cfg
}

/// Apply environment-variable overrides onto an already-loaded config.
///
/// Recognized variables: `GQL_HOST`, `API_BASE`, `PLACE_API_URL`,
/// `PLACE_API_KEY` — the same names the original deployment used.
/// Empty values are treated as unset.
pub fn apply_env_overrides(cfg: &mut MinabConfig) {
    apply_env_overrides_with(cfg, |name| std::env::var(name).ok());
}

/// Inner implementation with an injected lookup, testable without mutating
/// the process environment.
fn apply_env_overrides_with(cfg: &mut MinabConfig, lookup: impl Fn(&str) -> Option<String>) {
    let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(v) = non_empty("GQL_HOST") {
        cfg.graphql_endpoint = v;
    }
    if let Some(v) = non_empty("API_BASE") {
        cfg.api_base = v;
    }
    if let Some(v) = non_empty("PLACE_API_URL") {
        cfg.place_api_url = Some(v);
    }
    if let Some(v) = non_empty("PLACE_API_KEY") {
        cfg.place_api_key = Some(v);
    }
}

/// Find the first config file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    // Project-local
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    // User-global: ~/.config/minab/
    if let Some(dirs) = directories::ProjectDirs::from("", "", "minab") {
        let config_dir = dirs.config_dir();
        for name in CONFIG_FILENAMES {
            let p = config_dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
    }

    None
}

/// Returns the user-global config directory (`~/.config/minab/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "minab").map(|d| d.config_dir().to_path_buf())
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<MinabConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "minab.toml",
            "graphql_endpoint = \"https://graph.example/v1/graphql\"\napi_base = \"https://api.example\"\n",
        );
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.graphql_endpoint, "https://graph.example/v1/graphql");
        assert_eq!(cfg.api_base, "https://api.example");
    }

    #[test]
    fn loads_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = write_temp(&dir, "minab.yaml", "api_base: https://api.example\n");
        assert_eq!(
            load_config(&yaml).unwrap().api_base,
            "https://api.example"
        );

        let json = write_temp(&dir, "minab.json", r#"{"api_base": "https://api2.example"}"#);
        assert_eq!(
            load_config(&json).unwrap().api_base,
            "https://api2.example"
        );
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "minab.ini", "api_base=x");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn rejects_unknown_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "minab.toml", "graphql_host = \"typo\"\n");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn env_override_wins_over_file_value() {
        let mut cfg = MinabConfig {
            api_base: "https://from-file.example".into(),
            ..MinabConfig::default()
        };
        apply_env_overrides_with(&mut cfg, |name| match name {
            "API_BASE" => Some("https://from-env.example".to_string()),
            _ => None,
        });
        assert_eq!(cfg.api_base, "https://from-env.example");
        // Untouched fields keep their file values.
        assert_eq!(cfg.graphql_endpoint, "http://localhost:8080/v1/graphql");
    }

    #[test]
    fn empty_env_value_is_ignored() {
        let mut cfg = MinabConfig::default();
        apply_env_overrides_with(&mut cfg, |name| match name {
            "GQL_HOST" => Some(String::new()),
            _ => None,
        });
        assert_eq!(cfg.graphql_endpoint, "http://localhost:8080/v1/graphql");
    }

    #[test]
    fn place_api_passthrough() {
        let mut cfg = MinabConfig::default();
        apply_env_overrides_with(&mut cfg, |name| match name {
            "PLACE_API_URL" => Some("https://places.example".to_string()),
            "PLACE_API_KEY" => Some("pk_123".to_string()),
            _ => None,
        });
        assert_eq!(cfg.place_api_url.as_deref(), Some("https://places.example"));
        assert_eq!(cfg.place_api_key.as_deref(), Some("pk_123"));
    }
}
