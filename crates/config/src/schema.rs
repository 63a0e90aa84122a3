use serde::{Deserialize, Serialize};

/// Endpoints and keys the access layer is wired to at startup.
///
/// Resolved once and passed down; nothing re-reads the environment after
/// startup. The place-API values are forwarded unchanged to location-bearing
/// screens and are not part of the access-layer contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MinabConfig {
    /// Graph backend endpoint (Hasura `/v1/graphql`).
    pub graphql_endpoint: String,
    /// Secondary-service base URL (payments, uploads, bookmark coordination).
    pub api_base: String,
    /// Mapping/geocoding provider endpoint, if configured.
    pub place_api_url: Option<String>,
    /// Mapping/geocoding provider key, if configured.
    pub place_api_key: Option<String>,
}

impl Default for MinabConfig {
    fn default() -> Self {
        Self {
            graphql_endpoint: "http://localhost:8080/v1/graphql".to_string(),
            api_base: "http://localhost:8082".to_string(),
            place_api_url: None,
            place_api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_compose_setup() {
        let cfg = MinabConfig::default();
        assert_eq!(cfg.graphql_endpoint, "http://localhost:8080/v1/graphql");
        assert_eq!(cfg.api_base, "http://localhost:8082");
        assert!(cfg.place_api_url.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let cfg: MinabConfig =
            toml::from_str("graphql_endpoint = \"https://graph.minab.app/v1/graphql\"").unwrap();
        assert_eq!(cfg.graphql_endpoint, "https://graph.minab.app/v1/graphql");
        assert_eq!(cfg.api_base, "http://localhost:8082");
    }
}
