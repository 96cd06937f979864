use serde::{Deserialize, Serialize};

/// Parsed `config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote task service settings. When absent, all operations are local.
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
}

/// `[remote]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the task service, e.g. `http://localhost:8080`
    pub base_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_remote_section() {
        let config: Config = toml::from_str(
            r#"[remote]
base_url = "http://localhost:8080"
"#,
        )
        .unwrap();
        assert_eq!(
            config.remote.unwrap().base_url,
            "http://localhost:8080"
        );
    }

    #[test]
    fn parse_empty_config_is_local_mode() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.remote.is_none());
    }
}
