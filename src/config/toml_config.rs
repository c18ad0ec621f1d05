use crate::adapters::gemini::DEFAULT_ENDPOINT;
use crate::app::session::DEFAULT_AGENDA_WEEKS;
use crate::utils::error::{BabyGidsError, Result};
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_DATA_DIR: &str = ".babygids";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub agenda: AgendaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Used when the stored settings carry no key.
    pub api_key: Option<String>,
    #[serde(default)]
    pub web_search: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgendaConfig {
    #[serde(default = "default_agenda_weeks")]
    pub default_weeks: u32,
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_agenda_weeks() -> u32 {
    DEFAULT_AGENDA_WEEKS
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            web_search: false,
        }
    }
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            default_weeks: default_agenda_weeks(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BabyGidsError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BabyGidsError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid env var pattern")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// Config key first, then `GEMINI_API_KEY`. Unsubstituted `${...}` counts as unset.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.provider
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty() && !key.starts_with("${"))
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("storage.data_dir", &self.storage.data_dir)?;
        validate_url("provider.endpoint", &self.provider.endpoint)?;
        validate_positive_number("agenda.default_weeks", self.agenda.default_weeks, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config.storage.data_dir, ".babygids");
        assert_eq!(config.provider.endpoint, DEFAULT_ENDPOINT);
        assert!(!config.provider.web_search);
        assert_eq!(config.agenda.default_weeks, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[storage]
data_dir = "/tmp/babygids"

[provider]
endpoint = "http://localhost:8080/v1beta"
api_key = "abc"
web_search = true

[agenda]
default_weeks = 6
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.storage.data_dir, "/tmp/babygids");
        assert_eq!(config.provider.endpoint, "http://localhost:8080/v1beta");
        assert_eq!(config.resolved_api_key().as_deref(), Some("abc"));
        assert!(config.provider.web_search);
        assert_eq!(config.agenda.default_weeks, 6);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BABYGIDS_TEST_ENDPOINT", "https://proxy.example.com/v1beta");

        let toml_content = r#"
[provider]
endpoint = "${BABYGIDS_TEST_ENDPOINT}"
api_key = "${BABYGIDS_TEST_UNSET_KEY}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.provider.endpoint, "https://proxy.example.com/v1beta");
        assert_eq!(
            config.provider.api_key.as_deref(),
            Some("${BABYGIDS_TEST_UNSET_KEY}")
        );

        std::env::remove_var("BABYGIDS_TEST_ENDPOINT");
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::from_toml_str(
            r#"
[provider]
endpoint = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str(
            r#"
[agenda]
default_weeks = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml_str("[provider\nendpoint = 1").unwrap_err();
        assert!(matches!(err, BabyGidsError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\ndata_dir = \"./file-test\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.storage.data_dir, "./file-test");
    }
}
