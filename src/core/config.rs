use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Deployment target of the Qash API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QashEnvironment {
    #[default]
    Production,
    Staging,
    Dev,
}

impl QashEnvironment {
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => "https://api.qash.cloud",
            Self::Staging => "https://api.staging.qash.cloud",
            Self::Dev => "https://api.dev.qash.cloud",
        }
    }

    /// Environment whose base URL is `url`, ignoring a trailing slash
    pub fn from_base_url(url: &str) -> Option<Self> {
        let url = url.trim_end_matches('/');
        [Self::Production, Self::Staging, Self::Dev]
            .into_iter()
            .find(|environment| environment.base_url() == url)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Dev => "dev",
        }
    }
}

impl fmt::Display for QashEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QashEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "dev" | "development" => Ok(Self::Dev),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }
}

impl Serialize for QashEnvironment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for QashEnvironment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone)]
pub struct QashConfig {
    pub api_key: Secret<String>,
    pub environment: QashEnvironment,
}

// Custom Serialize implementation - never expose the key in serialization
impl Serialize for QashConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("QashConfig", 2)?;
        state.serialize_field("api_key", "[REDACTED]")?;
        state.serialize_field("environment", &self.environment)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for QashConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct QashConfigHelper {
            api_key: String,
            #[serde(default)]
            environment: QashEnvironment,
        }

        let helper = QashConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            api_key: Secret::new(helper.api_key),
            environment: helper.environment,
        })
    }
}

impl QashConfig {
    /// Create a production configuration for the given API key
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            environment: QashEnvironment::Production,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{PREFIX}_API_KEY` (e.g., `QASH_API_KEY`)
    /// - `{PREFIX}_ENVIRONMENT` (optional, `production`, `staging` or `dev`)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let api_key_var = format!("{}_API_KEY", prefix.to_uppercase());
        let environment_var = format!("{}_ENVIRONMENT", prefix.to_uppercase());

        let api_key = env::var(&api_key_var)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(api_key_var))?;

        let environment = match env::var(&environment_var) {
            Ok(raw) => raw.parse()?,
            Err(_) => QashEnvironment::default(),
        };

        Ok(Self {
            api_key: Secret::new(api_key),
            environment,
        })
    }

    /// Create configuration from .env file and environment variables
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Create configuration from a specific .env file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        load_first_env_file(&[env_file_path])?;
        Self::from_env(prefix)
    }

    /// Load configuration with automatic .env file detection
    ///
    /// Tries, in order, `.env.local`, `.env.{ENVIRONMENT}` and `.env`, loading
    /// only the first one found.
    #[cfg(feature = "env-file")]
    pub fn from_env_auto(prefix: &str) -> Result<Self, ConfigError> {
        let env_files = [
            ".env.local".to_string(),
            format!(
                ".env.{}",
                env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
            ),
            ".env".to_string(),
        ];

        load_first_env_file(&env_files)?;
        Self::from_env(prefix)
    }

    /// Set the target environment
    #[must_use]
    pub const fn environment(mut self, environment: QashEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Get API key (use carefully - exposes secret)
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    pub fn base_url(&self) -> &'static str {
        self.environment.base_url()
    }
}

/// Load the first of `candidates` that exists into the process environment.
///
/// Missing files are skipped; a file that exists but cannot be parsed is an
/// error. Variables already set in the environment are not overridden.
#[cfg(feature = "env-file")]
fn load_first_env_file<P: AsRef<std::path::Path>>(candidates: &[P]) -> Result<(), ConfigError> {
    for candidate in candidates {
        let path = candidate.as_ref();
        match dotenv::from_path(path) {
            Ok(()) => return Ok(()),
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    path.display(),
                    e
                )));
            }
        }
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Unknown Qash environment: {0}")]
    InvalidEnvironment(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_base_urls() {
        assert_eq!(QashEnvironment::Production.base_url(), "https://api.qash.cloud");
        assert_eq!(
            QashEnvironment::Staging.base_url(),
            "https://api.staging.qash.cloud"
        );
        assert_eq!(QashEnvironment::Dev.base_url(), "https://api.dev.qash.cloud");
        assert_eq!(QashEnvironment::default(), QashEnvironment::Production);
    }

    #[test]
    fn test_environment_from_base_url() {
        assert_eq!(
            QashEnvironment::from_base_url("https://api.staging.qash.cloud/"),
            Some(QashEnvironment::Staging)
        );
        assert_eq!(
            QashEnvironment::from_base_url("https://api.qash.cloud"),
            Some(QashEnvironment::Production)
        );
        assert_eq!(QashEnvironment::from_base_url("http://localhost:8080"), None);
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            "STAGING".parse::<QashEnvironment>().unwrap(),
            QashEnvironment::Staging
        );
        assert_eq!(
            " prod ".parse::<QashEnvironment>().unwrap(),
            QashEnvironment::Production
        );
        assert_eq!(
            "development".parse::<QashEnvironment>().unwrap(),
            QashEnvironment::Dev
        );
        assert!(matches!(
            "moon".parse::<QashEnvironment>(),
            Err(ConfigError::InvalidEnvironment(_))
        ));
    }

    #[test]
    fn test_serialize_redacts_key() {
        let config = QashConfig::new("super-secret".to_string()).environment(QashEnvironment::Dev);
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(json.contains("[REDACTED]"));
        assert!(json.contains("\"dev\""));
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn test_deserialize_defaults_to_production() {
        let config: QashConfig = serde_json::from_str(r#"{"api_key":"k"}"#).unwrap();
        assert_eq!(config.api_key(), "k");
        assert_eq!(config.environment, QashEnvironment::Production);

        let config: QashConfig =
            serde_json::from_str(r#"{"api_key":"k","environment":"staging"}"#).unwrap();
        assert_eq!(config.base_url(), "https://api.staging.qash.cloud");
    }

    #[test]
    fn test_from_env() {
        env::set_var("QASHCFGTEST_API_KEY", "env-key");
        env::set_var("QASHCFGTEST_ENVIRONMENT", "dev");
        let config = QashConfig::from_env("qashcfgtest").unwrap();
        assert_eq!(config.api_key(), "env-key");
        assert_eq!(config.environment, QashEnvironment::Dev);

        let missing = QashConfig::from_env("QASHCFGTEST_MISSING");
        assert!(matches!(
            missing,
            Err(ConfigError::MissingEnvironmentVariable(var)) if var == "QASHCFGTEST_MISSING_API_KEY"
        ));
    }

    #[cfg(feature = "env-file")]
    mod env_file_tests {
        use super::*;
        use std::fs;
        use std::path::PathBuf;

        fn temp_env_file(name: &str, contents: &str) -> PathBuf {
            let file_name = format!("qash-sdk-{}-{}.env", name, std::process::id());
            let path = env::temp_dir().join(file_name);
            fs::write(&path, contents).unwrap();
            path
        }

        #[test]
        fn test_from_env_file_with_path_loads_file() {
            let path = temp_env_file(
                "load",
                "# partner sandbox\nQASHFILETEST_API_KEY=file-key\nQASHFILETEST_ENVIRONMENT=staging\n",
            );

            let config =
                QashConfig::from_env_file_with_path("QASHFILETEST", path.to_str().unwrap()).unwrap();
            assert_eq!(config.api_key(), "file-key");
            assert_eq!(config.environment, QashEnvironment::Staging);

            fs::remove_file(path).unwrap();
        }

        #[test]
        fn test_missing_file_falls_through_to_env() {
            env::set_var("QASHNOFILETEST_API_KEY", "process-key");
            let path = env::temp_dir().join("qash-sdk-definitely-missing.env");

            let config =
                QashConfig::from_env_file_with_path("QASHNOFILETEST", path.to_str().unwrap()).unwrap();
            assert_eq!(config.api_key(), "process-key");
            assert_eq!(config.environment, QashEnvironment::Production);
        }

        #[test]
        fn test_malformed_file_is_invalid_configuration() {
            let path = temp_env_file("malformed", "QASHBADFILETEST_API_KEY key without equals\n");

            let result =
                QashConfig::from_env_file_with_path("QASHBADFILETEST", path.to_str().unwrap());
            assert!(matches!(
                result,
                Err(ConfigError::InvalidConfiguration(message)) if message.contains("qash-sdk-malformed")
            ));

            fs::remove_file(path).unwrap();
        }

        #[test]
        fn test_process_env_wins_over_file() {
            env::set_var("QASHPRIOTEST_API_KEY", "process-key");
            let path = temp_env_file("priority", "QASHPRIOTEST_API_KEY=file-key\n");

            let config =
                QashConfig::from_env_file_with_path("QASHPRIOTEST", path.to_str().unwrap()).unwrap();
            assert_eq!(config.api_key(), "process-key");

            fs::remove_file(path).unwrap();
        }

        #[test]
        fn test_only_first_existing_candidate_is_loaded() {
            let missing = env::temp_dir().join("qash-sdk-missing-local.env");
            let first = temp_env_file("first", "QASHAUTOTEST_FIRST=1\n");
            let second = temp_env_file("second", "QASHAUTOTEST_SECOND=1\n");

            load_first_env_file(&[&missing, &first, &second]).unwrap();
            assert_eq!(env::var("QASHAUTOTEST_FIRST").as_deref(), Ok("1"));
            assert!(env::var("QASHAUTOTEST_SECOND").is_err());

            fs::remove_file(first).unwrap();
            fs::remove_file(second).unwrap();
        }

        #[test]
        fn test_from_env_auto_without_files_reads_env() {
            env::set_var("QASHAUTOENVTEST_API_KEY", "auto-key");
            env::set_var("QASHAUTOENVTEST_ENVIRONMENT", "dev");

            let config = QashConfig::from_env_auto("QASHAUTOENVTEST").unwrap();
            assert_eq!(config.api_key(), "auto-key");
            assert_eq!(config.environment, QashEnvironment::Dev);
        }
    }
}
