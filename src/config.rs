use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, str::FromStr};

const DEFAULT_CONFIG_FILE_NAME: &str = "commit-gateway.yaml";
const CONFIG_PATH_VAR: &str = "COMMIT_GATEWAY_CONFIG";

const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_BRANCH_NAME: &str = "main";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8787";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Process configuration: defaults, then an optional YAML file, then the
/// environment.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GithubConfig,
    pub repository: RepositoryConfig,
    pub server: ServerConfig,
    pub commit: CommitConfig,
    pub log_level: LogLevel,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub token: String,
    pub api_url: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig {
            token: String::new(),
            api_url: DEFAULT_API_URL.to_owned(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub path: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            owner: String::new(),
            repo: String::new(),
            branch: DEFAULT_BRANCH_NAME.to_owned(),
            path: String::new(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub api_key: String,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_address: DEFAULT_BIND_ADDRESS.to_owned(),
            api_key: String::new(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitConfig {
    /// Total read-then-write rounds allowed when GitHub reports a stale sha.
    pub max_attempts: u32,
}

impl Default for CommitConfig {
    fn default() -> Self {
        CommitConfig {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogLevel(pub String);

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel(DEFAULT_LOG_LEVEL.to_owned())
    }
}

impl LogLevel {
    pub fn filter(&self) -> Result<log::LevelFilter> {
        log::LevelFilter::from_str(&self.0).map_err(|_| anyhow!("Invalid log level: {}", self.0))
    }
}

impl Config {
    pub async fn load() -> Result<Config> {
        let path = match env::var(CONFIG_PATH_VAR) {
            Ok(path) => Some(path),
            Err(_) => tokio::fs::try_exists(DEFAULT_CONFIG_FILE_NAME)
                .await?
                .then(|| DEFAULT_CONFIG_FILE_NAME.to_owned()),
        };

        let mut config = match path {
            Some(path) => Config::from_file(&path).await?,
            None => Config::default(),
        };

        config.apply_overrides(|name| env::var(name).ok())?;
        config.validate()?;

        Ok(config)
    }

    async fn from_file(path: &str) -> Result<Config> {
        let config_string = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Cannot read config file {}", path))?;

        Config::from_yaml(&config_string).with_context(|| format!("Cannot parse {}", path))
    }

    pub fn from_yaml(yaml: &str) -> Result<Config> {
        let config = serde_yaml::from_str::<Config>(yaml)?;

        Ok(config)
    }

    /// Empty values are treated as unset.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        if let Some(token) = var("GH_TOKEN") {
            self.github.token = token;
        }
        if let Some(api_url) = var("GITHUB_API_URL") {
            self.github.api_url = api_url;
        }
        if let Some(owner) = var("REPO_OWNER") {
            self.repository.owner = owner;
        }
        if let Some(repo) = var("REPO_NAME") {
            self.repository.repo = repo;
        }
        if let Some(branch) = var("REPO_BRANCH") {
            self.repository.branch = branch;
        }
        if let Some(path) = var("REPO_PATH") {
            self.repository.path = path;
        }
        if let Some(api_key) = var("API_KEY") {
            self.server.api_key = api_key;
        }
        if let Some(bind_address) = var("BIND_ADDRESS") {
            self.server.bind_address = bind_address;
        }
        if let Some(max_upload_bytes) = var("MAX_UPLOAD_BYTES") {
            self.server.max_upload_bytes = max_upload_bytes
                .parse()
                .context("MAX_UPLOAD_BYTES must be a positive integer")?;
        }
        if let Some(max_attempts) = var("COMMIT_MAX_ATTEMPTS") {
            self.commit.max_attempts = max_attempts
                .parse()
                .context("COMMIT_MAX_ATTEMPTS must be a positive integer")?;
        }
        if let Some(log_level) = var("LOG_LEVEL") {
            self.log_level = LogLevel(log_level);
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("GH_TOKEN", &self.github.token),
            ("GITHUB_API_URL", &self.github.api_url),
            ("REPO_OWNER", &self.repository.owner),
            ("REPO_NAME", &self.repository.repo),
            ("REPO_BRANCH", &self.repository.branch),
            ("REPO_PATH", &self.repository.path),
            // an empty key would let requests without the header through
            ("API_KEY", &self.server.api_key),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                bail!("{} must be set", name);
            }
        }

        if self.commit.max_attempts == 0 {
            bail!("commit.max_attempts must be at least 1");
        }

        if self.server.max_upload_bytes == 0 {
            bail!("server.max_upload_bytes must be at least 1");
        }

        self.log_level.filter()?;

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    pub(crate) fn test_config(api_url: impl Into<String>) -> Config {
        Config {
            github: GithubConfig {
                token: "test_token".to_owned(),
                api_url: api_url.into(),
            },
            repository: RepositoryConfig {
                owner: "octo".to_owned(),
                repo: "data".to_owned(),
                branch: "main".to_owned(),
                path: "data.xlsx".to_owned(),
            },
            server: ServerConfig {
                api_key: "secret".to_owned(),
                ..ServerConfig::default()
            },
            ..Config::default()
        }
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn should_fill_defaults_for_missing_sections() {
        let config = Config::from_yaml("repository:\n  owner: octo\n").unwrap();

        assert_eq!(config.repository.owner, "octo");
        assert_eq!(config.repository.branch, "main");
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.server.bind_address, "0.0.0.0:8787");
        assert_eq!(config.server.max_upload_bytes, 50 * 1024 * 1024);
        assert_eq!(config.commit.max_attempts, 3);
        assert_eq!(config.log_level, LogLevel("info".to_owned()));
    }

    #[test]
    fn should_let_environment_override_file() {
        let mut config = Config::from_yaml(
            "repository:\n  owner: octo\n  repo: data\n  path: old.xlsx\nserver:\n  api_key: from-file\n",
        )
        .unwrap();

        config
            .apply_overrides(lookup(&[
                ("GH_TOKEN", "token"),
                ("REPO_PATH", "reports/new.xlsx"),
                ("API_KEY", "from-env"),
                ("REPO_BRANCH", ""),
                ("COMMIT_MAX_ATTEMPTS", "5"),
            ]))
            .unwrap();

        assert_eq!(config.github.token, "token");
        assert_eq!(config.repository.path, "reports/new.xlsx");
        assert_eq!(config.server.api_key, "from-env");
        assert_eq!(config.repository.branch, "main");
        assert_eq!(config.commit.max_attempts, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_reject_unparseable_numbers() {
        let mut config = Config::default();

        let result = config.apply_overrides(lookup(&[("MAX_UPLOAD_BYTES", "lots")]));

        assert!(result.is_err());
    }

    #[test]
    fn should_require_api_key() {
        let mut config = test_config("https://api.github.com");
        config.server.api_key = String::new();

        let err = config.validate().unwrap_err();

        assert_eq!(err.to_string(), "API_KEY must be set");
    }

    #[test]
    fn should_reject_zero_attempts() {
        let mut config = test_config("https://api.github.com");
        config.commit.max_attempts = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_unknown_log_level() {
        let mut config = test_config("https://api.github.com");
        config.log_level = LogLevel("loud".to_owned());

        assert!(config.validate().is_err());
    }
}
