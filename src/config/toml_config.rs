use crate::config::{PerService, SeederConfig};
use crate::utils::error::{Result, SeederError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Optional configuration file. Every section and key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub services: ServicesSection,
    pub databases: PerService<Option<String>>,
    pub reset: ResetSection,
    pub generator: GeneratorSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesSection {
    pub auth_api_url: Option<String>,
    pub user_api_url: Option<String>,
    pub http_timeout_seconds: Option<u64>,
    pub external_services: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetSection {
    pub shell: Option<String>,
    #[serde(flatten)]
    pub commands: PerService<Option<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSection {
    pub seed: Option<u64>,
    pub demo_fill: Option<usize>,
}

impl TomlConfig {
    /// Loads and parses a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SeederError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SeederError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SeederError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn apply_to(&self, config: &mut SeederConfig) {
        if let Some(url) = &self.services.auth_api_url {
            config.auth_api_url = url.clone();
        }
        if let Some(url) = &self.services.user_api_url {
            config.user_api_url = url.clone();
        }
        if let Some(secs) = self.services.http_timeout_seconds {
            config.http_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(enabled) = self.services.external_services {
            config.external_services = enabled;
        }

        for target in crate::config::ServiceTarget::ALL {
            if let Some(url) = self.databases.get(target) {
                *config.databases.get_mut(target) = url.clone();
            }
            if let Some(command) = self.reset.commands.get(target) {
                *config.reset_commands.get_mut(target) = command.clone();
            }
        }
        if let Some(shell) = &self.reset.shell {
            config.reset_shell = shell.clone();
        }

        if self.generator.seed.is_some() {
            config.seed = self.generator.seed;
        }
        if let Some(fill) = self.generator.demo_fill {
            config.demo_fill = fill;
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.services.auth_api_url {
            validation::validate_url("services.auth_api_url", url)?;
        }
        if let Some(url) = &self.services.user_api_url {
            validation::validate_url("services.user_api_url", url)?;
        }
        if self.services.http_timeout_seconds == Some(0) {
            return Err(SeederError::InvalidConfigValueError {
                field: "services.http_timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be at least 1 second".to_string(),
            });
        }
        for target in crate::config::ServiceTarget::ALL {
            if let Some(url) = self.databases.get(target) {
                validation::validate_database_url(
                    &format!("databases.{}", target.config_key()),
                    url,
                )?;
            }
        }
        Ok(())
    }
}
