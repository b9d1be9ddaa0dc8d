use crate::adapters::web3forms::DEFAULT_ENDPOINT;
use crate::core::{ConfigProvider, Timings};
use crate::utils::error::{FormError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is a valid regex"));

const MAX_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub form: FormConfig,
    pub timing: Option<TimingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub subject: Option<String>,
    pub from_name: Option<String>,
    pub extra_fields: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimingConfig {
    pub reset_delay_ms: Option<u64>,
    pub notification_reveal_ms: Option<u64>,
    pub notification_display_ms: Option<u64>,
    pub notification_fade_ms: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FormError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("form.endpoint", self.endpoint())?;

        let access_key = validation::validate_required_field("form.access_key", &self.form.access_key)?;
        validation::validate_non_empty_string("form.access_key", access_key)?;
        validation::validate_resolved("form.access_key", access_key)?;

        if let Some(timing) = &self.timing {
            for (field, value) in [
                ("timing.reset_delay_ms", timing.reset_delay_ms),
                ("timing.notification_reveal_ms", timing.notification_reveal_ms),
                ("timing.notification_display_ms", timing.notification_display_ms),
                ("timing.notification_fade_ms", timing.notification_fade_ms),
            ] {
                if let Some(value) = value {
                    validation::validate_range(field, value, 0, MAX_DELAY_MS)?;
                }
            }
        }

        if let Some(extra) = &self.form.extra_fields {
            for reserved in ["email", "password", "access_key"] {
                if extra.contains_key(reserved) {
                    return Err(FormError::InvalidConfigValueError {
                        field: "form.extra_fields".to_string(),
                        value: reserved.to_string(),
                        reason: "Field name is reserved by the login form".to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn endpoint(&self) -> &str {
        self.form.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }
}

impl ConfigProvider for TomlConfig {
    fn endpoint(&self) -> &str {
        self.endpoint()
    }

    fn hidden_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        if let Some(key) = &self.form.access_key {
            fields.push(("access_key".to_string(), key.clone()));
        }
        if let Some(subject) = &self.form.subject {
            fields.push(("subject".to_string(), subject.clone()));
        }
        if let Some(from_name) = &self.form.from_name {
            fields.push(("from_name".to_string(), from_name.clone()));
        }
        if let Some(extra) = &self.form.extra_fields {
            fields.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        fields
    }

    fn timings(&self) -> Timings {
        let defaults = Timings::default();
        let timing = self.timing.clone().unwrap_or_default();
        let or_default = |value: Option<u64>, default: Duration| {
            value.map(Duration::from_millis).unwrap_or(default)
        };

        Timings {
            reset_delay: or_default(timing.reset_delay_ms, defaults.reset_delay),
            notification_reveal: or_default(timing.notification_reveal_ms, defaults.notification_reveal),
            notification_display: or_default(
                timing.notification_display_ms,
                defaults.notification_display,
            ),
            notification_fade: or_default(timing.notification_fade_ms, defaults.notification_fade),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
