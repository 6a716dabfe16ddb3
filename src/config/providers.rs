use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// 服务类型
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Llm,
}

/// 服务配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub base_url: String,
    pub model: String,
    #[serde(flatten)]
    pub extra: HashMap<String, toml::Value>,
}

/// Provider 配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub name: String,
    pub api_key: String,
    #[serde(flatten)]
    pub services: HashMap<String, ServiceConfig>,
}

/// 所有 Provider 配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProvidersConfig {
    #[serde(flatten)]
    providers: HashMap<String, ProviderConfig>,
}

impl ProvidersConfig {
    /// 加载 providers.toml
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Providers configuration not found at: {}\nRun `fanout init` to create a template",
                config_path.display()
            );
        }

        let content = std::fs::read_to_string(&config_path).with_context(|| {
            format!("Failed to read providers config: {}", config_path.display())
        })?;

        let config: Self = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse providers config: {}",
                config_path.display()
            )
        })?;

        tracing::debug!("Loaded providers config from: {}", config_path.display());
        tracing::debug!(
            "Available providers: {:?}",
            config.providers.keys().collect::<Vec<_>>()
        );

        Ok(config)
    }

    /// 获取配置文件路径
    pub fn get_config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home.join(".fanout").join("providers.toml"))
    }

    /// 获取服务配置（如 "gemini.llm"）
    pub fn get_service(&self, reference: &str) -> Result<ResolvedService> {
        let parts: Vec<&str> = reference.split('.').collect();

        if parts.len() != 2 {
            anyhow::bail!(
                "Invalid service reference: '{}'. Expected format: 'provider.service' (e.g., 'gemini.llm')",
                reference
            );
        }

        let provider_name = parts[0];
        let service_name = parts[1];

        let provider = self
            .providers
            .get(provider_name)
            .with_context(|| format!("Provider '{}' not found in providers.toml", provider_name))?;

        let service = provider.services.get(service_name).with_context(|| {
            format!(
                "Service '{}' not found in provider '{}'",
                service_name, provider_name
            )
        })?;

        Ok(ResolvedService {
            api_key: provider.api_key.clone(),
            base_url: service.base_url.clone(),
            model: service.model.clone(),
            extra: service.extra.clone(),
        })
    }
}

/// 解析后的服务配置
#[derive(Debug, Clone)]
pub struct ResolvedService {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub extra: HashMap<String, toml::Value>,
}

impl ResolvedService {
    /// 获取整数类型的额外参数
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.extra.get(key).and_then(|v| v.as_integer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_providers_config() {
        let toml_str = r#"
[gemini]
name = "Google Gemini"
api_key = "sk-test"

  [gemini.llm]
  type = "llm"
  base_url = "https://generativelanguage.googleapis.com/v1beta/openai"
  model = "gemini-2.5-pro"
  timeout_secs = 90

[openai]
name = "OpenAI"
api_key = "sk-other"

  [openai.llm]
  type = "llm"
  base_url = "https://api.openai.com/v1"
  model = "gpt-4o"
        "#;

        let config: ProvidersConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.providers.len(), 2);
        assert!(config.providers.contains_key("gemini"));
        assert!(config.providers.contains_key("openai"));

        let resolved = config.get_service("gemini.llm").unwrap();
        assert_eq!(resolved.api_key, "sk-test");
        assert_eq!(resolved.model, "gemini-2.5-pro");
        assert_eq!(resolved.get_int("timeout_secs"), Some(90));
    }

    #[test]
    fn test_invalid_service_reference() {
        let toml_str = r#"
[gemini]
name = "Google Gemini"
api_key = "sk-test"

  [gemini.llm]
  type = "llm"
  base_url = "https://generativelanguage.googleapis.com/v1beta/openai"
  model = "gemini-2.5-pro"
        "#;

        let config: ProvidersConfig = toml::from_str(toml_str).unwrap();

        assert!(config.get_service("gemini").is_err());
        assert!(config.get_service("missing.llm").is_err());
        assert!(config.get_service("gemini.embed").is_err());
    }
}
