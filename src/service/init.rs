use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::ui::Output;

/// providers.toml 模板（需要用户填入 API key）
const PROVIDERS_TEMPLATE: &str = r#"# Fanout provider configuration
# Reference services from config.toml as "<provider>.<service>", e.g. "gemini.llm"

[gemini]
name = "Google Gemini"
api_key = ""

  [gemini.llm]
  type = "llm"
  base_url = "https://generativelanguage.googleapis.com/v1beta/openai"
  model = "gemini-2.5-pro"
  # timeout_secs = 60
"#;

/// 显式初始化（带用户反馈）
/// local: true 表示在本地目录初始化，false 表示在全局目录初始化
pub fn initialize(local: bool) -> Result<()> {
    let output = Output::new();
    let config_dir = AppConfig::get_fanout_dir(local);
    let config_path = config_dir.join("config.toml");
    let location = AppConfig::get_scope_name(local, false);

    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create config directory: {}", config_dir.display()))?;

    if config_path.exists() {
        output.resource_action("Found", "config", &config_path);
    } else {
        let config = AppConfig::default();
        config.save_to(&config_dir)?;
        output.resource_action("Creating", "config", &config_path);
    }

    // providers.toml 始终放在全局目录（API key 不随项目走）
    let created_providers = ensure_providers_template(&output)?;
    if created_providers {
        eprintln!();
        output.note("Edit providers.toml and set your api_key before running a fan-out");
    }

    output.finish("initialization", location);

    Ok(())
}

/// 自动初始化（带提示）
/// 确保全局配置文件和 providers 模板存在
/// 返回是否进行了初始化
pub fn ensure_initialized() -> Result<bool> {
    let output = Output::new();
    let mut initialized = false;

    let global_dir = AppConfig::global_fanout_dir();
    let global_config_path = global_dir.join("config.toml");
    if !global_config_path.exists() && !AppConfig::has_local_config() {
        AppConfig::default().save_to(&global_dir)?;
        output.resource_action("Creating", "config", &global_config_path);
        initialized = true;
    }

    if ensure_providers_template(&output)? {
        initialized = true;
    }

    Ok(initialized)
}

/// 全局 providers.toml 不存在时写入模板，返回是否新建
fn ensure_providers_template(output: &Output) -> Result<bool> {
    let providers_path = crate::config::ProvidersConfig::get_config_path()?;

    if providers_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = providers_path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    std::fs::write(&providers_path, PROVIDERS_TEMPLATE)
        .with_context(|| format!("Failed to write providers template: {}", providers_path.display()))?;
    output.resource_action("Creating", "providers", &providers_path);

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProvidersConfig;

    #[test]
    fn test_providers_template_parses() {
        let config: ProvidersConfig = toml::from_str(PROVIDERS_TEMPLATE).unwrap();
        let resolved = config.get_service("gemini.llm").unwrap();
        assert_eq!(resolved.model, "gemini-2.5-pro");
        assert!(resolved.api_key.is_empty());
    }
}
