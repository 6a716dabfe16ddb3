use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::llm::ContractVersion;
use crate::models::FanoutMode;

use super::providers::{ProvidersConfig, ResolvedService};

/// 配置作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    Auto,
    Local,
    Global,
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// LLM 服务引用（如 "gemini.llm"）
    pub llm: String,

    /// 提示词契约版本（默认: v2）
    #[serde(default)]
    pub contract: ContractVersion,

    /// 默认搜索模式（默认: simple）
    #[serde(default)]
    pub default_mode: FanoutMode,

    /// 生成温度（默认: 0.7）
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: "gemini.llm".to_string(),
            contract: ContractVersion::default(),
            default_mode: FanoutMode::default(),
            temperature: default_temperature(),
        }
    }
}

impl AppConfig {
    /// 全局 .fanout 目录：~/.fanout/
    pub fn global_fanout_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fanout")
    }

    /// 本地 .fanout 目录：./.fanout/
    pub fn local_fanout_dir() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".fanout")
    }

    /// 检查本地配置是否存在
    /// 注意：如果当前目录是用户主目录，则不认为是本地配置
    pub fn has_local_config() -> bool {
        let current_dir = match std::env::current_dir() {
            Ok(dir) => dir,
            Err(_) => return false,
        };

        let global_parent = Self::global_fanout_dir().parent().map(|p| p.to_path_buf());

        if let Some(home) = global_parent {
            let current_canonical = current_dir.canonicalize().unwrap_or(current_dir.clone());
            let home_canonical = home.canonicalize().unwrap_or(home);

            if current_canonical == home_canonical {
                return false;
            }
        }

        Self::local_fanout_dir().join("config.toml").exists()
    }

    /// 验证作用域标志（不能同时指定 local 和 global）
    pub fn validate_scope_flags(local: bool, global: bool) -> Result<()> {
        if local && global {
            anyhow::bail!("Cannot specify both --local and --global, please choose one");
        }
        Ok(())
    }

    /// 获取当前作用域名称
    /// 返回 "local" 或 "global"
    pub fn get_scope_name(force_local: bool, force_global: bool) -> &'static str {
        if force_local {
            "local"
        } else if force_global {
            "global"
        } else if Self::has_local_config() {
            "local"
        } else {
            "global"
        }
    }

    /// 根据 local 标志获取配置目录
    pub fn get_fanout_dir(local: bool) -> PathBuf {
        if local {
            Self::local_fanout_dir()
        } else {
            Self::global_fanout_dir()
        }
    }

    /// 加载配置：根据 local/global 标志或优先级加载
    /// - local = true: 强制使用本地配置
    /// - global = true: 强制使用全局配置
    /// - 两者都为 false: 优先本地配置，其次全局配置
    pub fn load_with_scope(force_local: bool, force_global: bool) -> Result<Self> {
        Self::validate_scope_flags(force_local, force_global)?;

        let scope = if force_local {
            ConfigScope::Local
        } else if force_global {
            ConfigScope::Global
        } else {
            ConfigScope::Auto
        };

        Self::load_with_scope_internal(scope)
    }

    fn load_with_scope_internal(scope: ConfigScope) -> Result<Self> {
        match scope {
            ConfigScope::Auto => {
                if Self::has_local_config() {
                    Self::load_from_path(&Self::local_fanout_dir().join("config.toml"))
                } else {
                    Self::load_from_path(&Self::global_fanout_dir().join("config.toml"))
                }
            }
            ConfigScope::Local => Self::load_from_path(&Self::local_fanout_dir().join("config.toml")),
            ConfigScope::Global => {
                Self::load_from_path(&Self::global_fanout_dir().join("config.toml"))
            }
        }
    }

    fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Configuration not found at: {}\nRun `fanout init` to create it",
                path.display()
            );
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        tracing::debug!("Loaded app config from: {}", path.display());
        tracing::debug!("LLM service: {}", config.llm);

        Ok(config)
    }

    /// 解析 LLM 服务配置
    pub fn resolve_llm(&self, providers: &ProvidersConfig) -> Result<ResolvedService> {
        providers
            .get_service(&self.llm)
            .with_context(|| format!("Failed to resolve LLM service: {}", self.llm))
    }

    /// 保存配置到指定目录
    pub fn save_to(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let config_path = dir.join("config.toml");
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }
}
