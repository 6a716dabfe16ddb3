use anyhow::Result;
use std::path::PathBuf;

use crate::config::{AppConfig, ProvidersConfig};
use crate::llm::{generate_fanout, ContractVersion, LlmClient, LlmError};
use crate::models::{find_model, FanoutMode, FanoutRequest, FALLBACK_MODEL};
use crate::service::export;
use crate::ui::Output;

pub struct RunOptions {
    pub query: String,
    pub mode: Option<FanoutMode>,
    pub model: Option<String>,
    pub contract: Option<ContractVersion>,
    pub csv: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub force_local: bool,
    pub force_global: bool,
}

/// 执行一次查询扇出：加载配置 → 调用模型 → 展示 → 导出
pub async fn run(options: RunOptions) -> Result<()> {
    let RunOptions {
        query,
        mode,
        model,
        contract,
        csv,
        json,
        force_local,
        force_global,
    } = options;
    let output = Output::new();

    let _initialized = crate::service::init::ensure_initialized()?;

    let providers = ProvidersConfig::load()?;
    let config = AppConfig::load_with_scope(force_local, force_global)?;

    let request = FanoutRequest::new(query, mode.unwrap_or(config.default_mode))?;
    let contract = contract.unwrap_or(config.contract);

    let llm_config = config.resolve_llm(&providers)?;
    if llm_config.api_key.trim().is_empty() {
        anyhow::bail!(
            "API key is not set. Edit {} and fill in api_key",
            ProvidersConfig::get_config_path()?.display()
        );
    }

    let client = LlmClient::from_resolved(&llm_config, model.as_deref(), config.temperature)?;

    let model_label = match find_model(client.model()) {
        Some(info) => format!("{} ({})", info.name, info.id),
        None => client.model().to_string(),
    };
    output.status(
        "Generating",
        &format!(
            "fan-out with {} [{} mode, contract {}]",
            model_label,
            request.mode().as_str(),
            contract.as_str()
        ),
    );

    let result = match generate_fanout(&client, &request, contract).await {
        Ok(result) => result,
        Err(err) => {
            if err.is_service_error() {
                output.note(&format!(
                    "If this is a quota or unknown-model error, retry with --model {}",
                    FALLBACK_MODEL
                ));
            }
            if let LlmError::MalformedResponse { raw, .. } = &err {
                tracing::debug!("Raw response that failed to normalize: {}", raw);
            }
            return Err(err.into());
        }
    };

    output.fanout_summary(&result, client.model());

    if result.queries.is_empty() {
        output.warning("Response parsed, but the expanded query list was empty");
    } else {
        output.query_results(&result.queries);
    }

    if !result.matches_target() {
        eprintln!();
        output.note(&format!(
            "Model generated {} of {} target queries",
            result.actual_count(),
            result.target_count
        ));
    }

    if let Some(path) = csv {
        export::export_csv(&result, client.model(), path, &output)?;
    }
    if let Some(path) = json {
        export::export_json(&result, client.model(), path, &output)?;
    }

    output.finish(
        "fan-out",
        AppConfig::get_scope_name(force_local, force_global),
    );

    Ok(())
}
