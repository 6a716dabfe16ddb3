use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ResolvedService;

use super::error::LlmError;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// OpenAI 兼容格式的对话客户端
///
/// 每次调用发出一个请求并阻塞等待，不重试、不支持中途取消，
/// 超时策略由 HTTP 客户端承担。
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

/// 要求服务端返回 JSON 对象（模型未必严格遵守，规范化时仍需设防）
#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl LlmClient {
    /// 从 providers.toml 解析的服务配置创建客户端
    ///
    /// `model_override` 优先于服务配置里的模型 ID，
    /// 超时可通过服务配置的 `timeout_secs` 调整。
    pub fn from_resolved(
        resolved: &ResolvedService,
        model_override: Option<&str>,
        temperature: f32,
    ) -> Result<Self> {
        let timeout_secs = resolved
            .get_int("timeout_secs")
            .map(|v| v as u64)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key: resolved.api_key.clone(),
            model: model_override.unwrap_or(&resolved.model).to_string(),
            base_url: resolved.base_url.clone(),
            temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// 发送单轮对话请求，返回模型的原始文本
    ///
    /// 所有失败路径统一归为 Service 错误并附带模型 ID。
    pub async fn chat(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| self.service_error(format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(self.service_error(format!("HTTP {}: {}", status, error_text.trim())));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| self.service_error(format!("Failed to decode response envelope: {}", e)))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| self.service_error("Response has no choices".to_string()))
    }

    fn service_error(&self, message: String) -> LlmError {
        LlmError::Service {
            model: self.model.clone(),
            message,
        }
    }
}
