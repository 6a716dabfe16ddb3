use thiserror::Error;

/// LLM 调用边界的两类错误
///
/// Service：外部生成服务本身调用失败（网络、鉴权、配额、未知模型），
/// 原样上抛并附带触发的模型 ID，不自动重试。
/// MalformedResponse：调用成功但响应文本无法规范化为扇出结果，
/// 携带原始文本用于诊断，不做部分恢复。
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("LLM service error (model '{model}'): {message}")]
    Service { model: String, message: String },

    #[error("Malformed LLM response: {message}")]
    MalformedResponse { message: String, raw: String },
}

impl LlmError {
    /// 是否为服务侧错误（调用方据此提示兜底模型）
    pub fn is_service_error(&self) -> bool {
        matches!(self, LlmError::Service { .. })
    }
}
