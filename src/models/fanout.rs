use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 搜索模式
///
/// simple 对应 AI Overview（概览式扇出），complex 对应 AI Mode（深度扇出），
/// 模式决定提示词中的最小查询数量要求。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FanoutMode {
    #[default]
    Simple,
    Complex,
}

impl FanoutMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FanoutMode::Simple => "simple",
            FanoutMode::Complex => "complex",
        }
    }

    /// 提示词中使用的模式标签（与线上 AI 模式的叫法保持一致）
    pub fn label(&self) -> &'static str {
        match self {
            FanoutMode::Simple => "AI Overview (simple)",
            FanoutMode::Complex => "AI Mode (complex)",
        }
    }
}

/// 扇出请求：原始查询 + 模式，构建后不可变
#[derive(Debug, Clone)]
pub struct FanoutRequest {
    original_query: String,
    mode: FanoutMode,
}

impl FanoutRequest {
    /// 创建扇出请求，拒绝空查询或纯空白查询
    pub fn new(original_query: impl Into<String>, mode: FanoutMode) -> Result<Self> {
        let original_query = original_query.into();
        if original_query.trim().is_empty() {
            anyhow::bail!("Query must not be empty");
        }
        Ok(Self {
            original_query,
            mode,
        })
    }

    pub fn original_query(&self) -> &str {
        &self.original_query
    }

    pub fn mode(&self) -> FanoutMode {
        self.mode
    }
}

/// 模型返回的生成决策信息
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationDetails {
    pub target_query_count: u32,
    pub reasoning_for_count: String,
}

/// 单条合成查询
///
/// `query_type` 为自由分类标签（如 "Reformulation"、"Comparative"），
/// 可选字段随契约版本出现，解析时一律接受。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExpandedQuery {
    pub query: String,
    #[serde(rename = "type")]
    pub query_type: String,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_faq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_usage: Option<String>,
}

/// 模型响应的线上文档结构（与提示词中声明的 schema 一一对应）
#[derive(Debug, Clone, Deserialize)]
pub struct FanoutDocument {
    pub generation_details: GenerationDetails,
    pub expanded_queries: Vec<ExpandedQuery>,
}

/// 规范化后的扇出结果
///
/// `queries.len()` 与 `target_count` 不要求一致，两者由模型独立报告，
/// 不一致只作为展示信息，不是错误。结果之间相互独立，无状态。
#[derive(Debug, Clone, Serialize)]
pub struct FanoutResult {
    pub target_count: u32,
    pub count_reasoning: String,
    pub queries: Vec<ExpandedQuery>,
}

impl FanoutResult {
    pub fn actual_count(&self) -> usize {
        self.queries.len()
    }

    /// 实际生成数是否达到模型自报的目标数
    pub fn matches_target(&self) -> bool {
        self.actual_count() == self.target_count as usize
    }
}

impl From<FanoutDocument> for FanoutResult {
    fn from(doc: FanoutDocument) -> Self {
        Self {
            target_count: doc.generation_details.target_query_count,
            count_reasoning: doc.generation_details.reasoning_for_count,
            queries: doc.expanded_queries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_rejects_empty_query() {
        assert!(FanoutRequest::new("", FanoutMode::Simple).is_err());
        assert!(FanoutRequest::new("   \t\n", FanoutMode::Complex).is_err());
        assert!(FanoutRequest::new("best electric SUV", FanoutMode::Simple).is_ok());
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(FanoutMode::Simple.label(), "AI Overview (simple)");
        assert_eq!(FanoutMode::Complex.label(), "AI Mode (complex)");
        assert_eq!(FanoutMode::Simple.as_str(), "simple");
    }

    #[test]
    fn test_expanded_query_optional_fields() {
        let json = r#"{"query":"a","type":"Reformulation","reasoning":"r"}"#;
        let q: ExpandedQuery = serde_json::from_str(json).unwrap();
        assert_eq!(q.query_type, "Reformulation");
        assert!(q.user_intent.is_none());
        assert!(q.related_faq.is_none());

        let json = r#"{"query":"a","type":"FAQ","reasoning":"r","related_faq":"why?","industry_usage":"auto"}"#;
        let q: ExpandedQuery = serde_json::from_str(json).unwrap();
        assert_eq!(q.related_faq.as_deref(), Some("why?"));
        assert_eq!(q.industry_usage.as_deref(), Some("auto"));
    }

    #[test]
    fn test_result_count_mismatch_is_informational() {
        let result = FanoutResult {
            target_count: 20,
            count_reasoning: "complex query".to_string(),
            queries: vec![ExpandedQuery {
                query: "a".to_string(),
                query_type: "Related".to_string(),
                reasoning: "r".to_string(),
                user_intent: None,
                related_faq: None,
                industry_usage: None,
            }],
        };
        assert_eq!(result.actual_count(), 1);
        assert!(!result.matches_target());
    }
}
