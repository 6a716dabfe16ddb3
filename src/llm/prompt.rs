use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::{FanoutMode, FanoutRequest};

/// 提示词契约版本
///
/// 不同版本只在最小数量阈值、多样性维度和可选字段上有差异，
/// 构建器与规范化器共用这张表，避免逻辑重复。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ContractVersion {
    V1,
    #[default]
    V2,
}

const FANOUT_FRAMEWORK: &str = r#"You are simulating Google's AI Mode query fan-out process.
User Query: "{query}"
Mode: "{mode}"

**Task:**
1. Determine the target number of queries based on: {count_instruction}
2. Generate exactly that many unique synthetic queries.
3. Ensure diversity: {dimensions}.

**Return JSON Only:**
The response must be a valid JSON object with this structure:
{schema}"#;

const COUNT_INSTRUCTION: &str = "First, analyze the user's query: \"{query}\". \
Based on its complexity and the '{mode}' mode, \
**you must decide on an optimal number of queries to generate.** \
This number must be **at least {min_queries}**.";

const V1_SCHEMA: &str = r#"{
  "generation_details": {
    "target_query_count": <integer>,
    "reasoning_for_count": "<string>"
  },
  "expanded_queries": [
    {
      "query": "<string>",
      "type": "<string>",
      "user_intent": "<string>",
      "reasoning": "<string>"
    }
  ]
}"#;

const V2_SCHEMA: &str = r#"{
  "generation_details": {
    "target_query_count": <integer>,
    "reasoning_for_count": "<string>"
  },
  "expanded_queries": [
    {
      "query": "<string>",
      "type": "<string>",
      "user_intent": "<string>",
      "related_faq": "<string, for FAQ-type queries>",
      "industry_usage": "<string, for industry-usage queries>",
      "reasoning": "<string>"
    }
  ]
}"#;

impl ContractVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractVersion::V1 => "v1",
            ContractVersion::V2 => "v2",
        }
    }

    /// 每种模式要求的最小查询数量（策略常量，非推导值）
    pub fn min_queries(&self, mode: FanoutMode) -> u32 {
        match (self, mode) {
            (ContractVersion::V1, FanoutMode::Simple) => 8,
            (ContractVersion::V1, FanoutMode::Complex) => 15,
            (ContractVersion::V2, FanoutMode::Simple) => 10,
            (ContractVersion::V2, FanoutMode::Complex) => 20,
        }
    }

    /// 要求覆盖的多样性维度列表
    pub fn dimensions(&self) -> &'static [&'static str] {
        match self {
            ContractVersion::V1 => &[
                "Reformulations",
                "Related",
                "Implicit",
                "Comparative",
                "Entity Expansions",
                "Personalized",
            ],
            ContractVersion::V2 => &[
                "Reformulations",
                "Related",
                "Implicit",
                "Comparative",
                "Entity Expansions",
                "Personalized",
                "FAQ",
                "Industry Usage",
            ],
        }
    }

    fn schema_block(&self) -> &'static str {
        match self {
            ContractVersion::V1 => V1_SCHEMA,
            ContractVersion::V2 => V2_SCHEMA,
        }
    }
}

/// 将扇出请求确定性渲染为提示词
///
/// 纯函数：相同输入产生字节相同的输出，无时钟、无随机、无副作用。
/// 查询文本原样嵌入，输出 schema 全量写进指令以提高模型遵循度。
pub fn build_fanout_prompt(request: &FanoutRequest, contract: ContractVersion) -> String {
    let mode_label = request.mode().label();
    let min_queries = contract.min_queries(request.mode());

    let count_instruction = COUNT_INSTRUCTION
        .replace("{query}", request.original_query())
        .replace("{mode}", mode_label)
        .replace("{min_queries}", &min_queries.to_string());

    FANOUT_FRAMEWORK
        .replace("{query}", request.original_query())
        .replace("{mode}", mode_label)
        .replace("{count_instruction}", &count_instruction)
        .replace("{dimensions}", &contract.dimensions().join(", "))
        .replace("{schema}", contract.schema_block())
}
