use crate::models::{FanoutDocument, FanoutRequest, FanoutResult};

use super::client::LlmClient;
use super::error::LlmError;
use super::prompt::{build_fanout_prompt, ContractVersion};
use super::utils::{extract_json_object, strip_code_fences, truncate_chars};

/// 将模型的原始响应文本规范化为扇出结果
///
/// 处理顺序：去首尾空白 → 剥离代码围栏 → 按声明的 schema 解析。
/// 直接解析失败时回退到大括号配平提取第一个顶层 JSON 对象再试一次。
/// 单次转换，全有或全无：不重试、不抢救部分字段。
pub fn normalize_response(raw: &str) -> Result<FanoutResult, LlmError> {
    let candidate = strip_code_fences(raw);

    let parse_err = match serde_json::from_str::<FanoutDocument>(candidate) {
        Ok(doc) => return Ok(doc.into()),
        Err(e) => e,
    };

    if let Some(extracted) = extract_json_object(raw) {
        if extracted != candidate {
            if let Ok(doc) = serde_json::from_str::<FanoutDocument>(extracted) {
                return Ok(doc.into());
            }
        }
    }

    Err(LlmError::MalformedResponse {
        message: parse_err.to_string(),
        raw: raw.to_string(),
    })
}

/// 扇出主流程：构建提示词 → 调用模型 → 规范化
pub async fn generate_fanout(
    client: &LlmClient,
    request: &FanoutRequest,
    contract: ContractVersion,
) -> Result<FanoutResult, LlmError> {
    let prompt = build_fanout_prompt(request, contract);
    let output = client.chat(&prompt).await?;
    tracing::debug!("LLM fan-out output: {}", truncate_chars(&output, 2000));

    let result = normalize_response(&output)?;

    if !result.matches_target() {
        tracing::debug!(
            "Fan-out count mismatch: target={} actual={}",
            result.target_count,
            result.actual_count()
        );
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"{"generation_details":{"target_query_count":2,"reasoning_for_count":"test"},"expanded_queries":[{"query":"a","type":"Reformulation","reasoning":"r1"},{"query":"b","type":"Comparative","reasoning":"r2"}]}"#;

    #[test]
    fn test_round_trip_preserves_order_and_fields() {
        let result = normalize_response(WELL_FORMED).unwrap();

        assert_eq!(result.target_count, 2);
        assert_eq!(result.count_reasoning, "test");
        assert_eq!(result.queries.len(), 2);
        assert_eq!(result.queries[0].query, "a");
        assert_eq!(result.queries[0].query_type, "Reformulation");
        assert_eq!(result.queries[0].reasoning, "r1");
        assert_eq!(result.queries[1].query, "b");
        assert_eq!(result.queries[1].query_type, "Comparative");
        assert_eq!(result.queries[1].reasoning, "r2");
    }

    #[test]
    fn test_fenced_input_matches_unfenced() {
        let fenced = format!("```json\n{}\n```", WELL_FORMED);
        let plain = normalize_response(WELL_FORMED).unwrap();
        let from_fence = normalize_response(&fenced).unwrap();

        assert_eq!(plain.target_count, from_fence.target_count);
        assert_eq!(plain.queries, from_fence.queries);
    }

    #[test]
    fn test_fence_with_surrounding_whitespace() {
        let fenced = format!("  \n```json\n{}\n```\n  ", WELL_FORMED);
        let result = normalize_response(&fenced).unwrap();
        assert_eq!(result.queries.len(), 2);

        let generic_fence = format!("```\n{}\n```", WELL_FORMED);
        let result = normalize_response(&generic_fence).unwrap();
        assert_eq!(result.queries.len(), 2);
    }

    #[test]
    fn test_json_embedded_in_prose_is_extracted() {
        let wrapped = format!("Here is the fan-out you asked for:\n{}\nLet me know!", WELL_FORMED);
        let result = normalize_response(&wrapped).unwrap();
        assert_eq!(result.queries.len(), 2);
    }

    #[test]
    fn test_truncated_input_is_malformed() {
        let truncated = &WELL_FORMED[..WELL_FORMED.len() - 20];
        let err = normalize_response(truncated).unwrap_err();
        match err {
            LlmError::MalformedResponse { raw, .. } => {
                assert_eq!(raw, truncated);
            }
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_non_json_input_is_malformed() {
        let err = normalize_response("I could not generate any queries, sorry.").unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse { .. }));
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        // 合法 JSON 但不符合 schema
        let err = normalize_response(r#"{"queries": ["a", "b"]}"#).unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse { .. }));
    }

    #[test]
    fn test_count_mismatch_is_not_an_error() {
        let doc = r#"{"generation_details":{"target_query_count":20,"reasoning_for_count":"complex"},"expanded_queries":[{"query":"a","type":"Related","reasoning":"r"}]}"#;
        let result = normalize_response(doc).unwrap();
        assert_eq!(result.target_count, 20);
        assert_eq!(result.actual_count(), 1);
        assert!(!result.matches_target());
    }

    #[test]
    fn test_empty_queries_array_is_valid() {
        let doc = r#"{"generation_details":{"target_query_count":0,"reasoning_for_count":"nothing to expand"},"expanded_queries":[]}"#;
        let result = normalize_response(doc).unwrap();
        assert_eq!(result.actual_count(), 0);
        assert!(result.matches_target());
    }

    #[test]
    fn test_optional_contract_fields_survive() {
        let doc = r#"{"generation_details":{"target_query_count":1,"reasoning_for_count":"x"},"expanded_queries":[{"query":"q","type":"FAQ","reasoning":"r","user_intent":"learn","related_faq":"how does it work?","industry_usage":"retail"}]}"#;
        let result = normalize_response(doc).unwrap();
        let q = &result.queries[0];
        assert_eq!(q.user_intent.as_deref(), Some("learn"));
        assert_eq!(q.related_faq.as_deref(), Some("how does it work?"));
        assert_eq!(q.industry_usage.as_deref(), Some("retail"));
    }
}
