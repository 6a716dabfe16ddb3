use once_cell::sync::Lazy;
use std::collections::HashMap;

/// 模型目录条目：展示名 + API 模型 ID + 说明
#[derive(Debug, Clone, Copy)]
pub struct ModelInfo {
    pub name: &'static str,
    pub id: &'static str,
    pub description: &'static str,
}

/// 内置模型目录
///
/// 顺序即推荐顺序，第一项为默认推荐。`--model` 可以传目录之外的自定义 ID。
pub const MODEL_CATALOG: &[ModelInfo] = &[
    ModelInfo {
        name: "Gemini 3.0 Pro (Preview)",
        id: "gemini-3.0-pro-preview",
        description: "Latest V3 architecture, highest reasoning capability, best for complex fan-outs",
    },
    ModelInfo {
        name: "Gemini 2.5 Pro",
        id: "gemini-2.5-pro",
        description: "Industry standard, balanced stability, reasoning and speed",
    },
    ModelInfo {
        name: "Gemini 2.5 Flash",
        id: "gemini-2.5-flash",
        description: "Optimized for high-volume, low-latency tasks and simple queries",
    },
    ModelInfo {
        name: "Gemini Experimental",
        id: "gemini-exp-1114",
        description: "Snapshot of the newest research, may be unstable",
    },
    ModelInfo {
        name: "Gemini 1.5 Pro (Legacy)",
        id: "gemini-1.5-pro",
        description: "Universal fallback when newer models are unavailable",
    },
];

/// 服务报错时建议用户改用的兜底模型（不自动切换）
pub const FALLBACK_MODEL: &str = "gemini-1.5-pro";

static CATALOG_INDEX: Lazy<HashMap<&'static str, &'static ModelInfo>> =
    Lazy::new(|| MODEL_CATALOG.iter().map(|m| (m.id, m)).collect());

/// 按模型 ID 查找目录条目，自定义 ID 返回 None
pub fn find_model(id: &str) -> Option<&'static ModelInfo> {
    CATALOG_INDEX.get(id).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_model_by_id() {
        let model = find_model("gemini-2.5-pro").unwrap();
        assert_eq!(model.name, "Gemini 2.5 Pro");
        assert!(find_model("some-custom-model").is_none());
    }

    #[test]
    fn test_fallback_model_is_in_catalog() {
        assert!(find_model(FALLBACK_MODEL).is_some());
    }
}
