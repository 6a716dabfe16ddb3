use crate::models::{FALLBACK_MODEL, MODEL_CATALOG};
use crate::ui::Output;

/// 列出内置模型目录
pub fn list_models() {
    let output = Output::new();
    output.model_list(MODEL_CATALOG, FALLBACK_MODEL);
}
