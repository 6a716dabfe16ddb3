use console::Style;
use std::path::Path;

use crate::models::{ExpandedQuery, FanoutResult, ModelInfo};

/// 命令行输出格式化工具
/// 提供统一的 Cargo 风格输出
pub struct Output {
    green: Style,
    bold: Style,
    dim: Style,
}

impl Output {
    pub fn new() -> Self {
        Self {
            green: Style::new().green().bold(),
            bold: Style::new().bold(),
            dim: Style::new().dim(),
        }
    }

    /// 显示状态消息（如 "Generating fan-out ..."）
    /// 格式: "  Generating fan-out ..."（动词右对齐到 12 字符）
    pub fn status(&self, action: &str, target: &str) {
        eprintln!("{:>12} {}", self.green.apply_to(action), target);
    }

    /// 显示创建/查找资源消息
    /// 格式: "    Creating config at /path/to/config"
    pub fn resource_action(&self, action: &str, resource: &str, path: &Path) {
        eprintln!(
            "{:>12} {} at {}",
            self.green.apply_to(action),
            resource,
            path.display()
        );
    }

    /// 显示完成消息
    /// 格式: "    Finished action for scope"
    /// 自动在前面添加空行
    pub fn finish(&self, action: &str, scope: &str) {
        eprintln!();
        eprintln!(
            "{:>12} {} for {} scope",
            self.green.apply_to("Finished"),
            action,
            scope
        );
    }

    /// 显示注意事项（右对齐）
    pub fn note(&self, message: &str) {
        eprintln!("{:>12} {}", self.dim.apply_to("Note"), message);
    }

    /// 显示警告（黄色，右对齐）
    /// 自动在前面添加空行
    pub fn warning(&self, message: &str) {
        eprintln!();
        eprintln!(
            "{:>12} {}",
            Style::new().yellow().bold().apply_to("Warning"),
            message
        );
        eprintln!();
    }

    /// 显示错误（红色，右对齐）
    pub fn error(&self, message: &str) {
        eprintln!(
            "{:>12} {}",
            Style::new().red().bold().apply_to("Error"),
            message
        );
    }

    /// 显示扇出结果摘要：生成策略 + 目标数/实际数/模型
    pub fn fanout_summary(&self, result: &FanoutResult, model: &str) {
        eprintln!();
        eprintln!(
            "{:>12} {}",
            self.green.apply_to("Strategy"),
            result.count_reasoning
        );
        eprintln!(
            "{:>12} {} {}",
            self.green.apply_to("Target"),
            result.target_count,
            self.dim.apply_to("queries")
        );
        eprintln!(
            "{:>12} {} {}",
            self.green.apply_to("Generated"),
            result.actual_count(),
            self.dim.apply_to("queries")
        );
        eprintln!("{:>12} {}", self.green.apply_to("Model"), model);
        eprintln!();
    }

    /// 显示单条合成查询
    /// 格式: "[1/20] (Reformulation) query text"
    ///       "       intent: ..."（可选字段）
    ///       "       reasoning text"
    fn query_item(&self, index: usize, total: usize, item: &ExpandedQuery) {
        let index_part = format!("{}/{}", index, total);

        println!(
            "[{}] {} {}",
            self.dim.apply_to(&index_part),
            self.dim.apply_to(format!("({})", item.query_type)),
            self.bold.apply_to(&item.query),
        );

        // 缩进对齐到 "[index] " 之后
        let indent = " ".repeat(index_part.len() + 3);

        if let Some(intent) = &item.user_intent {
            println!("{}{}", indent, self.dim.apply_to(format!("intent: {}", intent)));
        }
        if let Some(faq) = &item.related_faq {
            println!("{}{}", indent, self.dim.apply_to(format!("faq: {}", faq)));
        }
        if let Some(usage) = &item.industry_usage {
            println!("{}{}", indent, self.dim.apply_to(format!("industry: {}", usage)));
        }

        for line in item.reasoning.lines() {
            println!("{}{}", indent, line);
        }
    }

    /// 显示合成查询列表（自动处理分隔和格式化）
    pub fn query_results(&self, queries: &[ExpandedQuery]) {
        let total = queries.len();
        for (i, item) in queries.iter().enumerate() {
            self.query_item(i + 1, total, item);

            // 只在非最后一个结果后添加空行分隔
            if i < queries.len() - 1 {
                println!();
            }
        }
    }

    /// 显示模型目录
    pub fn model_list(&self, catalog: &[ModelInfo], fallback: &str) {
        for model in catalog {
            let marker = if model.id == fallback {
                self.dim.apply_to(" (fallback)").to_string()
            } else {
                String::new()
            };
            println!(
                "{} {}{}",
                self.bold.apply_to(model.id),
                self.dim.apply_to(format!("({})", model.name)),
                marker
            );
            println!("    {}", model.description);
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
