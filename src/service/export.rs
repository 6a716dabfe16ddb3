use anyhow::{Context, Result};
use dialoguer::Confirm;
use std::path::{Path, PathBuf};

use crate::models::FanoutResult;
use crate::ui::Output;

/// 默认导出文件名：fanout_<model>_<时间戳>.<ext>
pub fn default_export_name(model: &str, ext: &str) -> String {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    format!("fanout_{}_{}.{}", model, stamp, ext)
}

/// 解析导出路径：空路径表示使用默认文件名
fn resolve_export_path(path: PathBuf, model: &str, ext: &str) -> PathBuf {
    if path.as_os_str().is_empty() {
        PathBuf::from(default_export_name(model, ext))
    } else {
        path
    }
}

/// 目标文件已存在时要求用户确认覆盖
fn confirm_overwrite(path: &Path, output: &Output) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }

    let overwrite = Confirm::new()
        .with_prompt(format!("{} already exists, overwrite?", path.display()))
        .default(false)
        .interact()
        .context("Failed to read confirmation")?;

    if !overwrite {
        output.note("Export skipped");
    }

    Ok(overwrite)
}

/// 导出 CSV（行结构与终端查询列表一致）
pub fn export_csv(
    result: &FanoutResult,
    model: &str,
    path: PathBuf,
    output: &Output,
) -> Result<()> {
    let path = resolve_export_path(path, model, "csv");
    if !confirm_overwrite(&path, output)? {
        return Ok(());
    }

    let file = std::fs::File::create(&path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    write_csv(result, file)?;

    output.status(
        "Exporting",
        &format!("{} ({} rows)", path.display(), result.actual_count()),
    );

    Ok(())
}

fn write_csv<W: std::io::Write>(result: &FanoutResult, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record([
        "query",
        "type",
        "user_intent",
        "related_faq",
        "industry_usage",
        "reasoning",
    ])?;

    for q in &result.queries {
        wtr.write_record([
            q.query.as_str(),
            q.query_type.as_str(),
            q.user_intent.as_deref().unwrap_or(""),
            q.related_faq.as_deref().unwrap_or(""),
            q.industry_usage.as_deref().unwrap_or(""),
            q.reasoning.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// 导出 JSON（完整结果，含生成决策信息）
pub fn export_json(
    result: &FanoutResult,
    model: &str,
    path: PathBuf,
    output: &Output,
) -> Result<()> {
    let path = resolve_export_path(path, model, "json");
    if !confirm_overwrite(&path, output)? {
        return Ok(());
    }

    let content =
        serde_json::to_string_pretty(result).context("Failed to serialize fan-out result")?;
    std::fs::write(&path, content + "\n")
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;

    output.status(
        "Exporting",
        &format!("{} ({} queries)", path.display(), result.actual_count()),
    );

    Ok(())
}
