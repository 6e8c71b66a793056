//! Markdown报告输出
//! 追加写入：同一报告文件多次扫描会累积多个章节

use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{DirProbeError, ProbeResult};
use crate::scanner::ScanResponse;
use crate::utils::NOT_AVAILABLE;

/// 报告文件名后缀
pub const REPORT_SUFFIX: &str = "_report.md";

/// 追加一次扫描的报告章节
pub async fn append_markdown_report(
    report_path: &Path,
    input_file_path: &Path,
    response: &ScanResponse,
) -> ProbeResult<()> {
    let section = render_section(input_file_path, response);

    let write_err = |source| DirProbeError::ReportWrite {
        path: report_path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(report_path)
        .await
        .map_err(write_err)?;
    file.write_all(section.as_bytes()).await.map_err(write_err)?;
    file.flush().await.map_err(write_err)?;

    debug!("报告已写入：{}，行数={}", report_path.display(), response.rows.len());
    Ok(())
}

/// 渲染单个报告章节
pub fn render_section(input_file_path: &Path, response: &ScanResponse) -> String {
    let now = Local::now().format("%Y-%m-%d %H:%M:%S");
    let mut out = String::new();
    out.push_str(&format!("## Scan Report - {}\n", now));
    out.push_str(&format!("- Input File: `{}`\n", input_file_path.display()));
    out.push_str(&format!("- Matched Lines: {}\n", response.matched_lines));
    out.push_str(&format!("- Total URLs: {}\n", response.total_urls));
    out.push_str(&format!("- Succeeded: {}\n", response.succeeded));
    out.push_str(&format!("- Failed: {}\n\n", response.failed));
    out.push_str("| URL | Title | Components | Error |\n");
    out.push_str("| --- | --- | --- | --- |\n");

    if response.rows.is_empty() {
        out.push_str("| N/A | N/A | N/A | No URL found in matched lines |\n\n");
        return out;
    }

    for row in &response.rows {
        let components = if row.components.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            row.components.join(", ")
        };
        let error = if row.error.is_empty() { "-" } else { row.error.as_str() };

        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            escape_markdown_cell(&row.url),
            escape_markdown_cell(&row.title),
            escape_markdown_cell(&components),
            escape_markdown_cell(error),
        ));
    }
    out.push('\n');
    out
}

/// 单元格转义：换行统一为 <br/>，竖线转义
pub fn escape_markdown_cell(value: &str) -> String {
    value
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', "<br/>")
        .replace('|', "\\|")
}

/// 报告文件名：<输入文件名去扩展名>_report.md，文件名为空时用 scan
pub fn build_report_file_name(input_file_path: &Path) -> String {
    let base = input_file_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = match base.rfind('.') {
        Some(idx) => &base[..idx],
        None => base.as_str(),
    };
    let stem = if stem.is_empty() { "scan" } else { stem };
    format!("{}{}", stem, REPORT_SUFFIX)
}

/// 报告路径：输出目录为空时使用输入文件所在目录
pub fn resolve_report_path(input_file_path: &Path, output_dir: Option<&Path>) -> PathBuf {
    let dir = output_dir
        .filter(|dir| !dir.as_os_str().to_string_lossy().trim().is_empty())
        .map(|dir| PathBuf::from(dir.to_string_lossy().trim()))
        .or_else(|| {
            input_file_path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
        })
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(build_report_file_name(input_file_path))
}
