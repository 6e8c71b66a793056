//! 扫描结果数据模型定义
//! 仅存储结果数据，支持序列化/反序列化

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ProbeResult;
use crate::utils::NOT_AVAILABLE;

/// 单个URL的探测结果，error为空表示成功
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRow {
    pub url: String,
    pub title: String,
    pub components: Vec<String>,
    pub error: String,
}

impl ScanRow {
    /// 以占位符初始化
    pub fn pending(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: NOT_AVAILABLE.to_string(),
            components: vec![NOT_AVAILABLE.to_string()],
            error: String::new(),
        }
    }

    /// 直接构造失败结果
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Self::pending(url)
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }
}

// ======== 用于 CLI 输出 ========
impl fmt::Display for ScanRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            write!(f, "{} [{}] {}", self.url, self.title, self.components.join(", "))
        } else {
            write!(f, "{} !! {}", self.url, self.error)
        }
    }
}

/// 单次扫描的汇总结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
    /// 命中状态码的行数
    pub matched_lines: usize,
    pub total_urls: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// 与去重后的URL列表同序
    pub rows: Vec<ScanRow>,
}

impl ScanResponse {
    /// 由解析结果与探测结果组装，成功/失败数由行推导
    pub fn assemble(matched_lines: usize, total_urls: usize, rows: Vec<ScanRow>) -> Self {
        let succeeded = rows.iter().filter(|row| row.is_success()).count();
        Self {
            report_path: None,
            matched_lines,
            total_urls,
            succeeded,
            failed: rows.len() - succeeded,
            rows,
        }
    }

    /// 格式化JSON输出
    pub fn to_pretty_json(&self) -> ProbeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_derives_counts_from_rows() {
        let mut ok = ScanRow::pending("http://x/a");
        ok.title = "A".to_string();
        let rows = vec![ok, ScanRow::failed("http://x/b", "HTTP 500"), ScanRow::failed("http://x/c", "timeout")];

        let response = ScanResponse::assemble(5, 3, rows);
        assert_eq!(response.succeeded, 1);
        assert_eq!(response.failed, 2);
        assert_eq!(response.total_urls, 3);
        assert_eq!(response.matched_lines, 5);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let response = ScanResponse::assemble(1, 1, vec![ScanRow::pending("http://x/a")]);
        let json = response.to_pretty_json().unwrap();
        assert!(json.contains("\"matchedLines\": 1"));
        assert!(json.contains("\"totalUrls\": 1"));
        assert!(!json.contains("reportPath"));

        let back: ScanResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back, response);
    }
}
