//! 扫描请求配置，存储单次扫描的所有可配置项

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ProbeResult;

/// 默认并发数
pub const DEFAULT_CONCURRENCY: usize = 30;
/// 并发数上限
pub const MAX_CONCURRENCY: usize = 100;
/// 默认单请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
/// 单请求超时上限（秒）
pub const MAX_TIMEOUT_SECS: u64 = 120;

/// 单次扫描请求
/// 数值字段为0表示未设置，归一化时回落到默认值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanRequest {
    // 目录扫描结果文件路径
    pub input_file_path: PathBuf,
    // 报告输出目录，为空时写到输入文件所在目录
    pub output_dir: Option<PathBuf>,
    pub concurrency: usize,
    pub timeout_seconds: u64,
    pub follow_redirect: bool,
    // 扫描完成后删除源文件
    pub delete_source_after_run: bool,
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self {
            input_file_path: PathBuf::new(),
            output_dir: None,
            concurrency: DEFAULT_CONCURRENCY,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            follow_redirect: false,
            delete_source_after_run: false,
        }
    }
}

impl ScanRequest {
    /// 构建器入口
    pub fn builder(input_file_path: impl Into<PathBuf>) -> ScanRequestBuilder {
        ScanRequestBuilder::new(input_file_path)
    }

    /// 从JSON文件加载请求（字段名为camelCase，缺省字段取默认值）
    pub fn from_json_file(path: &Path) -> ProbeResult<Self> {
        let data = std::fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// 归一化：填充默认值并钳制到合法区间，重复调用结果不变
    pub fn normalize(mut self) -> Self {
        if self.concurrency == 0 {
            self.concurrency = DEFAULT_CONCURRENCY;
        }
        if self.timeout_seconds == 0 {
            self.timeout_seconds = DEFAULT_TIMEOUT_SECS;
        }
        self.concurrency = self.concurrency.min(MAX_CONCURRENCY);
        self.timeout_seconds = self.timeout_seconds.min(MAX_TIMEOUT_SECS);
        self
    }
}

/// 请求构建器（便于自定义配置）
#[derive(Debug, Clone)]
pub struct ScanRequestBuilder {
    request: ScanRequest,
}

impl ScanRequestBuilder {
    pub fn new(input_file_path: impl Into<PathBuf>) -> Self {
        Self {
            request: ScanRequest {
                input_file_path: input_file_path.into(),
                ..ScanRequest::default()
            },
        }
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.request.output_dir = Some(dir.into());
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.request.concurrency = concurrency;
        self
    }

    pub fn timeout_seconds(mut self, timeout: u64) -> Self {
        self.request.timeout_seconds = timeout;
        self
    }

    pub fn follow_redirect(mut self, follow: bool) -> Self {
        self.request.follow_redirect = follow;
        self
    }

    pub fn delete_source_after_run(mut self, delete: bool) -> Self {
        self.request.delete_source_after_run = delete;
        self
    }

    /// 构建并归一化
    pub fn build(self) -> ScanRequest {
        self.request.normalize()
    }
}
