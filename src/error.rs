//! 全局错误类型定义
//! 单个URL的探测失败不会走到这里，只记录在 ScanRow::error 中

use std::io::Error as IoError;
use std::path::PathBuf;

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirProbeError {
    // 输入文件相关错误
    #[error("打开输入文件失败 {path}: {source}")]
    InputOpen {
        path: PathBuf,
        #[source]
        source: IoError,
    },
    #[error("读取输入文件失败 {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: IoError,
    },
    #[error("无效输入：{0}")]
    InvalidInput(String),

    // 网络相关错误
    #[error("HTTP客户端构建失败：{0}")]
    HttpClientBuild(#[from] reqwest::Error),

    // 报告相关错误
    #[error("写入报告文件失败 {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: IoError,
    },
    #[error("删除源文件失败 {path}: {source}")]
    SourceDelete {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
}

// 全局Result类型
pub type ProbeResult<T> = Result<T, DirProbeError>;
