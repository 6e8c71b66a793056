//! rsdirprobe - 目录扫描结果二次探测工具
//! 解析 dirsearch 等工具的输出，并发请求命中URL，提取标题与技术指纹，追加Markdown报告

// 导出全局错误类型
pub use self::error::{DirProbeError, ProbeResult};

// 导出配置模块
pub use self::config::{
    DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS, MAX_CONCURRENCY, MAX_TIMEOUT_SECS, ScanRequest,
    ScanRequestBuilder,
};

// 导出输入解析接口
pub use self::parser::{ParsedInput, parse_input_file};

// 导出提取模块核心接口
pub use self::extractor::{HtmlExtractor, HtmlSignals, extract_html_signals};

// 导出检测模块核心接口
pub use self::detector::{ComponentDetector, detect_components};

// 导出请求模块核心接口
pub use self::fetcher::{FetchOutcome, build_client, fetch_raw, scan_url};

// 导出扫描模块核心接口
pub use self::scanner::{
    ScanResponse, ScanRow, ScanScheduler, run_scan, run_scan_job, scan_file,
};

// 导出报告模块核心接口
pub use self::report::{append_markdown_report, escape_markdown_cell};

// 导出工具模块核心接口
pub use self::utils::{DetectionUpdater, HeaderConverter, NOT_AVAILABLE};

// 声明所有子模块
pub mod config;
pub mod detector;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod parser;
pub mod report;
pub mod scanner;
pub mod utils;
