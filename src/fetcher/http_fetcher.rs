//! 单URL探测：GET请求 → 限长读取响应体 → 提取信号 → 识别组件
//! 所有失败都写入 ScanRow::error，不向调用方抛出

use std::error::Error as StdError;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::config::ScanRequest;
use crate::detector::ComponentDetector;
use crate::error::ProbeResult;
use crate::extractor::HtmlExtractor;
use crate::scanner::ScanRow;

/// 固定User-Agent
pub const DEFAULT_USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; rsdirprobe/",
    env!("CARGO_PKG_VERSION"),
    ")"
);
/// 响应体读取上限（2 MiB）
pub const MAX_BODY_SIZE: usize = 2 << 20;
/// 开启跟随时的最大重定向次数
pub const MAX_REDIRECTS: usize = 10;

/// 原始响应
#[derive(Debug)]
pub struct FetchOutcome {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// 最多 MAX_BODY_SIZE 字节；读取中断时为已读部分
    pub body: Vec<u8>,
    pub read_error: Option<String>,
}

/// 按请求配置构建HTTP客户端，整个扫描只构建一次，各worker共享
pub fn build_client(request: &ScanRequest) -> ProbeResult<Client> {
    let redirect_policy = if request.follow_redirect {
        Policy::limited(MAX_REDIRECTS)
    } else {
        // 第一个重定向响应即最终响应
        Policy::none()
    };

    let client = Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .timeout(Duration::from_secs(request.timeout_seconds))
        .redirect(redirect_policy)
        .build()?;
    Ok(client)
}

/// 发送请求并读取响应，连接/超时/DNS等错误以字符串返回
pub async fn fetch_raw(client: &Client, target_url: &str) -> Result<FetchOutcome, String> {
    let url = Url::parse(target_url).map_err(|e| format!("invalid url: {}", e))?;

    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(|e| describe_error(&e))?;

    let status = response.status();
    let headers = response.headers().clone();
    let mut body = Vec::new();
    let mut read_error = None;

    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                let remaining = MAX_BODY_SIZE - body.len();
                if chunk.len() >= remaining {
                    body.extend_from_slice(&chunk[..remaining]);
                    break;
                }
                body.extend_from_slice(&chunk);
            }
            Ok(None) => break,
            Err(e) => {
                read_error = Some(describe_error(&e));
                break;
            }
        }
    }

    Ok(FetchOutcome {
        status,
        headers,
        body,
        read_error,
    })
}

/// 探测单个URL
pub async fn scan_url(client: &Client, target_url: &str) -> ScanRow {
    let mut row = ScanRow::pending(target_url);

    let outcome = match fetch_raw(client, target_url).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("请求失败：{}，错误：{}", target_url, e);
            row.error = e;
            return row;
        }
    };

    // 读取中断也继续分析已读部分
    let signals = HtmlExtractor::extract(&outcome.body);
    if !signals.title.is_empty() {
        row.title = signals.title;
    }
    row.components = ComponentDetector::detect(&outcome.headers, &outcome.body, &signals.generator);
    row.error = classify(outcome.status, outcome.read_error);

    if row.is_success() {
        debug!("探测完成：{}，状态码={}，标题={}", target_url, outcome.status.as_u16(), row.title);
    } else {
        warn!("探测失败：{}，错误：{}", target_url, row.error);
    }
    row
}

/// 仅 >=400 视为失败；3xx（未跟随）按成功处理
fn classify(status: StatusCode, read_error: Option<String>) -> String {
    let code = status.as_u16();
    match (code >= 400, read_error) {
        (true, Some(read_error)) => format!("HTTP {}; {}", code, read_error),
        (true, None) => format!("HTTP {}", code),
        (false, Some(read_error)) => read_error,
        (false, None) => String::new(),
    }
}

/// 拼接错误链，reqwest 顶层错误信息过于笼统
fn describe_error(err: &reqwest::Error) -> String {
    let mut message = if err.is_timeout() {
        format!("timeout: {}", err)
    } else {
        err.to_string()
    };

    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
