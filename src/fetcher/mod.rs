//! 请求模块：HTTP客户端构建与单URL探测
pub mod http_fetcher;

pub use self::http_fetcher::{
    DEFAULT_USER_AGENT, FetchOutcome, MAX_BODY_SIZE, MAX_REDIRECTS, build_client, fetch_raw,
    scan_url,
};
