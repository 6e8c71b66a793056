//! 目录扫描结果解析器
//! 逐行读取，筛选状态码命中行，提取并去重URL

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Error as IoError, ErrorKind, Read};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{DirProbeError, ProbeResult};

/// 单行长度上限
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

// 行首状态码（允许前导ASCII空白，需为完整词元）
// 空白与词边界只按ASCII判断：全角空格、NBSP 不算空白，"200é" 中的 é 不算单词字符
static STATUS_MATCH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\t\n\f\r ]*(200|301|403)(?:[^0-9A-Za-z_]|$)").expect("status regex")
});

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s"'<>]+"#).expect("url regex"));

/// 解析结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    /// 去重后的URL，保持首次出现的顺序
    pub urls: Vec<String>,
    /// 命中状态码的行数（无论是否提取到URL）
    pub matched_lines: usize,
}

/// 解析输入文件
pub fn parse_input_file(path: &Path) -> ProbeResult<ParsedInput> {
    let file = File::open(path).map_err(|source| DirProbeError::InputOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = parse_lines(BufReader::new(file)).map_err(|source| DirProbeError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        "输入文件解析完成：{}，命中行数={}，去重URL数={}",
        path.display(),
        parsed.matched_lines,
        parsed.urls.len()
    );
    Ok(parsed)
}

/// 从任意行读取器解析
pub fn parse_lines<R: BufRead>(mut reader: R) -> Result<ParsedInput, IoError> {
    let mut seen = HashSet::new();
    let mut parsed = ParsedInput::default();
    let mut buf = Vec::new();

    while read_capped_line(&mut reader, &mut buf)? {
        let line = String::from_utf8_lossy(&buf);
        if !STATUS_MATCH_REGEX.is_match(&line) {
            continue;
        }

        parsed.matched_lines += 1;
        let Some(matched) = URL_REGEX.find(&line) else {
            continue;
        };

        let url = matched.as_str();
        if seen.insert(url.to_string()) {
            parsed.urls.push(url.to_string());
        }
    }

    Ok(parsed)
}

/// 读取一行（去掉行尾换行），到达EOF返回false；超过长度上限视为读取错误
fn read_capped_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> Result<bool, IoError> {
    buf.clear();
    let read = reader
        .by_ref()
        .take(MAX_LINE_BYTES as u64 + 1)
        .read_until(b'\n', buf)?;
    if read == 0 {
        return Ok(false);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    if buf.len() > MAX_LINE_BYTES {
        return Err(IoError::new(ErrorKind::InvalidData, "line too long"));
    }
    Ok(true)
}
