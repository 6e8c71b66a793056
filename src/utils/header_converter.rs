//! Header读取工具

use reqwest::header::HeaderMap;

/// Header转换工具
pub struct HeaderConverter;

impl HeaderConverter {
    /// 取指定Header的首个值（去除首尾空白），不存在或为空返回None
    /// 非UTF-8字节按替换字符处理，不丢弃
    pub fn first_value(header_map: &HeaderMap, name: &str) -> Option<String> {
        let value = header_map.get(name)?;
        let text = String::from_utf8_lossy(value.as_bytes());
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_first_value_trims_and_skips_blank() {
        let mut headers = HeaderMap::new();
        headers.insert("server", HeaderValue::from_static("  nginx/1.25 "));
        headers.insert("via", HeaderValue::from_static("   "));

        assert_eq!(HeaderConverter::first_value(&headers, "Server").as_deref(), Some("nginx/1.25"));
        assert_eq!(HeaderConverter::first_value(&headers, "Via"), None);
        assert_eq!(HeaderConverter::first_value(&headers, "X-Powered-By"), None);
    }
}
