//! 检测分析器：分别处理Header、Meta、页面正文三类信号
use reqwest::header::HeaderMap;
use tracing::debug;

use crate::utils::{DetectionUpdater, HeaderConverter};

/// 参与识别的响应头，按输出顺序排列
pub const FINGERPRINT_HEADERS: [&str; 5] = [
    "Server",
    "X-Powered-By",
    "Via",
    "X-AspNet-Version",
    "X-AspNetMvc-Version",
];

/// 页面特征：命中任一子串即输出标签（子串均为小写）
pub struct BodyMarker {
    pub name: &'static str,
    pub contains: &'static [&'static str],
}

pub const BODY_MARKERS: &[BodyMarker] = &[
    BodyMarker { name: "WordPress", contains: &["wp-content", "wordpress"] },
    BodyMarker { name: "Drupal", contains: &["drupal-settings-json", "drupal"] },
    BodyMarker { name: "Joomla", contains: &["content=\"joomla", "joomla!"] },
    BodyMarker { name: "Next.js", contains: &["__next", "next.js"] },
    BodyMarker { name: "Nuxt", contains: &["__nuxt", "nuxt"] },
    BodyMarker { name: "React", contains: &["reactroot", "data-reactroot", "react-dom"] },
    BodyMarker { name: "Vue", contains: &["data-v-", "vue.js", "vue.runtime"] },
    BodyMarker { name: "ASP.NET", contains: &["__viewstate", "asp.net"] },
    BodyMarker { name: "PHP", contains: &[".php", "<?php", "php/"] },
    BodyMarker { name: "Java", contains: &["jsessionid", "java servlet", "jsp"] },
];

/// Header分析器
pub struct HeaderAnalyzer;

impl HeaderAnalyzer {
    pub fn analyze(headers: &HeaderMap, detected: &mut DetectionUpdater) {
        for name in FINGERPRINT_HEADERS {
            if let Some(value) = HeaderConverter::first_value(headers, name) {
                detected.update(format!("{}: {}", name, value));
            }
        }
    }
}

/// Meta分析器
pub struct MetaAnalyzer;

impl MetaAnalyzer {
    pub fn analyze(generator: &str, detected: &mut DetectionUpdater) {
        let generator = generator.trim();
        if !generator.is_empty() {
            detected.update(format!("Meta Generator: {}", generator));
        }
    }
}

/// 正文分析器
pub struct BodyAnalyzer;

impl BodyAnalyzer {
    pub fn analyze(body: &[u8], detected: &mut DetectionUpdater) {
        if body.is_empty() {
            return;
        }

        let lower_body = String::from_utf8_lossy(body).to_lowercase();
        for marker in BODY_MARKERS {
            if let Some(token) = marker.contains.iter().find(|t| lower_body.contains(**t)) {
                debug!("正文匹配成功：技术={}，特征={}", marker.name, token);
                detected.update(marker.name);
            }
        }
    }
}
