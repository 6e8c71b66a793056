//! 检测器核心：整合各类分析器，输出组件列表
use reqwest::header::HeaderMap;

use super::analyzer::{BodyAnalyzer, HeaderAnalyzer, MetaAnalyzer};
use crate::utils::DetectionUpdater;

/// 组件检测器（无状态）
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentDetector;

impl ComponentDetector {
    /// 核心检测接口（HeaderMap + Body + meta generator）
    /// 顺序：响应头 → meta generator → 正文特征；无结果时返回 ["N/A"]
    pub fn detect(headers: &HeaderMap, body: &[u8], generator: &str) -> Vec<String> {
        let mut detected = DetectionUpdater::new();

        HeaderAnalyzer::analyze(headers, &mut detected);
        MetaAnalyzer::analyze(generator, &mut detected);
        BodyAnalyzer::analyze(body, &mut detected);

        detected.finish()
    }
}

/// 对外暴露的简化接口
pub fn detect_components(headers: &HeaderMap, body: &[u8], generator: &str) -> Vec<String> {
    ComponentDetector::detect(headers, body, generator)
}
