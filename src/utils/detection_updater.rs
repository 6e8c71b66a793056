//! 检测结果收集工具
//! 按首次出现顺序保存组件，忽略大小写去重

use std::collections::HashSet;

/// 组件占位符
pub const NOT_AVAILABLE: &str = "N/A";

/// 检测结果收集器，作用域仅限一次检测调用
#[derive(Debug, Default)]
pub struct DetectionUpdater {
    components: Vec<String>,
    seen: HashSet<String>,
}

impl DetectionUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加组件：空白值忽略，大小写不敏感重复项忽略，保留首次写法
    pub fn update(&mut self, value: impl AsRef<str>) {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return;
        }

        if self.seen.insert(trimmed.to_lowercase()) {
            self.components.push(trimmed.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// 输出最终列表，无结果时返回 ["N/A"]
    pub fn finish(self) -> Vec<String> {
        if self.components.is_empty() {
            return vec![NOT_AVAILABLE.to_string()];
        }
        self.components
    }
}
