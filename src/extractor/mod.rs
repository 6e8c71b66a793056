//! 提取模块：HTML信号提取
pub mod html_extractor;

pub use self::html_extractor::{HtmlExtractor, HtmlSignals, extract_html_signals};
