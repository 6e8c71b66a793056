//! 检测模块：组件指纹识别核心逻辑
pub mod analyzer;
pub mod detector;

// 导出核心接口
pub use self::analyzer::{BODY_MARKERS, BodyMarker, FINGERPRINT_HEADERS};
pub use self::detector::{ComponentDetector, detect_components};
