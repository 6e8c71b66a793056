//! 工具模块
pub mod detection_updater;
pub mod header_converter;
#[cfg(test)]
pub(crate) mod test_server;

pub use self::detection_updater::{DetectionUpdater, NOT_AVAILABLE};
pub use self::header_converter::HeaderConverter;
