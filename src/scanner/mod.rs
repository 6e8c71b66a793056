//! 扫描模块：数据模型、并发调度与任务编排
pub mod job;
pub mod model;
pub mod scheduler;

// 导出核心接口
pub use self::job::{run_scan_job, scan_file};
pub use self::model::{ScanResponse, ScanRow};
pub use self::scheduler::{ScanScheduler, TASK_ABORTED, run_scan};
